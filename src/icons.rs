//! Condition code to icon mapping

use serde::{Deserialize, Serialize};

use crate::models::SunState;

/// Returned for condition codes outside the known vocabulary
pub const UNKNOWN_ICON: &str = "unknown";

/// File extension of every icon in the set
pub const ICON_EXTENSION: &str = ".svg";

/// Which icon table applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPhase {
    #[default]
    Day,
    Night,
}

impl DayPhase {
    /// Night only when the sun is reported below the horizon.
    #[must_use]
    pub fn from_sun(sun: Option<&SunState>) -> Self {
        match sun {
            Some(sun) if sun.is_below_horizon() => Self::Night,
            _ => Self::Day,
        }
    }
}

fn day_icon(condition: &str) -> Option<&'static str> {
    let icon = match condition {
        "clear" => "day",
        "clear-night" => "night",
        "cloudy" => "cloudy",
        "fog" => "cloudy",
        "hail" => "rainy-7",
        "lightning" => "thunder",
        "lightning-rainy" => "thunder",
        "partlycloudy" => "cloudy-day-3",
        "pouring" => "rainy-6",
        "rainy" => "rainy-5",
        "snowy" => "snowy-6",
        "snowy-rainy" => "rainy-7",
        "sunny" => "day",
        "windy" => "cloudy",
        "windy-variant" => "cloudy-day-3",
        "exceptional" => "!!",
        _ => return None,
    };
    Some(icon)
}

fn night_icon(condition: &str) -> Option<&'static str> {
    match condition {
        "clear" | "sunny" => Some("night"),
        "partlycloudy" | "windy-variant" => Some("cloudy-night-3"),
        _ => day_icon(condition),
    }
}

/// Resolve a condition code to an icon identifier.
///
/// Codes are matched case-insensitively; unknown codes yield [`UNKNOWN_ICON`].
#[must_use]
pub fn resolve_icon(condition: &str, phase: DayPhase) -> &'static str {
    let condition = condition.to_lowercase();
    let icon = match phase {
        DayPhase::Day => day_icon(&condition),
        DayPhase::Night => night_icon(&condition),
    };
    icon.unwrap_or(UNKNOWN_ICON)
}

/// Builds icon URLs against a fixed base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSource {
    base: String,
}

impl IconSource {
    #[must_use]
    pub fn new<S: Into<String>>(base: S) -> Self {
        Self { base: base.into() }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Full icon reference: base + identifier + extension
    #[must_use]
    pub fn url(&self, condition: &str, phase: DayPhase) -> String {
        format!("{}{}{}", self.base, resolve_icon(condition, phase), ICON_EXTENSION)
    }
}
