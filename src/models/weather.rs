//! Weather entity attributes and forecast periods

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::EntityState;
use crate::PanelError;

/// Typed view over a weather entity's attribute bag.
///
/// Every field is optional so that a sparse entity still parses. A value of
/// the wrong type reads as missing, and the panel decides per readout what to
/// show when a value is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherAttributes {
    #[serde(default, deserialize_with = "lenient_number")]
    pub temperature: Option<f64>,
    /// Apparent temperature
    #[serde(default, deserialize_with = "lenient_number")]
    pub feelsliketemp: Option<f64>,
    /// Relative humidity in percent
    #[serde(default, deserialize_with = "lenient_number")]
    pub humidity: Option<f64>,
    /// Wind direction in degrees (0-360, where 0/360 is North)
    #[serde(default, deserialize_with = "lenient_number")]
    pub wind_bearing: Option<f64>,
    /// Wind speed in the host's speed unit (km/h on metric hosts)
    #[serde(default, deserialize_with = "lenient_number")]
    pub wind_speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pressure: Option<f64>,
    /// `None` when the entity has no precipitation attribute at all,
    /// `Some(None)` when it reports `null`.
    #[serde(default, deserialize_with = "present_number")]
    pub precipitation: Option<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub visibility: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_forecast")]
    pub forecast: Option<Vec<ForecastPeriod>>,
    /// Condition text already localized by the integration
    #[serde(default, deserialize_with = "lenient_text")]
    pub state_local: Option<String>,
}

impl WeatherAttributes {
    /// Read the attribute bag of a weather entity
    pub fn from_entity(entity: &EntityState) -> crate::Result<Self> {
        serde_json::from_value(Value::Object(entity.attributes.clone()))
            .map_err(|e| PanelError::attributes(&entity.entity_id, e.to_string()))
    }

    /// Forecast periods in the order the entity reported them
    #[must_use]
    pub fn forecast(&self) -> &[ForecastPeriod] {
        self.forecast.as_deref().unwrap_or_default()
    }
}

/// One forecast period as reported by the weather entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastPeriod {
    /// Start of the period, RFC 3339
    #[serde(default, deserialize_with = "text_or_empty")]
    pub datetime: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub condition: String,
    /// High temperature for the period
    #[serde(default, deserialize_with = "lenient_number")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub templow: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub wind_speed: Option<f64>,
    /// Same tri-state as [`WeatherAttributes::precipitation`]
    #[serde(default, deserialize_with = "present_number")]
    pub precipitation: Option<Option<f64>>,
}

// Integrations disagree on whether numbers arrive as JSON numbers or strings.
// Anything else counts as no value, so one odd attribute only blanks its own line.
fn number_from(value: Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(number_from)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer).map(Option::unwrap_or_default)
}

/// `null` is a reported zero; unreadable values are treated as absent.
fn present_number<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Some(None),
        other => number_from(other).map(Some),
    })
}

/// Periods that are not objects are skipped; a non-list forecast is absent.
fn lenient_forecast<'de, D>(deserializer: D) -> Result<Option<Vec<ForecastPeriod>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}
