//! Sun entity model

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::EntityState;

/// Horizon state reported when the sun has set
pub const BELOW_HORIZON: &str = "below_horizon";

/// Typed view over the host's `sun.sun` entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunState {
    /// `above_horizon` or `below_horizon`
    pub state: String,
    /// Next sunrise, if the host reported a readable timestamp
    pub next_rising: Option<DateTime<FixedOffset>>,
    /// Next sunset, if the host reported a readable timestamp
    pub next_setting: Option<DateTime<FixedOffset>>,
}

impl SunState {
    #[must_use]
    pub fn from_entity(entity: &EntityState) -> Self {
        let timestamp = |key: &str| {
            let raw = entity.attributes.get(key)?.as_str()?;
            match DateTime::parse_from_rfc3339(raw) {
                Ok(ts) => Some(ts),
                Err(e) => {
                    warn!("Ignoring unreadable {} '{}' on {}: {}", key, raw, entity.entity_id, e);
                    None
                }
            }
        };

        Self {
            state: entity.state.clone(),
            next_rising: timestamp("next_rising"),
            next_setting: timestamp("next_setting"),
        }
    }

    #[must_use]
    pub fn is_below_horizon(&self) -> bool {
        self.state == BELOW_HORIZON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sun_from_entity() {
        let entity = EntityState::new("sun.sun", "below_horizon")
            .with_attribute("next_rising", json!("2024-06-01T03:25:10.123456+00:00"))
            .with_attribute("next_setting", json!("2024-06-01T19:55:00+00:00"));

        let sun = SunState::from_entity(&entity);
        assert!(sun.is_below_horizon());
        assert_eq!(sun.next_rising.unwrap().timestamp(), 1_717_212_310);
        assert!(sun.next_setting.is_some());
    }

    #[test]
    fn test_sun_with_bad_timestamps() {
        let entity = EntityState::new("sun.sun", "above_horizon")
            .with_attribute("next_rising", json!("tomorrow"))
            .with_attribute("next_setting", json!(42));

        let sun = SunState::from_entity(&entity);
        assert!(!sun.is_below_horizon());
        assert!(sun.next_rising.is_none());
        assert!(sun.next_setting.is_none());
    }
}
