//! Host state snapshot and entity records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use super::SunState;

/// Entity id of the host's sun tracker
pub const SUN_ENTITY_ID: &str = "sun.sun";

/// A single host-managed entity: a state string plus an attribute bag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: String,
    /// Current state (for weather entities, the condition code)
    pub state: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl EntityState {
    /// Create an entity with an empty attribute bag
    #[must_use]
    pub fn new<I: Into<String>, S: Into<String>>(entity_id: I, state: S) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes: Map::new(),
            last_changed: None,
            last_updated: None,
        }
    }

    /// Set one attribute, builder style
    #[must_use]
    pub fn with_attribute<K: Into<String>>(mut self, key: K, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

/// Unit designators configured host-wide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSystem {
    /// Length unit, `km` for metric hosts
    pub length: String,
    /// Temperature unit symbol, e.g. `°C` or `°F`
    pub temperature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<String>,
}

impl UnitSystem {
    #[must_use]
    pub fn metric() -> Self {
        Self {
            length: "km".to_string(),
            temperature: "°C".to_string(),
            mass: Some("g".to_string()),
            volume: Some("L".to_string()),
            pressure: Some("Pa".to_string()),
        }
    }

    #[must_use]
    pub fn imperial() -> Self {
        Self {
            length: "mi".to_string(),
            temperature: "°F".to_string(),
            mass: Some("lb".to_string()),
            volume: Some("gal".to_string()),
            pressure: Some("psi".to_string()),
        }
    }

    /// Whether the host measures length in kilometres
    #[must_use]
    pub fn is_metric(&self) -> bool {
        self.length == "km"
    }
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self::metric()
    }
}

/// Host-wide configuration relevant to display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default)]
    pub unit_system: UnitSystem,
    /// IANA time zone the host displays local times in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// Full snapshot of host state, replaced wholesale on every update.
///
/// Entity records are shared through `Arc` so that an unchanged entity keeps
/// the same slot between snapshots; slot identity is the change signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostState {
    #[serde(default)]
    pub states: HashMap<String, Arc<EntityState>>,
    #[serde(default)]
    pub config: HostConfig,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(
        default,
        rename = "selectedLanguage",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_language: Option<String>,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            states: HashMap::new(),
            config: HostConfig::default(),
            language: default_language(),
            selected_language: None,
        }
    }
}

impl HostState {
    /// Look up an entity slot
    #[must_use]
    pub fn entity(&self, entity_id: &str) -> Option<&Arc<EntityState>> {
        self.states.get(entity_id)
    }

    /// Typed view of the sun entity, if the host has one
    #[must_use]
    pub fn sun(&self) -> Option<SunState> {
        self.entity(SUN_ENTITY_ID).map(|e| SunState::from_entity(e))
    }

    /// The language the user selected, falling back to the host language
    #[must_use]
    pub fn active_language(&self) -> &str {
        self.selected_language
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(&self.language)
    }

    /// Copy of this snapshot with one entity slot replaced.
    ///
    /// All other slots keep their identity.
    #[must_use]
    pub fn with_entity(&self, entity: EntityState) -> Self {
        let mut next = self.clone();
        next.states
            .insert(entity.entity_id.clone(), Arc::new(entity));
        next
    }

    /// Copy of this snapshot without the given entity
    #[must_use]
    pub fn without_entity(&self, entity_id: &str) -> Self {
        let mut next = self.clone();
        next.states.remove(entity_id);
        next
    }
}
