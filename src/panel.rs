//! Panel assembly and the host-facing panel instance
//!
//! [`assemble`] composes icons, units and the forecast strip into a
//! [`PanelView`]. [`WeatherPanel`] wraps it with the host lifecycle: config is
//! set once, state snapshots arrive on every host change, clicks go back up as
//! [`HostEvent`]s.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::change::should_update;
use crate::clock::HostClock;
use crate::config::{PanelConfig, PanelSettings};
use crate::forecast::{ForecastEntry, ForecastProjector};
use crate::icons::{DayPhase, IconSource};
use crate::models::{HostState, WeatherAttributes};
use crate::units::{MeasureKind, Reading, UnitConverter};

/// Grid rows the panel occupies on the dashboard
pub const CARD_SIZE: u32 = 3;

/// Custom element the host instantiates to edit this panel's config
pub const EDITOR_ELEMENT: &str = "weather-panel-editor";

/// Event type the host listens for to open the entity detail dialog
pub const MORE_INFO_EVENT: &str = "hass-more-info";

/// Everything the template renderer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum PanelView {
    /// The watched entity is missing from the host state
    NotAvailable { entity_id: String },
    Weather(Box<WeatherView>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherView {
    pub header: Header,
    pub readouts: Readouts,
    pub forecast: Vec<ForecastEntry>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub icon: String,
    /// Raw condition code as reported by the entity
    pub condition: String,
    pub title: String,
    /// Only shown when the card has a configured name
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readouts {
    pub temperature: Option<Reading>,
    pub feels_like: Option<String>,
    pub humidity: Option<Reading>,
    pub wind_direction: Option<String>,
    pub wind_speed: Option<Reading>,
    pub pressure: Option<Reading>,
    pub moisture: Moisture,
    /// `HH:MM`, absent without a sun entity
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

/// Precipitation when the entity reports it at all, visibility otherwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reading", rename_all = "snake_case")]
pub enum Moisture {
    Precipitation(Reading),
    Visibility(Option<Reading>),
}

/// Upper-case the first character, leave the rest alone
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the display payload for one configuration and host state
#[must_use]
pub fn assemble(config: &PanelConfig, host: &HostState, default_icon_base: &str) -> PanelView {
    let Some(entity) = host.entity(config.entity()) else {
        debug!(entity = config.entity(), "Watched entity not available");
        return PanelView::NotAvailable {
            entity_id: config.entity().to_string(),
        };
    };

    let attrs = WeatherAttributes::from_entity(entity).unwrap_or_else(|e| {
        warn!("{}", e);
        WeatherAttributes::default()
    });

    let sun = host.sun();
    if sun.is_none() {
        debug!("No sun entity, using day icons without sunrise/sunset");
    }

    let language = host.active_language();
    let converter = UnitConverter::for_host(host);
    let clock = HostClock::for_host(host);
    let icons = IconSource::new(config.icons().unwrap_or(default_icon_base));

    let condition_text = capitalize(&entity.state);
    let header = Header {
        icon: icons.url(&entity.state, DayPhase::from_sun(sun.as_ref())),
        condition: entity.state.clone(),
        title: config
            .name()
            .map_or_else(|| condition_text.clone(), str::to_string),
        subtitle: config
            .name()
            .map(|_| attrs.state_local.clone().unwrap_or(condition_text)),
    };

    let moisture = match attrs.precipitation {
        Some(amount) => Moisture::Precipitation(Reading::new(
            amount.unwrap_or(0.0),
            converter.unit(MeasureKind::Precipitation),
        )),
        None => Moisture::Visibility(
            attrs
                .visibility
                .map(|v| Reading::new(v, converter.unit(MeasureKind::Length))),
        ),
    };

    let readouts = Readouts {
        temperature: attrs.temperature.map(|t| converter.temperature(t)),
        feels_like: attrs.feelsliketemp.map(|t| converter.feels_like(t)),
        humidity: attrs.humidity.map(|h| Reading::new(h, "%")),
        wind_direction: attrs
            .wind_bearing
            .map(|b| converter.wind_direction(b).to_string()),
        wind_speed: attrs.wind_speed.map(|w| converter.wind_speed(w)),
        pressure: attrs
            .pressure
            .map(|p| Reading::new(p, converter.unit(MeasureKind::AirPressure))),
        moisture,
        sunrise: sun
            .as_ref()
            .and_then(|s| s.next_rising)
            .map(|ts| clock.time_of_day(ts)),
        sunset: sun
            .as_ref()
            .and_then(|s| s.next_setting)
            .map(|ts| clock.time_of_day(ts)),
    };

    let forecast = ForecastProjector {
        mode: config.mode(),
        language,
        converter: &converter,
        icons: &icons,
        clock: &clock,
    }
    .project(attrs.forecast());

    PanelView::Weather(Box::new(WeatherView {
        header,
        readouts,
        forecast,
        summary: attrs.summary,
    }))
}

/// `detail` payload of the more-info event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoreInfoDetail {
    #[serde(rename = "entityId")]
    pub entity_id: String,
}

/// Notification sent up to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub detail: MoreInfoDetail,
    pub bubbles: bool,
    /// Crosses shadow-root boundaries
    pub composed: bool,
    pub cancelable: bool,
}

impl HostEvent {
    #[must_use]
    pub fn more_info<S: Into<String>>(entity_id: S) -> Self {
        Self {
            event_type: MORE_INFO_EVENT.to_string(),
            detail: MoreInfoDetail {
                entity_id: entity_id.into(),
            },
            bubbles: true,
            composed: true,
            cancelable: false,
        }
    }
}

/// Receiver for events the panel fires at its host
pub trait EventSink {
    fn dispatch(&mut self, event: HostEvent);
}

impl EventSink for Vec<HostEvent> {
    fn dispatch(&mut self, event: HostEvent) {
        self.push(event);
    }
}

/// What the host needs to instantiate the configuration editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditorDescriptor {
    pub element: &'static str,
}

/// One weather panel mounted on a dashboard
#[derive(Debug, Clone)]
pub struct WeatherPanel {
    config: Option<PanelConfig>,
    /// Bumped on every accepted config, identical or not
    config_generation: u64,
    /// Generation in effect at the last evaluation
    evaluated_generation: Option<u64>,
    host: Option<HostState>,
    default_icon_base: String,
}

impl WeatherPanel {
    #[must_use]
    pub fn new(settings: &PanelSettings) -> Self {
        Self {
            config: None,
            config_generation: 0,
            evaluated_generation: None,
            host: None,
            default_icon_base: settings.icons.base_url.clone(),
        }
    }

    /// Default configuration offered when the panel is first added
    #[must_use]
    pub fn stub_config() -> Value {
        json!({})
    }

    #[must_use]
    pub fn config_editor() -> EditorDescriptor {
        EditorDescriptor {
            element: EDITOR_ELEMENT,
        }
    }

    #[must_use]
    pub fn card_size(&self) -> u32 {
        CARD_SIZE
    }

    /// Replace the configuration from the host's property bag.
    ///
    /// A rejected bag leaves the current configuration in place.
    pub fn set_config(&mut self, value: Value) -> crate::Result<()> {
        let config = PanelConfig::from_value(value)?;
        self.apply_config(config);
        Ok(())
    }

    pub fn apply_config(&mut self, config: PanelConfig) {
        debug!(entity = config.entity(), "Applying panel configuration");
        self.config = Some(config);
        self.config_generation += 1;
    }

    #[must_use]
    pub fn config(&self) -> Option<&PanelConfig> {
        self.config.as_ref()
    }

    /// Whether `next` would change what the panel shows.
    ///
    /// Any config applied since the last evaluation counts as a change, even
    /// one equal to the previous config.
    #[must_use]
    pub fn should_update(&self, next: &HostState) -> bool {
        let Some(config) = &self.config else {
            return false;
        };
        let evaluated = (self.evaluated_generation == Some(self.config_generation)).then_some(config);
        should_update(self.host.as_ref(), next, evaluated, config)
    }

    /// Take a new host snapshot; returns a fresh view when re-render is due
    pub fn update(&mut self, next: HostState) -> Option<PanelView> {
        let admitted = self.should_update(&next);
        self.host = Some(next);
        if self.config.is_some() {
            self.evaluated_generation = Some(self.config_generation);
        }
        if admitted { self.render() } else { None }
    }

    /// Current view, `None` until both config and host state are known
    #[tracing::instrument(level = "debug", skip(self))]
    #[must_use]
    pub fn render(&self) -> Option<PanelView> {
        let config = self.config.as_ref()?;
        let host = self.host.as_ref()?;
        Some(assemble(config, host, &self.default_icon_base))
    }

    /// Panel was activated: ask the host to show the entity's details
    pub fn handle_click<S: EventSink>(&self, sink: &mut S) {
        if let Some(config) = &self.config {
            sink.dispatch(HostEvent::more_info(config.entity()));
        }
    }
}

impl Default for WeatherPanel {
    fn default() -> Self {
        Self::new(&PanelSettings::default())
    }
}
