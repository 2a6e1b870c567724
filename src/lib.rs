//! Weather panel - presentation logic for a smart-home dashboard weather card
//!
//! This library turns the host's weather and sun entities into a
//! display-ready panel: icon selection, locale-aware units, the forecast
//! strip, and the policy deciding when a new host snapshot needs a re-render.

pub mod change;
pub mod clock;
pub mod config;
pub mod error;
pub mod forecast;
pub mod icons;
pub mod logging;
pub mod models;
pub mod panel;
pub mod render;
pub mod units;

// Re-export core types for public API
pub use change::should_update;
pub use config::{ForecastMode, PanelConfig, PanelSettings};
pub use error::PanelError;
pub use forecast::{ForecastEntry, ForecastProjector};
pub use icons::{DayPhase, IconSource, resolve_icon};
pub use models::{EntityState, HostState, SunState, WeatherAttributes};
pub use panel::{EventSink, HostEvent, PanelView, WeatherPanel, assemble};
pub use units::{DisplayLocale, MeasureKind, Reading, UnitConverter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
