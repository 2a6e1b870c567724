//! Data models for the weather panel
//!
//! This module contains the host-side domain models organized by concern:
//! - Host: the host state snapshot, its entity slots and unit system
//! - Weather: typed view over a weather entity's attributes and forecast
//! - Sun: the sun entity's horizon state and next rising/setting times

pub mod host;
pub mod sun;
pub mod weather;

// Re-export all public types for convenient access
pub use host::{EntityState, HostConfig, HostState, SUN_ENTITY_ID, UnitSystem};
pub use sun::SunState;
pub use weather::{ForecastPeriod, WeatherAttributes};
