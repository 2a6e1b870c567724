//! Unit and locale conversion for displayed measurements
//!
//! Unit strings depend only on the measurement kind, the host unit system and
//! the display locale. Only Danish gets its own phrasing and wind units; every
//! other language is shown with the English tables.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{HostState, UnitSystem};

const WIND_DIRECTIONS_EN: [&str; 17] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW", "N",
];

const WIND_DIRECTIONS_DA: [&str; 17] = [
    "N", "NNØ", "NØ", "ØNØ", "Ø", "ØSØ", "SØ", "SSØ", "S", "SSV", "SV", "VSV", "V", "VNV", "NV",
    "NNV", "N",
];

const FAHRENHEIT: &str = "°F";

/// Kinds of measurement the panel displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureKind {
    Temperature,
    AirPressure,
    Length,
    Speed,
    Precipitation,
}

/// Locale branch used for units and phrasing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLocale {
    #[default]
    English,
    Danish,
}

impl DisplayLocale {
    #[must_use]
    pub fn from_language(language: &str) -> Self {
        match language {
            "da" => Self::Danish,
            _ => Self::English,
        }
    }
}

/// A display-ready numeric value with its unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: f64,
    /// Fixed number of decimals to show, `None` to print the value as is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<usize>,
    pub unit: String,
}

impl Reading {
    #[must_use]
    pub fn new<S: Into<String>>(value: f64, unit: S) -> Self {
        Self {
            value,
            decimals: None,
            unit: unit.into(),
        }
    }

    #[must_use]
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// The number alone, as shown on the panel
    #[must_use]
    pub fn value_text(&self) -> String {
        match self.decimals {
            Some(decimals) => format!("{:.*}", decimals, self.value),
            None => format!("{}", self.value),
        }
    }

    /// Value and unit without a separating space (`21.5°C`)
    #[must_use]
    pub fn compact(&self) -> String {
        format!("{}{}", self.value_text(), self.unit)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.value_text())
        } else {
            write!(f, "{} {}", self.value_text(), self.unit)
        }
    }
}

/// Round half up, matching the dashboard's own number rounding
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Compass bucket (0..16) for a bearing in degrees.
///
/// Bearings are normalised into [0, 360) first, so the result is periodic
/// and both ends of the northern sector map to index 0.
#[must_use]
pub fn compass_index(bearing: f64) -> usize {
    let bearing = bearing.rem_euclid(360.0);
    let index = ((bearing + 11.25) / 22.5).floor() as usize;
    index.min(16) % 16
}

/// Unit strings and value transforms for one host/locale combination
#[derive(Debug, Clone, PartialEq)]
pub struct UnitConverter {
    locale: DisplayLocale,
    units: UnitSystem,
}

impl UnitConverter {
    #[must_use]
    pub fn new(locale: DisplayLocale, units: UnitSystem) -> Self {
        Self { locale, units }
    }

    /// Converter for the host's active language and unit system
    #[must_use]
    pub fn for_host(host: &HostState) -> Self {
        Self::new(
            DisplayLocale::from_language(host.active_language()),
            host.config.unit_system.clone(),
        )
    }

    #[must_use]
    pub fn locale(&self) -> DisplayLocale {
        self.locale
    }

    /// Display unit for a measurement kind
    #[must_use]
    pub fn unit(&self, kind: MeasureKind) -> String {
        let metric = self.units.is_metric();
        match kind {
            MeasureKind::AirPressure => (if metric { "hPa" } else { "inHg" }).to_string(),
            MeasureKind::Length => self.units.length.clone(),
            MeasureKind::Precipitation => (if metric { "mm" } else { "in" }).to_string(),
            MeasureKind::Speed => match self.locale {
                DisplayLocale::Danish => "m/s".to_string(),
                DisplayLocale::English => format!("{}/h", self.units.length),
            },
            MeasureKind::Temperature => self.units.temperature.clone(),
        }
    }

    /// Temperature for display: whole degrees on Fahrenheit hosts, raw otherwise
    #[must_use]
    pub fn temperature(&self, raw: f64) -> Reading {
        let unit = self.unit(MeasureKind::Temperature);
        let value = if unit == FAHRENHEIT {
            round_half_up(raw)
        } else {
            raw
        };
        Reading::new(value, unit)
    }

    /// Wind speed for display. Danish readers get m/s with one decimal.
    #[must_use]
    pub fn wind_speed(&self, raw: f64) -> Reading {
        let unit = self.unit(MeasureKind::Speed);
        match self.locale {
            DisplayLocale::Danish => {
                let ms = round_half_up(raw * 5.0 / 18.0 * 10.0) / 10.0;
                Reading::new(ms, unit).with_decimals(1)
            }
            DisplayLocale::English => Reading::new(raw, unit),
        }
    }

    /// Localized "feels like" line. The value is shown as reported; only the
    /// headline temperature is rounded on Fahrenheit hosts.
    #[must_use]
    pub fn feels_like(&self, raw: f64) -> String {
        let prefix = match self.locale {
            DisplayLocale::Danish => "Føles som: ",
            DisplayLocale::English => "Feels like: ",
        };
        let reading = Reading::new(raw, self.unit(MeasureKind::Temperature));
        format!("{prefix}{}", reading.compact())
    }

    /// Compass label for a wind bearing in degrees
    #[must_use]
    pub fn wind_direction(&self, bearing: f64) -> &'static str {
        let table = match self.locale {
            DisplayLocale::Danish => &WIND_DIRECTIONS_DA,
            DisplayLocale::English => &WIND_DIRECTIONS_EN,
        };
        table[compass_index(bearing)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn converter(language: &str, units: UnitSystem) -> UnitConverter {
        UnitConverter::new(DisplayLocale::from_language(language), units)
    }

    #[rstest]
    #[case("en", UnitSystem::metric(), MeasureKind::AirPressure, "hPa")]
    #[case("en", UnitSystem::imperial(), MeasureKind::AirPressure, "inHg")]
    #[case("en", UnitSystem::metric(), MeasureKind::Length, "km")]
    #[case("en", UnitSystem::imperial(), MeasureKind::Length, "mi")]
    #[case("en", UnitSystem::metric(), MeasureKind::Precipitation, "mm")]
    #[case("en", UnitSystem::imperial(), MeasureKind::Precipitation, "in")]
    #[case("en", UnitSystem::metric(), MeasureKind::Speed, "km/h")]
    #[case("en", UnitSystem::imperial(), MeasureKind::Speed, "mi/h")]
    #[case("da", UnitSystem::metric(), MeasureKind::Speed, "m/s")]
    #[case("da", UnitSystem::imperial(), MeasureKind::Speed, "m/s")]
    #[case("de", UnitSystem::metric(), MeasureKind::Speed, "km/h")]
    #[case("en", UnitSystem::metric(), MeasureKind::Temperature, "°C")]
    #[case("da", UnitSystem::imperial(), MeasureKind::Temperature, "°F")]
    fn test_units(
        #[case] language: &str,
        #[case] units: UnitSystem,
        #[case] kind: MeasureKind,
        #[case] expected: &str,
    ) {
        let converter = converter(language, units);
        assert_eq!(converter.unit(kind), expected);
        assert_eq!(converter.unit(kind), converter.unit(kind));
    }

    #[test]
    fn test_danish_is_exact_match() {
        assert_eq!(DisplayLocale::from_language("da"), DisplayLocale::Danish);
        assert_eq!(DisplayLocale::from_language("da-DK"), DisplayLocale::English);
        assert_eq!(DisplayLocale::from_language("sv"), DisplayLocale::English);
    }

    #[test]
    fn test_temperature_passthrough_on_celsius() {
        let reading = converter("en", UnitSystem::metric()).temperature(21.46);
        assert_eq!(reading.value, 21.46);
        assert_eq!(reading.compact(), "21.46°C");
    }

    #[rstest]
    #[case(71.5, 72.0)]
    #[case(71.49, 71.0)]
    #[case(-2.5, -2.0)]
    #[case(-2.51, -3.0)]
    fn test_temperature_rounds_on_fahrenheit(#[case] raw: f64, #[case] expected: f64) {
        let reading = converter("en", UnitSystem::imperial()).temperature(raw);
        assert_eq!(reading.value, expected);
    }

    #[test]
    fn test_wind_speed_danish_conversion() {
        let reading = converter("da", UnitSystem::metric()).wind_speed(36.0);
        assert_eq!(reading.value, 10.0);
        assert_eq!(reading.value_text(), "10.0");
        assert_eq!(reading.to_string(), "10.0 m/s");

        let reading = converter("da", UnitSystem::metric()).wind_speed(20.0);
        assert_eq!(reading.value_text(), "5.6");
    }

    #[test]
    fn test_wind_speed_passthrough() {
        let reading = converter("en", UnitSystem::metric()).wind_speed(36.0);
        assert_eq!(reading.value, 36.0);
        assert_eq!(reading.to_string(), "36 km/h");
    }

    #[test]
    fn test_feels_like() {
        assert_eq!(
            converter("en", UnitSystem::metric()).feels_like(18.5),
            "Feels like: 18.5°C"
        );
        assert_eq!(
            converter("da", UnitSystem::metric()).feels_like(-3.0),
            "Føles som: -3°C"
        );
        assert_eq!(
            converter("en", UnitSystem::imperial()).feels_like(69.4),
            "Feels like: 69.4°F"
        );
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(11.24, 0)]
    #[case(11.25, 1)]
    #[case(90.0, 4)]
    #[case(180.0, 8)]
    #[case(270.0, 12)]
    #[case(348.74, 15)]
    #[case(348.75, 0)]
    #[case(359.99, 0)]
    fn test_compass_index(#[case] bearing: f64, #[case] expected: usize) {
        assert_eq!(compass_index(bearing), expected);
    }

    #[test]
    fn test_compass_index_is_periodic() {
        let mut bearing = -720.0;
        while bearing < 720.0 {
            assert_eq!(compass_index(bearing), compass_index(bearing + 360.0));
            bearing += 0.75;
        }
    }

    #[test]
    fn test_wind_direction_labels() {
        let en = converter("en", UnitSystem::metric());
        let da = converter("da", UnitSystem::metric());

        assert_eq!(en.wind_direction(45.0), "NE");
        assert_eq!(en.wind_direction(225.0), "SW");
        assert_eq!(en.wind_direction(355.0), "N");
        assert_eq!(da.wind_direction(90.0), "Ø");
        assert_eq!(da.wind_direction(292.5), "VNV");
        assert_eq!(da.wind_direction(370.0), "N");
    }
}
