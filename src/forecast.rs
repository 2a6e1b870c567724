//! Forecast strip projection
//!
//! Turns the weather entity's forecast sequence into at most
//! [`MAX_FORECAST_PERIODS`] display records. Periods keep the order the
//! entity reported them in; nothing is re-sorted or re-selected by date.

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clock::{HostClock, calendar_locale};
use crate::config::ForecastMode;
use crate::icons::{DayPhase, IconSource};
use crate::models::ForecastPeriod;
use crate::units::{MeasureKind, Reading, UnitConverter};

/// Number of periods the strip shows
pub const MAX_FORECAST_PERIODS: usize = 5;

/// One column of the forecast strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Hour of day (hourly) or short weekday name (daily)
    pub period: String,
    /// Source timestamp the label was derived from
    pub datetime: String,
    pub icon: String,
    pub high: Option<Reading>,
    pub low: Option<Reading>,
    pub wind: Option<Reading>,
    /// Present whenever the source period carries the field, even as `null`
    pub precipitation: Option<Reading>,
}

/// Projects forecast periods for one host state
#[derive(Debug, Clone, Copy)]
pub struct ForecastProjector<'a> {
    pub mode: ForecastMode,
    pub language: &'a str,
    pub converter: &'a UnitConverter,
    pub icons: &'a IconSource,
    pub clock: &'a HostClock,
}

impl ForecastProjector<'_> {
    #[must_use]
    pub fn project(&self, periods: &[ForecastPeriod]) -> Vec<ForecastEntry> {
        periods
            .iter()
            .take(MAX_FORECAST_PERIODS)
            .map(|period| self.entry(period))
            .collect()
    }

    fn entry(&self, period: &ForecastPeriod) -> ForecastEntry {
        let precipitation_unit = self.converter.unit(MeasureKind::Precipitation);
        let temperature_unit = self.converter.unit(MeasureKind::Temperature);

        ForecastEntry {
            period: self.label(&period.datetime),
            datetime: period.datetime.clone(),
            // no sun state exists for future periods
            icon: self.icons.url(&period.condition, DayPhase::Day),
            // shown as reported, no Fahrenheit rounding
            high: period.temperature.map(|t| Reading::new(t, temperature_unit.clone())),
            low: period.templow.map(|t| Reading::new(t, temperature_unit.clone())),
            wind: period.wind_speed.map(|w| self.converter.wind_speed(w)),
            precipitation: period
                .precipitation
                .map(|amount| Reading::new(amount.unwrap_or(0.0), precipitation_unit)),
        }
    }

    fn label(&self, datetime: &str) -> String {
        let Some(local) = self.clock.parse(datetime) else {
            warn!("Forecast period has unreadable datetime '{}'", datetime);
            return String::new();
        };

        match self.mode {
            ForecastMode::Hourly => local.hour().to_string(),
            ForecastMode::Daily => local
                .format_localized("%a", calendar_locale(self.language))
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ICON_BASE_URL;
    use crate::models::UnitSystem;
    use crate::units::DisplayLocale;
    use rstest::rstest;

    fn period(datetime: &str, condition: &str) -> ForecastPeriod {
        ForecastPeriod {
            datetime: datetime.to_string(),
            condition: condition.to_string(),
            temperature: Some(10.0),
            ..ForecastPeriod::default()
        }
    }

    fn week() -> Vec<ForecastPeriod> {
        // 2024-01-15 is a Monday
        (15..=21)
            .map(|day| period(&format!("2024-01-{day}T12:00:00+00:00"), "sunny"))
            .collect()
    }

    fn project(periods: &[ForecastPeriod], mode: ForecastMode, language: &str) -> Vec<ForecastEntry> {
        project_in(periods, mode, language, UnitSystem::metric())
    }

    fn project_in(
        periods: &[ForecastPeriod],
        mode: ForecastMode,
        language: &str,
        units: UnitSystem,
    ) -> Vec<ForecastEntry> {
        let converter = UnitConverter::new(DisplayLocale::from_language(language), units);
        let icons = IconSource::new(DEFAULT_ICON_BASE_URL);
        let clock = HostClock::default();
        ForecastProjector {
            mode,
            language,
            converter: &converter,
            icons: &icons,
            clock: &clock,
        }
        .project(periods)
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(5)]
    #[case(7)]
    fn test_caps_at_five_in_order(#[case] len: usize) {
        let periods: Vec<_> = week().into_iter().take(len).collect();
        let entries = project(&periods, ForecastMode::Daily, "en");

        assert_eq!(entries.len(), len.min(MAX_FORECAST_PERIODS));
        for (entry, source) in entries.iter().zip(&periods) {
            assert_eq!(entry.datetime, source.datetime);
        }
    }

    #[test]
    fn test_never_reorders() {
        let mut periods = week();
        periods.reverse();
        let entries = project(&periods, ForecastMode::Daily, "en");
        let labels: Vec<_> = entries.iter().map(|e| e.period.as_str()).collect();
        assert_eq!(labels, ["Sun", "Sat", "Fri", "Thu", "Wed"]);
    }

    #[test]
    fn test_hourly_labels() {
        let periods = vec![
            period("2024-01-15T09:00:00+00:00", "rainy"),
            period("2024-01-15T10:00:00+00:00", "rainy"),
        ];
        let entries = project(&periods, ForecastMode::Hourly, "en");
        assert_eq!(entries[0].period, "9");
        assert_eq!(entries[1].period, "10");
    }

    #[test]
    fn test_forecast_uses_day_icons() {
        let entries = project(&[period("2024-01-15T23:00:00+00:00", "clear")], ForecastMode::Hourly, "en");
        assert_eq!(entries[0].icon, format!("{DEFAULT_ICON_BASE_URL}day.svg"));
    }

    #[test]
    fn test_optional_lines() {
        let mut with_all = period("2024-01-15T12:00:00+00:00", "rainy");
        with_all.templow = Some(4.5);
        with_all.wind_speed = Some(36.0);
        with_all.precipitation = Some(Some(2.5));

        let mut null_precip = period("2024-01-16T12:00:00+00:00", "rainy");
        null_precip.precipitation = Some(None);

        let bare = period("2024-01-17T12:00:00+00:00", "rainy");

        let entries = project(&[with_all, null_precip, bare], ForecastMode::Daily, "da");

        assert_eq!(entries[0].low.as_ref().unwrap().compact(), "4.5°C");
        assert_eq!(entries[0].wind.as_ref().unwrap().to_string(), "10.0 m/s");
        assert_eq!(entries[0].precipitation.as_ref().unwrap().to_string(), "2.5 mm");

        assert_eq!(entries[1].precipitation.as_ref().unwrap().to_string(), "0 mm");
        assert!(entries[1].low.is_none());
        assert!(entries[1].wind.is_none());

        assert!(entries[2].precipitation.is_none());
    }

    #[test]
    fn test_unreadable_datetime_keeps_entry() {
        let entries = project(&[period("soon", "fog")], ForecastMode::Daily, "en");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].period, "");
        assert_eq!(entries[0].high.as_ref().unwrap().compact(), "10°C");
    }

    #[test]
    fn test_fahrenheit_high_low_unrounded() {
        let mut warm = period("2024-07-01T12:00:00+00:00", "sunny");
        warm.temperature = Some(71.6);
        warm.templow = Some(50.4);

        let entries = project_in(&[warm], ForecastMode::Daily, "en", UnitSystem::imperial());
        assert_eq!(entries[0].high.as_ref().unwrap().compact(), "71.6°F");
        assert_eq!(entries[0].low.as_ref().unwrap().compact(), "50.4°F");
    }
}
