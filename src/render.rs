//! Plain-text rendering of a panel view
//!
//! Maps an already-assembled [`PanelView`] to lines of text. No decisions are
//! made here; every value arrives display-ready.

use std::fmt;

use crate::forecast::ForecastEntry;
use crate::panel::{Moisture, PanelView, WeatherView};

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelView::NotAvailable { entity_id } => {
                writeln!(f, "Entity not available: {entity_id}")
            }
            PanelView::Weather(view) => write!(f, "{view}"),
        }
    }
}

impl fmt::Display for WeatherView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  [{}]", self.header.title, self.header.icon)?;
        if let Some(subtitle) = &self.header.subtitle {
            writeln!(f, "{subtitle}")?;
        }

        let r = &self.readouts;
        if let Some(temperature) = &r.temperature {
            write!(f, "{}", temperature.compact())?;
            if let Some(feels_like) = &r.feels_like {
                write!(f, "  {feels_like}")?;
            }
            writeln!(f)?;
        }
        if let Some(humidity) = &r.humidity {
            writeln!(f, "Humidity: {humidity}")?;
        }
        if r.wind_direction.is_some() || r.wind_speed.is_some() {
            write!(f, "Wind:")?;
            if let Some(direction) = &r.wind_direction {
                write!(f, " {direction}")?;
            }
            if let Some(speed) = &r.wind_speed {
                write!(f, " {speed}")?;
            }
            writeln!(f)?;
        }
        if let Some(pressure) = &r.pressure {
            writeln!(f, "Pressure: {pressure}")?;
        }
        match &r.moisture {
            Moisture::Precipitation(reading) => writeln!(f, "Precipitation: {reading}")?,
            Moisture::Visibility(Some(reading)) => writeln!(f, "Visibility: {reading}")?,
            Moisture::Visibility(None) => {}
        }
        if let Some(sunrise) = &r.sunrise {
            writeln!(f, "Sunrise: {sunrise}")?;
        }
        if let Some(sunset) = &r.sunset {
            writeln!(f, "Sunset: {sunset}")?;
        }

        if !self.forecast.is_empty() {
            writeln!(f, "Forecast:")?;
            for entry in &self.forecast {
                writeln!(f, "  {entry}")?;
            }
        }

        if let Some(summary) = &self.summary {
            writeln!(f, "{summary}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ForecastEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4}", self.period.to_uppercase())?;
        if let Some(high) = &self.high {
            write!(f, "  {}", high.compact())?;
        }
        if let Some(low) = &self.low {
            write!(f, " / {}", low.compact())?;
        }
        if let Some(wind) = &self.wind {
            write!(f, "  {wind}")?;
        }
        if let Some(precipitation) = &self.precipitation {
            write!(f, "  {precipitation}")?;
        }
        write!(f, "  [{}]", self.icon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{Header, Readouts};
    use crate::units::Reading;

    fn view() -> WeatherView {
        WeatherView {
            header: Header {
                icon: "/icons/rainy-5.svg".to_string(),
                condition: "rainy".to_string(),
                title: "Home".to_string(),
                subtitle: Some("Rainy".to_string()),
            },
            readouts: Readouts {
                temperature: Some(Reading::new(12.5, "°C")),
                feels_like: Some("Feels like: 10°C".to_string()),
                humidity: Some(Reading::new(90.0, "%")),
                wind_direction: Some("W".to_string()),
                wind_speed: Some(Reading::new(20.0, "km/h")),
                pressure: Some(Reading::new(998.0, "hPa")),
                moisture: Moisture::Precipitation(Reading::new(1.2, "mm")),
                sunrise: Some("06:10".to_string()),
                sunset: None,
            },
            forecast: vec![ForecastEntry {
                period: "Tue".to_string(),
                datetime: "2024-01-16T12:00:00+00:00".to_string(),
                icon: "/icons/rainy-5.svg".to_string(),
                high: Some(Reading::new(11.0, "°C")),
                low: Some(Reading::new(6.0, "°C")),
                wind: None,
                precipitation: Some(Reading::new(0.0, "mm")),
            }],
            summary: Some("Rain all day".to_string()),
        }
    }

    #[test]
    fn test_not_available_text() {
        let text = PanelView::NotAvailable {
            entity_id: "weather.attic".to_string(),
        }
        .to_string();
        assert_eq!(text, "Entity not available: weather.attic\n");
    }

    #[test]
    fn test_weather_text() {
        let text = PanelView::Weather(Box::new(view())).to_string();

        assert!(text.starts_with("Home  [/icons/rainy-5.svg]\nRainy\n"));
        assert!(text.contains("12.5°C  Feels like: 10°C\n"));
        assert!(text.contains("Wind: W 20 km/h\n"));
        assert!(text.contains("Precipitation: 1.2 mm\n"));
        assert!(text.contains(" TUE  11°C / 6°C  0 mm  [/icons/rainy-5.svg]\n"));
        assert!(!text.contains("Sunset"));
        assert!(text.ends_with("Rain all day\n"));
    }
}
