//! Error types and handling for the weather panel

use thiserror::Error;

/// Main error type for the weather panel
#[derive(Error, Debug)]
pub enum PanelError {
    /// Panel configuration was rejected (e.g. no weather entity)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Entity attributes could not be read as the expected shape
    #[error("Invalid attributes for {entity_id}: {message}")]
    Attributes { entity_id: String, message: String },

    /// Process-level settings failed to load or validate
    #[error("Settings error: {message}")]
    Settings { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Malformed JSON handed over by the host
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl PanelError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new attribute error for the given entity
    pub fn attributes<E: Into<String>, S: Into<String>>(entity_id: E, message: S) -> Self {
        Self::Attributes {
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }

    /// Create a new settings error
    pub fn settings<S: Into<String>>(message: S) -> Self {
        Self::Settings {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PanelError::Config { message } => message.clone(),
            PanelError::Attributes { entity_id, .. } => {
                format!("Entity {entity_id} reported data the panel cannot display.")
            }
            PanelError::Settings { .. } => {
                "Settings error. Please check your config file and environment.".to_string()
            }
            PanelError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            PanelError::Json { .. } => "Input is not valid JSON for this panel.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = PanelError::config("Please define a weather entity");
        assert!(matches!(config_err, PanelError::Config { .. }));

        let attr_err = PanelError::attributes("weather.home", "expected an object");
        assert!(matches!(attr_err, PanelError::Attributes { .. }));

        let settings_err = PanelError::settings("bad log level");
        assert!(matches!(settings_err, PanelError::Settings { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = PanelError::config("Please define a weather entity");
        assert_eq!(config_err.user_message(), "Please define a weather entity");

        let attr_err = PanelError::attributes("weather.home", "test");
        assert!(attr_err.user_message().contains("weather.home"));

        let settings_err = PanelError::settings("test");
        assert!(settings_err.user_message().contains("Settings error"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let panel_err: PanelError = json_err.into();
        assert!(matches!(panel_err, PanelError::Json { .. }));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let panel_err: PanelError = io_err.into();
        assert!(matches!(panel_err, PanelError::Io { .. }));
    }
}
