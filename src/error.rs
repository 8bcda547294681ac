//! Error types and handling for the `MallorKayak` application

use thiserror::Error;

/// Main error type for the `MallorKayak` application
#[derive(Error, Debug)]
pub enum KayakError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Report delivery errors
    #[error("Delivery error: {message}")]
    Delivery { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl KayakError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new delivery error
    pub fn delivery<S: Into<String>>(message: S) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            KayakError::Config { .. } => {
                "Configuration error. Please check your environment variables.".to_string()
            }
            KayakError::Api { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            KayakError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            KayakError::Delivery { .. } => {
                "Report delivery failed. The report was still printed to standard output."
                    .to_string()
            }
            KayakError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            KayakError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = KayakError::config("missing chat id");
        assert!(matches!(config_err, KayakError::Config { .. }));

        let api_err = KayakError::api("connection failed");
        assert!(matches!(api_err, KayakError::Api { .. }));

        let validation_err = KayakError::validation("invalid coordinates");
        assert!(matches!(validation_err, KayakError::Validation { .. }));

        let delivery_err = KayakError::delivery("telegram returned 403");
        assert!(matches!(delivery_err, KayakError::Delivery { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = KayakError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let api_err = KayakError::api("test");
        assert!(api_err.user_message().contains("Unable to reach"));

        let validation_err = KayakError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));

        let delivery_err = KayakError::delivery("test");
        assert!(delivery_err.user_message().contains("standard output"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let kayak_err: KayakError = io_err.into();
        assert!(matches!(kayak_err, KayakError::Io { .. }));
    }
}
