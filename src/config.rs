//! Configuration management for the `MallorKayak` application
//!
//! All configuration is read from the process environment exactly once at
//! startup into an explicit [`AppConfig`] value that is passed by reference
//! into the fetch and delivery steps. There is no global mutable state.

use crate::KayakError;
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Root configuration structure for the `MallorKayak` application
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Weather API configuration
    pub weather: WeatherConfig,
    /// Telegram delivery configuration (`None` = test mode, print only)
    pub delivery: Option<DeliveryConfig>,
    /// Report rendering configuration
    pub report: ReportConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Base URL for the Open-Meteo forecast API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    pub max_retries: u32,
    /// Fixed delay between retry attempts in seconds
    pub retry_delay_seconds: u32,
    /// Pause between per-zone requests in milliseconds
    pub request_pause_ms: u64,
    /// Forecast horizon in days (1-3)
    pub forecast_days: usize,
}

/// Telegram delivery settings, present only when both secrets are configured
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Bot token from `TELEGRAM_TOKEN`
    pub bot_token: String,
    /// Destination chat from `TELEGRAM_CHAT_ID`
    pub chat_id: String,
    /// Base URL of the Telegram Bot API
    pub api_base: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Report rendering settings
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Number of top-ranked zones shown per day
    pub top_n: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_weather_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u32 {
    2
}

fn default_request_pause_ms() -> u64 {
    300
}

fn default_forecast_days() -> usize {
    3
}

fn default_top_n() -> usize {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig {
                base_url: default_weather_base_url(),
                timeout_seconds: default_weather_timeout(),
                max_retries: default_weather_max_retries(),
                retry_delay_seconds: default_retry_delay(),
                request_pause_ms: default_request_pause_ms(),
                forecast_days: default_forecast_days(),
            },
            delivery: None,
            report: ReportConfig {
                top_n: default_top_n(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
            },
        }
    }
}

/// Read an optional environment variable, treating empty values as absent
fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Read an environment variable with a fallback default, parsing it into `T`
fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env_opt(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value for {key}: '{raw}'")),
        None => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from the process environment and validate it
    pub fn load() -> Result<Self> {
        let weather = WeatherConfig {
            base_url: env_opt("MALLORKAYAK_BASE_URL").unwrap_or_else(default_weather_base_url),
            timeout_seconds: env_parse("MALLORKAYAK_TIMEOUT_SECONDS", default_weather_timeout())?,
            max_retries: env_parse("MALLORKAYAK_MAX_RETRIES", default_weather_max_retries())?,
            retry_delay_seconds: env_parse(
                "MALLORKAYAK_RETRY_DELAY_SECONDS",
                default_retry_delay(),
            )?,
            request_pause_ms: env_parse("MALLORKAYAK_REQUEST_PAUSE_MS", default_request_pause_ms())?,
            forecast_days: env_parse("MALLORKAYAK_FORECAST_DAYS", default_forecast_days())?,
        };

        // Delivery is only configured when both secrets are present; a missing
        // or empty token or chat id means print-only test mode.
        let delivery = match (env_opt("TELEGRAM_TOKEN"), env_opt("TELEGRAM_CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) => Some(DeliveryConfig {
                bot_token,
                chat_id,
                api_base: env_opt("MALLORKAYAK_TELEGRAM_API_BASE")
                    .unwrap_or_else(default_telegram_api_base),
                timeout_seconds: default_weather_timeout(),
            }),
            _ => None,
        };

        let report = ReportConfig {
            top_n: env_parse("MALLORKAYAK_TOP_N", default_top_n())?,
        };

        let logging = LoggingConfig {
            level: env_opt("MALLORKAYAK_LOG_LEVEL").unwrap_or_else(default_log_level),
        };

        let config = Self {
            weather,
            delivery,
            report,
            logging,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(KayakError::config(
                "Weather API timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.weather.max_retries > 10 {
            return Err(KayakError::config("Weather API max retries cannot exceed 10").into());
        }

        if self.weather.retry_delay_seconds > 60 {
            return Err(KayakError::config("Retry delay cannot exceed 60 seconds").into());
        }

        if self.weather.forecast_days == 0 || self.weather.forecast_days > 3 {
            return Err(KayakError::config("Forecast horizon must be between 1 and 3 days").into());
        }

        if self.report.top_n == 0 {
            return Err(KayakError::config("Report top-N must be at least 1").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(KayakError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(
                KayakError::config("Weather API base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        if let Some(delivery) = &self.delivery {
            if !delivery.api_base.starts_with("http://")
                && !delivery.api_base.starts_with("https://")
            {
                return Err(KayakError::config(
                    "Telegram API base URL must be a valid HTTP or HTTPS URL",
                )
                .into());
            }
        }

        Ok(())
    }
}
