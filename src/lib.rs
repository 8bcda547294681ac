//! `MallorKayak` - daily offshore kayak conditions for the Mallorca coast
//!
//! This library fetches weather and marine forecasts for a fixed table of
//! coastal zones, scores each zone per day for offshore kayaking, ranks
//! them, and renders a text report for Telegram delivery.

pub mod config;
pub mod error;
pub mod kayak_forecast;
pub mod models;
pub mod report;
pub mod scoring;
pub mod telegram;
pub mod weather;

// Re-export core types for public API
pub use config::{AppConfig, DeliveryConfig, WeatherConfig};
pub use error::KayakError;
pub use kayak_forecast::{BestPick, DayOutlook, KayakReport, ScoredResult, generate_report};
pub use models::{DayConditions, MALLORCA_ZONES, Zone, ZoneForecast};
pub use scoring::{Rating, SuitabilityScore, score_conditions};
pub use telegram::TelegramNotifier;
pub use weather::ForecastClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
