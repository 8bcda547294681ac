//! Forecast models with typed absence for missing upstream data

use super::Zone;
use serde::Serialize;

/// Conversion factor from metres per second to knots
pub const MS_TO_KNOTS: f64 = 1.944;

/// The metrics that feed the suitability score for one zone on one day.
///
/// Every field is optional: the upstream API may omit whole arrays or
/// individual elements, and a missing value must stay a typed absence
/// instead of turning into a runtime error downstream.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct DayConditions {
    /// Daily maximum wind speed in knots
    pub wind_speed_max_kn: Option<f64>,
    /// Mean wave height over the day in metres
    pub wave_height_m: Option<f64>,
    /// Mean visibility over the day in kilometres
    pub visibility_km: Option<f64>,
    /// Precipitation sum in millimetres
    pub precipitation_mm: Option<f64>,
    /// Daily maximum air temperature in Celsius
    pub temperature_max_c: Option<f64>,
}

impl DayConditions {
    /// True when no metric at all is available for this day
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wind_speed_max_kn.is_none()
            && self.wave_height_m.is_none()
            && self.visibility_km.is_none()
            && self.precipitation_mm.is_none()
            && self.temperature_max_c.is_none()
    }
}

/// Forecast for one zone over the requested horizon, produced once per run
/// by the fetch step and read-only afterwards
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ZoneForecast {
    /// Zone this forecast was retrieved for
    pub zone: Zone,
    /// Per-day conditions, index 0 = today
    pub days: Vec<DayConditions>,
}

impl ZoneForecast {
    /// Get conditions for a specific day offset, if within the horizon
    #[must_use]
    pub fn day(&self, day_offset: usize) -> Option<&DayConditions> {
        self.days.get(day_offset)
    }
}
