//! Kayak suitability scoring
//!
//! Pure, deterministic scoring of one day's conditions for offshore
//! kayaking. Each metric contributes an independently weighted number of
//! points; the sum is clamped to the 0-10 range and mapped to a qualitative
//! rating. A missing metric contributes exactly zero for its factor, so the
//! function is total over any [`DayConditions`] value.

use crate::models::DayConditions;
use serde::Serialize;
use std::fmt;

/// Wind speed above which conditions are unsafe regardless of anything else
pub const UNSAFE_WIND_KNOTS: f64 = 20.0;

/// Wave height at or above which conditions are dangerous
pub const DANGEROUS_WAVE_M: f64 = 1.8;

/// Scores below this threshold mark a zone as one to avoid
pub const AVOID_THRESHOLD: f64 = 4.0;

/// Qualitative rating derived from the numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rating {
    /// Score >= 9
    Excelente,
    /// Score >= 7
    MuyBueno,
    /// Score >= 5
    Bueno,
    /// Score >= 4
    Aceptable,
    /// Score < 4
    Malo,
}

impl Rating {
    /// Derive the rating from a clamped score
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 9.0 => Rating::Excelente,
            s if s >= 7.0 => Rating::MuyBueno,
            s if s >= 5.0 => Rating::Bueno,
            s if s >= 4.0 => Rating::Aceptable,
            _ => Rating::Malo,
        }
    }

    /// Emoji marker used in the rendered report
    #[must_use]
    pub fn emoji(&self) -> &'static str {
        match self {
            Rating::Excelente => "✅",
            Rating::MuyBueno => "👍",
            Rating::Bueno => "🙂",
            Rating::Aceptable => "⚠️",
            Rating::Malo => "❌",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Excelente => write!(f, "EXCELENTE"),
            Rating::MuyBueno => write!(f, "MUY BUENO"),
            Rating::Bueno => write!(f, "BUENO"),
            Rating::Aceptable => write!(f, "ACEPTABLE"),
            Rating::Malo => write!(f, "MALO"),
        }
    }
}

/// Numeric score plus its qualitative rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SuitabilityScore {
    /// Suitability score in [0, 10]
    pub score: f64,
    /// Rating label derived from the score
    pub rating: Rating,
}

/// Score one day's conditions for offshore kayaking
#[must_use]
pub fn score_conditions(conditions: &DayConditions) -> SuitabilityScore {
    let points = conditions.wind_speed_max_kn.map_or(0.0, wind_points)
        + conditions.wave_height_m.map_or(0.0, wave_points)
        + conditions.visibility_km.map_or(0.0, visibility_points)
        + conditions.precipitation_mm.map_or(0.0, precipitation_penalty)
        + conditions.temperature_max_c.map_or(0.0, temperature_bonus);

    let score = points.clamp(0.0, 10.0);

    SuitabilityScore {
        score,
        rating: Rating::from_score(score),
    }
}

/// Wind contribution (max 4.0). A steady 5-12 kn breeze is ideal for
/// offshore paddling; above 20 kn the day is written off entirely.
fn wind_points(knots: f64) -> f64 {
    match knots {
        k if k > UNSAFE_WIND_KNOTS => 0.0,
        k if (5.0..=12.0).contains(&k) => 4.0,
        k if (3.0..=15.0).contains(&k) => 2.5,
        _ => 1.0,
    }
}

/// Wave contribution (max 3.0)
fn wave_points(metres: f64) -> f64 {
    match metres {
        w if w >= DANGEROUS_WAVE_M => 0.0,
        w if (0.3..=1.2).contains(&w) => 3.0,
        w if w >= 0.2 => 1.5,
        _ => 0.0,
    }
}

/// Visibility contribution (max 1.5), tiered above 10 km
fn visibility_points(km: f64) -> f64 {
    if km > 15.0 {
        1.5
    } else if km > 10.0 {
        1.0
    } else {
        0.0
    }
}

/// Rain penalty above 2 mm
fn precipitation_penalty(mm: f64) -> f64 {
    if mm > 2.0 { -1.0 } else { 0.0 }
}

/// Comfort bonus inside the 18-24 °C band
fn temperature_bonus(celsius: f64) -> f64 {
    if (18.0..=24.0).contains(&celsius) {
        1.0
    } else {
        0.0
    }
}
