//! Kayak forecast pipeline
//!
//! Drives the whole run: fetch each zone's forecast in table order, score
//! every (zone, day) pair, rank zones per day, and pick the single best
//! (zone, day) combination for the summary. Zones whose fetch fails after
//! the retry budget are logged and skipped; they never abort the run.

use crate::config::AppConfig;
use crate::models::{DayConditions, Zone, ZoneForecast};
use crate::scoring::{self, Rating, SuitabilityScore};
use crate::weather::ForecastClient;
use crate::KayakError;
use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Europe::Madrid;
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Score and conditions computed for one zone on one day
#[derive(Debug, Clone, Serialize)]
pub struct ScoredResult {
    /// Zone the result was computed for
    pub zone_name: &'static str,
    /// Suitability score in [0, 10]
    pub score: f64,
    /// Rating label derived from the score
    pub rating: Rating,
    /// Raw metrics the score was computed from
    pub conditions: DayConditions,
}

/// Ranked results for one day of the horizon
#[derive(Debug, Clone, Serialize)]
pub struct DayOutlook {
    /// Calendar date of this day (Europe/Madrid)
    pub date: NaiveDate,
    /// Spanish day name (Lunes ... Domingo)
    pub day_name: &'static str,
    /// All scored zones, best first; ties keep zone-table order
    pub ranked: Vec<ScoredResult>,
}

impl DayOutlook {
    /// The top `n` entries for display
    #[must_use]
    pub fn top(&self, n: usize) -> &[ScoredResult] {
        &self.ranked[..self.ranked.len().min(n)]
    }

    /// The worst-scoring entry of the day, if any zone produced data
    #[must_use]
    pub fn worst(&self) -> Option<&ScoredResult> {
        self.ranked.last()
    }
}

/// The single best (zone, day) pair across the whole horizon
#[derive(Debug, Clone, Serialize)]
pub struct BestPick {
    /// Winning zone
    pub zone_name: &'static str,
    /// Spanish day name of the winning day
    pub day_name: &'static str,
    /// Calendar date of the winning day
    pub date: NaiveDate,
    /// Winning score
    pub score: f64,
}

/// Everything the report formatter needs for one run
#[derive(Debug, Clone, Serialize)]
pub struct KayakReport {
    /// When this report was generated (Europe/Madrid)
    pub generated_at: DateTime<Tz>,
    /// One outlook per day of the horizon
    pub days: Vec<DayOutlook>,
    /// Best (zone, day) pair, `None` when no zone produced data
    pub best: Option<BestPick>,
}

/// Spanish weekday name
#[must_use]
pub fn spanish_day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Lunes",
        Weekday::Tue => "Martes",
        Weekday::Wed => "Miércoles",
        Weekday::Thu => "Jueves",
        Weekday::Fri => "Viernes",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

/// Generate the full report: serial per-zone fetch, then score and rank.
///
/// An empty zone table is the one fatal error here; per-zone fetch failures
/// only shrink the result set.
pub async fn generate_report(
    client: &ForecastClient<'_>,
    config: &AppConfig,
    zones: &[Zone],
) -> Result<KayakReport> {
    if zones.is_empty() {
        return Err(KayakError::general("Zone table is empty, nothing to report").into());
    }

    info!(
        "Generating {}-day kayak report for {} zones",
        config.weather.forecast_days,
        zones.len()
    );

    let pause = std::time::Duration::from_millis(config.weather.request_pause_ms);
    let mut forecasts: Vec<ZoneForecast> = Vec::with_capacity(zones.len());

    for (index, zone) in zones.iter().enumerate() {
        // Small fixed pause between zones to stay polite to the API
        if index > 0 && !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }

        match client.fetch_forecast(zone).await {
            Ok(forecast) => forecasts.push(forecast),
            Err(e) => {
                warn!("Skipping zone {} for this run: {}", zone.name, e);
            }
        }
    }

    info!(
        "Retrieved forecasts for {}/{} zones",
        forecasts.len(),
        zones.len()
    );

    let generated_at = Utc::now().with_timezone(&Madrid);
    Ok(build_report(
        &forecasts,
        config.weather.forecast_days,
        generated_at,
    ))
}

/// Assemble the report from already-fetched forecasts. Pure and synchronous,
/// which is what the ranking and summary tests exercise.
#[must_use]
pub fn build_report(
    forecasts: &[ZoneForecast],
    horizon_days: usize,
    generated_at: DateTime<Tz>,
) -> KayakReport {
    let base_date = generated_at.date_naive();

    let days: Vec<DayOutlook> = (0..horizon_days)
        .map(|day| {
            let date = base_date + Duration::days(day as i64);
            let ranked = rank_day(forecasts, day);
            debug!("Day {} ({}): {} zones ranked", day, date, ranked.len());
            DayOutlook {
                date,
                day_name: spanish_day_name(date.weekday()),
                ranked,
            }
        })
        .collect();

    let best = find_best(&days);

    KayakReport {
        generated_at,
        days,
        best,
    }
}

/// Score every zone for one day and sort best-first.
///
/// The sort is stable and the input is in zone-table order, so equal scores
/// keep their table order.
fn rank_day(forecasts: &[ZoneForecast], day: usize) -> Vec<ScoredResult> {
    let mut ranked: Vec<ScoredResult> = forecasts
        .iter()
        .filter_map(|forecast| {
            let conditions = forecast.day(day)?;
            let SuitabilityScore { score, rating } = scoring::score_conditions(conditions);
            Some(ScoredResult {
                zone_name: forecast.zone.name,
                score,
                rating,
                conditions: *conditions,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ranked
}

/// Find the single best (zone, day) pair. Earlier days and earlier table
/// positions win ties, matching the strict-greater comparison.
fn find_best(days: &[DayOutlook]) -> Option<BestPick> {
    let mut best: Option<BestPick> = None;

    for day in days {
        for result in &day.ranked {
            let beats = best.as_ref().is_none_or(|b| result.score > b.score);
            if beats {
                best = Some(BestPick {
                    zone_name: result.zone_name,
                    day_name: day.day_name,
                    date: day.date,
                    score: result.score,
                });
            }
        }
    }

    best
}
