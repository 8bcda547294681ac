//! Weather API client for Open-Meteo integration
//!
//! This module provides HTTP client functionality for retrieving forecast
//! data from the Open-Meteo API with timeouts, bounded retry logic, and
//! typed response parsing. No API key is required.

use crate::KayakError;
use crate::config::WeatherConfig;
use crate::models::{Zone, ZoneForecast};
use anyhow::{Context, Result};
use reqwest::{Client, Response};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// HTTP client for the Open-Meteo forecast API
pub struct ForecastClient<'a> {
    /// HTTP client
    client: Client,
    /// Weather configuration (timeout, retry policy, horizon)
    config: &'a WeatherConfig,
}

impl<'a> ForecastClient<'a> {
    /// Create a new forecast client from the weather configuration
    pub fn new(config: &'a WeatherConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("MallorKayak/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Fetch the forecast for one zone over the configured horizon.
    ///
    /// Returns an error once the retry budget is exhausted; the caller skips
    /// the zone for the run, this is never fatal for the overall report.
    pub async fn fetch_forecast(&self, zone: &Zone) -> Result<ZoneForecast> {
        // Upstream accepts up to 16 days, this system caps at 3
        let days = self.config.forecast_days.min(3);

        let url = format!(
            "{}/forecast?latitude={}&longitude={}&hourly=windspeed_10m,wave_height,wave_direction,visibility&daily=temperature_2m_max,temperature_2m_min,windspeed_10m_max,precipitation_sum&timezone=Europe%2FMadrid&wind_speed_unit=ms&forecast_days={}",
            self.config.base_url.trim_end_matches('/'),
            zone.latitude,
            zone.longitude,
            days
        );

        info!("Fetching {}-day forecast for {}", days, zone.name);
        debug!("Open-Meteo request URL: {}", url);
        let start_time = Instant::now();

        let response = self.make_request(&url).await?;

        let forecast_response: openmeteo::ForecastResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse Open-Meteo response for {}", zone.name))
            .map_err(|e| {
                error!("Failed to parse forecast response: {}", e);
                KayakError::api(format!(
                    "Invalid forecast data received from Open-Meteo for {} ({})",
                    zone.name,
                    zone.format_coordinates()
                ))
            })?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved forecast for {} in {:.3}s",
            zone.name,
            total_duration.as_secs_f64()
        );

        if total_duration.as_secs() > 5 {
            warn!(
                "Slow API response for {}: {:.3}s",
                zone.name,
                total_duration.as_secs_f64()
            );
        }

        Ok(ZoneForecast::from_openmeteo(&forecast_response, *zone, days))
    }

    /// Make a request with the configured bounded retry policy.
    ///
    /// Network errors and retryable statuses (5xx, 429) are retried up to
    /// `max_retries` extra attempts with a fixed delay in between; any other
    /// non-2xx status fails immediately.
    async fn make_request(&self, url: &str) -> Result<Response> {
        let max_attempts = self.config.max_retries + 1;
        let retry_delay = Duration::from_secs(self.config.retry_delay_seconds.into());
        let mut attempt = 0;

        debug!("Starting HTTP request (max attempts: {})", max_attempts);

        loop {
            attempt += 1;
            let attempt_start = Instant::now();

            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!(
                        "HTTP response received: {} in {:.3}s (attempt {}/{})",
                        status,
                        attempt_start.elapsed().as_secs_f64(),
                        attempt,
                        max_attempts
                    );

                    if status.is_success() {
                        return Ok(response);
                    }

                    let retryable = status.is_server_error() || status.as_u16() == 429;
                    if !retryable {
                        error!("API request failed with status {}", status);
                        return Err(KayakError::api(format!(
                            "API request failed with status: {} - {}",
                            status,
                            status.canonical_reason().unwrap_or("Unknown error")
                        ))
                        .into());
                    }

                    if attempt >= max_attempts {
                        error!(
                            "API request failed after {} attempts (last status {})",
                            max_attempts, status
                        );
                        return Err(KayakError::api(format!(
                            "API request failed after {max_attempts} attempts (last status {status})"
                        ))
                        .into());
                    }

                    warn!(
                        "HTTP {} on attempt {}/{}, retrying in {}s",
                        status,
                        attempt,
                        max_attempts,
                        retry_delay.as_secs()
                    );
                    tokio::time::sleep(retry_delay).await;
                }
                Err(e) => {
                    if attempt >= max_attempts {
                        error!("Network error after {} attempts: {}", max_attempts, e);
                        return Err(KayakError::api(format!(
                            "Network error after {max_attempts} attempts: {e}"
                        ))
                        .into());
                    }

                    warn!(
                        "Network error on attempt {}/{} ({:.3}s): {}, retrying in {}s",
                        attempt,
                        max_attempts,
                        attempt_start.elapsed().as_secs_f64(),
                        e,
                        retry_delay.as_secs()
                    );
                    tokio::time::sleep(retry_delay).await;
                }
            }
        }
    }
}

/// Open-Meteo API response structures and conversion utilities
pub(crate) mod openmeteo {
    use crate::models::forecast::MS_TO_KNOTS;
    use crate::models::{DayConditions, Zone, ZoneForecast};
    use serde::Deserialize;

    /// Forecast response from the Open-Meteo API
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub hourly: Option<HourlyData>,
        pub daily: Option<DailyData>,
    }

    /// Hourly arrays from Open-Meteo, indexed by hour of the horizon
    #[derive(Debug, Deserialize)]
    pub struct HourlyData {
        pub time: Vec<String>,
        #[serde(rename = "windspeed_10m")]
        pub wind_speed: Option<Vec<Option<f64>>>,
        pub wave_height: Option<Vec<Option<f64>>>,
        pub visibility: Option<Vec<Option<f64>>>,
    }

    /// Daily arrays from Open-Meteo, indexed by day offset
    #[derive(Debug, Deserialize)]
    pub struct DailyData {
        pub time: Vec<String>,
        #[serde(rename = "temperature_2m_max")]
        pub temperature_max: Option<Vec<Option<f64>>>,
        #[serde(rename = "temperature_2m_min")]
        pub temperature_min: Option<Vec<Option<f64>>>,
        #[serde(rename = "windspeed_10m_max")]
        pub wind_speed_max: Option<Vec<Option<f64>>>,
        #[serde(rename = "precipitation_sum")]
        pub precipitation: Option<Vec<Option<f64>>>,
    }

    /// Extract a single daily value with safe indexing
    fn daily_value(values: Option<&Vec<Option<f64>>>, day: usize) -> Option<f64> {
        values?.get(day).copied().flatten()
    }

    /// Mean of the hourly values falling inside one day's 24-hour window.
    /// Null elements are skipped; an empty or missing window yields `None`.
    fn hourly_day_mean(values: Option<&Vec<Option<f64>>>, day: usize) -> Option<f64> {
        let values = values?;
        let start = day * 24;
        if start >= values.len() {
            return None;
        }
        let end = (start + 24).min(values.len());
        let window: Vec<f64> = values[start..end].iter().filter_map(|v| *v).collect();
        if window.is_empty() {
            None
        } else {
            Some(window.iter().sum::<f64>() / window.len() as f64)
        }
    }

    // Convert the raw parallel arrays into per-day typed conditions
    impl ZoneForecast {
        /// Create a zone forecast from an Open-Meteo API response.
        ///
        /// A missing array or null element becomes a typed absence in the
        /// matching [`DayConditions`] field, never an error.
        #[must_use]
        pub(crate) fn from_openmeteo(
            response: &ForecastResponse,
            zone: Zone,
            horizon_days: usize,
        ) -> Self {
            let daily = response.daily.as_ref();
            let hourly = response.hourly.as_ref();

            let mut days = Vec::with_capacity(horizon_days);
            for day in 0..horizon_days {
                let wind_speed_max_kn =
                    daily_value(daily.and_then(|d| d.wind_speed_max.as_ref()), day)
                        .map(|ms| ms * MS_TO_KNOTS);

                let wave_height_m =
                    hourly_day_mean(hourly.and_then(|h| h.wave_height.as_ref()), day);

                // Upstream reports visibility in metres
                let visibility_km =
                    hourly_day_mean(hourly.and_then(|h| h.visibility.as_ref()), day)
                        .map(|metres| metres / 1000.0);

                let precipitation_mm =
                    daily_value(daily.and_then(|d| d.precipitation.as_ref()), day);

                let temperature_max_c =
                    daily_value(daily.and_then(|d| d.temperature_max.as_ref()), day);

                days.push(DayConditions {
                    wind_speed_max_kn,
                    wave_height_m,
                    visibility_km,
                    precipitation_mm,
                    temperature_max_c,
                });
            }

            Self { zone, days }
        }
    }
}
