//! Data models for the `MallorKayak` application

pub mod forecast;
pub mod zone;

pub use forecast::{DayConditions, ZoneForecast};
pub use zone::{MALLORCA_ZONES, Zone};
