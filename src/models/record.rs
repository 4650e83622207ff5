use std::fmt;
use std::fmt::Formatter;
use chrono::NaiveDateTime;
use serde::Serialize;
use crate::units::UnitSymbols;
use crate::wind::WindDirection;

/// One normalized forecast time step
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct NormalizedRecord {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub wind_direction: WindDirection,
    pub rain_mm: f64,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for NormalizedRecord {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} {:>7.1} {:>4} {:>6.1} {:<2} {:>5.1}",
               self.timestamp.format("%Y-%m-%d %H:%M"),
               self.temperature, self.humidity, self.wind_speed, self.wind_direction, self.rain_mm)
    }
}

#[derive(Serialize, Clone, Copy, PartialEq, Debug)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// A successfully normalized forecast
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct Forecast {
    pub city_name: Option<String>,
    pub coord: Option<Coord>,
    pub symbols: UnitSymbols,
    pub records: Vec<NormalizedRecord>,
}

impl Forecast {
    /// The record closest in time, i.e. the first one as delivered by the API
    pub fn current(&self) -> Option<&NormalizedRecord> {
        self.records.first()
    }
}

/// Outcome of interpreting a raw payload
#[derive(Clone, PartialEq, Debug)]
pub enum ForecastOutcome {
    Success(Forecast),
    Failure { code: String, message: String },
}
