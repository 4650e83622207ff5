use chrono::NaiveDateTime;
use crate::errors::NormalizeError;
use crate::models::owm_forecast::{OwmForecast, RawForecastPayload};
use crate::models::record::{Coord, Forecast, ForecastOutcome, NormalizedRecord};
use crate::units::UnitSymbols;
use crate::wind::WindDirection;

/// Format of the dt_txt field of forecast entries
const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Relative humidity is a percentage
const MAX_HUMIDITY: u8 = 100;

/// Interprets a raw forecast payload and, if the payload reports success, normalizes its
/// entries into records.
///
/// A payload whose status code isn't "200" results in a Failure carrying the API message.
/// For a successful payload every entry yields exactly one record, in the order the API
/// returned them. A single malformed entry fails the whole batch.
///
/// # Arguments
///
/// * 'payload' - the raw payload from the forecast endpoint or the snapshot
/// * 'symbols' - unit symbols in effect when the payload was requested
pub fn normalize(payload: &RawForecastPayload, symbols: UnitSymbols) -> Result<ForecastOutcome, NormalizeError> {
    if !payload.is_success() {
        return Ok(ForecastOutcome::Failure {
            code: payload.status_code().unwrap_or_else(|| "unknown".to_string()),
            message: payload.message().unwrap_or_else(|| "unknown error".to_string()),
        });
    }

    let raw: OwmForecast = serde_json::from_value(payload.0.clone())?;

    let mut records: Vec<NormalizedRecord> = Vec::with_capacity(raw.list.len());
    for (index, entry) in raw.list.iter().enumerate() {
        let timestamp = NaiveDateTime::parse_from_str(&entry.dt_txt, DT_TXT_FORMAT)
            .map_err(|e| NormalizeError::Timestamp {
                index,
                value: entry.dt_txt.clone(),
                reason: e.to_string(),
            })?;

        if entry.main.humidity > MAX_HUMIDITY {
            return Err(NormalizeError::Document(
                format!("entry {}: humidity {}% is out of range", index, entry.main.humidity)));
        }

        records.push(NormalizedRecord {
            timestamp,
            temperature: entry.main.temp,
            humidity: entry.main.humidity,
            wind_speed: entry.wind.speed,
            wind_direction: WindDirection::from_bearing(entry.wind.deg),
            rain_mm: entry.rain.as_ref().and_then(|r| r.three_hours).unwrap_or(0.0),
        });
    }

    let (city_name, coord) = match raw.city {
        Some(city) => (city.name, city.coord.map(|c| Coord { lat: c.lat, lon: c.lon })),
        None => (None, None),
    };

    Ok(ForecastOutcome::Success(Forecast { city_name, coord, symbols, records }))
}
