use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The forecast payload exactly as returned by the forecast endpoint.
/// It is kept as an untyped JSON document so that it can be persisted verbatim,
/// error payloads included
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(transparent)]
pub struct RawForecastPayload(pub Value);

impl RawForecastPayload {
    /// Status code of the payload, stringified since the API reports it as a string on
    /// success and sometimes as a number on failure
    pub fn status_code(&self) -> Option<String> {
        match self.0.get("cod")? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code().is_some_and(|c| c == "200")
    }

    /// The API supplied failure message, if any
    pub fn message(&self) -> Option<String> {
        match self.0.get("message")? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Deserialize)]
pub struct OwmCoord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize)]
pub struct OwmCity {
    pub name: Option<String>,
    pub coord: Option<OwmCoord>,
}

#[derive(Deserialize)]
pub struct OwmMain {
    pub temp: f64,
    /// Percent, values above 100 are rejected by the normalizer
    pub humidity: u8,
}

#[derive(Deserialize)]
pub struct OwmWind {
    pub speed: f64,
    pub deg: f64,
}

#[derive(Deserialize)]
pub struct OwmRain {
    #[serde(rename = "3h")]
    pub three_hours: Option<f64>,
}

#[derive(Deserialize)]
pub struct OwmEntry {
    pub dt_txt: String,
    pub main: OwmMain,
    pub wind: OwmWind,
    pub rain: Option<OwmRain>,
}

#[derive(Deserialize)]
pub struct OwmForecast {
    pub city: Option<OwmCity>,
    pub list: Vec<OwmEntry>,
}
