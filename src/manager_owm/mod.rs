pub mod errors;

use log::info;
use ureq::Agent;
use crate::config::{validate_api_key, OpenWeather};
use crate::manager_owm::errors::WeatherSourceError;
use crate::models::owm_forecast::RawForecastPayload;

/// Struct for fetching 5 day / 3 hour forecasts from OpenWeatherMap
pub struct OWM {
    agent: Agent,
    forecast_url: String,
    api_key: String,
}

impl OWM {
    /// Returns an OWM struct ready for fetching forecasts.
    ///
    /// The agent keeps the transport default timeouts and doesn't treat http error statuses
    /// as errors, since the API explains failures in the response body.
    ///
    /// # Arguments
    ///
    /// * 'config' - OpenWeather configuration holding endpoint and API key
    pub fn new(config: &OpenWeather) -> OWM {
        let agent_config = Agent::config_builder()
            .http_status_as_error(false)
            .build();

        let agent = agent_config.into();

        Self { agent, forecast_url: config.forecast_url.clone(), api_key: config.api_key.clone() }
    }

    /// Fetches a forecast for the given city and returns the response document verbatim.
    ///
    /// Error payloads (e.g. unknown city or invalid key) are returned as is, it is up to the
    /// caller to inspect the status code. The request is never attempted without a usable
    /// API key.
    ///
    /// # Arguments
    ///
    /// * 'city' - name of the city to get a forecast for
    /// * 'api_unit_code' - one of metric, imperial or standard
    pub fn fetch(&self, city: &str, api_unit_code: &str) -> Result<RawForecastPayload, WeatherSourceError> {
        let api_key = validate_api_key(&self.api_key)?;

        info!("fetching {} forecast for {}", api_unit_code, city);

        let json = self.agent
            .get(self.forecast_url.as_str())
            .query("q", city)
            .query("appid", api_key)
            .query("units", api_unit_code)
            .call()?
            .body_mut()
            .read_to_string()?;

        let payload: RawForecastPayload = serde_json::from_str(&json)?;

        Ok(payload)
    }
}
