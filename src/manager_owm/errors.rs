use std::fmt;
use std::fmt::Formatter;
use ureq::Error;
use crate::errors::ConfigError;

pub enum WeatherSourceError {
    Configuration(String),
    Network(String),
    Document(String),
}

impl fmt::Display for WeatherSourceError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            WeatherSourceError::Configuration(e) => write!(f, "WeatherSourceError::Configuration: {}", e),
            WeatherSourceError::Network(e) => write!(f, "WeatherSourceError::Network: {}", e),
            WeatherSourceError::Document(e) => write!(f, "WeatherSourceError::Document: {}", e),
        }
    }
}
impl fmt::Debug for WeatherSourceError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
impl std::error::Error for WeatherSourceError {}

impl From<Error> for WeatherSourceError {
    fn from(e: Error) -> Self {
        WeatherSourceError::Network(e.to_string())
    }
}
impl From<serde_json::Error> for WeatherSourceError {
    fn from(e: serde_json::Error) -> Self {
        WeatherSourceError::Document(e.to_string())
    }
}
impl From<ConfigError> for WeatherSourceError {
    fn from(e: ConfigError) -> Self {
        WeatherSourceError::Configuration(e.0)
    }
}
