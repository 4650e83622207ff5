use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Temperature unit preference as chosen by the user
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}

/// Unit codes and symbols resolved from a unit preference
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct UnitSymbols {
    pub api_unit_code: &'static str,
    pub temperature_symbol: &'static str,
    pub speed_unit_label: &'static str,
}

impl UnitPreference {
    /// Returns the forecast API unit code together with display symbols for temperature and
    /// wind speed. OpenWeatherMap reports wind in m/s for both metric and standard units.
    ///
    pub fn symbols(&self) -> UnitSymbols {
        match self {
            UnitPreference::Celsius => UnitSymbols {
                api_unit_code: "metric",
                temperature_symbol: "°C",
                speed_unit_label: "m/s",
            },
            UnitPreference::Fahrenheit => UnitSymbols {
                api_unit_code: "imperial",
                temperature_symbol: "°F",
                speed_unit_label: "mph",
            },
            UnitPreference::Kelvin => UnitSymbols {
                api_unit_code: "standard",
                temperature_symbol: "K",
                speed_unit_label: "m/s",
            },
        }
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for UnitPreference {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            UnitPreference::Celsius => write!(f, "Celsius"),
            UnitPreference::Fahrenheit => write!(f, "Fahrenheit"),
            UnitPreference::Kelvin => write!(f, "Kelvin"),
        }
    }
}

impl FromStr for UnitPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "celsius" | "c" | "metric" => Ok(UnitPreference::Celsius),
            "fahrenheit" | "f" | "imperial" => Ok(UnitPreference::Fahrenheit),
            "kelvin" | "k" | "standard" => Ok(UnitPreference::Kelvin),
            other => Err(format!("unknown unit '{}', expected celsius, fahrenheit or kelvin", other)),
        }
    }
}
