use std::env;
use std::process::ExitCode;
use anyhow::{anyhow, Result};
use log::{error, info};
use crate::config::load_config;
use crate::dashboard::{Action, Dashboard, Session};
use crate::logging::setup_logger;
use crate::render::render;
use crate::units::UnitPreference;
use crate::weather_source::WeatherSource;

mod advisory;
mod config;
mod dashboard;
mod errors;
mod logging;
mod manager_geo;
mod manager_owm;
mod models;
mod normalizer;
mod render;
mod snapshot;
mod units;
mod weather_source;
mod wind;

const USAGE: &str = "usage: weatherboard [--offline] [--units <celsius|fahrenheit|kelvin>] [CITY...]";

/// Command line arguments
struct Args {
    offline: bool,
    units: Option<UnitPreference>,
    city: String,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Args> {
    let mut offline = false;
    let mut units: Option<UnitPreference> = None;
    let mut city: Vec<String> = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--offline" => offline = true,
            "--units" => {
                let value = args.next().ok_or_else(|| anyhow!("--units needs a value\n{}", USAGE))?;
                units = Some(value.parse::<UnitPreference>().map_err(|e| anyhow!(e))?);
            },
            "-h" | "--help" => return Err(anyhow!(USAGE)),
            a if a.starts_with("--") => return Err(anyhow!("unknown option {}\n{}", a, USAGE)),
            _ => city.push(arg),
        }
    }

    Ok(Args { offline, units, city: city.join(" ") })
}

fn main() -> ExitCode {
    let args = match parse_args(env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => { eprintln!("{}", e); return ExitCode::from(2); }
    };

    let config_path = env::var("CONFIG_FILE").unwrap_or("config.toml".to_string());
    let mut config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => { eprintln!("{}", e); return ExitCode::FAILURE; }
    };

    if let Err(e) = setup_logger(&config.general) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    info!("weatherboard version: {}", env!("CARGO_PKG_VERSION"));

    if let Some(units) = args.units {
        config.dashboard.units = units;
    }
    info!("units: {}, snapshot: {}", config.dashboard.units, config.files.snapshot_file);

    let logs_to_stdout = config.general.log_to_stdout;
    let dashboard = Dashboard::new(config.dashboard, WeatherSource::from_config(&config));

    match run(&dashboard, &args) {
        Ok(text) => {
            print!("{}", text);
            ExitCode::SUCCESS
        },
        Err(e) => {
            error!("{}", e);
            if !logs_to_stdout {
                eprintln!("{}", e);
            }
            ExitCode::FAILURE
        },
    }
}

fn run(dashboard: &Dashboard, args: &Args) -> Result<String> {
    let mut session = Session::default();

    let action = if args.offline {
        Action::Show
    } else {
        Action::Submit { city: args.city.clone() }
    };

    let view = dashboard.handle(&mut session, action)?;

    Ok(render(&view, dashboard.settings()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_city_words() {
        let a = args(&["New", "York"]).unwrap();
        assert_eq!(a.city, "New York");
        assert!(!a.offline);
        assert!(a.units.is_none());
    }

    #[test]
    fn test_parse_flags() {
        let a = args(&["--units", "kelvin", "--offline"]).unwrap();
        assert!(a.offline);
        assert_eq!(a.units, Some(UnitPreference::Kelvin));
        assert_eq!(a.city, "");
    }

    #[test]
    fn test_parse_errors() {
        assert!(args(&["--units"]).is_err());
        assert!(args(&["--units", "rankine"]).is_err());
        assert!(args(&["--verbose"]).is_err());
    }
}
