use crate::config::Config;
use crate::errors::SnapshotError;
use crate::manager_geo::GeoLocator;
use crate::manager_owm::OWM;
use crate::manager_owm::errors::WeatherSourceError;
use crate::models::owm_forecast::RawForecastPayload;
use crate::snapshot::{Snapshot, SnapshotStore};
use crate::units::UnitPreference;

/// Where raw forecasts come from: city resolution, the live forecast API and the snapshot
/// of the last fetched payload
pub struct WeatherSource {
    geo: GeoLocator,
    owm: OWM,
    snapshot: SnapshotStore,
}

impl WeatherSource {
    pub fn new(geo: GeoLocator, owm: OWM, snapshot: SnapshotStore) -> WeatherSource {
        Self { geo, owm, snapshot }
    }

    /// Builds a WeatherSource with all parts taken from the configuration
    ///
    /// # Arguments
    ///
    /// * 'config' - the loaded configuration
    pub fn from_config(config: &Config) -> WeatherSource {
        Self::new(
            GeoLocator::new(&config.geo_location),
            OWM::new(&config.open_weather),
            SnapshotStore::new(&config.files.snapshot_file),
        )
    }

    pub fn resolve_city(&self, explicit_name: &str) -> String {
        self.geo.resolve_city(explicit_name)
    }

    pub fn fetch(&self, city: &str, api_unit_code: &str) -> Result<RawForecastPayload, WeatherSourceError> {
        self.owm.fetch(city, api_unit_code)
    }

    pub fn load_fallback(&self) -> Result<Option<Snapshot>, SnapshotError> {
        self.snapshot.load_fallback()
    }

    pub fn save_snapshot(&self, payload: &RawForecastPayload, units: UnitPreference) -> Result<(), SnapshotError> {
        self.snapshot.save_snapshot(payload, units)
    }
}
