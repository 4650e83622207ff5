use log::{info, warn};
use crate::advisory::Advisory;
use crate::config::DashboardSettings;
use crate::errors::DashboardError;
use crate::models::owm_forecast::RawForecastPayload;
use crate::models::record::{Forecast, ForecastOutcome};
use crate::normalizer::normalize;
use crate::units::UnitPreference;
use crate::weather_source::WeatherSource;

/// Context carried between request cycles: the selected city, the last payload and the
/// units that payload was fetched in
#[derive(Default)]
pub struct Session {
    pub city: Option<String>,
    pub payload: Option<RawForecastPayload>,
    pub units: Option<UnitPreference>,
}

/// What the user asked for
pub enum Action {
    /// Explicit request for a live forecast, an empty city means auto detect
    Submit { city: String },
    /// Show whatever is at hand without fetching
    Show,
}

/// Result of a request cycle, ready for presentation
#[derive(Debug)]
pub enum DashboardView {
    Ready { city: String, forecast: Forecast, advisory: Option<Advisory> },
    ApiError { message: String },
    NoCachedData,
}

pub struct Dashboard {
    settings: DashboardSettings,
    source: WeatherSource,
}

impl Dashboard {
    pub fn new(settings: DashboardSettings, source: WeatherSource) -> Dashboard {
        Self { settings, source }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Runs one request cycle.
    ///
    /// A submit always fetches live and persists the payload once the fetch completes, no
    /// matter what status the payload carries. Show uses the payload already in the session,
    /// else the snapshot, and reports NoCachedData when there is neither. A shown payload is
    /// always normalized in the units it was fetched in, not the currently selected ones.
    ///
    /// # Arguments
    ///
    /// * 'session' - context updated with the city and payload in use
    /// * 'action' - the user action
    pub fn handle(&self, session: &mut Session, action: Action) -> Result<DashboardView, DashboardError> {
        match action {
            Action::Submit { city } => {
                let units = self.settings.units;
                let city = self.source.resolve_city(&city);
                let payload = self.source.fetch(&city, units.symbols().api_unit_code)?;
                self.source.save_snapshot(&payload, units)?;

                session.city = Some(city);
                session.payload = Some(payload);
                session.units = Some(units);
            },
            Action::Show => {
                if session.payload.is_none() {
                    match self.source.load_fallback()? {
                        Some(snapshot) => {
                            let units = snapshot.units.unwrap_or_else(|| {
                                warn!("cached forecast has no recorded units, assuming {}", self.settings.units);
                                self.settings.units
                            });
                            info!("showing cached forecast fetched in {}", units);
                            session.payload = Some(snapshot.payload);
                            session.units = Some(units);
                        },
                        None => {
                            warn!("no cached data available");
                            return Ok(DashboardView::NoCachedData);
                        },
                    }
                }
            },
        }

        let Some(payload) = session.payload.as_ref() else {
            return Ok(DashboardView::NoCachedData);
        };

        let symbols = session.units.unwrap_or(self.settings.units).symbols();

        match normalize(payload, symbols)? {
            ForecastOutcome::Failure { code, message } => {
                warn!("forecast API returned {}: {}", code, message);
                Ok(DashboardView::ApiError { message })
            },
            ForecastOutcome::Success(forecast) => {
                let city = session.city.clone()
                    .or_else(|| forecast.city_name.clone())
                    .unwrap_or_else(|| "unknown".to_string());

                let advisory = if self.settings.show_alerts {
                    forecast.current().map(Advisory::for_record)
                } else {
                    None
                };

                Ok(DashboardView::Ready { city, forecast, advisory })
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use crate::config::{GeoLocation, OpenWeather};
    use crate::errors::NormalizeError;
    use crate::manager_geo::GeoLocator;
    use crate::manager_owm::OWM;
    use crate::manager_owm::errors::WeatherSourceError;
    use crate::snapshot::SnapshotStore;

    fn forecast_body(city: &str, temp: f64) -> serde_json::Value {
        json!({
            "cod": "200",
            "message": 0,
            "cnt": 2,
            "list": [
                { "dt_txt": "2024-07-01 12:00:00", "main": { "temp": temp, "humidity": 40 }, "wind": { "speed": 4.0, "deg": 225 } },
                { "dt_txt": "2024-07-01 15:00:00", "main": { "temp": temp - 2.0, "humidity": 45 }, "wind": { "speed": 3.0, "deg": 180 }, "rain": { "3h": 0.3 } }
            ],
            "city": { "name": city, "coord": { "lat": 41.9, "lon": 12.5 } }
        })
    }

    fn dashboard(server_uri: &str, api_key: &str, snapshot: &std::path::Path, settings: DashboardSettings) -> Dashboard {
        let source = WeatherSource::new(
            GeoLocator::new(&GeoLocation { lookup_url: format!("{}/json", server_uri), default_city: "New York".to_string() }),
            OWM::new(&OpenWeather { api_key: api_key.to_string(), forecast_url: format!("{}/forecast", server_uri) }),
            SnapshotStore::new(snapshot),
        );
        Dashboard::new(settings, source)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_submit_fetches_and_persists() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "Rome"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Rome", 31.0)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("snapshot.json");
        let board = dashboard(&mock_server.uri(), "0123456789abcdef", &snapshot, DashboardSettings::default());

        let (view, session) = tokio::task::spawn_blocking(move || {
            let mut session = Session::default();
            let view = board.handle(&mut session, Action::Submit { city: "Rome".to_string() }).unwrap();
            (view, session)
        }).await.unwrap();

        match view {
            DashboardView::Ready { city, forecast, advisory } => {
                assert_eq!(city, "Rome");
                assert_eq!(forecast.records.len(), 2);
                assert_eq!(advisory, Some(Advisory::LightClothing));
            },
            other => panic!("unexpected view {:?}", other),
        }
        assert_eq!(session.city.as_deref(), Some("Rome"));
        assert_eq!(session.units, Some(UnitPreference::Celsius));
        let saved = SnapshotStore::new(&snapshot).load_fallback().unwrap().unwrap();
        assert_eq!(saved.payload, RawForecastPayload(forecast_body("Rome", 31.0)));
        assert_eq!(saved.units, Some(UnitPreference::Celsius));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_submit_without_city_uses_detected_location() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "city": "Lund" })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "Lund"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Lund", 12.0)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let board = dashboard(&mock_server.uri(), "0123456789abcdef", &dir.path().join("s.json"), DashboardSettings::default());

        let view = tokio::task::spawn_blocking(move || {
            board.handle(&mut Session::default(), Action::Submit { city: String::new() }).unwrap()
        }).await.unwrap();

        match view {
            DashboardView::Ready { city, advisory, .. } => {
                assert_eq!(city, "Lund");
                assert_eq!(advisory, Some(Advisory::Jacket));
            },
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_error_payload_is_persisted_and_surfaced() {
        let mock_server = MockServer::start().await;
        let body = json!({ "cod": "404", "message": "city not found" });
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(404).set_body_json(body.clone()))
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("snapshot.json");
        let board = dashboard(&mock_server.uri(), "0123456789abcdef", &snapshot, DashboardSettings::default());

        let view = tokio::task::spawn_blocking(move || {
            board.handle(&mut Session::default(), Action::Submit { city: "Atlantis".to_string() }).unwrap()
        }).await.unwrap();

        match view {
            DashboardView::ApiError { message } => assert_eq!(message, "city not found"),
            other => panic!("unexpected view {:?}", other),
        }
        assert_eq!(SnapshotStore::new(&snapshot).load_fallback().unwrap().map(|s| s.payload), Some(RawForecastPayload(body)));
    }

    #[test]
    fn test_show_uses_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("snapshot.json");
        SnapshotStore::new(&snapshot).save_snapshot(&RawForecastPayload(forecast_body("Paris", 22.0)), UnitPreference::Celsius).unwrap();

        let settings = DashboardSettings { show_alerts: false, ..DashboardSettings::default() };
        let board = dashboard("http://127.0.0.1:1", "", &snapshot, settings);
        let mut session = Session::default();

        match board.handle(&mut session, Action::Show).unwrap() {
            DashboardView::Ready { city, forecast, advisory } => {
                assert_eq!(city, "Paris");
                assert_eq!(forecast.records[1].rain_mm, 0.3);
                assert_eq!(advisory, None);
            },
            other => panic!("unexpected view {:?}", other),
        }
        assert!(session.payload.is_some());
        assert!(session.city.is_none());
    }

    #[test]
    fn test_show_prefers_session_payload() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("snapshot.json");
        SnapshotStore::new(&snapshot).save_snapshot(&RawForecastPayload(forecast_body("Paris", 22.0)), UnitPreference::Celsius).unwrap();

        let board = dashboard("http://127.0.0.1:1", "", &snapshot, DashboardSettings::default());
        let mut session = Session {
            city: Some("Madrid".to_string()),
            payload: Some(RawForecastPayload(forecast_body("Madrid", 35.0))),
            units: Some(UnitPreference::Celsius),
        };

        match board.handle(&mut session, Action::Show).unwrap() {
            DashboardView::Ready { city, advisory, .. } => {
                assert_eq!(city, "Madrid");
                assert_eq!(advisory, Some(Advisory::LightClothing));
            },
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_show_keeps_units_of_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("snapshot.json");
        SnapshotStore::new(&snapshot).save_snapshot(&RawForecastPayload(forecast_body("Paris", 22.0)), UnitPreference::Celsius).unwrap();

        let settings = DashboardSettings { units: UnitPreference::Kelvin, ..DashboardSettings::default() };
        let board = dashboard("http://127.0.0.1:1", "", &snapshot, settings);
        let mut session = Session::default();

        let view = board.handle(&mut session, Action::Show).unwrap();
        match &view {
            DashboardView::Ready { forecast, advisory, .. } => {
                assert_eq!(forecast.symbols, UnitPreference::Celsius.symbols());
                assert_eq!(*advisory, Some(Advisory::Jacket));
            },
            other => panic!("unexpected view {:?}", other),
        }
        assert_eq!(session.units, Some(UnitPreference::Celsius));

        let text = crate::render::render(&view, board.settings());
        assert!(text.contains("22 °C"));
        assert!(!text.contains("22 K"));
    }

    #[test]
    fn test_show_without_units_sidecar_assumes_settings() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("snapshot.json");
        std::fs::write(&snapshot, forecast_body("Paris", 295.0).to_string()).unwrap();

        let settings = DashboardSettings { units: UnitPreference::Kelvin, ..DashboardSettings::default() };
        let board = dashboard("http://127.0.0.1:1", "", &snapshot, settings);

        match board.handle(&mut Session::default(), Action::Show).unwrap() {
            DashboardView::Ready { forecast, .. } => assert_eq!(forecast.symbols.temperature_symbol, "K"),
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_show_without_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let board = dashboard("http://127.0.0.1:1", "", &dir.path().join("snapshot.json"), DashboardSettings::default());

        assert!(matches!(board.handle(&mut Session::default(), Action::Show).unwrap(), DashboardView::NoCachedData));
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("snapshot.json");
        let board = dashboard("http://127.0.0.1:1", "", &snapshot, DashboardSettings::default());

        let result = board.handle(&mut Session::default(), Action::Submit { city: "Rome".to_string() });

        assert!(matches!(result, Err(DashboardError::Source(WeatherSourceError::Configuration(_)))));
        assert!(!snapshot.exists());
    }

    #[test]
    fn test_malformed_snapshot_timestamp_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("snapshot.json");
        let mut body = forecast_body("Paris", 22.0);
        body["list"][0]["dt_txt"] = json!("01/07/2024 12:00");
        SnapshotStore::new(&snapshot).save_snapshot(&RawForecastPayload(body), UnitPreference::Celsius).unwrap();

        let board = dashboard("http://127.0.0.1:1", "", &snapshot, DashboardSettings::default());

        let result = board.handle(&mut Session::default(), Action::Show);
        assert!(matches!(result, Err(DashboardError::Normalize(NormalizeError::Timestamp { index: 0, .. }))));
    }

    #[test]
    fn test_units_from_settings() {
        let dir = tempfile::tempdir().unwrap();
        let settings = DashboardSettings { units: UnitPreference::Fahrenheit, ..DashboardSettings::default() };
        let board = dashboard("http://127.0.0.1:1", "", &dir.path().join("s.json"), settings);

        assert_eq!(board.settings().units.symbols().api_unit_code, "imperial");
    }
}
