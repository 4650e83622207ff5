use log::{debug, info};
use serde::Deserialize;
use ureq::Agent;
use crate::config::GeoLocation;

#[derive(Deserialize)]
struct IpLocation {
    city: Option<String>,
}

/// Struct for resolving which city to show, using an IP geolocation service when the user
/// hasn't given one
pub struct GeoLocator {
    agent: Agent,
    lookup_url: String,
    default_city: String,
}

impl GeoLocator {
    /// Returns a GeoLocator using the configured lookup endpoint and default city
    ///
    /// # Arguments
    ///
    /// * 'config' - geo location configuration
    pub fn new(config: &GeoLocation) -> GeoLocator {
        let agent = Agent::config_builder().build().into();

        Self { agent, lookup_url: config.lookup_url.clone(), default_city: config.default_city.clone() }
    }

    /// Returns the explicit city name if one is given, otherwise the city reported by the
    /// geolocation lookup.
    ///
    /// Whatever goes wrong with the lookup, the default city is returned. The failure is only
    /// visible in the debug log.
    ///
    /// # Arguments
    ///
    /// * 'explicit_name' - city name given by the user, possibly empty
    pub fn resolve_city(&self, explicit_name: &str) -> String {
        let explicit_name = explicit_name.trim();
        if !explicit_name.is_empty() {
            return explicit_name.to_string();
        }

        match self.lookup_city() {
            Some(city) => {
                info!("detected location: {}", city);
                city
            },
            None => self.default_city.clone(),
        }
    }

    fn lookup_city(&self) -> Option<String> {
        let json = match self.agent.get(self.lookup_url.as_str()).call() {
            Ok(mut res) => match res.body_mut().read_to_string() {
                Ok(json) => json,
                Err(e) => {
                    debug!("geolocation body error: {}", e);
                    return None;
                }
            },
            Err(e) => {
                debug!("geolocation request failed: {}", e);
                return None;
            }
        };

        let location: IpLocation = match serde_json::from_str(&json) {
            Ok(l) => l,
            Err(e) => {
                debug!("geolocation parse error: {}", e);
                return None;
            }
        };

        location.city.filter(|c| !c.trim().is_empty())
    }
}
