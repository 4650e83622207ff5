use crate::config::Language;
use crate::models::record::NormalizedRecord;

/// Temperature above which light clothing is suggested.
///
/// The value is compared against the record as is, it is NOT converted between units. It is
/// only meaningful for records fetched in Celsius; under Fahrenheit or Kelvin nearly every
/// temperature is above it.
pub const LIGHT_CLOTHING_THRESHOLD: f64 = 30.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Advisory {
    LightClothing,
    Jacket,
}

impl Advisory {
    /// Returns a clothing advisory given the temperature of a forecast record
    ///
    /// # Arguments
    ///
    /// * 'record' - normally the first record of a forecast
    pub fn for_record(record: &NormalizedRecord) -> Advisory {
        if record.temperature > LIGHT_CLOTHING_THRESHOLD {
            Advisory::LightClothing
        } else {
            Advisory::Jacket
        }
    }

    pub fn text(&self, language: Language) -> &'static str {
        match (self, language) {
            (Advisory::LightClothing, Language::En) => "Wear light clothes!",
            (Advisory::Jacket, Language::En) => "It's cool, wear a jacket!",
            (Advisory::LightClothing, Language::Sv) => "Klä dig lätt!",
            (Advisory::Jacket, Language::Sv) => "Det är svalt, ta på dig en jacka!",
        }
    }
}
