pub mod owm_forecast;
pub mod record;
