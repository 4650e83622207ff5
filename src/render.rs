use std::fmt;
use std::fmt::Formatter;
use crate::config::{DashboardSettings, Language};
use crate::dashboard::DashboardView;
use crate::models::record::Forecast;

struct Labels {
    title: &'static str,
    current: &'static str,
    temperature: &'static str,
    humidity: &'static str,
    wind: &'static str,
    forecast: &'static str,
    time: &'static str,
    direction: &'static str,
    rain: &'static str,
    map: &'static str,
    tips: &'static str,
    api_error: &'static str,
    no_cache: &'static str,
}

const EN: Labels = Labels {
    title: "Weather",
    current: "Current",
    temperature: "Temp",
    humidity: "Humidity",
    wind: "Wind",
    forecast: "Forecast",
    time: "Datetime",
    direction: "Dir",
    rain: "Rain (mm)",
    map: "Map",
    tips: "Tips",
    api_error: "API Error",
    no_cache: "No cached data available",
};

const SV: Labels = Labels {
    title: "Väder",
    current: "Just nu",
    temperature: "Temp",
    humidity: "Fuktighet",
    wind: "Vind",
    forecast: "Prognos",
    time: "Tidpunkt",
    direction: "Rikt",
    rain: "Regn (mm)",
    map: "Karta",
    tips: "Tips",
    api_error: "API-fel",
    no_cache: "Ingen sparad data finns",
};

fn labels(language: Language) -> &'static Labels {
    match language {
        Language::En => &EN,
        Language::Sv => &SV,
    }
}

/// A dashboard view paired with the settings deciding how to present it
pub struct DashboardText<'a> {
    view: &'a DashboardView,
    settings: &'a DashboardSettings,
}

impl<'a> DashboardText<'a> {
    pub fn new(view: &'a DashboardView, settings: &'a DashboardSettings) -> Self {
        Self { view, settings }
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for DashboardText<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let l = labels(self.settings.language);

        match self.view {
            DashboardView::ApiError { message } => writeln!(f, "{}: {}", l.api_error, message),
            DashboardView::NoCachedData => writeln!(f, "{}", l.no_cache),
            DashboardView::Ready { city, forecast, advisory } => {
                writeln!(f, "{} - {}", l.title, city)?;
                write!(f, "{}", CurrentSection { labels: l, forecast })?;
                write!(f, "{}", ForecastTable { labels: l, forecast })?;

                if self.settings.show_map {
                    if let Some(coord) = forecast.coord {
                        writeln!(f, "\n{}: {} @ {:.4}, {:.4}", l.map, city, coord.lat, coord.lon)?;
                    }
                }

                if let Some(advisory) = advisory {
                    writeln!(f, "\n{}: {}", l.tips, advisory.text(self.settings.language))?;
                }

                Ok(())
            },
        }
    }
}

/// Renders a dashboard view as plain text
///
/// # Arguments
///
/// * 'view' - the view to render
/// * 'settings' - decides language and which sections to show
pub fn render(view: &DashboardView, settings: &DashboardSettings) -> String {
    DashboardText::new(view, settings).to_string()
}

/// Metrics of the first record
struct CurrentSection<'a> {
    labels: &'a Labels,
    forecast: &'a Forecast,
}

impl fmt::Display for CurrentSection<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Some(r) = self.forecast.current() else {
            return Ok(());
        };
        let (l, s) = (self.labels, &self.forecast.symbols);

        writeln!(f, "\n{}", l.current)?;
        writeln!(f, "  {:<10} {} {}", l.temperature, r.temperature, s.temperature_symbol)?;
        writeln!(f, "  {:<10} {}%", l.humidity, r.humidity)?;
        writeln!(f, "  {:<10} {} {} {}", l.wind, r.wind_speed, s.speed_unit_label, r.wind_direction)
    }
}

/// One row per forecast record
struct ForecastTable<'a> {
    labels: &'a Labels,
    forecast: &'a Forecast,
}

impl fmt::Display for ForecastTable<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let (l, s) = (self.labels, &self.forecast.symbols);

        writeln!(f, "\n{}", l.forecast)?;
        writeln!(f, "{:<16} {:>7} {:>4} {:>6} {:<2} {:>5}",
                 l.time,
                 format!("{} ({})", l.temperature, s.temperature_symbol),
                 "%",
                 format!("{} ({})", l.wind, s.speed_unit_label),
                 l.direction,
                 l.rain)?;
        for r in &self.forecast.records {
            writeln!(f, "{}", r)?;
        }

        Ok(())
    }
}
