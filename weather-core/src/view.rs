use serde::Serialize;

use crate::{day::format_day, icon::WeatherIcon, model::ForecastData};

/// One rendered day of the forecast list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub icon: WeatherIcon,
    /// `Today` for the first day, short weekday otherwise.
    pub label: String,
    pub min: i64,
    pub max: i64,
}

/// Build the day cells for `forecast`: minimum rounded down, maximum up.
pub fn day_cells(forecast: &ForecastData) -> Vec<DayCell> {
    forecast
        .dates
        .iter()
        .zip(&forecast.codes)
        .zip(forecast.min.iter().zip(&forecast.max))
        .enumerate()
        .map(|(index, ((date, &code), (&min, &max)))| DayCell {
            icon: WeatherIcon::from_code(code),
            label: if index == 0 { "Today".to_string() } else { format_day(date) },
            min: min.floor() as i64,
            max: max.ceil() as i64,
        })
        .collect()
}
