//! Core library for the `classy-weather` CLI.
//!
//! This crate defines:
//! - Configuration of the upstream endpoints and the debounce interval
//! - The geocoding/forecast provider abstraction and its Open-Meteo backend
//! - The debounced, cancelable forecast resolver and its state store
//! - Pure formatters (weekday labels, weather icons, country flags)
//!
//! It is used by `classy-weather`, but can also back other front ends.

pub mod config;
pub mod day;
pub mod error;
pub mod flag;
pub mod icon;
pub mod model;
pub mod provider;
pub mod resolver;
pub mod state;
pub mod view;

pub use config::Config;
pub use day::format_day;
pub use error::ForecastError;
pub use flag::country_code_to_flag;
pub use icon::WeatherIcon;
pub use model::{ForecastData, GeoPlace, RequestState, ResolvedPlace};
pub use provider::{OpenMeteoProvider, WeatherProvider, provider_from_config};
pub use resolver::{ForecastResolver, MIN_QUERY_CHARS};
pub use state::{StateStore, Transition, WeatherState};
pub use view::{DayCell, day_cells};
