//! Weather data for the supported cities, backed by the Open-Meteo
//! forecast API.

pub mod client;
pub mod error;
pub mod types;

pub use client::WeatherClient;
pub use error::WeatherError;
pub use types::{map_weather_code, CurrentWeather, DailyForecast, WeatherCondition};
