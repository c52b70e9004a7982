//! Wire types for the Open-Meteo forecast API and the display condition
//! taxonomy derived from WMO weather codes.

use serde::{Deserialize, Serialize};

/// Current conditions as Open-Meteo reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Air temperature, °C.
    pub temperature: f64,
    /// Wind speed, km/h.
    pub windspeed: f64,
    /// Wind direction, degrees.
    pub winddirection: f64,
    /// WMO weather interpretation code.
    pub weathercode: i32,
    /// Local ISO-8601 timestamp of the observation.
    pub time: String,
}

/// Envelope around [`CurrentWeather`] in the API response.
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentWeatherResponse {
    pub current_weather: CurrentWeather,
}

/// The parallel per-day arrays of a daily forecast response.
#[derive(Debug, Deserialize)]
pub(crate) struct DailySeries {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<f64>,
    pub weathercode: Vec<i32>,
}

/// Envelope around [`DailySeries`] in the API response.
#[derive(Debug, Deserialize)]
pub(crate) struct DailyForecastResponse {
    pub daily: DailySeries,
}

/// One day of the forecast, reduced to what the guide displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecast {
    /// ISO-8601 date, as the API reports it.
    pub date: String,
    /// Daily maximum temperature, °C.
    pub temp: f64,
    pub condition: WeatherCondition,
}

/// Coarse display condition bucketing the WMO weather codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
}

impl WeatherCondition {
    /// Returns the `snake_case` wire string for this condition.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "sunny",
            WeatherCondition::PartlyCloudy => "partly_cloudy",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Rainy => "rainy",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buckets a WMO weather code into a display condition. Codes outside the
/// known table read as cloudy.
#[must_use]
#[allow(clippy::match_same_arms)] // fog/drizzle codes stay listed apart from the fallback
pub fn map_weather_code(code: i32) -> WeatherCondition {
    match code {
        0 => WeatherCondition::Sunny,
        1..=3 => WeatherCondition::PartlyCloudy,
        45 | 48 | 51 | 61 => WeatherCondition::Cloudy,
        53 | 55 | 63 | 65 | 80..=82 => WeatherCondition::Rainy,
        _ => WeatherCondition::Cloudy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_codes_bucket_into_conditions() {
        assert_eq!(map_weather_code(0), WeatherCondition::Sunny);
        assert_eq!(map_weather_code(1), WeatherCondition::PartlyCloudy);
        assert_eq!(map_weather_code(3), WeatherCondition::PartlyCloudy);
        assert_eq!(map_weather_code(45), WeatherCondition::Cloudy);
        assert_eq!(map_weather_code(61), WeatherCondition::Cloudy);
        assert_eq!(map_weather_code(55), WeatherCondition::Rainy);
        assert_eq!(map_weather_code(80), WeatherCondition::Rainy);
        assert_eq!(map_weather_code(82), WeatherCondition::Rainy);
    }

    #[test]
    fn unknown_codes_read_as_cloudy() {
        assert_eq!(map_weather_code(99), WeatherCondition::Cloudy);
        assert_eq!(map_weather_code(-1), WeatherCondition::Cloudy);
    }

    #[test]
    fn conditions_serialize_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&WeatherCondition::PartlyCloudy).unwrap(),
            "\"partly_cloudy\""
        );
    }

    #[test]
    fn current_weather_deserializes_from_the_api_shape() {
        let current: CurrentWeather = serde_json::from_str(
            r#"{"temperature": 18.3, "windspeed": 7.2, "winddirection": 230.0,
                "weathercode": 2, "time": "2024-05-14T15:00"}"#,
        )
        .unwrap();

        assert!((current.temperature - 18.3).abs() < f64::EPSILON);
        assert_eq!(current.weathercode, 2);
        assert_eq!(current.time, "2024-05-14T15:00");
    }
}
