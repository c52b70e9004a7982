//! HTTP client for the Open-Meteo forecast API.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use cityguide_core::AppConfig;

use crate::error::WeatherError;
use crate::types::{
    map_weather_code, CurrentWeather, CurrentWeatherResponse, DailyForecast, DailyForecastResponse,
};

/// Client for the Open-Meteo forecast API.
///
/// The API is keyless; requests are plain GETs against `/v1/forecast`.
/// [`WeatherClient::with_base_url`] lets tests point at a mock server.
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// [`WeatherError::Http`] when the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, WeatherError> {
        Self::with_base_url(
            &config.weather_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client against an explicit base URL.
    ///
    /// # Errors
    ///
    /// Same conditions as [`WeatherClient::new`].
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches current conditions for a coordinate pair.
    ///
    /// # Errors
    ///
    /// [`WeatherError::Http`] on transport failure,
    /// [`WeatherError::UnexpectedStatus`] on a non-success response,
    /// [`WeatherError::Deserialize`] when the body has an unexpected shape.
    pub async fn current(&self, lat: f64, lon: f64) -> Result<CurrentWeather, WeatherError> {
        let url = format!(
            "{}/v1/forecast?latitude={lat}&longitude={lon}&current_weather=true",
            self.base_url
        );
        let response: CurrentWeatherResponse = self.get_json(&url).await?;
        Ok(response.current_weather)
    }

    /// Fetches the seven-day forecast for a coordinate pair, one entry per
    /// day in chronological order.
    ///
    /// The API returns the daily values as parallel arrays; they are zipped
    /// here, so a truncated array shortens the forecast instead of failing.
    ///
    /// # Errors
    ///
    /// Same conditions as [`WeatherClient::current`].
    pub async fn seven_day_forecast(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<DailyForecast>, WeatherError> {
        let url = format!(
            "{}/v1/forecast?latitude={lat}&longitude={lon}&daily=temperature_2m_max,weathercode&timezone=auto",
            self.base_url
        );
        let response: DailyForecastResponse = self.get_json(&url).await?;
        let daily = response.daily;

        let days = daily
            .time
            .into_iter()
            .zip(daily.temperature_2m_max)
            .zip(daily.weathercode)
            .map(|((date, temp), code)| DailyForecast {
                date,
                temp,
                condition: map_weather_code(code),
            })
            .collect();
        Ok(days)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, WeatherError> {
        tracing::debug!(url, "fetching Open-Meteo forecast");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "Open-Meteo returned an error status");
            return Err(WeatherError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|source| WeatherError::Deserialize {
            url: url.to_string(),
            source,
        })
    }
}
