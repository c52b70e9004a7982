//! The `weather` command: current conditions or the 7-day forecast.

use anyhow::Context;

use cityguide_core::{cities, AppConfig};
use cityguide_weather::{map_weather_code, WeatherClient};

pub(crate) async fn run(config: &AppConfig, city_name: &str, forecast: bool) -> anyhow::Result<()> {
    let city = cities::find(city_name).with_context(|| {
        let known: Vec<&str> = cities::CITIES.iter().map(|city| city.name).collect();
        format!("unknown city '{city_name}' (supported: {})", known.join(", "))
    })?;

    let client = WeatherClient::new(config)?;

    if forecast {
        let days = client.seven_day_forecast(city.lat, city.lon).await?;
        println!("7-day forecast for {}:", city.name);
        for day in days {
            println!("{}  {:>5.1}°C  {}", day.date, day.temp, day.condition);
        }
    } else {
        let current = client.current(city.lat, city.lon).await?;
        println!(
            "{}: {:.1}°C, wind {:.0} km/h, {}",
            city.name,
            current.temperature,
            current.windspeed,
            map_weather_code(current.weathercode)
        );
    }

    Ok(())
}
