pub mod errors;
pub mod models;

use std::time::Duration;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::de::DeserializeOwned;
use crate::manager_openweather::errors::OWMError;
use crate::manager_openweather::models::{Condition, CurrentResponse, ForecastResponse, RawForecastEntry, RawWeatherReading};

/// Connection parameters for an OpenWeatherMap compatible provider
#[derive(Debug, Clone)]
pub struct OWMSettings {
    pub base_url: String,
    pub api_key: String,
    pub city: String,
    pub units: String,
    pub language: String,
}

/// Struct for fetching current conditions and forecasts from OpenWeatherMap
pub struct OpenWeather {
    client: Client,
    settings: OWMSettings,
}

impl OpenWeather {
    /// Returns an OpenWeather struct ready for fetching weather data for one city
    ///
    /// # Arguments
    ///
    /// * 'settings' - provider base url, api key, city, units and display language
    pub fn new(settings: OWMSettings) -> Result<OpenWeather, OWMError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            settings,
        })
    }

    /// Retrieves the current weather conditions for the configured city
    ///
    pub async fn fetch_current(&self) -> Result<RawWeatherReading, OWMError> {
        let current: CurrentResponse = self.get_json("weather").await?;
        let condition = first_condition(current.weather)?;

        Ok(RawWeatherReading {
            city: current.name,
            temp: current.main.temp,
            temp_min: current.main.temp_min,
            temp_max: current.main.temp_max,
            humidity: current.main.humidity,
            description: condition.description,
            icon: condition.icon,
        })
    }

    /// Retrieves the 5 day / 3 hour forecast for the configured city.
    /// Entries are returned in the order the provider sent them.
    ///
    pub async fn fetch_forecast(&self) -> Result<Vec<RawForecastEntry>, OWMError> {
        let forecast: ForecastResponse = self.get_json("forecast").await?;

        let mut entries: Vec<RawForecastEntry> = Vec::with_capacity(forecast.list.len());
        for item in forecast.list {
            let timestamp = NaiveDateTime::parse_from_str(&item.dt_txt, "%Y-%m-%d %H:%M:%S")?;
            let condition = first_condition(item.weather)?;

            entries.push(RawForecastEntry {
                timestamp,
                temp_min: item.main.temp_min,
                temp_max: item.main.temp_max,
                description: condition.description,
                icon: condition.icon,
            });
        }

        Ok(entries)
    }

    /// Makes a GET request to the given endpoint and parses the body
    ///
    /// # Arguments
    ///
    /// * 'endpoint' - path below the base url, i.e. 'weather' or 'forecast'
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, OWMError> {
        let url = format!("{}/{}", self.settings.base_url.trim_end_matches('/'), endpoint);

        let req = self.client
            .get(url)
            .query(&[
                ("q", self.settings.city.as_str()),
                ("appid", self.settings.api_key.as_str()),
                ("units", self.settings.units.as_str()),
                ("lang", self.settings.language.as_str()),
            ])
            .send().await?;

        let status = req.status();
        if !status.is_success() {
            return Err(OWMError::Transport(format!("Error while fetching {} from OpenWeatherMap: {}", endpoint, status)));
        }

        let json = req.text().await?;
        Ok(serde_json::from_str(&json)?)
    }
}

fn first_condition(conditions: Vec<Condition>) -> Result<Condition, OWMError> {
    conditions
        .into_iter()
        .next()
        .ok_or(OWMError::Schema("empty weather array".to_string()))
}
