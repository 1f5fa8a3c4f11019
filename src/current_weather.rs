use serde::{Deserialize, Serialize};
use crate::manager_openweather::models::RawWeatherReading;

/// Display record for current conditions, as read by the dashboard frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherRecord {
    pub city: String,
    #[serde(rename = "akt_temperature")]
    pub current_temperature: String,
    pub min_temperature: String,
    pub max_temperature: String,
    pub humidity: String,
    pub weather: String,
    pub icon: String,
}

/// Formats a current weather reading into its display record
///
/// # Arguments
///
/// * 'reading' - current conditions as received from the provider
pub fn format_current(reading: &RawWeatherReading) -> CurrentWeatherRecord {
    CurrentWeatherRecord {
        city: reading.city.clone(),
        current_temperature: celsius(reading.temp),
        min_temperature: celsius(reading.temp_min),
        max_temperature: celsius(reading.temp_max),
        humidity: format!("{}%", round_whole(reading.humidity)),
        weather: reading.description.clone(),
        icon: reading.icon.clone(),
    }
}

/// Renders a temperature as whole degrees with a Celsius suffix
///
/// # Arguments
///
/// * 'temp' - temperature in Celsius
pub fn celsius(temp: f64) -> String {
    format!("{}°C", round_whole(temp))
}

/// Rounds to the nearest whole number, ties to even
///
/// # Arguments
///
/// * 'value' - value to round
fn round_whole(value: f64) -> i64 {
    value.round_ties_even() as i64
}
