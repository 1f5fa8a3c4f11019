use chrono::NaiveDateTime;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64,
}

#[derive(Deserialize)]
pub struct ForecastMain {
    pub temp_min: f64,
    pub temp_max: f64,
}

#[derive(Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

#[derive(Deserialize)]
pub struct CurrentResponse {
    pub name: String,
    pub main: CurrentMain,
    pub weather: Vec<Condition>,
}

#[derive(Deserialize)]
pub struct ForecastItem {
    pub dt_txt: String,
    pub main: ForecastMain,
    pub weather: Vec<Condition>,
}

#[derive(Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastItem>,
}

/// One point-in-time measurement of current conditions
#[derive(Debug, Clone, PartialEq)]
pub struct RawWeatherReading {
    pub city: String,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64,
    pub description: String,
    pub icon: String,
}

/// One 3-hour forecast sample
#[derive(Debug, Clone, PartialEq)]
pub struct RawForecastEntry {
    pub timestamp: NaiveDateTime,
    pub temp_min: f64,
    pub temp_max: f64,
    pub description: String,
    pub icon: String,
}
