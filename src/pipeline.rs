use std::fs;
use std::path::PathBuf;
use chrono::{Local, NaiveDate, NaiveTime};
use log::{error, info};
use tokio::sync::Mutex;
use crate::current_weather::format_current;
use crate::errors::UnrecoverableError;
use crate::forecast::aggregate;
use crate::icons::copy_icon;
use crate::initialization::Config;
use crate::manager_openweather::OpenWeather;
use crate::manager_output::write_json;

pub const CURRENT_FILE: &str = "wetterdaten.json";
pub const FORECAST_FILE: &str = "wettervorhersage.json";
pub const CURRENT_ICON_FILE: &str = "wetter_icon.png";

/// What a single cycle managed to persist
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CycleReport {
    pub current_written: bool,
    pub forecast_written: bool,
}

/// One fetch, transform and persist run over current conditions and forecast
pub struct Pipeline {
    owm: OpenWeather,
    output_dir: PathBuf,
    icon_source_dir: PathBuf,
    day_limit: usize,
    midday: NaiveTime,
    cycle: Mutex<()>,
}

impl Pipeline {
    /// Creates a new Pipeline from configuration
    ///
    /// # Arguments
    ///
    /// * 'config' - validated configuration
    pub fn new(config: &Config) -> Result<Self, UnrecoverableError> {
        Ok(Self {
            owm: OpenWeather::new(config.owm_settings())?,
            output_dir: config.output.output_dir.clone(),
            icon_source_dir: config.output.icon_source_dir.clone(),
            day_limit: config.forecast.day_limit,
            midday: config.midday()?,
            cycle: Mutex::new(()),
        })
    }

    /// Runs one cycle with today's local date
    ///
    pub async fn run_cycle(&self) -> CycleReport {
        self.run_cycle_on(Local::now().date_naive()).await
    }

    /// Runs one cycle. Failures are logged and only affect the output they belong to,
    /// a failed fetch leaves the previous file in place. Cycles never overlap, a call made
    /// while another cycle runs waits for it to finish.
    ///
    /// # Arguments
    ///
    /// * 'today' - date to exclude from the forecast
    pub async fn run_cycle_on(&self, today: NaiveDate) -> CycleReport {
        let _cycle = self.cycle.lock().await;
        let mut report = CycleReport::default();

        if let Err(e) = fs::create_dir_all(&self.output_dir) {
            error!("failed to create output directory {}: {}", self.output_dir.display(), e);
            return report;
        }

        let current = self.owm.fetch_current().await;
        let forecast = self.owm.fetch_forecast().await;

        match current {
            Ok(reading) => {
                let record = format_current(&reading);
                let path = self.output_dir.join(CURRENT_FILE);
                match write_json(&record, &path) {
                    Ok(_) => {
                        info!("current weather for {} saved to {}", record.city, path.display());
                        report.current_written = true;
                    },
                    Err(e) => error!("failed to write {}: {}", path.display(), e),
                }
                copy_icon(&self.icon_source_dir, &reading.icon, &self.output_dir, CURRENT_ICON_FILE);
            },
            Err(e) => error!("failed to get current weather: {}", e),
        }

        match forecast {
            Ok(entries) => {
                let days = aggregate(&entries, today, self.day_limit, self.midday, |date, icon| {
                    copy_icon(&self.icon_source_dir, icon, &self.output_dir, &format!("{}.png", date));
                });
                let path = self.output_dir.join(FORECAST_FILE);
                match write_json(&days, &path) {
                    Ok(_) => {
                        info!("forecast with {} days saved to {}", days.len(), path.display());
                        report.forecast_written = true;
                    },
                    Err(e) => error!("failed to write {}: {}", path.display(), e),
                }
            },
            Err(e) => error!("failed to get forecast: {}", e),
        }

        report
    }
}
