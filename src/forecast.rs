use std::collections::HashMap;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use crate::current_weather::celsius;
use crate::manager_openweather::models::RawForecastEntry;

/// Display record for one upcoming day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub min_temperature: String,
    pub max_temperature: String,
    pub weather: String,
    pub icon: String,
}

struct DayAccumulator {
    date: NaiveDate,
    temp_min: f64,
    temp_max: f64,
    weather: String,
    icon: String,
}

/// Collapses 3-hour forecast entries into daily summaries.
///
/// Entries dated `today` are skipped. Each remaining date keeps the lowest minimum and
/// highest maximum seen, while description and icon are taken from the entry at `midday`
/// (or from the first entry of the date if there is none). Every midday entry calls
/// `on_midday` with its date and icon code and completes one day; processing stops when
/// `day_limit` days are complete. Days are returned in the order they were first seen.
///
/// # Arguments
///
/// * 'entries' - forecast entries in chronological order
/// * 'today' - local date to exclude
/// * 'day_limit' - number of completed days after which to stop
/// * 'midday' - time of day of the representative sample
/// * 'on_midday' - called once for each midday sample
pub fn aggregate<F>(
    entries: &[RawForecastEntry],
    today: NaiveDate,
    day_limit: usize,
    midday: NaiveTime,
    mut on_midday: F,
) -> Vec<DailyForecast>
where
    F: FnMut(NaiveDate, &str),
{
    let mut days: Vec<DayAccumulator> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut completed: usize = 0;

    for entry in entries {
        if completed >= day_limit {
            break;
        }

        let date = entry.timestamp.date();
        if date == today {
            continue;
        }

        let i = *index.entry(date).or_insert_with(|| {
            days.push(DayAccumulator {
                date,
                temp_min: entry.temp_min,
                temp_max: entry.temp_max,
                weather: entry.description.clone(),
                icon: entry.icon.clone(),
            });
            days.len() - 1
        });

        let day = &mut days[i];
        day.temp_min = day.temp_min.min(entry.temp_min);
        day.temp_max = day.temp_max.max(entry.temp_max);

        if entry.timestamp.time() == midday {
            day.weather = entry.description.clone();
            day.icon = entry.icon.clone();
            on_midday(date, &entry.icon);
            completed += 1;
        }
    }

    days.into_iter()
        .map(|d| DailyForecast {
            date: d.date,
            min_temperature: celsius(d.temp_min),
            max_temperature: celsius(d.temp_max),
            weather: d.weather,
            icon: d.icon,
        })
        .collect()
}
