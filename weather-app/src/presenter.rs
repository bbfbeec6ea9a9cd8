use std::collections::BTreeMap;

use chrono::{Locale, NaiveDate};
use common::models::{CurrentConditions, ForecastDay, ForecastSlot, WeatherAndForecast};

use crate::api_client::{CurrentWeather, ForecastEntry, ForecastResponse, WeatherDescriptor};

const ICON_BASE_URL: &str = "http://openweathermap.org/img/wn";

/// Forecast entries sharing one calendar date, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub entries: Vec<ForecastEntry>,
}

/// Partition entries by calendar date, ascending.
///
/// Grouping is stable: within a date, entries keep their relative input
/// order. Entries with no parseable timestamp have no date to group under
/// and are skipped.
pub fn group_by_day(entries: Vec<ForecastEntry>) -> Vec<DayGroup> {
    let mut groups: BTreeMap<NaiveDate, Vec<ForecastEntry>> = BTreeMap::new();

    for entry in entries {
        let Some(stamp) = entry.dt_txt else { continue };
        groups.entry(stamp.date()).or_default().push(entry);
    }

    groups
        .into_iter()
        .map(|(date, entries)| DayGroup { date, entries })
        .collect()
}

/// Build the combined view from the two provider payloads.
pub fn assemble(current: CurrentWeather, forecast: ForecastResponse) -> WeatherAndForecast {
    let entries = forecast.list.unwrap_or_default();

    WeatherAndForecast {
        current: current_view(current),
        forecast: group_by_day(entries).into_iter().map(day_view).collect(),
    }
}

fn current_view(payload: CurrentWeather) -> CurrentConditions {
    let descriptor = first_descriptor(payload.weather);

    CurrentConditions {
        city: payload.name,
        temperature_c: payload
            .main
            .as_ref()
            .and_then(|main| main.temp)
            .map(round_whole),
        humidity_pct: payload.main.as_ref().and_then(|main| main.humidity),
        description: descriptor.as_ref().and_then(|d| d.description.clone()),
        icon_url: descriptor.and_then(|d| d.icon).map(|icon| icon_url(&icon)),
    }
}

fn day_view(group: DayGroup) -> ForecastDay {
    ForecastDay {
        date: group.date,
        label: group
            .date
            .format_localized("%A, %d.%m.%Y", Locale::pl_PL)
            .to_string(),
        slots: group.entries.into_iter().map(slot_view).collect(),
    }
}

fn slot_view(entry: ForecastEntry) -> ForecastSlot {
    let descriptor = first_descriptor(entry.weather);

    ForecastSlot {
        time: entry
            .dt_txt
            .map(|stamp| stamp.format("%H:%M").to_string())
            .unwrap_or_default(),
        temperature_c: entry
            .main
            .as_ref()
            .and_then(|main| main.temp)
            .map(round_whole),
        humidity_pct: entry.main.as_ref().and_then(|main| main.humidity),
        description: descriptor.as_ref().and_then(|d| d.description.clone()),
        icon_url: descriptor.and_then(|d| d.icon).map(|icon| icon_url(&icon)),
    }
}

fn first_descriptor(descriptors: Option<Vec<WeatherDescriptor>>) -> Option<WeatherDescriptor> {
    descriptors.and_then(|list| list.into_iter().next())
}

// Half-away-from-zero, the rounding the rendered degree values use.
fn round_whole(value: f64) -> i64 {
    value.round() as i64
}

fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}@2x.png")
}
