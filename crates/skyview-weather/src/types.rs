use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::condition::{code_to_text, text_to_icon_category, IconCategory};

/// Geographic location as resolved by the geocoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    /// First-level administrative area (state/province); empty when unknown
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// "Name, Region, Country", skipping an empty region.
    pub fn display_name(&self) -> String {
        if self.region.is_empty() {
            format!("{}, {}", self.name, self.country)
        } else {
            format!("{}, {}, {}", self.name, self.region, self.country)
        }
    }
}

/// Weather condition: display text plus the WMO code it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    pub code: i32,
}

impl Condition {
    pub fn from_code(code: i32) -> Self {
        Self {
            text: code_to_text(code).to_string(),
            code,
        }
    }

    pub fn icon(&self) -> IconCategory {
        text_to_icon_category(&self.text)
    }
}

/// Current weather conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: i32,
    pub feelslike_c: i32,
    pub humidity: f64,
    pub wind_kph: i32,
    pub wind_dir: String,
    pub precip_mm: f64,
    pub cloud: f64,
    pub condition: Condition,
}

/// Hourly forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    /// Start of the hour, serialized as ISO-8601 UTC
    pub time: DateTime<Utc>,
    pub temp_c: i32,
    pub condition: Condition,
}

/// Aggregates for a single forecast day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub maxtemp_c: i32,
    pub mintemp_c: i32,
    pub avgtemp_c: i32,
    pub condition: Condition,
}

/// Daily forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub day: DaySummary,
}

/// Complete normalized weather bundle handed to display code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherView {
    pub location: Location,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyEntry>,
    pub daily: Vec<DailyEntry>,
    /// Offset of the location's local time from UTC
    pub utc_offset_seconds: i32,
}

impl WeatherView {
    /// The location's UTC offset, falling back to UTC if out of range.
    pub fn local_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds).unwrap_or_else(|| Utc.fix())
    }

    /// Up to `count` hourly entries starting at the location's current local hour.
    ///
    /// Alignment is by absolute time, so the result does not depend on the
    /// caller's timezone or on where the forecast's hour 0 falls.
    pub fn upcoming_hours(&self, now: DateTime<Utc>, count: usize) -> &[HourlyEntry] {
        let local = now.with_timezone(&self.local_offset());
        let into_hour = TimeDelta::minutes(i64::from(local.minute()))
            + TimeDelta::seconds(i64::from(local.second()))
            + TimeDelta::nanoseconds(i64::from(local.nanosecond()));
        let hour_start = (local - into_hour).with_timezone(&Utc);
        let start = self.hourly.partition_point(|h| h.time < hour_start);
        let end = start.saturating_add(count).min(self.hourly.len());
        &self.hourly[start..end]
    }

    /// Daily entries after today, capped at `count`.
    pub fn next_days(&self, count: usize) -> &[DailyEntry] {
        let end = (1 + count).min(self.daily.len());
        self.daily.get(1..end).unwrap_or(&[])
    }
}
