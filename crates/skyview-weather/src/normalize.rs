//! Raw Open-Meteo forecast payload and its normalization into a [`WeatherView`].

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;
use crate::types::{
    Condition, CurrentConditions, DailyEntry, DaySummary, HourlyEntry, Location, WeatherView,
};

/// Number of hourly entries kept, starting at the forecast's hour 0
pub const HOURLY_ENTRIES: usize = 24;

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Forecast response as sent by the API.
///
/// Every section is optional at the serde level so that a missing block is
/// reported by name from [`normalize`] instead of as an opaque parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawForecast {
    #[serde(default)]
    pub utc_offset_seconds: i32,
    pub current: Option<RawCurrent>,
    pub hourly: Option<RawHourly>,
    pub daily: Option<RawDaily>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCurrent {
    pub temperature_2m: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub precipitation: Option<f64>,
    pub weather_code: Option<i32>,
    pub cloud_cover: Option<f64>,
    /// Meters per second (requested with `wind_speed_unit=ms`)
    pub wind_speed_10m: Option<f64>,
    pub wind_direction_10m: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHourly {
    pub time: Option<Vec<String>>,
    pub temperature_2m: Option<Vec<Option<f64>>>,
    pub weather_code: Option<Vec<Option<i32>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDaily {
    pub time: Option<Vec<String>>,
    pub temperature_2m_max: Option<Vec<Option<f64>>>,
    pub temperature_2m_min: Option<Vec<Option<f64>>>,
    pub weather_code: Option<Vec<Option<i32>>>,
}

/// Round to the nearest integer, with halves going up (`-2.5 -> -2`, `2.5 -> 3`).
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Map a bearing in degrees to one of 8 compass points.
pub fn wind_direction(degrees: f64) -> &'static str {
    let sector = i64::from(round_half_up(degrees / 45.0)).rem_euclid(8);
    COMPASS_POINTS[sector as usize]
}

/// Convert meters per second to whole kilometers per hour.
pub fn ms_to_kph(speed_ms: f64) -> i32 {
    round_half_up(speed_ms * 3.6)
}

/// Transform a raw forecast into the display model.
pub fn normalize(raw: &RawForecast, location: Location) -> Result<WeatherView, WeatherError> {
    let offset = FixedOffset::east_opt(raw.utc_offset_seconds).ok_or_else(|| {
        WeatherError::MalformedResponse(format!(
            "utc_offset_seconds out of range: {}",
            raw.utc_offset_seconds
        ))
    })?;

    let current = normalize_current(require(raw.current.as_ref(), "current")?)?;
    let hourly = normalize_hourly(require(raw.hourly.as_ref(), "hourly")?, offset)?;
    let daily = normalize_daily(require(raw.daily.as_ref(), "daily")?)?;

    tracing::debug!(
        "Normalized forecast for {}: {} hourly, {} daily entries",
        location.name,
        hourly.len(),
        daily.len()
    );

    Ok(WeatherView {
        location,
        current,
        hourly,
        daily,
        utc_offset_seconds: raw.utc_offset_seconds,
    })
}

fn normalize_current(raw: &RawCurrent) -> Result<CurrentConditions, WeatherError> {
    let temperature = require(raw.temperature_2m, "current.temperature_2m")?;
    let apparent = require(raw.apparent_temperature, "current.apparent_temperature")?;
    let wind_speed = require(raw.wind_speed_10m, "current.wind_speed_10m")?;
    let wind_bearing = require(raw.wind_direction_10m, "current.wind_direction_10m")?;
    let code = require(raw.weather_code, "current.weather_code")?;

    Ok(CurrentConditions {
        temp_c: round_half_up(temperature),
        feelslike_c: round_half_up(apparent),
        humidity: require(raw.relative_humidity_2m, "current.relative_humidity_2m")?,
        wind_kph: ms_to_kph(wind_speed),
        wind_dir: wind_direction(wind_bearing).to_string(),
        precip_mm: raw.precipitation.unwrap_or(0.0),
        cloud: require(raw.cloud_cover, "current.cloud_cover")?,
        condition: Condition::from_code(code),
    })
}

fn normalize_hourly(
    raw: &RawHourly,
    offset: FixedOffset,
) -> Result<Vec<HourlyEntry>, WeatherError> {
    let times = require(raw.time.as_ref(), "hourly.time")?;
    let temps = require(raw.temperature_2m.as_ref(), "hourly.temperature_2m")?;
    let codes = require(raw.weather_code.as_ref(), "hourly.weather_code")?;

    times
        .iter()
        .take(HOURLY_ENTRIES)
        .enumerate()
        .map(|(i, time)| {
            let temp = value_at(temps, i, "hourly.temperature_2m")?;
            let code = value_at(codes, i, "hourly.weather_code")?;
            Ok(HourlyEntry {
                time: parse_local_time(time, offset)?,
                temp_c: round_half_up(temp),
                condition: Condition::from_code(code),
            })
        })
        .collect()
}

fn normalize_daily(raw: &RawDaily) -> Result<Vec<DailyEntry>, WeatherError> {
    let dates = require(raw.time.as_ref(), "daily.time")?;
    let maxes = require(raw.temperature_2m_max.as_ref(), "daily.temperature_2m_max")?;
    let mins = require(raw.temperature_2m_min.as_ref(), "daily.temperature_2m_min")?;
    let codes = require(raw.weather_code.as_ref(), "daily.weather_code")?;

    dates
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let max = value_at(maxes, i, "daily.temperature_2m_max")?;
            let min = value_at(mins, i, "daily.temperature_2m_min")?;
            let code = value_at(codes, i, "daily.weather_code")?;
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                WeatherError::MalformedResponse(format!("bad daily date {:?}: {}", date, e))
            })?;
            Ok(DailyEntry {
                date,
                day: DaySummary {
                    maxtemp_c: round_half_up(max),
                    mintemp_c: round_half_up(min),
                    avgtemp_c: round_half_up((max + min) / 2.0),
                    condition: Condition::from_code(code),
                },
            })
        })
        .collect()
}

/// Interpret an API local timestamp (`2026-03-01T14:00`) at `offset` and return it in UTC.
fn parse_local_time(value: &str, offset: FixedOffset) -> Result<DateTime<Utc>, WeatherError> {
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| {
            WeatherError::MalformedResponse(format!("bad hourly time {:?}: {}", value, e))
        })?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| WeatherError::MalformedResponse(format!("bad hourly time {:?}", value)))
}

fn require<T>(value: Option<T>, field: &str) -> Result<T, WeatherError> {
    value.ok_or_else(|| WeatherError::missing(field))
}

fn value_at<T: Copy>(values: &[Option<T>], index: usize, field: &str) -> Result<T, WeatherError> {
    values
        .get(index)
        .copied()
        .flatten()
        .ok_or_else(|| WeatherError::missing(&format!("{}[{}]", field, index)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn nagpur() -> Location {
        Location {
            name: "Nagpur".into(),
            country: "India".into(),
            region: "Maharashtra".into(),
            latitude: 21.1463,
            longitude: 79.0849,
        }
    }

    fn raw_current() -> RawCurrent {
        RawCurrent {
            temperature_2m: Some(31.4),
            apparent_temperature: Some(33.6),
            relative_humidity_2m: Some(42.0),
            precipitation: Some(0.2),
            weather_code: Some(0),
            cloud_cover: Some(12.0),
            wind_speed_10m: Some(10.0),
            wind_direction_10m: Some(90.0),
        }
    }

    fn raw_forecast(hours: usize) -> RawForecast {
        let time = (0..hours)
            .map(|i| format!("2026-03-{:02}T{:02}:00", 1 + i / 24, i % 24))
            .collect();
        let temperature_2m = (0..hours).map(|i| Some(20.0 + i as f64 * 0.5)).collect();
        let weather_code = (0..hours).map(|i| Some(if i % 2 == 0 { 0 } else { 61 })).collect();

        RawForecast {
            utc_offset_seconds: 19800,
            current: Some(raw_current()),
            hourly: Some(RawHourly {
                time: Some(time),
                temperature_2m: Some(temperature_2m),
                weather_code: Some(weather_code),
            }),
            daily: Some(RawDaily {
                time: Some((1..=7).map(|d| format!("2026-03-{:02}", d)).collect()),
                temperature_2m_max: Some(vec![Some(34.4); 7]),
                temperature_2m_min: Some(vec![Some(21.7); 7]),
                weather_code: Some(vec![Some(3); 7]),
            }),
        }
    }

    #[test]
    fn test_nagpur_current_scenario() {
        let view = normalize(&raw_forecast(48), nagpur()).unwrap();
        assert_eq!(view.current.temp_c, 31);
        assert_eq!(view.current.wind_kph, 36);
        assert_eq!(view.current.wind_dir, "E");
        assert_eq!(view.current.condition, Condition { text: "Clear sky".into(), code: 0 });
        assert_eq!(view.location.country, "India");
    }

    #[test]
    fn test_current_passthrough_and_rounding() {
        let view = normalize(&raw_forecast(24), nagpur()).unwrap();
        assert_eq!(view.current.feelslike_c, 34);
        assert_eq!(view.current.humidity, 42.0);
        assert_eq!(view.current.cloud, 12.0);
        assert_eq!(view.current.precip_mm, 0.2);
    }

    #[test]
    fn test_missing_precipitation_defaults_to_zero() {
        let mut raw = raw_forecast(24);
        if let Some(current) = raw.current.as_mut() {
            current.precipitation = None;
        }
        let view = normalize(&raw, nagpur()).unwrap();
        assert_eq!(view.current.precip_mm, 0.0);
    }

    #[test]
    fn test_wind_kph_matches_conversion() {
        for ms in [0.0, 0.4, 1.0, 2.5, 3.3, 7.77, 10.0, 41.2] {
            let mut raw = raw_forecast(24);
            if let Some(current) = raw.current.as_mut() {
                current.wind_speed_10m = Some(ms);
            }
            let view = normalize(&raw, nagpur()).unwrap();
            assert_eq!(view.current.wind_kph, round_half_up(ms * 3.6), "{} m/s", ms);
        }
    }

    #[test]
    fn test_hourly_takes_first_24_from_index_zero() {
        let view = normalize(&raw_forecast(168), nagpur()).unwrap();
        assert_eq!(view.hourly.len(), HOURLY_ENTRIES);
        assert_eq!(view.hourly[0].temp_c, 20);
        assert_eq!(view.hourly[23].temp_c, round_half_up(20.0 + 23.0 * 0.5));
        assert_eq!(view.hourly[1].condition.text, "Slight rain");
    }

    #[test]
    fn test_hourly_short_series_kept_whole() {
        let view = normalize(&raw_forecast(5), nagpur()).unwrap();
        assert_eq!(view.hourly.len(), 5);
    }

    #[test]
    fn test_hourly_time_converted_to_utc() {
        // +05:30: local midnight is 18:30 UTC the previous day
        let view = normalize(&raw_forecast(24), nagpur()).unwrap();
        let expected = Utc.with_ymd_and_hms(2026, 2, 28, 18, 30, 0).unwrap();
        assert_eq!(view.hourly[0].time, expected);
        assert_eq!(view.hourly[1].time.minute(), 30);
    }

    #[test]
    fn test_daily_average_uses_raw_values() {
        let view = normalize(&raw_forecast(24), nagpur()).unwrap();
        assert_eq!(view.daily.len(), 7);
        let day = &view.daily[0].day;
        assert_eq!(day.maxtemp_c, 34);
        assert_eq!(day.mintemp_c, 22);
        // (34.4 + 21.7) / 2 = 28.05
        assert_eq!(day.avgtemp_c, 28);
        assert_eq!(day.condition.text, "Overcast");
        assert_eq!(view.daily[6].date, NaiveDate::from_ymd_opt(2026, 3, 7).unwrap());
    }

    #[test]
    fn test_daily_average_invariant() {
        let pairs = [(30.0, 20.0), (31.0, 20.0), (-1.0, -4.0), (0.5, 0.4), (12.3, -7.9)];
        for (max, min) in pairs {
            let mut raw = raw_forecast(24);
            raw.daily = Some(RawDaily {
                time: Some(vec!["2026-03-01".into()]),
                temperature_2m_max: Some(vec![Some(max)]),
                temperature_2m_min: Some(vec![Some(min)]),
                weather_code: Some(vec![Some(0)]),
            });
            let view = normalize(&raw, nagpur()).unwrap();
            assert_eq!(view.daily[0].day.avgtemp_c, round_half_up((max + min) / 2.0));
        }
    }

    #[test]
    fn test_missing_hourly_temperature_is_malformed() {
        let mut raw = raw_forecast(24);
        if let Some(hourly) = raw.hourly.as_mut() {
            hourly.temperature_2m = None;
        }
        let err = normalize(&raw, nagpur()).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
        assert!(err.to_string().contains("hourly.temperature_2m"));
    }

    #[test]
    fn test_missing_sections_are_malformed() {
        for strip in ["current", "hourly", "daily"] {
            let mut raw = raw_forecast(24);
            match strip {
                "current" => raw.current = None,
                "hourly" => raw.hourly = None,
                _ => raw.daily = None,
            }
            let err = normalize(&raw, nagpur()).unwrap_err();
            assert!(err.to_string().contains(strip), "{}", err);
        }
    }

    #[test]
    fn test_short_daily_array_is_malformed() {
        let mut raw = raw_forecast(24);
        if let Some(daily) = raw.daily.as_mut() {
            daily.temperature_2m_min = Some(vec![Some(20.0); 3]);
        }
        let err = normalize(&raw, nagpur()).unwrap_err();
        assert!(err.to_string().contains("daily.temperature_2m_min[3]"));
    }

    #[test]
    fn test_null_hourly_value_is_malformed() {
        let mut raw = raw_forecast(24);
        if let Some(hourly) = raw.hourly.as_mut() {
            if let Some(codes) = hourly.weather_code.as_mut() {
                codes[4] = None;
            }
        }
        assert!(matches!(
            normalize(&raw, nagpur()),
            Err(WeatherError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_bad_timestamp_is_malformed() {
        let mut raw = raw_forecast(24);
        if let Some(hourly) = raw.hourly.as_mut() {
            hourly.time = Some(vec!["yesterday".into()]);
        }
        assert!(matches!(
            normalize(&raw, nagpur()),
            Err(WeatherError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(31.4), 31);
        assert_eq!(round_half_up(31.5), 32);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn test_wind_direction_points() {
        let expected = [
            (0.0, "N"),
            (45.0, "NE"),
            (90.0, "E"),
            (135.0, "SE"),
            (180.0, "S"),
            (225.0, "SW"),
            (270.0, "W"),
            (315.0, "NW"),
            (337.5, "N"),
            (359.0, "N"),
            (22.4, "N"),
            (22.5, "NE"),
        ];
        for (deg, dir) in expected {
            assert_eq!(wind_direction(deg), dir, "{} degrees", deg);
        }
    }

    #[test]
    fn test_wind_direction_is_periodic() {
        for deg in 0..720 {
            let deg = f64::from(deg);
            assert_eq!(wind_direction(deg), wind_direction(deg + 360.0), "{}", deg);
        }
        assert_eq!(wind_direction(-90.0), "W");
    }

    #[test]
    fn test_deserializes_api_payload() {
        let body = serde_json::json!({
            "latitude": 21.125,
            "longitude": 79.125,
            "utc_offset_seconds": 19800,
            "timezone": "Asia/Kolkata",
            "current": {
                "time": "2026-03-01T14:00",
                "interval": 900,
                "temperature_2m": 31.4,
                "relative_humidity_2m": 42,
                "apparent_temperature": 33.1,
                "precipitation": 0.0,
                "weather_code": 0,
                "cloud_cover": 12,
                "wind_speed_10m": 10.0,
                "wind_direction_10m": 90
            },
            "hourly": {
                "time": ["2026-03-01T00:00", "2026-03-01T01:00"],
                "temperature_2m": [22.1, null],
                "weather_code": [0, 1]
            },
            "daily": {
                "time": ["2026-03-01"],
                "weather_code": [2],
                "temperature_2m_max": [34.0],
                "temperature_2m_min": [21.0]
            }
        });
        let raw: RawForecast = serde_json::from_value(body).unwrap();
        assert_eq!(raw.utc_offset_seconds, 19800);
        let hourly = raw.hourly.as_ref().unwrap();
        assert_eq!(hourly.temperature_2m.as_ref().unwrap()[1], None);
        assert_eq!(raw.current.as_ref().unwrap().relative_humidity_2m, Some(42.0));
    }
}
