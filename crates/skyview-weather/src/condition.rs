//! Weather code classification.
//!
//! Maps WMO weather codes to display text, and display text to an icon
//! category. See: https://open-meteo.com/en/docs#weathervariables

use serde::{Deserialize, Serialize};

/// Icon family used when rendering a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IconCategory {
    Rain,
    Snow,
    Cloud,
    Clear,
    #[default]
    Default,
}

impl IconCategory {
    /// Terminal glyph for this category
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Rain => "🌧",
            Self::Snow => "🌨",
            Self::Cloud => "☁",
            Self::Clear => "☀",
            // Unclassified conditions are drawn as a plain cloud
            Self::Default => "☁",
        }
    }
}

/// Convert a WMO weather code to its display text.
pub fn code_to_text(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Foggy",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}

/// Classify condition text into an icon category.
///
/// Case-insensitive substring match; first rule wins.
pub fn text_to_icon_category(text: &str) -> IconCategory {
    let text = text.to_lowercase();
    if text.contains("rain") || text.contains("drizzle") {
        IconCategory::Rain
    } else if text.contains("snow") {
        IconCategory::Snow
    } else if text.contains("cloud") || text.contains("overcast") {
        IconCategory::Cloud
    } else if text.contains("sunny") || text.contains("clear") {
        IconCategory::Clear
    } else {
        IconCategory::Default
    }
}

/// One-line blurb for the main weather card.
pub fn condition_description(text: &str, temp_c: i32) -> &'static str {
    let text = text.to_lowercase();
    if text.contains("cloud") || text.contains("overcast") {
        "Overcast sky with muted grey clouds. Calm, soft, quiet."
    } else if text.contains("rain") {
        "Rainy weather with moderate precipitation expected."
    } else if temp_c > 30 {
        "Hot and sunny conditions. Stay hydrated and avoid direct sunlight."
    } else if text.contains("clear") || text.contains("sunny") {
        "Clear skies with pleasant sunshine throughout the day."
    } else {
        "Pleasant weather conditions throughout the day."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[(i32, &str)] = &[
        (0, "Clear sky"),
        (1, "Mainly clear"),
        (2, "Partly cloudy"),
        (3, "Overcast"),
        (45, "Foggy"),
        (48, "Foggy"),
        (51, "Light drizzle"),
        (53, "Moderate drizzle"),
        (55, "Dense drizzle"),
        (61, "Slight rain"),
        (63, "Moderate rain"),
        (65, "Heavy rain"),
        (71, "Slight snow"),
        (73, "Moderate snow"),
        (75, "Heavy snow"),
        (80, "Slight rain showers"),
        (81, "Moderate rain showers"),
        (82, "Violent rain showers"),
        (95, "Thunderstorm"),
        (96, "Thunderstorm with hail"),
        (99, "Thunderstorm with hail"),
    ];

    #[test]
    fn test_code_table() {
        for (code, text) in TABLE {
            assert_eq!(code_to_text(*code), *text, "code {}", code);
        }
    }

    #[test]
    fn test_unknown_codes() {
        for code in [-1, 4, 44, 56, 57, 66, 77, 85, 86, 100, i32::MAX, i32::MIN] {
            assert_eq!(code_to_text(code), "Unknown", "code {}", code);
        }
    }

    #[test]
    fn test_code_to_text_is_deterministic() {
        for code in -5..120 {
            assert_eq!(code_to_text(code), code_to_text(code));
        }
    }

    #[test]
    fn test_icon_rain_and_drizzle() {
        assert_eq!(text_to_icon_category("Slight rain"), IconCategory::Rain);
        assert_eq!(text_to_icon_category("Dense drizzle"), IconCategory::Rain);
        assert_eq!(text_to_icon_category("Violent rain showers"), IconCategory::Rain);
    }

    #[test]
    fn test_icon_snow() {
        assert_eq!(text_to_icon_category("Heavy snow"), IconCategory::Snow);
    }

    #[test]
    fn test_icon_cloud() {
        assert_eq!(text_to_icon_category("Partly cloudy"), IconCategory::Cloud);
        assert_eq!(text_to_icon_category("Overcast"), IconCategory::Cloud);
    }

    #[test]
    fn test_icon_clear() {
        assert_eq!(text_to_icon_category("Clear sky"), IconCategory::Clear);
        assert_eq!(text_to_icon_category("Mainly clear"), IconCategory::Clear);
        assert_eq!(text_to_icon_category("Sunny"), IconCategory::Clear);
    }

    #[test]
    fn test_icon_default() {
        assert_eq!(text_to_icon_category("Foggy"), IconCategory::Default);
        assert_eq!(text_to_icon_category("Thunderstorm"), IconCategory::Default);
        assert_eq!(text_to_icon_category("Unknown"), IconCategory::Default);
        assert_eq!(text_to_icon_category(""), IconCategory::Default);
    }

    #[test]
    fn test_icon_is_case_insensitive() {
        assert_eq!(text_to_icon_category("HEAVY RAIN"), IconCategory::Rain);
        assert_eq!(text_to_icon_category("oVeRcAsT"), IconCategory::Cloud);
    }

    #[test]
    fn test_icon_first_rule_wins() {
        // rain beats snow, snow beats cloud, cloud beats clear
        assert_eq!(text_to_icon_category("rain and snow"), IconCategory::Rain);
        assert_eq!(text_to_icon_category("snow clouds"), IconCategory::Snow);
        assert_eq!(text_to_icon_category("clear then cloudy"), IconCategory::Cloud);
    }

    #[test]
    fn test_default_glyph_is_cloud() {
        assert_eq!(IconCategory::Default.glyph(), IconCategory::Cloud.glyph());
        assert_ne!(IconCategory::Clear.glyph(), IconCategory::Rain.glyph());
    }

    #[test]
    fn test_condition_description_order() {
        assert!(condition_description("Overcast", 35).starts_with("Overcast sky"));
        assert!(condition_description("Moderate rain", 35).starts_with("Rainy"));
        assert!(condition_description("Clear sky", 31).starts_with("Hot and sunny"));
        assert!(condition_description("Clear sky", 30).starts_with("Clear skies"));
        assert!(condition_description("Foggy", 10).starts_with("Pleasant"));
    }
}
