use serde::{Deserialize, Serialize};

/// Icon for a WMO weather interpretation code.
/// See: https://open-meteo.com/en/docs#weathervariables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    Sun,
    SunSmallCloud,
    SunCloud,
    Cloud,
    Fog,
    SunShower,
    Rain,
    Snow,
    Lightning,
    Thunderstorm,
    Unknown,
}

impl WeatherIcon {
    /// Total over `i32`; unrecognized codes map to [`WeatherIcon::Unknown`].
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Sun,
            1 => Self::SunSmallCloud,
            2 => Self::SunCloud,
            3 => Self::Cloud,
            45 | 48 => Self::Fog,
            // light drizzle / rain / freezing variants
            51 | 56 | 61 | 66 | 80 => Self::SunShower,
            52..=67 | 81 | 82 => Self::Rain,
            71..=77 | 85 | 86 => Self::Snow,
            95 => Self::Lightning,
            96..=99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Sun => "☀️",
            Self::SunSmallCloud => "🌤",
            Self::SunCloud => "⛅️",
            Self::Cloud => "☁️",
            Self::Fog => "🌫",
            Self::SunShower => "🌦",
            Self::Rain => "🌧",
            Self::Snow => "🌨",
            Self::Lightning => "🌩",
            Self::Thunderstorm => "⛈",
            Self::Unknown => "❔",
        }
    }
}

impl std::fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}
