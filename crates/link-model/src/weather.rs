//! Weather Conditions for FSO Link Attenuation
//!
//! Each condition carries two independent coefficient tables:
//! - Specific attenuation (dB/km), linear in path length
//! - Noise factor, a severity multiplier on the receiver noise floor
//!
//! Both tables are total over the enum. Unknown tags are rejected at parse time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Atmospheric condition along the optical path
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Haze,
    LightFog,
    HeavyFog,
    Rain,
    Snow,
}

impl Weather {
    /// All conditions, in input-surface order
    pub const ALL: [Weather; 6] = [
        Weather::Clear,
        Weather::Haze,
        Weather::LightFog,
        Weather::HeavyFog,
        Weather::Rain,
        Weather::Snow,
    ];

    /// Specific attenuation in dB/km
    pub fn attenuation_db_per_km(self) -> f64 {
        match self {
            Weather::Clear => 0.1,
            Weather::Haze => 1.0,
            Weather::LightFog => 5.0,
            Weather::HeavyFog => 20.0,
            Weather::Rain => 10.0,
            Weather::Snow => 15.0,
        }
    }

    /// Noise floor multiplier (clear = 1.0)
    pub fn noise_factor(self) -> f64 {
        match self {
            Weather::Clear => 1.0,
            Weather::Haze => 1.2,
            Weather::LightFog => 1.5,
            Weather::HeavyFog => 2.0,
            Weather::Rain => 1.8,
            Weather::Snow => 2.2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Clear => "clear",
            Weather::Haze => "haze",
            Weather::LightFog => "light_fog",
            Weather::HeavyFog => "heavy_fog",
            Weather::Rain => "rain",
            Weather::Snow => "snow",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weather {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Weather::ALL
            .into_iter()
            .find(|w| w.as_str() == tag)
            .ok_or_else(|| ModelError::UnknownWeather(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!("clear".parse::<Weather>().unwrap(), Weather::Clear);
        assert_eq!("light_fog".parse::<Weather>().unwrap(), Weather::LightFog);
        assert_eq!("Heavy-Fog".parse::<Weather>().unwrap(), Weather::HeavyFog);
        assert_eq!(" snow ".parse::<Weather>().unwrap(), Weather::Snow);
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let err = "sandstorm".parse::<Weather>().unwrap_err();
        assert_eq!(err, ModelError::UnknownWeather("sandstorm".to_string()));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for w in Weather::ALL {
            assert_eq!(w.to_string().parse::<Weather>().unwrap(), w);
        }
    }

    #[test]
    fn test_serde_uses_snake_case_tags() {
        let json = serde_json::to_string(&Weather::LightFog).unwrap();
        assert_eq!(json, "\"light_fog\"");
        let back: Weather = serde_json::from_str("\"heavy_fog\"").unwrap();
        assert_eq!(back, Weather::HeavyFog);
    }

    #[test]
    fn test_noise_factor_table() {
        assert_eq!(Weather::Clear.noise_factor(), 1.0);
        assert_eq!(Weather::Snow.noise_factor(), 2.2);
        assert!(Weather::ALL.iter().all(|w| w.noise_factor() >= 1.0));
    }
}
