//! Parameter input surface.
//!
//! Parses partial edits from the UI, rejects unknown weather/modulation tags,
//! and clamps numeric fields to the slider ranges before anything reaches the
//! parameter store. The model does not validate ranges itself.

use link_model::params::{
    APERTURE_RANGE_M, DATA_RATE_RANGE_MBPS, DISTANCE_RANGE_M, TX_POWER_RANGE_DBM,
};
use link_model::{LinkParameters, ModelError, Modulation, Weather};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::warn;

/// Partial edit as sent by the UI (data rate in Mbps, tags as strings)
#[derive(Debug, Default, Deserialize)]
pub struct ParameterUpdate {
    pub distance_m: Option<f64>,
    pub tx_power_dbm: Option<f64>,
    pub aperture_diameter_m: Option<f64>,
    pub data_rate_mbps: Option<f64>,
    pub weather: Option<String>,
    pub modulation: Option<String>,
}

/// Validated edit with typed tags, ready to apply under the store lock
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParameterEdit {
    pub distance_m: Option<f64>,
    pub tx_power_dbm: Option<f64>,
    pub aperture_diameter_m: Option<f64>,
    pub data_rate_mbps: Option<f64>,
    pub weather: Option<Weather>,
    pub modulation: Option<Modulation>,
}

impl ParameterUpdate {
    pub fn parse(self) -> Result<ParameterEdit, ModelError> {
        Ok(ParameterEdit {
            distance_m: self.distance_m,
            tx_power_dbm: self.tx_power_dbm,
            aperture_diameter_m: self.aperture_diameter_m,
            data_rate_mbps: self.data_rate_mbps,
            weather: self.weather.as_deref().map(str::parse::<Weather>).transpose()?,
            modulation: self.modulation.as_deref().map(str::parse::<Modulation>).transpose()?,
        })
    }
}

impl ParameterEdit {
    pub fn apply(&self, mut params: LinkParameters) -> LinkParameters {
        if let Some(v) = self.distance_m {
            params.distance_m = clamp_to("distance_m", v, &DISTANCE_RANGE_M);
        }
        if let Some(v) = self.tx_power_dbm {
            params.tx_power_dbm = clamp_to("tx_power_dbm", v, &TX_POWER_RANGE_DBM);
        }
        if let Some(v) = self.aperture_diameter_m {
            params.aperture_diameter_m = clamp_to("aperture_diameter_m", v, &APERTURE_RANGE_M);
        }
        if let Some(v) = self.data_rate_mbps {
            let mbps = clamp_to("data_rate_mbps", v, &DATA_RATE_RANGE_MBPS);
            params = params.with_data_rate_mbps(mbps);
        }
        if let Some(w) = self.weather {
            params.weather = w;
        }
        if let Some(m) = self.modulation {
            params.modulation = m;
        }
        params
    }
}

fn clamp_to(field: &str, value: f64, range: &RangeInclusive<f64>) -> f64 {
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        warn!(
            "{} = {} outside [{}, {}], clamped to {}",
            field,
            value,
            range.start(),
            range.end(),
            clamped
        );
    }
    clamped
}

#[derive(Debug, Serialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
}

impl From<&RangeInclusive<f64>> for FieldRange {
    fn from(range: &RangeInclusive<f64>) -> Self {
        Self {
            min: *range.start(),
            max: *range.end(),
        }
    }
}

/// Allowed values for every input control
#[derive(Debug, Serialize)]
pub struct InputOptions {
    pub distance_m: FieldRange,
    pub tx_power_dbm: FieldRange,
    pub aperture_diameter_m: FieldRange,
    pub data_rate_mbps: FieldRange,
    pub weather: Vec<Weather>,
    pub modulation: Vec<Modulation>,
}

impl InputOptions {
    pub fn current() -> Self {
        Self {
            distance_m: (&DISTANCE_RANGE_M).into(),
            tx_power_dbm: (&TX_POWER_RANGE_DBM).into(),
            aperture_diameter_m: (&APERTURE_RANGE_M).into(),
            data_rate_mbps: (&DATA_RATE_RANGE_MBPS).into(),
            weather: Weather::ALL.to_vec(),
            modulation: Modulation::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_apply() {
        let edit = ParameterUpdate {
            distance_m: Some(2500.0),
            data_rate_mbps: Some(250.0),
            weather: Some("rain".into()),
            modulation: Some("ppm".into()),
            ..Default::default()
        }
        .parse()
        .unwrap();

        let params = edit.apply(LinkParameters::default());
        assert_eq!(params.distance_m, 2500.0);
        assert_eq!(params.data_rate_bps, 2.5e8);
        assert_eq!(params.weather, Weather::Rain);
        assert_eq!(params.modulation, Modulation::Ppm);
        assert_eq!(params.tx_power_dbm, 10.0);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let edit = ParameterEdit {
            distance_m: Some(12.0),
            tx_power_dbm: Some(45.0),
            aperture_diameter_m: Some(2.0),
            data_rate_mbps: Some(1e6),
            ..Default::default()
        };
        let params = edit.apply(LinkParameters::default());
        assert_eq!(params.distance_m, 100.0);
        assert_eq!(params.tx_power_dbm, 20.0);
        assert_eq!(params.aperture_diameter_m, 0.5);
        assert_eq!(params.data_rate_bps, 1e10);
    }

    #[test]
    fn test_unknown_tags_rejected() {
        let update = ParameterUpdate {
            weather: Some("hail".into()),
            ..Default::default()
        };
        assert_eq!(update.parse(), Err(ModelError::UnknownWeather("hail".into())));

        let update = ParameterUpdate {
            modulation: Some("QAM64".into()),
            ..Default::default()
        };
        assert!(matches!(update.parse(), Err(ModelError::UnknownModulation(_))));
    }

    #[test]
    fn test_empty_edit_is_identity() {
        let base = LinkParameters::default().with_weather(Weather::Snow);
        assert_eq!(ParameterEdit::default().apply(base), base);
    }
}
