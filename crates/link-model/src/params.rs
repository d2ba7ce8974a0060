//! Link parameter snapshot.
//!
//! A `LinkParameters` value is immutable once taken: every derived quantity for
//! one tick or one sweep is computed from a single copy.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::{Modulation, Weather};

/// Input-surface ranges. The model itself does not enforce them.
pub const DISTANCE_RANGE_M: RangeInclusive<f64> = 100.0..=5000.0;
pub const TX_POWER_RANGE_DBM: RangeInclusive<f64> = -10.0..=20.0;
pub const APERTURE_RANGE_M: RangeInclusive<f64> = 0.01..=0.5;
pub const DATA_RATE_RANGE_MBPS: RangeInclusive<f64> = 10.0..=10_000.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LinkParameters {
    pub distance_m: f64,
    pub tx_power_dbm: f64,
    /// Carried for reporting; no formula uses it
    pub aperture_diameter_m: f64,
    pub data_rate_bps: f64,
    pub weather: Weather,
    pub modulation: Modulation,
}

impl Default for LinkParameters {
    fn default() -> Self {
        Self {
            distance_m: 1000.0,
            tx_power_dbm: 10.0,
            aperture_diameter_m: 0.1,
            data_rate_bps: 1e9,
            weather: Weather::Clear,
            modulation: Modulation::Ook,
        }
    }
}

impl LinkParameters {
    pub fn data_rate_mbps(&self) -> f64 {
        self.data_rate_bps / 1e6
    }

    pub fn with_data_rate_mbps(mut self, mbps: f64) -> Self {
        self.data_rate_bps = mbps * 1e6;
        self
    }

    pub fn with_distance(mut self, distance_m: f64) -> Self {
        self.distance_m = distance_m;
        self
    }

    pub fn with_weather(mut self, weather: Weather) -> Self {
        self.weather = weather;
        self
    }

    pub fn with_modulation(mut self, modulation: Modulation) -> Self {
        self.modulation = modulation;
        self
    }
}
