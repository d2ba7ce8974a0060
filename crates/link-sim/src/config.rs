//! Simulation runtime configuration.
//!
//! Loaded from an optional JSON file; every field has a default so a partial
//! file is valid.

use link_model::{LinkParameters, SweepConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::{Result, SimError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Wall-clock interval between ticks
    pub tick_interval_ms: u64,
    /// Samples in each spatial trace
    pub spatial_resolution: usize,
    /// Length of the rolling BER window
    pub error_trace_len: usize,
    /// BER multiplier applied before a sample enters the rolling trace
    pub ber_display_scale: f64,
    pub sweep: SweepConfig,
    /// Parameters published before the first UI edit
    pub initial: LinkParameters,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            spatial_resolution: 100,
            error_trace_len: 100,
            ber_display_scale: 1e6,
            sweep: SweepConfig::default(),
            initial: LinkParameters::default(),
        }
    }
}

impl SimConfig {
    /// Parse without validating, so overrides can be applied before `validate`
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(SimError::Config("tick_interval_ms must be > 0".into()));
        }
        if self.spatial_resolution == 0 {
            return Err(SimError::Config("spatial_resolution must be > 0".into()));
        }
        if self.error_trace_len == 0 {
            return Err(SimError::Config("error_trace_len must be > 0".into()));
        }
        if self.sweep.points < 2 {
            return Err(SimError::Config(format!(
                "sweep needs at least 2 points, got {}",
                self.sweep.points
            )));
        }
        if self.sweep.end_m <= self.sweep.start_m {
            return Err(SimError::Config(format!(
                "sweep range is empty: {} m .. {} m",
                self.sweep.start_m, self.sweep.end_m
            )));
        }
        Ok(())
    }
}
