//! Distance Sweep Analysis
//!
//! Evaluates the full model over a fixed grid of distances while holding every
//! other field of one snapshot constant. Always recomputed in full; nothing is
//! cached between invocations.

use serde::{Deserialize, Serialize};

use crate::{LinkParameters, PerformanceMetrics, Result};

/// Display scale applied to BER in the sweep series
pub const BER_SERIES_SCALE: f64 = 1e6;

pub const SERIES_ATTENUATION: &str = "Attenuation (dB)";
pub const SERIES_SNR: &str = "SNR (dB)";
pub const SERIES_BER: &str = "BER (×1e-6)";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SweepConfig {
    pub start_m: f64,
    pub end_m: f64,
    pub points: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start_m: 100.0,
            end_m: 5000.0,
            points: 50,
        }
    }
}

impl SweepConfig {
    /// Evenly spaced distances, endpoints inclusive
    pub fn distances(&self) -> Vec<f64> {
        linspace(self.start_m, self.end_m, self.points)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SweepPoint {
    pub distance_m: f64,
    pub attenuation_db: f64,
    pub snr_db: f64,
    pub ber: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepResult {
    pub snapshot: LinkParameters,
    pub points: Vec<SweepPoint>,
}

/// One labeled curve of the multi-curve distance plot
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SweepSeries {
    pub label: &'static str,
    pub values: Vec<f64>,
}

impl SweepResult {
    pub fn run(snapshot: &LinkParameters, config: &SweepConfig) -> Result<Self> {
        let points = config
            .distances()
            .into_iter()
            .map(|distance_m| {
                let metrics = PerformanceMetrics::compute(&snapshot.with_distance(distance_m))?;
                Ok(SweepPoint {
                    distance_m,
                    attenuation_db: metrics.attenuation_db,
                    snr_db: metrics.snr_db,
                    ber: metrics.ber,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            snapshot: *snapshot,
            points,
        })
    }

    pub fn distances(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.distance_m).collect()
    }

    /// Attenuation, SNR and scaled BER curves
    pub fn series(&self) -> [SweepSeries; 3] {
        [
            SweepSeries {
                label: SERIES_ATTENUATION,
                values: self.points.iter().map(|p| p.attenuation_db).collect(),
            },
            SweepSeries {
                label: SERIES_SNR,
                values: self.points.iter().map(|p| p.snr_db).collect(),
            },
            SweepSeries {
                label: SERIES_BER,
                values: self.points.iter().map(|p| p.ber * BER_SERIES_SCALE).collect(),
            },
        ]
    }
}

/// `n` evenly spaced samples over `[start, end]`; the last sample is exactly `end`
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
