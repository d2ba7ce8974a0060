//! FSO Link Performance Model
//!
//! Closed-form physical-layer model for a terrestrial Free Space Optical link.
//! Maps link parameters to derived quantities in a fixed dependency order:
//!
//! ```text
//! (distance, weather)  -> attenuation_db        channel
//! (data_rate, weather) -> noise_power           channel
//! (tx, atten, noise)   -> rx_power, snr_db      link_budget
//! (snr_db, modulation) -> ber                   modulation
//! ```
//!
//! Atmospheric effects are per-condition linear coefficients, not a stochastic
//! channel. Every function here is pure; the only fallible step is the
//! finiteness check applied to assembled metrics.

use thiserror::Error;

pub mod channel;
pub mod link_budget;
pub mod metrics;
pub mod modulation;
pub mod params;
pub mod report;
pub mod sweep;
pub mod weather;

pub use link_budget::{LinkBudget, SNR_CEILING_DB};
pub use metrics::PerformanceMetrics;
pub use modulation::Modulation;
pub use params::LinkParameters;
pub use report::LinkReport;
pub use sweep::{SweepConfig, SweepPoint, SweepResult, SweepSeries};
pub use weather::Weather;

/// Carrier wavelength of the modeled terminal. No formula depends on it.
pub const WAVELENGTH_NM: f64 = 1550.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Non-finite {quantity}: {value}")]
    NonFinite { quantity: &'static str, value: f64 },
    #[error("Unknown weather condition: {0}")]
    UnknownWeather(String),
    #[error("Unknown modulation: {0}")]
    UnknownModulation(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Reject NaN and infinities produced by parameters outside the model's domain.
pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::NonFinite { quantity, value })
    }
}
