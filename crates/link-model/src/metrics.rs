//! Derived performance metrics for one parameter snapshot.

use serde::{Deserialize, Serialize};

use crate::{channel, ensure_finite, modulation, LinkBudget, LinkParameters, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PerformanceMetrics {
    pub attenuation_db: f64,
    pub received_power_dbm: f64,
    pub noise_power: f64,
    pub snr_db: f64,
    pub ber: f64,
}

impl PerformanceMetrics {
    /// Run channel -> link budget -> modulation for `params`.
    ///
    /// Fails only when a parameter outside the model's domain (for example a
    /// negative data rate) produces a non-finite quantity.
    pub fn compute(params: &LinkParameters) -> Result<Self> {
        let attenuation_db = ensure_finite(
            "attenuation_db",
            channel::attenuation_db(params.distance_m, params.weather),
        )?;
        let noise_power = ensure_finite(
            "noise_power",
            channel::noise_power(params.data_rate_bps, params.weather),
        )?;

        let budget = LinkBudget::evaluate(params.tx_power_dbm, attenuation_db, noise_power);
        let received_power_dbm = ensure_finite("received_power_dbm", budget.received_power_dbm)?;
        let snr_db = ensure_finite("snr_db", budget.snr_db)?;

        let ber = ensure_finite("ber", modulation::bit_error_rate(snr_db, params.modulation))?;

        Ok(Self {
            attenuation_db,
            received_power_dbm,
            noise_power,
            snr_db,
            ber,
        })
    }
}
