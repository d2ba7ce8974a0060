//! FSO Link Budget
//!
//! Received power is transmit power less path attenuation. SNR is the
//! dB difference between received power and the noise term, with a fixed
//! ceiling for a noiseless channel.

use serde::{Deserialize, Serialize};

/// SNR reported when noise power is zero or negative (effectively noiseless)
pub const SNR_CEILING_DB: f64 = 100.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LinkBudget {
    pub received_power_dbm: f64,
    pub snr_db: f64,
}

impl LinkBudget {
    pub fn evaluate(tx_power_dbm: f64, attenuation_db: f64, noise_power: f64) -> Self {
        let received_power_dbm = tx_power_dbm - attenuation_db;
        let snr_db = if noise_power > 0.0 {
            received_power_dbm - noise_power
        } else {
            SNR_CEILING_DB
        };

        Self {
            received_power_dbm,
            snr_db,
        }
    }
}
