//! Plain-text link report for the report sink.

use serde::Serialize;
use std::fmt;

use crate::{LinkParameters, PerformanceMetrics, WAVELENGTH_NM};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LinkReport {
    pub params: LinkParameters,
    pub metrics: PerformanceMetrics,
}

impl LinkReport {
    pub fn new(params: LinkParameters, metrics: PerformanceMetrics) -> Self {
        Self { params, metrics }
    }
}

impl fmt::Display for LinkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.params;
        let m = &self.metrics;

        writeln!(f, "=== Simulation Results ===")?;
        writeln!(f, "Wavelength: {:.0} nm", WAVELENGTH_NM)?;
        writeln!(f, "Distance: {:.2} m", p.distance_m)?;
        writeln!(f, "Tx Power: {:.2} dBm", p.tx_power_dbm)?;
        writeln!(f, "Aperture Diameter: {:.2} m", p.aperture_diameter_m)?;
        writeln!(f, "Data Rate: {:.2} Mbps", p.data_rate_mbps())?;
        writeln!(f, "Weather: {}", p.weather)?;
        writeln!(f, "Modulation: {}", p.modulation)?;
        writeln!(f)?;
        writeln!(f, "Attenuation: {:.2} dB", m.attenuation_db)?;
        writeln!(f, "Received Power: {:.2} dBm", m.received_power_dbm)?;
        writeln!(f, "Noise Power: {:.2} dB", m.noise_power)?;
        writeln!(f, "SNR: {:.2} dB", m.snr_db)?;
        write!(f, "BER: {}", scientific(m.ber))
    }
}

/// `{:.2e}` with a signed exponent of at least two digits: `6.46e-03`
fn scientific(value: f64) -> String {
    let raw = format!("{:.2e}", value);
    match raw.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => raw,
        },
        None => raw,
    }
}
