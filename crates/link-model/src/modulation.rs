//! Modulation schemes and BER under Gaussian noise.
//!
//! `ber = 0.5 * erfc(sqrt(snr_linear / k))` with a per-scheme divisor `k`.
//! A larger divisor yields a higher error rate at the same SNR.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modulation {
    /// On-Off Keying
    #[default]
    Ook,
    /// Pulse-Position Modulation
    Ppm,
    /// Binary Phase-Shift Keying
    Bpsk,
}

impl Modulation {
    pub const ALL: [Modulation; 3] = [Modulation::Ook, Modulation::Ppm, Modulation::Bpsk];

    /// Divisor applied to linear SNR inside the square root
    pub fn snr_divisor(self) -> f64 {
        match self {
            Modulation::Ook => 2.0,
            Modulation::Ppm => 4.0,
            Modulation::Bpsk => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Modulation::Ook => "OOK",
            Modulation::Ppm => "PPM",
            Modulation::Bpsk => "BPSK",
        }
    }
}

impl fmt::Display for Modulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modulation {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_uppercase();
        Modulation::ALL
            .into_iter()
            .find(|m| m.as_str() == tag)
            .ok_or_else(|| ModelError::UnknownModulation(s.to_string()))
    }
}

/// Bit error rate for `snr_db` under `modulation`, in `[0, 0.5]`
pub fn bit_error_rate(snr_db: f64, modulation: Modulation) -> f64 {
    let snr_linear = 10f64.powf(snr_db / 10.0);
    0.5 * libm::erfc((snr_linear / modulation.snr_divisor()).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_rel(actual: f64, expected: f64) {
        let rel = ((actual - expected) / expected).abs();
        assert!(rel < 1e-9, "got {actual}, want {expected} (rel {rel:e})");
    }

    // Reference values from an independent double-precision erfc.
    #[test]
    fn test_reference_ber_at_4_9_db() {
        assert_rel(bit_error_rate(4.9, Modulation::Bpsk), 0.006457956943860069);
        assert_rel(bit_error_rate(4.9, Modulation::Ook), 0.0393802536487273);
        assert_rel(bit_error_rate(4.9, Modulation::Ppm), 0.10692660068027157);
    }

    #[test]
    fn test_ber_upper_bound() {
        // snr_linear -> 0 drives erfc(0) = 1
        for m in Modulation::ALL {
            let ber = bit_error_rate(-400.0, m);
            assert!((ber - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ceiling_snr_drives_ber_to_zero() {
        assert!(bit_error_rate(100.0, Modulation::Ppm) < 1e-300);
    }

    #[test]
    fn test_parse() {
        assert_eq!("ook".parse::<Modulation>().unwrap(), Modulation::Ook);
        assert_eq!("BPSK".parse::<Modulation>().unwrap(), Modulation::Bpsk);
        assert!(matches!(
            "QPSK".parse::<Modulation>(),
            Err(ModelError::UnknownModulation(tag)) if tag == "QPSK"
        ));
    }

    proptest! {
        #[test]
        fn prop_ber_bounded(snr in -60.0f64..60.0, idx in 0usize..3) {
            let ber = bit_error_rate(snr, Modulation::ALL[idx]);
            prop_assert!((0.0..=0.5).contains(&ber));
        }

        #[test]
        fn prop_ber_non_increasing(a in -30.0f64..30.0, b in -30.0f64..30.0, idx in 0usize..3) {
            let m = Modulation::ALL[idx];
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(bit_error_rate(high, m) <= bit_error_rate(low, m));
        }

        #[test]
        fn prop_scheme_ordering(snr in -30.0f64..30.0) {
            let bpsk = bit_error_rate(snr, Modulation::Bpsk);
            let ook = bit_error_rate(snr, Modulation::Ook);
            let ppm = bit_error_rate(snr, Modulation::Ppm);
            prop_assert!(bpsk <= ook);
            prop_assert!(ook <= ppm);
        }
    }
}
