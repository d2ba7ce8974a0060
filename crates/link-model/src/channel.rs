//! Atmospheric channel: path attenuation and receiver noise.
//!
//! Both functions are total. Callers guarantee `distance_m > 0` and
//! `data_rate_bps > 0`; negative inputs are not validated here.

use crate::Weather;

/// Reference data rate for the noise model (1 Gbps)
const NOISE_REFERENCE_BPS: f64 = 1e9;

/// Noise power at the reference rate in clear conditions
const NOISE_BASE: f64 = 5.0;

/// Atmospheric attenuation in dB over `distance_m`
pub fn attenuation_db(distance_m: f64, weather: Weather) -> f64 {
    weather.attenuation_db_per_km() * distance_m / 1000.0
}

/// Noise power, growing with the square root of data rate
pub fn noise_power(data_rate_bps: f64, weather: Weather) -> f64 {
    NOISE_BASE * weather.noise_factor() * (data_rate_bps / NOISE_REFERENCE_BPS).sqrt()
}
