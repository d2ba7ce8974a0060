//! Synthetic spatial intensity profile for visual feedback.
//!
//! A Gaussian pulse centred mid-path (amplitude = received power, sigma =
//! distance / 5) plus zero-mean normal noise with standard deviation equal to
//! the noise power. Not a beam-propagation computation.

use link_model::sweep::linspace;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{Result, SimError, SpatialSample, SpatialTrace};

pub struct SignalSynthesizer {
    resolution: usize,
}

impl SignalSynthesizer {
    pub fn new(resolution: usize) -> Self {
        Self { resolution }
    }

    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        distance_m: f64,
        received_power_dbm: f64,
        noise_power: f64,
        rng: &mut R,
    ) -> Result<SpatialTrace> {
        // Normal::new accepts a negative std dev
        if !noise_power.is_finite() || noise_power < 0.0 {
            return Err(SimError::Signal(format!(
                "noise std dev must be finite and non-negative, got {noise_power}"
            )));
        }
        let noise = Normal::new(0.0, noise_power)
            .map_err(|e| SimError::Signal(format!("noise std dev {noise_power}: {e}")))?;

        let samples = linspace(0.0, distance_m, self.resolution)
            .into_iter()
            .map(|position_m| SpatialSample {
                position_m,
                intensity: pulse(position_m, distance_m, received_power_dbm)
                    + noise.sample(&mut *rng),
            })
            .collect();

        Ok(SpatialTrace { samples })
    }
}

/// Deterministic beam envelope at `position_m`
fn pulse(position_m: f64, distance_m: f64, amplitude: f64) -> f64 {
    let center = distance_m / 2.0;
    let sigma = distance_m / 5.0;
    amplitude * (-(position_m - center).powi(2) / (2.0 * sigma * sigma)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_axis_spans_path() {
        let synth = SignalSynthesizer::new(100);
        let mut rng = StdRng::seed_from_u64(7);
        let trace = synth.synthesize(2000.0, 9.9, 5.0, &mut rng).unwrap();

        assert_eq!(trace.len(), 100);
        assert_eq!(trace.samples[0].position_m, 0.0);
        assert_eq!(trace.samples[99].position_m, 2000.0);
        for pair in trace.samples.windows(2) {
            assert!(pair[1].position_m > pair[0].position_m);
        }
    }

    #[test]
    fn test_noiseless_pulse_shape() {
        let synth = SignalSynthesizer::new(101);
        let mut rng = StdRng::seed_from_u64(1);
        let trace = synth.synthesize(1000.0, 8.0, 0.0, &mut rng).unwrap();

        // Odd resolution puts a sample exactly at the centre
        let mid = trace.samples[50];
        assert_eq!(mid.position_m, 500.0);
        assert!((mid.intensity - 8.0).abs() < 1e-12);
        assert_eq!(trace.peak_intensity(), Some(mid.intensity));

        // Symmetric about the centre
        let left = trace.samples[10].intensity;
        let right = trace.samples[90].intensity;
        assert!((left - right).abs() < 1e-9);

        // One sigma from centre
        let expected = 8.0 * (-0.5f64).exp();
        let at_sigma = pulse(700.0, 1000.0, 8.0);
        assert!((at_sigma - expected).abs() < 1e-12);
    }

    #[test]
    fn test_noise_perturbs_profile() {
        let synth = SignalSynthesizer::new(200);
        let mut rng = StdRng::seed_from_u64(42);
        let noisy = synth.synthesize(1000.0, 5.0, 2.0, &mut rng).unwrap();

        let residual: Vec<f64> = noisy
            .samples
            .iter()
            .map(|s| s.intensity - pulse(s.position_m, 1000.0, 5.0))
            .collect();
        let mean = residual.iter().sum::<f64>() / residual.len() as f64;
        let var = residual.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / residual.len() as f64;

        assert!(mean.abs() < 0.6, "mean residual {mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.6, "std dev {}", var.sqrt());
    }

    #[test]
    fn test_invalid_noise_is_error() {
        let synth = SignalSynthesizer::new(10);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            synth.synthesize(1000.0, 1.0, f64::NAN, &mut rng),
            Err(SimError::Signal(_))
        ));
        assert!(matches!(
            synth.synthesize(1000.0, 1.0, -1.0, &mut rng),
            Err(SimError::Signal(_))
        ));
        assert!(matches!(
            synth.synthesize(1000.0, 1.0, f64::INFINITY, &mut rng),
            Err(SimError::Signal(_))
        ));
    }
}
