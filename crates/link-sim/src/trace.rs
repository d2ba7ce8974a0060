//! Output traces consumed by the render sink.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpatialSample {
    pub position_m: f64,
    pub intensity: f64,
}

/// Intensity profile over `[0, distance_m]`, replaced wholesale every tick
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpatialTrace {
    pub samples: Vec<SpatialSample>,
}

impl SpatialTrace {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn peak_intensity(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.intensity).reduce(f64::max)
    }
}

/// Fixed-length sliding window of scaled BER samples.
///
/// Starts full of zeros; every push evicts exactly one oldest sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRateTrace {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl ErrorRateTrace {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: std::iter::repeat(0.0).take(capacity).collect(),
            capacity,
        }
    }

    pub fn push(&mut self, sample: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Oldest first
    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_full_of_zeros() {
        let trace = ErrorRateTrace::new(100);
        assert_eq!(trace.len(), 100);
        assert!(trace.to_vec().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_fifo_eviction() {
        let mut trace = ErrorRateTrace::new(3);
        trace.push(1.0);
        trace.push(2.0);
        assert_eq!(trace.to_vec(), vec![0.0, 1.0, 2.0]);

        trace.push(3.0);
        trace.push(4.0);
        assert_eq!(trace.to_vec(), vec![2.0, 3.0, 4.0]);
        assert_eq!(trace.len(), trace.capacity());
        assert_eq!(trace.latest(), Some(4.0));
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut trace = ErrorRateTrace::new(10);
        for i in 0..1000 {
            trace.push(i as f64);
            assert_eq!(trace.len(), 10);
        }
        assert_eq!(trace.to_vec()[0], 990.0);
    }

    #[test]
    fn test_spatial_peak() {
        let trace = SpatialTrace {
            samples: vec![
                SpatialSample { position_m: 0.0, intensity: 1.0 },
                SpatialSample { position_m: 5.0, intensity: 7.5 },
                SpatialSample { position_m: 10.0, intensity: -2.0 },
            ],
        };
        assert_eq!(trace.peak_intensity(), Some(7.5));
        assert_eq!(SpatialTrace::default().peak_intensity(), None);
    }

    proptest! {
        #[test]
        fn prop_window_keeps_latest_samples(
            capacity in 1usize..64,
            pushes in proptest::collection::vec(0.0f64..1e6, 0..200),
        ) {
            let mut trace = ErrorRateTrace::new(capacity);
            for &v in &pushes {
                trace.push(v);
                prop_assert_eq!(trace.len(), capacity);
            }

            let window = trace.to_vec();
            let kept = pushes.len().min(capacity);
            prop_assert_eq!(&window[capacity - kept..], &pushes[pushes.len() - kept..]);
            prop_assert!(window[..capacity - kept].iter().all(|&v| v == 0.0));
        }
    }
}
