use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::metrics::LiveMetricsSnapshot;

/// Trait for statistics that have no measured source in the simulation
///
/// The daily report needs packet loss, throughput consistency and a forecast
/// accuracy figure. None of them can be derived from the reading buffer, so they
/// come from an estimator that tests can replace with fixed values.
pub trait Estimator: Send + Sync {
    /// Packet loss percentage (0-100)
    fn packet_loss(&self, snapshot: &LiveMetricsSnapshot) -> f64;

    /// Throughput consistency percentage (0-100)
    fn throughput_consistency(&self, snapshot: &LiveMetricsSnapshot) -> f64;

    /// Confidence in the trend forecast (0-100)
    fn prediction_accuracy(&self) -> f64;
}

/// Pseudo-random estimator backed by a seeded `StdRng`
pub struct RandomEstimator {
    rng: Mutex<StdRng>,
}

impl RandomEstimator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Same seed, same sequence of estimates
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator for RandomEstimator {
    fn packet_loss(&self, snapshot: &LiveMetricsSnapshot) -> f64 {
        // Weak signal loses more packets
        let weakness = (100.0 - snapshot.network.signal_strength).clamp(0.0, 100.0) / 100.0;
        let noise: f64 = self.rng.lock().gen_range(0.0..0.1);
        noise + weakness * 0.5
    }

    fn throughput_consistency(&self, _snapshot: &LiveMetricsSnapshot) -> f64 {
        let noise: f64 = self.rng.lock().gen_range(0.0..10.0);
        100.0 - noise
    }

    fn prediction_accuracy(&self) -> f64 {
        self.rng.lock().gen_range(85.0..95.0)
    }
}

/// Deterministic estimator returning the same figures on every call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedEstimator {
    pub packet_loss: f64,
    pub throughput_consistency: f64,
    pub prediction_accuracy: f64,
}

impl Default for FixedEstimator {
    fn default() -> Self {
        Self {
            packet_loss: 0.0,
            throughput_consistency: 100.0,
            prediction_accuracy: 90.0,
        }
    }
}

impl Estimator for FixedEstimator {
    fn packet_loss(&self, _snapshot: &LiveMetricsSnapshot) -> f64 {
        self.packet_loss
    }

    fn throughput_consistency(&self, _snapshot: &LiveMetricsSnapshot) -> f64 {
        self.throughput_consistency
    }

    fn prediction_accuracy(&self) -> f64 {
        self.prediction_accuracy
    }
}
