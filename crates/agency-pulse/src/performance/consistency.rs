/// Default penalty per point of score standard deviation. A tuning knob,
/// not a calibrated constant.
pub const DEFAULT_PENALTY_PER_STDDEV: f64 = 2.0;

const MINIMUM_SAMPLES: usize = 3;

/// Stability rating in `[0, 100]` derived from a score series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsistencyEvaluator {
    penalty_per_stddev: f64,
}

impl Default for ConsistencyEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_PENALTY_PER_STDDEV)
    }
}

impl ConsistencyEvaluator {
    pub fn new(penalty_per_stddev: f64) -> Self {
        Self { penalty_per_stddev }
    }

    /// Fewer than three samples are treated as fully consistent.
    pub fn evaluate(&self, scores: &[f64]) -> f64 {
        if scores.len() < MINIMUM_SAMPLES {
            return 100.0;
        }

        // Deviations are taken from the first score so identical scores
        // give a variance of exactly 0.
        let origin = scores[0];
        let count = scores.len() as f64;
        let mean_offset = scores.iter().map(|score| score - origin).sum::<f64>() / count;
        let variance = scores
            .iter()
            .map(|score| (score - origin - mean_offset).powi(2))
            .sum::<f64>()
            / count;

        (100.0 - self.penalty_per_stddev * variance.sqrt()).clamp(0.0, 100.0)
    }
}

pub fn consistency(scores: &[f64]) -> f64 {
    ConsistencyEvaluator::default().evaluate(scores)
}
