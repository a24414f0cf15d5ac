//! Classification metrics.

use ndarray::ArrayView1;

use super::MetricFn;
use crate::data::ScoresView;
use crate::error::MetricError;

// =============================================================================
// Error Rate
// =============================================================================

/// Multiclass error rate: fraction of instances whose arg-max score differs
/// from the label.
///
/// Lower is better. Each instance carries one score per class; labels are
/// class indices in `0..n_outputs`, truncated toward zero. A label that is
/// negative or not finite never matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorRate {
    n_errors: u64,
    count: u64,
}

impl ErrorRate {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another accumulator's counts into this one.
    pub fn merge(&mut self, other: &ErrorRate) {
        self.n_errors += other.n_errors;
        self.count += other.count;
    }
}

/// Index of the largest score. Ties go to the lowest index.
#[inline]
fn argmax(scores: ArrayView1<'_, f32>) -> usize {
    let mut best = 0;
    for (idx, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = idx;
        }
    }
    best
}

#[inline]
fn label_class(label: f32) -> Option<usize> {
    let truncated = label.trunc();
    if truncated.is_finite() && truncated >= 0.0 {
        Some(truncated as usize)
    } else {
        None
    }
}

impl MetricFn for ErrorRate {
    fn clear(&mut self) {
        self.n_errors = 0;
        self.count = 0;
    }

    fn validate(&self, scores: ScoresView<'_>, labels: &[f32]) -> Result<(), MetricError> {
        if scores.n_outputs() == 0 {
            return Err(MetricError::NoOutputs {
                metric: self.name(),
            });
        }
        scores.check_labels(self.name(), labels)
    }

    fn add_eval(&mut self, scores: ScoresView<'_>, labels: &[f32]) -> Result<(), MetricError> {
        self.validate(scores, labels)?;

        let n_instances = scores.n_instances();
        let n_errors = labels[..n_instances]
            .iter()
            .enumerate()
            .filter(|&(i, &label)| label_class(label) != Some(argmax(scores.instance(i))))
            .count();

        self.n_errors += n_errors as u64;
        self.count += n_instances as u64;
        Ok(())
    }

    fn get(&self) -> f64 {
        self.n_errors as f64 / self.count as f64
    }

    fn name(&self) -> &'static str {
        "error"
    }

    fn higher_is_better(&self) -> bool {
        false
    }

    fn n_instances(&self) -> u64 {
        self.count
    }
}

// =============================================================================
// Tests
// =============================================================================
