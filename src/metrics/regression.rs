//! Regression metrics.
//!
//! Both metrics require exactly one output per instance.

use super::MetricFn;
use crate::data::ScoresView;
use crate::error::MetricError;

// =============================================================================
// RMSE (Root Mean Squared Error)
// =============================================================================

/// Root Mean Squared Error: sqrt(mean((score - label)²))
///
/// Lower is better. Used for regression tasks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rmse {
    sum_err: f64,
    count: u64,
}

impl Rmse {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another accumulator's sums into this one.
    pub fn merge(&mut self, other: &Rmse) {
        self.sum_err += other.sum_err;
        self.count += other.count;
    }
}

impl MetricFn for Rmse {
    fn clear(&mut self) {
        self.sum_err = 0.0;
        self.count = 0;
    }

    fn validate(&self, scores: ScoresView<'_>, labels: &[f32]) -> Result<(), MetricError> {
        scores.check_outputs(self.name(), 1)?;
        scores.check_labels(self.name(), labels)
    }

    fn add_eval(&mut self, scores: ScoresView<'_>, labels: &[f32]) -> Result<(), MetricError> {
        self.validate(scores, labels)?;

        let preds = scores.output(0);
        for (&p, &l) in preds.iter().zip(labels) {
            let diff = (p as f64) - (l as f64);
            self.sum_err += diff * diff;
        }
        self.count += preds.len() as u64;
        Ok(())
    }

    fn get(&self) -> f64 {
        (self.sum_err / self.count as f64).sqrt()
    }

    fn name(&self) -> &'static str {
        "rmse"
    }

    fn higher_is_better(&self) -> bool {
        false
    }

    fn n_instances(&self) -> u64 {
        self.count
    }
}

// =============================================================================
// Squared Correlation
// =============================================================================

/// Squared Pearson correlation between scores and labels: cov² / (var_x · var_y)
///
/// Higher is better. Scores and labels are centered on 0.5 before
/// accumulation, so both are expected to lie in `[0, 1]` (probabilities).
/// A constant score or label stream has zero variance and yields a
/// non-finite value. That only holds exactly when the centered constant is
/// representable without rounding (0.5, 0.75, ...). For a constant such as
/// 0.1 the moment sums leave a variance at rounding level, so the ratio may
/// come out finite and arbitrary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrSqr {
    sum_x: f64,
    sum_y: f64,
    sum_x2: f64,
    sum_y2: f64,
    sum_xy: f64,
    count: u64,
}

impl CorrSqr {
    /// Centering point for the `[0, 1]` domain.
    const CENTER: f64 = 0.5;

    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another accumulator's sums into this one.
    pub fn merge(&mut self, other: &CorrSqr) {
        self.sum_x += other.sum_x;
        self.sum_y += other.sum_y;
        self.sum_x2 += other.sum_x2;
        self.sum_y2 += other.sum_y2;
        self.sum_xy += other.sum_xy;
        self.count += other.count;
    }
}

impl MetricFn for CorrSqr {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn validate(&self, scores: ScoresView<'_>, labels: &[f32]) -> Result<(), MetricError> {
        scores.check_outputs(self.name(), 1)?;
        scores.check_labels(self.name(), labels)
    }

    fn add_eval(&mut self, scores: ScoresView<'_>, labels: &[f32]) -> Result<(), MetricError> {
        self.validate(scores, labels)?;

        let preds = scores.output(0);
        for (&p, &l) in preds.iter().zip(labels) {
            let x = (p as f64) - Self::CENTER;
            let y = (l as f64) - Self::CENTER;
            self.sum_x += x;
            self.sum_y += y;
            self.sum_x2 += x * x;
            self.sum_y2 += y * y;
            self.sum_xy += x * y;
        }
        self.count += preds.len() as u64;
        Ok(())
    }

    fn get(&self) -> f64 {
        let n = self.count as f64;
        let mean_x = self.sum_x / n;
        let mean_y = self.sum_y / n;
        let cov = self.sum_xy / n - mean_x * mean_y;
        let var_x = self.sum_x2 / n - mean_x * mean_x;
        let var_y = self.sum_y2 / n - mean_y * mean_y;
        cov * cov / (var_x * var_y)
    }

    fn name(&self) -> &'static str {
        "r2"
    }

    fn higher_is_better(&self) -> bool {
        true
    }

    fn n_instances(&self) -> u64 {
        self.count
    }
}

// =============================================================================
// Tests
// =============================================================================
