//! Streaming evaluation metrics.
//!
//! Each metric owns a handful of running sums. Batches are folded in with
//! [`MetricFn::add_eval`], the current value is read with [`MetricFn::get`], and
//! [`MetricFn::clear`] returns the accumulator to its freshly constructed state
//! (e.g. between epochs). No per-instance data outlives an `add_eval` call.
//!
//! # Score Layout
//!
//! Scores arrive as a [`ScoresView`] with shape `[n_outputs, n_instances]`.
//! Labels are an `&[f32]` with at least `n_instances` entries.
//!
//! # Available Metrics
//!
//! ## Regression
//! - [`Rmse`]: Root Mean Squared Error (`"rmse"`)
//! - [`CorrSqr`]: Squared Pearson correlation (`"r2"`)
//!
//! ## Classification
//! - [`ErrorRate`]: Multiclass misclassification rate (`"error"`)
//!
//! # Metric Sets
//!
//! [`MetricSet`] owns a name-deduplicated collection of metrics and fans
//! every call out to its members:
//!
//! ```ignore
//! let mut set = MetricSet::new();
//! set.add_metric("rmse")?;
//! set.add_metric("r2")?;
//! set.add_eval(scores, &labels)?;
//! // "\ttrain-r2:0.912345\ttrain-rmse:0.301234"
//! let line = set.format_report("train");
//! ```

mod classification;
mod regression;
mod set;
mod value;

pub use classification::ErrorRate;
pub use regression::{CorrSqr, Rmse};
pub use set::{MetricSet, RegistryMode};
pub use value::MetricValue;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::ScoresView;
use crate::error::MetricError;

// =============================================================================
// Metric Trait
// =============================================================================

/// A running accumulator for one evaluation metric.
///
/// Unlike an objective, a metric never produces gradients. Its state only
/// advances through `add_eval` and only resets through `clear`.
pub trait MetricFn: Send + Sync {
    /// Reset all running statistics to the empty state.
    fn clear(&mut self);

    /// Check the shape preconditions of a batch without accumulating it.
    fn validate(&self, scores: ScoresView<'_>, labels: &[f32]) -> Result<(), MetricError>;

    /// Fold a batch into the running statistics.
    ///
    /// The batch is validated first; on error nothing is accumulated.
    fn add_eval(&mut self, scores: ScoresView<'_>, labels: &[f32]) -> Result<(), MetricError>;

    /// Current metric value.
    ///
    /// With no accumulated instances the result is non-finite.
    fn get(&self) -> f64;

    /// Short stable identifier used for display and deduplication.
    fn name(&self) -> &'static str;

    /// Whether higher values indicate better performance.
    ///
    /// - `true`: Higher is better (r2)
    /// - `false`: Lower is better (rmse, error)
    fn higher_is_better(&self) -> bool;

    /// Number of instances accumulated since the last `clear`.
    fn n_instances(&self) -> u64;
}

// =============================================================================
// MetricKind
// =============================================================================

/// The fixed registry of metric names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// `"rmse"`
    Rmse,
    /// `"error"`
    Error,
    /// `"r2"`
    #[serde(rename = "r2")]
    CorrSqr,
}

impl MetricKind {
    /// Every registered kind.
    pub const ALL: [MetricKind; 3] = [MetricKind::Rmse, MetricKind::Error, MetricKind::CorrSqr];

    /// Registry name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rmse => "rmse",
            Self::Error => "error",
            Self::CorrSqr => "r2",
        }
    }

    /// Look up a kind by its registry name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl FromStr for MetricKind {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| MetricError::UnknownMetric(s.to_string()))
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Metric Enum
// =============================================================================

/// A metric selected at runtime.
///
/// Closed sum type over the registered accumulators. Each variant wraps its
/// struct directly, so dispatch is a `match` rather than a vtable call.
///
/// # Example
///
/// ```
/// use streameval::{Metric, MetricFn};
///
/// let rmse = Metric::rmse();
/// assert_eq!(rmse.name(), "rmse");
///
/// let r2: Metric = "r2".parse().unwrap();
/// assert!(r2.higher_is_better());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Metric {
    /// Root Mean Squared Error.
    Rmse(Rmse),
    /// Squared correlation.
    CorrSqr(CorrSqr),
    /// Misclassification rate.
    Error(ErrorRate),
}

impl Metric {
    /// Root Mean Squared Error for regression.
    pub fn rmse() -> Self {
        Self::Rmse(Rmse::new())
    }

    /// Squared correlation for scores and labels in `[0, 1]`.
    pub fn r2() -> Self {
        Self::CorrSqr(CorrSqr::new())
    }

    /// Multiclass misclassification rate.
    pub fn error() -> Self {
        Self::Error(ErrorRate::new())
    }

    /// Construct an empty accumulator of the given kind.
    pub fn from_kind(kind: MetricKind) -> Self {
        match kind {
            MetricKind::Rmse => Self::rmse(),
            MetricKind::Error => Self::error(),
            MetricKind::CorrSqr => Self::r2(),
        }
    }

    /// Kind of this metric.
    pub fn kind(&self) -> MetricKind {
        match self {
            Self::Rmse(_) => MetricKind::Rmse,
            Self::CorrSqr(_) => MetricKind::CorrSqr,
            Self::Error(_) => MetricKind::Error,
        }
    }

    /// Fold another accumulator's statistics into this one.
    ///
    /// Both sides must be the same kind.
    pub fn merge(&mut self, other: &Metric) -> Result<(), MetricError> {
        match (self, other) {
            (Self::Rmse(a), Self::Rmse(b)) => a.merge(b),
            (Self::CorrSqr(a), Self::CorrSqr(b)) => a.merge(b),
            (Self::Error(a), Self::Error(b)) => a.merge(b),
            (left, right) => {
                return Err(MetricError::MetricMismatch {
                    left: left.name(),
                    right: right.name(),
                })
            }
        }
        Ok(())
    }
}

impl FromStr for Metric {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self::from_kind)
    }
}

impl MetricFn for Metric {
    fn clear(&mut self) {
        match self {
            Self::Rmse(inner) => inner.clear(),
            Self::CorrSqr(inner) => inner.clear(),
            Self::Error(inner) => inner.clear(),
        }
    }

    fn validate(&self, scores: ScoresView<'_>, labels: &[f32]) -> Result<(), MetricError> {
        match self {
            Self::Rmse(inner) => inner.validate(scores, labels),
            Self::CorrSqr(inner) => inner.validate(scores, labels),
            Self::Error(inner) => inner.validate(scores, labels),
        }
    }

    fn add_eval(&mut self, scores: ScoresView<'_>, labels: &[f32]) -> Result<(), MetricError> {
        match self {
            Self::Rmse(inner) => inner.add_eval(scores, labels),
            Self::CorrSqr(inner) => inner.add_eval(scores, labels),
            Self::Error(inner) => inner.add_eval(scores, labels),
        }
    }

    fn get(&self) -> f64 {
        match self {
            Self::Rmse(inner) => inner.get(),
            Self::CorrSqr(inner) => inner.get(),
            Self::Error(inner) => inner.get(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Rmse(inner) => inner.name(),
            Self::CorrSqr(inner) => inner.name(),
            Self::Error(inner) => inner.name(),
        }
    }

    fn higher_is_better(&self) -> bool {
        match self {
            Self::Rmse(inner) => inner.higher_is_better(),
            Self::CorrSqr(inner) => inner.higher_is_better(),
            Self::Error(inner) => inner.higher_is_better(),
        }
    }

    fn n_instances(&self) -> u64 {
        match self {
            Self::Rmse(inner) => inner.n_instances(),
            Self::CorrSqr(inner) => inner.n_instances(),
            Self::Error(inner) => inner.n_instances(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
