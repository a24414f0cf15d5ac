//! Error types for metric accumulation and registration.

/// Errors raised while registering or accumulating metrics.
///
/// A batch that fails validation is rejected before any running sum is
/// touched, so a failed [`add_eval`](crate::MetricFn::add_eval) leaves the
/// accumulator exactly as it was.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    #[error("{metric} requires {expected} output(s) per instance, got {got}")]
    OutputShape {
        metric: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{metric} requires at least one output per instance")]
    NoOutputs { metric: &'static str },

    #[error("{metric}: {n_labels} labels for {n_instances} instances")]
    LabelLengthMismatch {
        metric: &'static str,
        n_instances: usize,
        n_labels: usize,
    },

    #[error("unknown metric: {0:?}")]
    UnknownMetric(String),

    #[error("cannot merge {right} into {left}")]
    MetricMismatch {
        left: &'static str,
        right: &'static str,
    },
}
