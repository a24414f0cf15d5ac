//! streameval: streaming evaluation metrics.
//!
//! Batches of model scores and ground-truth labels are fed into a
//! [`MetricSet`], which accumulates running sums for every selected metric
//! and reports their values on demand:
//!
//! ```
//! use ndarray::array;
//! use streameval::{MetricSet, ScoresView};
//!
//! let mut set = MetricSet::new();
//! set.add_metric("rmse").unwrap();
//!
//! // Shape [n_outputs, n_instances]
//! let scores = array![[0.0f32, 1.0, 0.5]];
//! let labels = [0.0f32, 0.0, 1.0];
//! set.add_eval(ScoresView::from_array(scores.view()), &labels).unwrap();
//!
//! assert_eq!(set.format_report("train"), "\ttrain-rmse:0.645497");
//! ```
//!
//! Only statistics expressible as a running sum are supported; nothing is
//! retained per instance beyond a single [`MetricFn::add_eval`] call.

pub mod config;
pub mod data;
pub mod error;
pub mod logger;
pub mod metrics;

#[doc(hidden)]
pub mod testing;

pub use config::{ConfigError, MetricSetConfig};
pub use data::ScoresView;
pub use error::MetricError;
pub use logger::{EvalLogger, Verbosity};
pub use metrics::{
    CorrSqr, ErrorRate, Metric, MetricFn, MetricKind, MetricSet, MetricValue, RegistryMode, Rmse,
};
