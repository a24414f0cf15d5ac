//! Configuration for building a [`MetricSet`].
//!
//! The config is plain data: it can be built in code through a `bon` builder
//! or deserialized (e.g. from JSON) with every field optional.
//!
//! # Example
//!
//! ```
//! use streameval::{MetricSetConfig, RegistryMode};
//!
//! let config = MetricSetConfig::builder()
//!     .metrics(vec!["rmse".into(), "r2".into()])
//!     .registry(RegistryMode::Strict)
//!     .build()
//!     .unwrap();
//!
//! let set = config.build_set().unwrap();
//! assert_eq!(set.names(), vec!["r2", "rmse"]);
//! ```

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::MetricError;
use crate::logger::{EvalLogger, Verbosity};
use crate::metrics::{MetricKind, MetricSet, RegistryMode};

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("metric name at position {0} is empty")]
    EmptyMetricName(usize),

    #[error("unknown metric {0:?} (strict registry)")]
    UnknownMetric(String),
}

// =============================================================================
// MetricSetConfig
// =============================================================================

/// Which metrics to evaluate and how to treat the names.
#[derive(Debug, Clone, Default, PartialEq, Builder, Serialize, Deserialize)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
#[serde(default)]
pub struct MetricSetConfig {
    /// Metric names, in any order. Duplicates collapse to one metric.
    #[builder(default)]
    pub metrics: Vec<String>,

    /// Treatment of names outside the registry. Default: `Permissive`.
    #[builder(default)]
    pub registry: RegistryMode,

    /// Verbosity of the evaluation logger. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

impl<S: metric_set_config_builder::IsComplete> MetricSetConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a metric name is empty, or unknown while the
    /// registry is strict.
    pub fn build(self) -> Result<MetricSetConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl MetricSetConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (idx, name) in self.metrics.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyMetricName(idx));
            }
            if self.registry == RegistryMode::Strict && MetricKind::from_name(name).is_none() {
                return Err(ConfigError::UnknownMetric(name.clone()));
            }
        }
        Ok(())
    }

    /// Construct the configured metric set.
    pub fn build_set(&self) -> Result<MetricSet, MetricError> {
        let logger = self.logger();
        let set = MetricSet::from_names(&self.metrics, self.registry)?;
        logger.debug(&format!("evaluating metrics: {:?}", set.names()));
        Ok(set)
    }

    /// Logger at the configured verbosity.
    pub fn logger(&self) -> EvalLogger {
        EvalLogger::new(self.verbosity)
    }
}
