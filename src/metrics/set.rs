//! Name-driven, deduplicated collection of metrics.

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};

use super::{Metric, MetricFn, MetricKind, MetricValue};
use crate::data::ScoresView;
use crate::error::MetricError;
use crate::logger::LOG_TARGET;

/// How [`MetricSet::add_metric`] treats names outside the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryMode {
    /// Unknown names are skipped without error. Each skip emits a debug-level
    /// `log` record under the `streameval` target naming the metric.
    #[default]
    Permissive,
    /// Unknown names are an error.
    Strict,
}

/// A set of metrics evaluated together.
///
/// Members are kept sorted by name with at most one metric per name. Every
/// batch, reset and report is fanned out to all members in that order.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use streameval::{MetricSet, ScoresView};
///
/// let mut set = MetricSet::new();
/// set.add_metric("error").unwrap();
///
/// // 2 classes, 3 instances in [n_instances, n_outputs] layout
/// let scores = array![[0.9f32, 0.1], [0.2, 0.8], [0.5, 0.5]];
/// set.add_eval(ScoresView::from_instance_major(scores.view()), &[0.0, 1.0, 1.0])
///     .unwrap();
///
/// assert_eq!(set.format_report("valid"), "\tvalid-error:0.333333");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricSet {
    metrics: Vec<Metric>,
    mode: RegistryMode,
}

impl MetricSet {
    /// Create an empty, permissive set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set with the given registry mode.
    pub fn with_mode(mode: RegistryMode) -> Self {
        Self {
            metrics: Vec::new(),
            mode,
        }
    }

    /// Create a set from a list of metric names.
    pub fn from_names<I, S>(names: I, mode: RegistryMode) -> Result<Self, MetricError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::with_mode(mode);
        for name in names {
            set.add_metric(name.as_ref())?;
        }
        Ok(set)
    }

    /// Registry mode of this set.
    pub fn mode(&self) -> RegistryMode {
        self.mode
    }

    /// Add the metric registered under `name`.
    ///
    /// Returns `Ok(true)` if a new metric was inserted and `Ok(false)` if the
    /// name was already present or (in permissive mode) unknown. An existing
    /// metric keeps its accumulated state.
    pub fn add_metric(&mut self, name: &str) -> Result<bool, MetricError> {
        match MetricKind::from_name(name) {
            Some(kind) => Ok(self.add_kind(kind)),
            None => match self.mode {
                RegistryMode::Permissive => {
                    log::debug!(target: LOG_TARGET, "ignoring unknown metric {name:?}");
                    Ok(false)
                }
                RegistryMode::Strict => Err(MetricError::UnknownMetric(name.to_string())),
            },
        }
    }

    /// Add an empty metric of the given kind. Returns whether it was inserted.
    pub fn add_kind(&mut self, kind: MetricKind) -> bool {
        self.metrics.push(Metric::from_kind(kind));
        let before = self.metrics.len();

        // Stable sort keeps the earlier member first among equal names,
        // so dedup drops the newcomer.
        self.metrics.sort_by(|a, b| a.name().cmp(b.name()));
        self.metrics.dedup_by(|a, b| a.name() == b.name());

        let inserted = self.metrics.len() == before;
        if !inserted {
            log::debug!(target: LOG_TARGET, "metric {:?} already present", kind.name());
        }
        inserted
    }

    /// Reset every member.
    pub fn clear(&mut self) {
        for metric in &mut self.metrics {
            metric.clear();
        }
    }

    /// Fold a batch into every member, in collection order.
    ///
    /// All members validate the batch before any of them accumulates it, so
    /// a rejected batch leaves the whole set unchanged.
    pub fn add_eval(&mut self, scores: ScoresView<'_>, labels: &[f32]) -> Result<(), MetricError> {
        for metric in &self.metrics {
            metric.validate(scores, labels)?;
        }
        for metric in &mut self.metrics {
            metric.add_eval(scores, labels)?;
        }
        Ok(())
    }

    /// Write one `"\t<label>-<name>:<value>"` fragment per member.
    ///
    /// Values use six decimal places.
    pub fn report<W: fmt::Write>(&self, sink: &mut W, label: &str) -> fmt::Result {
        for metric in &self.metrics {
            write!(sink, "\t{}-{}:{:.6}", label, metric.name(), metric.get())?;
        }
        Ok(())
    }

    /// Same as [`report`](Self::report), for byte-oriented sinks.
    pub fn write_report<W: io::Write>(&self, out: &mut W, label: &str) -> io::Result<()> {
        for metric in &self.metrics {
            write!(out, "\t{}-{}:{:.6}", label, metric.name(), metric.get())?;
        }
        Ok(())
    }

    /// The report fragments concatenated into a `String`.
    pub fn format_report(&self, label: &str) -> String {
        let mut line = String::new();
        // Writing to a String cannot fail.
        let _ = self.report(&mut line, label);
        line
    }

    /// Current values, named `"<label>-<name>"`.
    pub fn values(&self, label: &str) -> Vec<MetricValue> {
        self.metrics
            .iter()
            .map(|metric| {
                MetricValue::new(
                    format!("{}-{}", label, metric.name()),
                    metric.get(),
                    metric.higher_is_better(),
                )
            })
            .collect()
    }

    /// Fold another set's statistics into this one.
    ///
    /// Metrics present only in `other` are copied in.
    pub fn merge(&mut self, other: &MetricSet) -> Result<(), MetricError> {
        for theirs in &other.metrics {
            match self.metrics.iter_mut().find(|m| m.name() == theirs.name()) {
                Some(ours) => ours.merge(theirs)?,
                None => {
                    self.metrics.push(theirs.clone());
                    self.metrics.sort_by(|a, b| a.name().cmp(b.name()));
                }
            }
        }
        Ok(())
    }

    /// Member with the given name.
    pub fn get(&self, name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.name() == name)
    }

    /// Member names in collection order.
    pub fn names(&self) -> Vec<&'static str> {
        self.metrics.iter().map(|m| m.name()).collect()
    }

    /// Iterate over members in collection order.
    pub fn iter(&self) -> std::slice::Iter<'_, Metric> {
        self.metrics.iter()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl<'a> IntoIterator for &'a MetricSet {
    type Item = &'a Metric;
    type IntoIter = std::slice::Iter<'a, Metric>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{capture_logs, logged, make_scores, DEFAULT_TOLERANCE_F64};
    use approx::assert_abs_diff_eq;

    fn full_set() -> MetricSet {
        MetricSet::from_names(["rmse", "r2", "error"], RegistryMode::Strict).unwrap()
    }

    #[test]
    fn members_sorted_by_name() {
        assert_eq!(full_set().names(), vec!["error", "r2", "rmse"]);
    }

    #[test]
    fn duplicate_name_kept_once() {
        let mut set = MetricSet::new();
        assert!(set.add_metric("rmse").unwrap());
        assert!(!set.add_metric("rmse").unwrap());
        assert_eq!(set.len(), 1);

        let scores = make_scores(1, 3, &[0.0, 1.0, 0.5]);
        set.add_eval(scores.view().into(), &[0.0, 0.0, 1.0]).unwrap();
        let report = set.format_report("train");
        assert_eq!(report.matches("-rmse:").count(), 1);
    }

    #[test]
    fn duplicate_keeps_accumulated_state() {
        let mut set = MetricSet::new();
        set.add_metric("rmse").unwrap();
        let scores = make_scores(1, 3, &[0.0, 1.0, 0.5]);
        set.add_eval(scores.view().into(), &[0.0, 0.0, 1.0]).unwrap();

        set.add_metric("rmse").unwrap();
        assert_eq!(set.get("rmse").unwrap().n_instances(), 3);
    }

    #[test]
    fn unknown_name_ignored_when_permissive() {
        let mut set = MetricSet::new();
        set.add_metric("rmse").unwrap();
        assert!(!set.add_metric("bogus").unwrap());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn unknown_name_rejected_when_strict() {
        let mut set = MetricSet::with_mode(RegistryMode::Strict);
        assert_eq!(
            set.add_metric("bogus"),
            Err(MetricError::UnknownMetric("bogus".to_string()))
        );
        assert!(set.is_empty());
    }

    #[test]
    fn rejected_batch_leaves_set_untouched() {
        // "error" accepts two outputs, "rmse" does not
        let mut set = MetricSet::from_names(["error", "rmse"], RegistryMode::Strict).unwrap();
        let scores = make_scores(2, 2, &[0.9, 0.1, 0.1, 0.9]);

        let err = set.add_eval(scores.view().into(), &[0.0, 1.0]).unwrap_err();
        assert!(matches!(err, MetricError::OutputShape { metric: "rmse", .. }));
        assert!(set.iter().all(|m| m.n_instances() == 0));
    }

    #[test]
    fn permissive_skip_is_logged() {
        capture_logs();
        let mut set = MetricSet::new();
        assert!(!set.add_metric("auc-skip-check").unwrap());
        assert!(set.is_empty());
        assert!(logged(
            log::Level::Debug,
            "ignoring unknown metric \"auc-skip-check\""
        ));
    }

    #[test]
    fn report_format() {
        let mut set = MetricSet::from_names(["rmse", "r2"], RegistryMode::Strict).unwrap();
        let scores = make_scores(1, 3, &[0.0, 0.5, 1.0]);
        set.add_eval(scores.view().into(), &[0.0, 1.0, 1.0]).unwrap();

        assert_eq!(
            set.format_report("valid"),
            "\tvalid-r2:0.750000\tvalid-rmse:0.288675"
        );

        let mut bytes = Vec::new();
        set.write_report(&mut bytes, "valid").unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), set.format_report("valid"));
    }

    #[test]
    fn values_carry_direction() {
        let mut set = full_set();
        let scores = make_scores(1, 3, &[0.0, 0.5, 1.0]);
        set.add_eval(scores.view().into(), &[0.0, 1.0, 1.0]).unwrap();

        let values = set.values("train");
        let names: Vec<_> = values.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["train-error", "train-r2", "train-rmse"]);
        assert!(values[1].higher_is_better);
        assert!(!values[2].higher_is_better);
        // Single output: every instance predicts class 0
        assert_abs_diff_eq!(values[0].value, 2.0 / 3.0, epsilon = DEFAULT_TOLERANCE_F64);
    }

    #[test]
    fn clear_resets_every_member() {
        let mut set = full_set();
        let scores = make_scores(1, 3, &[0.0, 0.5, 1.0]);
        set.add_eval(scores.view().into(), &[0.0, 1.0, 1.0]).unwrap();
        set.clear();
        assert!(set.iter().all(|m| m.n_instances() == 0));
    }

    #[test]
    fn merge_partitions() {
        let scores_a = make_scores(1, 2, &[0.0, 0.5]);
        let scores_b = make_scores(1, 1, &[1.0]);

        let mut left = MetricSet::from_names(["rmse"], RegistryMode::Strict).unwrap();
        left.add_eval(scores_a.view().into(), &[0.0, 1.0]).unwrap();
        let mut right = MetricSet::from_names(["rmse", "r2"], RegistryMode::Strict).unwrap();
        right.add_eval(scores_b.view().into(), &[1.0]).unwrap();

        left.merge(&right).unwrap();
        assert_eq!(left.names(), vec!["r2", "rmse"]);
        assert_eq!(left.get("rmse").unwrap().n_instances(), 3);
        assert_abs_diff_eq!(
            left.get("rmse").unwrap().get(),
            (0.25f64 / 3.0).sqrt(),
            epsilon = DEFAULT_TOLERANCE_F64
        );
    }
}
