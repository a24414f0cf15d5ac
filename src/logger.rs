//! Verbosity-gated logging for evaluation loops.
//!
//! Messages go through the [`log`] facade under the `streameval` target; the
//! embedding application picks the backend.

use serde::{Deserialize, Serialize};

use crate::metrics::{MetricFn, MetricSet, MetricValue};

pub(crate) const LOG_TARGET: &str = "streameval";

/// Verbosity level for evaluation output.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// Warnings only.
    Warning,
    /// Per-round metric lines.
    Info,
    /// Everything, including registry decisions.
    Debug,
}

/// Logger that forwards to [`log`] when its verbosity allows.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalLogger {
    verbosity: Verbosity,
}

impl EvalLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Whether messages at `level` pass this logger's verbosity.
    pub fn enabled(&self, level: Verbosity) -> bool {
        level != Verbosity::Silent && self.verbosity >= level
    }

    pub fn warn(&self, msg: &str) {
        if self.enabled(Verbosity::Warning) {
            log::warn!(target: LOG_TARGET, "{msg}");
        }
    }

    pub fn info(&self, msg: &str) {
        if self.enabled(Verbosity::Info) {
            log::info!(target: LOG_TARGET, "{msg}");
        }
    }

    pub fn debug(&self, msg: &str) {
        if self.enabled(Verbosity::Debug) {
            log::debug!(target: LOG_TARGET, "{msg}");
        }
    }

    /// Log one round of metric values at info level.
    pub fn log_round(&self, round: usize, values: &[MetricValue]) {
        if self.enabled(Verbosity::Info) {
            log::info!(target: LOG_TARGET, "{}", format_round(round, values));
        }
    }

    /// Log a metric set's report line for `label` at info level.
    ///
    /// Warns instead when the set has not accumulated anything, since the
    /// values would be non-finite.
    pub fn log_report(&self, round: usize, set: &MetricSet, label: &str) {
        if set.iter().any(|m| m.n_instances() == 0) {
            self.warn(&format!("[{round}] {label}: metrics queried before any evaluation"));
            return;
        }
        if self.enabled(Verbosity::Info) {
            log::info!(target: LOG_TARGET, "[{round}]{}", set.format_report(label));
        }
    }
}

/// `"[round]\tname:value\tname:value"`
pub fn format_round(round: usize, values: &[MetricValue]) -> String {
    let mut line = format!("[{round}]");
    for value in values {
        line.push_str(&format!("\t{}:{:.6}", value.name, value.value));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{capture_logs, logged, make_scores};
    use log::Level;
    use rstest::rstest;

    #[rstest]
    #[case(Verbosity::Silent, Verbosity::Warning, false)]
    #[case(Verbosity::Warning, Verbosity::Warning, true)]
    #[case(Verbosity::Warning, Verbosity::Info, false)]
    #[case(Verbosity::Info, Verbosity::Warning, true)]
    #[case(Verbosity::Debug, Verbosity::Debug, true)]
    #[case(Verbosity::Debug, Verbosity::Silent, false)]
    fn gating(#[case] configured: Verbosity, #[case] level: Verbosity, #[case] expected: bool) {
        assert_eq!(EvalLogger::new(configured).enabled(level), expected);
    }

    #[test]
    fn round_line() {
        let values = [
            MetricValue::new("train-rmse", 0.5, false),
            MetricValue::new("valid-rmse", 0.25, false),
        ];
        assert_eq!(
            format_round(3, &values),
            "[3]\ttrain-rmse:0.500000\tvalid-rmse:0.250000"
        );
        assert_eq!(format_round(0, &[]), "[0]");
    }

    #[test]
    fn report_on_empty_set_warns() {
        capture_logs();
        let mut set = MetricSet::new();
        set.add_metric("rmse").unwrap();
        assert!(!set.get("rmse").unwrap().get().is_finite());

        EvalLogger::new(Verbosity::Debug).log_report(411, &set, "fresh");
        assert!(logged(Level::Warn, "[411] fresh: metrics queried before any evaluation"));
        assert!(!logged(Level::Info, "[411]\tfresh-rmse"));
    }

    #[test]
    fn log_round_emits_at_info() {
        capture_logs();
        let values = [MetricValue::new("round-check-rmse", 0.125, false)];

        EvalLogger::new(Verbosity::Info).log_round(902, &values);
        assert!(logged(Level::Info, "[902]\tround-check-rmse:0.125000"));

        EvalLogger::new(Verbosity::Warning).log_round(903, &values);
        assert!(!logged(Level::Info, "[903]"));
    }

    #[test]
    fn log_report_emits_set_line() {
        capture_logs();
        let mut set = MetricSet::new();
        set.add_metric("rmse").unwrap();
        let scores = make_scores(1, 2, &[1.0, 0.0]);
        set.add_eval(scores.view().into(), &[1.0, 1.0]).unwrap();

        EvalLogger::new(Verbosity::Info).log_report(517, &set, "holdout");
        assert!(logged(Level::Info, "[517]\tholdout-rmse:0.707107"));
    }

    #[test]
    fn messages_respect_verbosity() {
        capture_logs();
        let logger = EvalLogger::new(Verbosity::Info);
        logger.info("info passes 33d1");
        logger.warn("warn passes 33d1");
        logger.debug("debug dropped 33d1");

        assert!(logged(Level::Info, "info passes 33d1"));
        assert!(logged(Level::Warn, "warn passes 33d1"));
        assert!(!logged(Level::Debug, "debug dropped 33d1"));

        EvalLogger::new(Verbosity::Silent).warn("silent dropped 33d1");
        assert!(!logged(Level::Warn, "silent dropped 33d1"));
    }

    #[test]
    fn default_is_silent() {
        assert_eq!(EvalLogger::default().verbosity(), Verbosity::Silent);
        assert!(Verbosity::Debug > Verbosity::Info);
    }
}
