//! Testing utilities shared by unit and integration tests.

use std::sync::Mutex;

use ndarray::Array2;

/// Default tolerance for floating point comparisons of metric values.
pub const DEFAULT_TOLERANCE_F64: f64 = 1e-9;

/// Build an output-major score buffer (`[n_outputs, n_instances]`).
///
/// # Panics
///
/// Panics if `data.len() != n_outputs * n_instances`.
pub fn make_scores(n_outputs: usize, n_instances: usize, data: &[f32]) -> Array2<f32> {
    Array2::from_shape_vec((n_outputs, n_instances), data.to_vec())
        .expect("data length must equal n_outputs * n_instances")
}

/// Assert that a metric value is NaN or infinite.
#[track_caller]
pub fn assert_non_finite(value: f64, context: &str) {
    assert!(!value.is_finite(), "{context}: expected non-finite value, got {value}");
}

// =============================================================================
// Log Capture
// =============================================================================

static CAPTURED: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.target() == "streameval"
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            if let Ok(mut captured) = CAPTURED.lock() {
                captured.push((record.level(), record.args().to_string()));
            }
        }
    }

    fn flush(&self) {}
}

static CAPTURE_LOGGER: CaptureLogger = CaptureLogger;

/// Route `streameval` log records into an in-memory buffer.
///
/// Idempotent. Tests run in parallel and share the buffer, so assertions
/// should look for messages unique to the test.
pub fn capture_logs() {
    let _ = log::set_logger(&CAPTURE_LOGGER);
    log::set_max_level(log::LevelFilter::Trace);
}

/// Whether a captured record at `level` contains `needle`.
pub fn logged(level: log::Level, needle: &str) -> bool {
    CAPTURED
        .lock()
        .map(|captured| {
            captured
                .iter()
                .any(|(lvl, msg)| *lvl == level && msg.contains(needle))
        })
        .unwrap_or(false)
}
