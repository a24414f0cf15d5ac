//! Borrowed views over the score buffers handed to metrics.
//!
//! Scores are stored output-major: `[n_outputs, n_instances]`. This matches the
//! prediction layout produced by the training loop, so evaluation never copies.
//! Labels are plain `&[f32]` slices aligned with the instance axis.

mod scores;

pub use scores::ScoresView;
