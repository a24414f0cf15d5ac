use ndarray::{ArrayView1, ArrayView2, Axis};

use crate::error::MetricError;

/// Read-only view into a batch of model scores.
///
/// Internal storage is output-major: `[n_outputs, n_instances]`.
/// - `output(k)` returns output `k` for every instance
/// - `instance(i)` returns the `n_outputs` scores of instance `i`
///
/// The view borrows the caller's buffer for the duration of one accumulate
/// call and is never retained by a metric.
#[derive(Clone, Copy)]
pub struct ScoresView<'a> {
    /// Shape: [n_outputs, n_instances]
    data: ArrayView2<'a, f32>,
}

impl<'a> ScoresView<'a> {
    /// Create a view from an output-major array.
    ///
    /// # Arguments
    ///
    /// * `data` - Array with shape `[n_outputs, n_instances]`
    pub fn from_array(data: ArrayView2<'a, f32>) -> Self {
        Self { data }
    }

    /// Create a view from an instance-major array (`[n_instances, n_outputs]`).
    ///
    /// The axes are swapped in the view itself; no data is copied.
    pub fn from_instance_major(data: ArrayView2<'a, f32>) -> Self {
        Self {
            data: data.reversed_axes(),
        }
    }

    /// Create from a contiguous slice in output-major order.
    ///
    /// Data layout: `[o0_i0, o0_i1, ..., o1_i0, o1_i1, ...]`
    ///
    /// # Returns
    ///
    /// `None` if the slice length doesn't match `n_instances * n_outputs`.
    pub fn from_slice(data: &'a [f32], n_instances: usize, n_outputs: usize) -> Option<Self> {
        ArrayView2::from_shape((n_outputs, n_instances), data)
            .ok()
            .map(|data| Self { data })
    }

    /// Number of outputs per instance (first dimension).
    #[inline]
    pub fn n_outputs(&self) -> usize {
        self.data.nrows()
    }

    /// Number of instances (second dimension).
    #[inline]
    pub fn n_instances(&self) -> usize {
        self.data.ncols()
    }

    /// Score of `output` for `instance`.
    #[inline]
    pub fn get(&self, instance: usize, output: usize) -> f32 {
        self.data[[output, instance]]
    }

    /// All scores of one instance. Strided for multi-output buffers.
    #[inline]
    pub fn instance(&self, instance: usize) -> ArrayView1<'a, f32> {
        self.data.index_axis_move(Axis(1), instance)
    }

    /// One output across every instance.
    #[inline]
    pub fn output(&self, output: usize) -> ArrayView1<'a, f32> {
        self.data.index_axis_move(Axis(0), output)
    }

    /// Get the underlying array view.
    ///
    /// Shape is `[n_outputs, n_instances]`.
    pub fn view(&self) -> ArrayView2<'a, f32> {
        self.data
    }

    /// Fail unless there is a label for every instance.
    pub(crate) fn check_labels(
        &self,
        metric: &'static str,
        labels: &[f32],
    ) -> Result<(), MetricError> {
        if labels.len() < self.n_instances() {
            return Err(MetricError::LabelLengthMismatch {
                metric,
                n_instances: self.n_instances(),
                n_labels: labels.len(),
            });
        }
        Ok(())
    }

    /// Fail unless the buffer carries exactly `expected` outputs per instance.
    pub(crate) fn check_outputs(
        &self,
        metric: &'static str,
        expected: usize,
    ) -> Result<(), MetricError> {
        if self.n_outputs() != expected {
            return Err(MetricError::OutputShape {
                metric,
                expected,
                got: self.n_outputs(),
            });
        }
        Ok(())
    }
}

impl<'a> From<ArrayView2<'a, f32>> for ScoresView<'a> {
    fn from(data: ArrayView2<'a, f32>) -> Self {
        Self::from_array(data)
    }
}

impl std::fmt::Debug for ScoresView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoresView")
            .field("n_outputs", &self.n_outputs())
            .field("n_instances", &self.n_instances())
            .finish()
    }
}
