use ndarray::{Array3, Array4, ArrayView3, ArrayView4, Axis};

/// The single input handed to the classifier: one frame-shaped array with a
/// leading batch dimension of 1.
///
/// Shape is always `(1, height, width, channels)`. The only constructor takes
/// a rank-3 array, so callers never have to guess whether the batch axis is
/// already present.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureTensor {
    data: Array4<f32>,
}

impl FeatureTensor {
    pub fn from_frame(frame: Array3<f32>) -> Self {
        Self {
            data: frame.insert_axis(Axis(0)),
        }
    }

    pub fn view(&self) -> ArrayView4<'_, f32> {
        self.data.view()
    }

    /// The wrapped frame without the batch axis.
    pub fn frame(&self) -> ArrayView3<'_, f32> {
        self.data.index_axis(Axis(0), 0)
    }

    /// `(batch, height, width, channels)`; batch is always 1.
    pub fn shape(&self) -> (usize, usize, usize, usize) {
        self.data.dim()
    }

    pub fn into_array(self) -> Array4<f32> {
        self.data
    }
}
