use ndarray::{Array3, ArrayView3};

/// A sampled frame after resize, channel reordering and scaling to `[0, 1]`.
///
/// Shape is `(height, width, channels)`.
#[derive(Clone, Debug, PartialEq)]
pub struct PreprocessedFrame {
    pixels: Array3<f32>,
    index: usize,
}

impl PreprocessedFrame {
    pub fn new(pixels: Array3<f32>, index: usize) -> Self {
        Self { pixels, index }
    }

    pub fn pixels(&self) -> ArrayView3<'_, f32> {
        self.pixels.view()
    }

    /// Decode index of the source frame.
    pub fn index(&self) -> usize {
        self.index
    }

    /// `(height, width, channels)`
    pub fn shape(&self) -> (usize, usize, usize) {
        self.pixels.dim()
    }

    pub fn into_pixels(self) -> Array3<f32> {
        self.pixels
    }
}
