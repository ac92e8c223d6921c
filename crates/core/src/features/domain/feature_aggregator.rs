use ndarray::Array3;

use crate::features::domain::feature_error::FeatureError;
use crate::features::domain::feature_tensor::FeatureTensor;
use crate::features::domain::preprocessed_frame::PreprocessedFrame;

/// Reduces the sampled frames of one video to a single feature tensor.
///
/// A single frame is passed through unchanged; several frames are averaged
/// element-wise. Temporal order is discarded on purpose: only the mean
/// appearance reaches the classifier.
///
/// Sums are accumulated in `f64`. Every input value is an `f32` in `[0, 1]`,
/// so the running sum is exact and the mean does not depend on frame order.
pub fn extract_features(frames: &[PreprocessedFrame]) -> Result<FeatureTensor, FeatureError> {
    let Some(first) = frames.first() else {
        return Err(FeatureError::NoFrames);
    };

    if frames.len() == 1 {
        return Ok(FeatureTensor::from_frame(first.pixels().to_owned()));
    }

    let shape = first.shape();
    let mut sum = Array3::<f64>::zeros(shape);
    for frame in frames {
        debug_assert_eq!(frame.shape(), shape, "sampled frames must share one shape");
        sum.zip_mut_with(&frame.pixels(), |acc, &v| *acc += v as f64);
    }

    let count = frames.len() as f64;
    let mean = sum.mapv(|total| (total / count) as f32);
    Ok(FeatureTensor::from_frame(mean))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn frame_of(values: [u8; 3], index: usize) -> PreprocessedFrame {
        let pixels = Array3::from_shape_fn((4, 5, 3), |(y, x, c)| {
            // vary by position so the average is checked element-wise
            let v = values[c] as usize + y + x;
            (v.min(255) as f32) / 255.0
        });
        PreprocessedFrame::new(pixels, index)
    }

    #[test]
    fn test_empty_input_is_no_frames() {
        let result = extract_features(&[]);
        assert!(matches!(result, Err(FeatureError::NoFrames)));
    }

    #[test]
    fn test_single_frame_passes_through_with_batch_axis() {
        let frame = frame_of([10, 20, 30], 0);
        let tensor = extract_features(std::slice::from_ref(&frame)).unwrap();
        assert_eq!(tensor.shape(), (1, 4, 5, 3));
        assert_eq!(tensor.frame(), frame.pixels());
    }

    #[test]
    fn test_identical_frames_return_that_frame() {
        let frame = frame_of([77, 1, 254], 0);
        let frames = vec![frame.clone(); 7];
        let tensor = extract_features(&frames).unwrap();
        assert_eq!(tensor.frame(), frame.pixels());
    }

    #[test]
    fn test_mean_of_two_frames() {
        let dark = PreprocessedFrame::new(Array3::zeros((2, 2, 3)), 0);
        let bright = PreprocessedFrame::new(Array3::ones((2, 2, 3)), 10);
        let tensor = extract_features(&[dark, bright]).unwrap();
        for v in tensor.view().iter() {
            assert_abs_diff_eq!(*v, 0.5);
        }
    }

    #[test]
    fn test_mean_is_order_insensitive() {
        let frames: Vec<PreprocessedFrame> = (0..12)
            .map(|i| frame_of([(i * 19) as u8, (i * 7) as u8, (250 - i * 13) as u8], i * 10))
            .collect();
        let forward = extract_features(&frames).unwrap();

        let mut reversed = frames.clone();
        reversed.reverse();
        let mut interleaved = frames.clone();
        interleaved.sort_by_key(|f| (f.index() % 3, f.index()));

        assert_eq!(extract_features(&reversed).unwrap(), forward);
        assert_eq!(extract_features(&interleaved).unwrap(), forward);
    }

    #[test]
    fn test_mean_stays_in_unit_range() {
        let frames: Vec<PreprocessedFrame> =
            (0..5).map(|i| frame_of([255, 0, (i * 50) as u8], i)).collect();
        let tensor = extract_features(&frames).unwrap();
        assert!(tensor.view().iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
