use image::imageops::{self, FilterType};
use ndarray::Array3;

use crate::features::domain::extraction_settings::ChannelOrder;
use crate::features::domain::preprocessed_frame::PreprocessedFrame;
use crate::shared::frame::{Frame, FRAME_CHANNELS};

/// Turns decoded frames into classifier-ready arrays.
///
/// Resizes straight to the target size (aspect ratio is not preserved, so
/// non-matching sources are stretched), reorders channels, and maps
/// `0..=255` linearly onto `0.0..=1.0`.
#[derive(Debug, Clone, Copy)]
pub struct FramePreprocessor {
    target_width: u32,
    target_height: u32,
    channel_order: ChannelOrder,
}

impl FramePreprocessor {
    pub fn new(target_width: u32, target_height: u32, channel_order: ChannelOrder) -> Self {
        Self {
            target_width,
            target_height,
            channel_order,
        }
    }

    pub fn target_size(&self) -> (u32, u32) {
        (self.target_width, self.target_height)
    }

    pub fn preprocess(&self, frame: &Frame) -> PreprocessedFrame {
        let image = frame.to_rgb_image();
        let resized = if image.dimensions() == (self.target_width, self.target_height) {
            image
        } else {
            imageops::resize(
                &image,
                self.target_width,
                self.target_height,
                FilterType::Triangle,
            )
        };

        let channel_map: [usize; FRAME_CHANNELS] = match self.channel_order {
            ChannelOrder::Rgb => [0, 1, 2],
            ChannelOrder::Bgr => [2, 1, 0],
        };

        let shape = (
            self.target_height as usize,
            self.target_width as usize,
            FRAME_CHANNELS,
        );
        let pixels = Array3::from_shape_fn(shape, |(y, x, c)| {
            let px = resized.get_pixel(x as u32, y as u32);
            px.0[channel_map[c]] as f32 / 255.0
        });

        PreprocessedFrame::new(pixels, frame.index())
    }
}
