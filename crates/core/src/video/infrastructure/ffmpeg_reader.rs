use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::VideoReader;

type DecodeResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Decodes video frames via ffmpeg-next (libavformat + libavcodec).
///
/// Every packet is decoded, since inter-frame codecs need the full chain,
/// but only frames selected by the stride are converted to RGB24.
pub struct FfmpegReader {
    input_ctx: Option<ffmpeg_next::format::context::Input>,
    video_stream_index: usize,
}

// Safety: FfmpegReader is only used from a single thread at a time.
// The raw pointers inside ffmpeg types are not shared across threads.
unsafe impl Send for FfmpegReader {}

impl FfmpegReader {
    pub fn new() -> Self {
        Self {
            input_ctx: None,
            video_stream_index: 0,
        }
    }

    fn start_decoding(&mut self, stride: usize) -> DecodeResult<FfmpegFrameIter<'_>> {
        let ictx = self.input_ctx.as_mut().ok_or("FfmpegReader: not opened")?;

        let stream = ictx
            .stream(self.video_stream_index)
            .ok_or("FfmpegReader: video stream disappeared")?;
        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = codec_ctx.decoder().video()?;

        let width = decoder.width();
        let height = decoder.height();

        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGB24,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )?;

        Ok(FfmpegFrameIter {
            ictx,
            decoder,
            scaler,
            width,
            height,
            video_stream_index: self.video_stream_index,
            stride: stride.max(1),
            decode_index: 0,
            flushing: false,
            done: false,
        })
    }
}

impl Default for FfmpegReader {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoReader for FfmpegReader {
    fn open(&mut self, path: &Path) -> DecodeResult<VideoMetadata> {
        ffmpeg_next::init()?;

        let ictx = ffmpeg_next::format::input(path)?;

        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or("No video stream found")?;

        let video_stream_index = stream.index();
        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = codec_ctx.decoder().video()?;

        let rate = stream.rate();
        let fps = if rate.denominator() != 0 {
            rate.numerator() as f64 / rate.denominator() as f64
        } else {
            0.0
        };

        let metadata = VideoMetadata {
            width: decoder.width(),
            height: decoder.height(),
            fps,
            total_frames: stream.frames().max(0) as usize,
            codec: decoder
                .codec()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            source_path: Some(path.to_path_buf()),
        };

        self.video_stream_index = video_stream_index;
        self.input_ctx = Some(ictx);

        Ok(metadata)
    }

    fn frames(
        &mut self,
        stride: usize,
    ) -> Box<dyn Iterator<Item = DecodeResult<Frame>> + '_> {
        match self.start_decoding(stride) {
            Ok(iter) => Box::new(iter),
            Err(e) => Box::new(std::iter::once(Err(e))),
        }
    }

    fn close(&mut self) {
        self.input_ctx = None;
    }
}

/// Lazy iterator that decodes one frame at a time, so a capped extraction
/// stops reading the container as soon as enough frames are sampled.
struct FfmpegFrameIter<'a> {
    ictx: &'a mut ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    width: u32,
    height: u32,
    video_stream_index: usize,
    stride: usize,
    decode_index: usize,
    flushing: bool,
    done: bool,
}

impl FfmpegFrameIter<'_> {
    /// Drains decoded frames until one lands on the stride, or the decoder
    /// needs more input (`Ok(None)`).
    fn try_receive(&mut self) -> DecodeResult<Option<Frame>> {
        let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
        while frame_received(self.decoder.receive_frame(&mut decoded))? {
            let index = self.decode_index;
            self.decode_index += 1;
            if index % self.stride != 0 {
                continue;
            }

            let mut rgb_frame = ffmpeg_next::util::frame::video::Video::empty();
            self.scaler.run(&decoded, &mut rgb_frame)?;
            let pixels = extract_rgb_pixels(&rgb_frame, self.width, self.height);
            return Ok(Some(Frame::new(pixels, self.width, self.height, index)));
        }
        Ok(None)
    }

    fn fail(&mut self, e: Box<dyn std::error::Error>) -> Option<DecodeResult<Frame>> {
        self.done = true;
        Some(Err(e))
    }
}

impl Iterator for FfmpegFrameIter<'_> {
    type Item = DecodeResult<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.try_receive() {
            Ok(Some(frame)) => return Some(Ok(frame)),
            Ok(None) => {}
            Err(e) => return self.fail(e),
        }

        if self.flushing {
            self.done = true;
            return None;
        }

        loop {
            let Some((stream, packet)) = self.ictx.packets().next() else {
                // End of container: flush the frames still buffered in the decoder
                if let Err(e) = self.decoder.send_eof() {
                    return self.fail(Box::new(e));
                }
                self.flushing = true;
                return match self.try_receive() {
                    Ok(Some(frame)) => Some(Ok(frame)),
                    Ok(None) => {
                        self.done = true;
                        None
                    }
                    Err(e) => self.fail(e),
                };
            };

            if stream.index() != self.video_stream_index {
                continue;
            }

            if let Err(e) = self.decoder.send_packet(&packet) {
                return self.fail(Box::new(e));
            }

            match self.try_receive() {
                Ok(Some(frame)) => return Some(Ok(frame)),
                Ok(None) => {}
                Err(e) => return self.fail(e),
            }
        }
    }
}

/// Interprets a `receive_frame` result: `true` when a frame was produced,
/// `false` when the decoder wants more input or is drained. Anything else is
/// a decode failure.
fn frame_received(result: Result<(), ffmpeg_next::Error>) -> DecodeResult<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(ffmpeg_next::Error::Other { errno }) if errno == ffmpeg_next::error::EAGAIN => {
            Ok(false)
        }
        Err(ffmpeg_next::Error::Eof) => Ok(false),
        Err(e) => Err(Box::new(e)),
    }
}

/// Copies pixel data from an ffmpeg frame into a contiguous RGB buffer.
///
/// ffmpeg rows may be padded (stride > width * 3); the padding is dropped.
fn extract_rgb_pixels(
    rgb_frame: &ffmpeg_next::util::frame::video::Video,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let stride = rgb_frame.stride(0);
    let data = rgb_frame.data(0);
    let row_bytes = width as usize * 3;

    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let row_start = row * stride;
        pixels.extend_from_slice(&data[row_start..row_start + row_bytes]);
    }
    pixels
}
