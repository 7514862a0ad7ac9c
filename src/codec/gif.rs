use std::io::Cursor;

use image::AnimationDecoder as _;
use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};

use crate::codec::{AnimationSink, SinkConfig, SourceDecoder};
use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{GridError, GridResult};
use crate::render::compositor::CompositeFrame;
use crate::source::model::{Frame, Source};

/// Delay assumed for frames whose container reports none.
const FALLBACK_DELAY_MS: u32 = 100;

/// GIF decoder adapter over the `image` crate.
///
/// Frames come back composited to the full logical screen (the decoder
/// resolves GIF disposal), premultiplied, with delays floored by the
/// [`Frame`] constructor.
#[derive(Clone, Copy, Debug, Default)]
pub struct GifSourceDecoder;

impl SourceDecoder for GifSourceDecoder {
    fn decode(&self, name: &str, bytes: &[u8]) -> GridResult<Source> {
        let decoder = GifDecoder::new(Cursor::new(bytes))
            .map_err(|e| GridError::decode(format!("{name}: {e}")))?;
        let frames = decoder
            .into_frames()
            .collect_frames()
            .map_err(|e| GridError::decode(format!("{name}: {e}")))?;
        if frames.is_empty() {
            return Err(GridError::decode(format!("{name}: no decodable frames")));
        }

        let mut width = 0u32;
        let mut height = 0u32;
        let mut decoded = Vec::with_capacity(frames.len());
        for (i, frame) in frames.into_iter().enumerate() {
            let (numer, denom) = frame.delay().numer_denom_ms();
            let delay_ms = if numer == 0 || denom == 0 {
                FALLBACK_DELAY_MS
            } else {
                (f64::from(numer) / f64::from(denom)).round() as u32
            };

            let buffer = frame.into_buffer();
            if i == 0 {
                width = buffer.width();
                height = buffer.height();
            }
            let pixels = PixelBuffer::from_straight_rgba8(width, height, buffer.into_raw())?;
            decoded.push(Frame::new(pixels, delay_ms));
        }

        let source = Source::new(name, width, height, decoded)?;
        tracing::debug!(
            name,
            width,
            height,
            frames = source.frames().len(),
            duration_ms = source.duration_ms(),
            "decoded source"
        );
        Ok(source)
    }
}

/// GIF encoder adapter over the `image` crate.
///
/// The underlying encoder handles per-pixel alpha, so this sink reports
/// native alpha support and the chroma-key path stays a fallback for other
/// containers. Output loops forever, matching the sources it was built from.
#[derive(Default)]
pub struct GifSink {
    cfg: Option<SinkConfig>,
    frames: Vec<image::Frame>,
}

impl GifSink {
    /// Idle sink, ready for [`AnimationSink::begin`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnimationSink for GifSink {
    fn supports_alpha(&self) -> bool {
        true
    }

    fn begin(&mut self, cfg: SinkConfig) -> GridResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(GridError::encode("gif sink width/height must be non-zero"));
        }
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, frame: &CompositeFrame) -> GridResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| GridError::encode("gif sink received a frame before begin"))?;
        if frame.pixels.width() != cfg.width || frame.pixels.height() != cfg.height {
            return Err(GridError::encode(format!(
                "composite {}x{} does not match sink canvas {}x{}",
                frame.pixels.width(),
                frame.pixels.height(),
                cfg.width,
                cfg.height
            )));
        }

        let rgba = image::RgbaImage::from_raw(cfg.width, cfg.height, frame.pixels.to_straight_rgba8())
            .ok_or_else(|| GridError::encode("composite buffer has unexpected length"))?;
        let delay = image::Delay::from_numer_denom_ms(frame.delay_ms, 1);
        self.frames.push(image::Frame::from_parts(rgba, 0, 0, delay));
        Ok(())
    }

    fn finish(&mut self) -> GridResult<Vec<u8>> {
        self.cfg
            .take()
            .ok_or_else(|| GridError::encode("gif sink finished before begin"))?;

        let mut out = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut out, 10);
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| GridError::encode(e.to_string()))?;
            encoder
                .encode_frames(self.frames.drain(..))
                .map_err(|e| GridError::encode(e.to_string()))?;
        }
        Ok(out)
    }
}
