use crate::foundation::core::{MIN_FRAME_DELAY_MS, PixelBuffer};
use crate::foundation::error::{GridError, GridResult};

/// One decoded still belonging to a [`Source`]. Immutable once decoded.
#[derive(Clone, Debug)]
pub struct Frame {
    pixels: PixelBuffer,
    delay_ms: u32,
}

impl Frame {
    /// Wrap a decoded raster and its display delay.
    ///
    /// Delays below [`MIN_FRAME_DELAY_MS`] are floored to it.
    pub fn new(pixels: PixelBuffer, delay_ms: u32) -> Self {
        Self {
            pixels,
            delay_ms: delay_ms.max(MIN_FRAME_DELAY_MS),
        }
    }

    /// Pixel raster at the source's native resolution.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Display delay in milliseconds, `>= MIN_FRAME_DELAY_MS`.
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}

/// One decoded animation: an ordered frame sequence plus its derived
/// cumulative timeline.
///
/// The timeline holds per-frame cumulative end-times:
/// `timeline[i] = delay[0] + .. + delay[i]`. It is strictly increasing and
/// ends at [`Source::duration_ms`].
#[derive(Clone, Debug)]
pub struct Source {
    name: String,
    width: u32,
    height: u32,
    frames: Vec<Frame>,
    timeline: Vec<u32>,
    duration_ms: u32,
    offset: (i32, i32),
}

impl Source {
    /// Build a source from decoded frames, deriving the cumulative timeline.
    ///
    /// Fails with [`GridError::Decode`] when `frames` is empty and with
    /// [`GridError::Validation`] when any frame raster does not match the
    /// declared dimensions. Frames are never resized after decode.
    pub fn new(
        name: impl Into<String>,
        width: u32,
        height: u32,
        frames: Vec<Frame>,
    ) -> GridResult<Self> {
        let name = name.into();
        if frames.is_empty() {
            return Err(GridError::decode(format!("{name}: no decodable frames")));
        }

        let mut timeline = Vec::with_capacity(frames.len());
        let mut total: u32 = 0;
        for frame in &frames {
            if frame.pixels().width() != width || frame.pixels().height() != height {
                return Err(GridError::validation(format!(
                    "{name}: frame raster {}x{} does not match source {width}x{height}",
                    frame.pixels().width(),
                    frame.pixels().height()
                )));
            }
            total = total
                .checked_add(frame.delay_ms())
                .ok_or_else(|| GridError::validation(format!("{name}: loop duration overflow")))?;
            timeline.push(total);
        }

        Ok(Self {
            name,
            width,
            height,
            frames,
            timeline,
            duration_ms: total,
            offset: (0, 0),
        })
    }

    /// Stable display name (usually the input file name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Native width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Native height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Ordered decoded frames.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame at `index`. Panics when out of bounds, like slice indexing.
    pub fn frame(&self, index: usize) -> &Frame {
        &self.frames[index]
    }

    /// Cumulative end-times, one entry per frame.
    pub fn timeline(&self) -> &[u32] {
        &self.timeline
    }

    /// Total loop duration in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// User-adjusted pixel offset applied at composite time (output-canvas
    /// pixel units, independent of draw scale).
    pub fn offset(&self) -> (i32, i32) {
        self.offset
    }

    /// Set the user pixel offset.
    pub fn set_offset(&mut self, x: i32, y: i32) {
        self.offset = (x, y);
    }

    /// Reset the user pixel offset to zero.
    pub fn reset_offset(&mut self) {
        self.offset = (0, 0);
    }
}

/// Move `sources[from]` to position `to`, shifting the rest.
///
/// Out-of-range or no-op moves are ignored. `reset_offset` zeroes the moved
/// source's pixel offset, which is what a list-reorder drag wants; a plain
/// position drag keeps offsets.
pub fn move_source(sources: &mut Vec<Source>, from: usize, to: usize, reset_offset: bool) {
    if from == to || from >= sources.len() || to >= sources.len() {
        return;
    }
    let mut moved = sources.remove(from);
    if reset_offset {
        moved.reset_offset();
    }
    sources.insert(to, moved);
}
