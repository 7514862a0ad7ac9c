//! Collaborator seams for container decode/encode.
//!
//! The core never parses or emits an animated-image binary format itself; it
//! talks to a [`SourceDecoder`] on the way in and an [`AnimationSink`] on the
//! way out. Default GIF adapters over the `image` crate live in [`gif`].

pub mod gif;

use crate::foundation::core::Rgba8;
use crate::foundation::error::GridResult;
use crate::render::compositor::CompositeFrame;
use crate::source::model::Source;

/// How transparent output is realized by a sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transparency {
    /// No transparency; the composite carries an opaque background.
    Opaque,
    /// The container has a native alpha channel; composites carry true
    /// per-pixel alpha.
    AlphaNative,
    /// The container has no alpha channel; the designated chroma-key color
    /// marks transparent regions.
    ChromaKey(Rgba8),
}

/// Canvas-level parameters handed to a sink before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output canvas width in pixels.
    pub width: u32,
    /// Output canvas height in pixels.
    pub height: u32,
    /// Transparency handling for this run.
    pub transparency: Transparency,
}

/// Decoder collaborator: container bytes in, [`Source`] out.
///
/// Implementations must floor per-frame delays to
/// [`crate::MIN_FRAME_DELAY_MS`] (the [`crate::Frame`] constructor does this)
/// and fail with [`crate::GridError::Decode`] when the buffer contains zero
/// decodable frames.
pub trait SourceDecoder {
    /// Decode one animation. `name` is carried into the source for display
    /// and error messages.
    fn decode(&self, name: &str, bytes: &[u8]) -> GridResult<Source>;
}

/// Encoder collaborator consuming an ordered composite sequence.
///
/// Frames are streamed: `begin`, then one `push_frame` per composite in
/// order, then `finish` for the encoded blob. Errors from any step are
/// ordinary [`crate::GridError::Encode`] failures; cancellation is decided
/// by the caller between pushes, never by the sink.
pub trait AnimationSink {
    /// Whether the target container carries a native alpha channel. Sinks
    /// without one get the chroma-key fallback when transparency is
    /// requested.
    fn supports_alpha(&self) -> bool {
        false
    }

    /// Start a run. Called exactly once, before any frame.
    fn begin(&mut self, cfg: SinkConfig) -> GridResult<()>;

    /// Append one composite frame with its accumulated delay.
    fn push_frame(&mut self, frame: &CompositeFrame) -> GridResult<()>;

    /// Finish the run and return the encoded container bytes.
    fn finish(&mut self) -> GridResult<Vec<u8>>;
}
