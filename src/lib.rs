//! Gifgrid composites independently looping animations into one synchronized grid.
//!
//! Each input [`Source`] keeps its own frame count, per-frame delays, and pixel
//! dimensions; gifgrid resolves all of them against a single output clock and
//! paints every tick into one merged raster.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: a [`SourceDecoder`] turns container bytes into a [`Source`]
//!    (frames + cumulative timeline).
//! 2. **Layout**: [`compute_layout`] maps the source set and [`LayoutSettings`]
//!    to grid geometry ([`LayoutMetrics`]), including uniform downscaling into a
//!    caller-fixed canvas.
//! 3. **Composite**: [`composite`] steps a synthetic clock at the output frame
//!    delay, resolves each source's active frame via [`resolve_active_frame`],
//!    paints the grid, and run-length collapses bit-identical successors into
//!    [`CompositeFrame`] delays.
//! 4. **Encode**: an [`AnimationSink`] (for example [`GifSink`]) turns the
//!    composite list into an encoded byte blob.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: layout, timing, and compositing are pure and
//!   stable for a given input; preview and export share the same draw path.
//! - **Single-threaded cooperative core**: long runs poll a [`CancelToken`]
//!   once per output tick; cancellation is a distinct outcome, not a failure.
//! - **Premultiplied RGBA8** end-to-end: frames are premultiplied at decode.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod codec;
mod config;
mod foundation;
mod interact;
mod layout;
mod render;
mod source;
mod timing;

pub use codec::gif::{GifSink, GifSourceDecoder};
pub use codec::{AnimationSink, SinkConfig, SourceDecoder, Transparency};
pub use config::presets::PresetBook;
pub use foundation::core::{
    CHROMA_KEY, MIN_FRAME_DELAY_MS, MIN_TICK_MS, PixelBuffer, Point, Rect, Rgba8, Vec2,
};
pub use foundation::error::{ConfigWarning, GridError, GridResult};
pub use interact::drag::{
    DRAG_MOVE_THRESHOLD_PX, DragOutcome, DragSession, ItemRect, apply_drag_outcome, hit_test,
};
pub use layout::grid::{
    LayoutMetrics, LayoutSettings, MAX_COLUMNS, compute_layout, item_base_position,
    resolution_warnings,
};
pub use render::blit::{BackgroundMode, draw_frame, paint_background};
pub use render::cancel::CancelToken;
pub use render::compositor::{CompositeFrame, composite, output_frame_delay_ms};
pub use render::pipeline::{ExportReport, export_animation};
pub use render::preview::{PreviewLoop, PreviewRuntime};
pub use source::model::{Frame, Source, move_source};
pub use source::timeline::resolve_active_frame;
pub use timing::fps::{DEFAULT_FPS, choose_fps};
