use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{GridError, GridResult};
use crate::interact::drag::ItemRect;
use crate::layout::grid::{LayoutMetrics, LayoutSettings, compute_layout, item_base_position};
use crate::render::blit::{BackgroundMode, draw_frame, paint_background};
use crate::render::cancel::CancelToken;
use crate::render::compositor::output_frame_delay_ms;
use crate::source::model::Source;
use crate::source::timeline::resolve_active_frame;

/// Snapshot of one running preview: settings and layout captured at
/// (re)start, plus the draw rectangles of the most recent tick.
///
/// The runtime is clock-agnostic (the caller feeds it wall-clock elapsed
/// milliseconds), so [`PreviewRuntime::draw_tick`] is the exact same draw
/// path the export compositor steps with its synthetic clock, which is what
/// guarantees preview/export visual parity.
#[derive(Clone, Debug)]
pub struct PreviewRuntime {
    settings: LayoutSettings,
    metrics: LayoutMetrics,
    frame_delay_ms: u32,
    item_rects: Vec<ItemRect>,
}

impl PreviewRuntime {
    /// Capture settings and layout for a new preview run.
    pub fn start(sources: &[Source], settings: &LayoutSettings) -> GridResult<Self> {
        let (settings, _) = settings.sanitize();
        let metrics = compute_layout(sources, &settings)?;
        Ok(Self {
            frame_delay_ms: output_frame_delay_ms(settings.fps),
            settings,
            metrics,
            item_rects: Vec::new(),
        })
    }

    /// Layout captured at start.
    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Tick interval the caller's timer should use.
    pub fn frame_delay_ms(&self) -> u32 {
        self.frame_delay_ms
    }

    /// Draw rectangles from the most recent tick, for hit testing.
    pub fn item_rects(&self) -> &[ItemRect] {
        &self.item_rects
    }

    /// Paint one preview tick at `elapsed_ms` onto `surface` and refresh the
    /// item rectangles.
    ///
    /// Transparent settings clear to true alpha here; the chroma-key fill is
    /// an encoder workaround and never shows in preview.
    pub fn draw_tick(
        &mut self,
        sources: &[Source],
        elapsed_ms: u64,
        surface: &mut PixelBuffer,
    ) -> GridResult<()> {
        if surface.width() != self.metrics.width || surface.height() != self.metrics.height {
            return Err(GridError::validation(format!(
                "preview surface {}x{} does not match layout {}x{}",
                surface.width(),
                surface.height(),
                self.metrics.width,
                self.metrics.height
            )));
        }

        let background = if self.settings.transparent_bg {
            BackgroundMode::AlphaClear
        } else {
            BackgroundMode::Opaque(self.settings.bg_color)
        };
        paint_background(surface, background);

        self.item_rects.clear();
        for (idx, source) in sources.iter().enumerate() {
            let frame_index = resolve_active_frame(source, elapsed_ms);
            let base = item_base_position(idx, &self.settings, &self.metrics);
            let (offset_x, offset_y) = source.offset();
            let x = base.x + f64::from(offset_x);
            let y = base.y + f64::from(offset_y);

            draw_frame(
                surface,
                source.frame(frame_index).pixels(),
                x,
                y,
                self.metrics.draw_scale,
            );

            self.item_rects.push(ItemRect {
                index: idx,
                x,
                y,
                width: f64::from(source.width()) * self.metrics.draw_scale,
                height: f64::from(source.height()) * self.metrics.draw_scale,
            });
        }
        Ok(())
    }
}

/// Restartable periodic preview bound to a cancellation token.
///
/// Exactly one preview may drive an output surface at a time: restarting
/// always cancels the prior run's token first, so a stale timer callback
/// holding the old token sees it cancelled and stops drawing.
#[derive(Debug, Default)]
pub struct PreviewLoop {
    runtime: Option<PreviewRuntime>,
    token: CancelToken,
}

impl PreviewLoop {
    /// Idle loop with no active preview.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop any prior preview and capture a fresh runtime snapshot.
    ///
    /// Returns the token the caller's timer should poll before each tick.
    pub fn restart(
        &mut self,
        sources: &[Source],
        settings: &LayoutSettings,
    ) -> GridResult<CancelToken> {
        self.stop();
        self.runtime = Some(PreviewRuntime::start(sources, settings)?);
        self.token = CancelToken::new();
        Ok(self.token.clone())
    }

    /// Cancel the active preview, if any.
    pub fn stop(&mut self) {
        self.token.cancel();
        self.runtime = None;
    }

    /// Active runtime snapshot, if a preview is running.
    pub fn runtime(&self) -> Option<&PreviewRuntime> {
        self.runtime.as_ref()
    }

    /// Paint one tick. Returns `false` (without painting) once the loop has
    /// been stopped or its token cancelled.
    pub fn tick(
        &mut self,
        sources: &[Source],
        elapsed_ms: u64,
        surface: &mut PixelBuffer,
    ) -> GridResult<bool> {
        if self.token.is_cancelled() {
            return Ok(false);
        }
        match self.runtime.as_mut() {
            Some(runtime) => {
                runtime.draw_tick(sources, elapsed_ms, surface)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
