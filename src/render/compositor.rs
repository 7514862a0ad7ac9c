use crate::foundation::core::{MIN_TICK_MS, PixelBuffer};
use crate::foundation::error::{GridError, GridResult};
use crate::layout::grid::{LayoutMetrics, LayoutSettings, item_base_position};
use crate::render::blit::{BackgroundMode, draw_frame, paint_background};
use crate::render::cancel::CancelToken;
use crate::source::model::Source;
use crate::source::timeline::resolve_active_frame;

/// One fully painted output raster plus its accumulated display delay.
///
/// The delay exceeds the nominal output step whenever run-length collapsing
/// merged the frame with bit-identical successors.
#[derive(Clone, Debug)]
pub struct CompositeFrame {
    /// Merged output raster.
    pub pixels: PixelBuffer,
    /// Accumulated display delay in milliseconds.
    pub delay_ms: u32,
}

/// Output tick length for a requested frame rate, floored to
/// [`MIN_TICK_MS`].
pub fn output_frame_delay_ms(fps: u32) -> u32 {
    ((1000.0 / f64::from(fps.max(1))).round() as u32).max(MIN_TICK_MS)
}

/// Paint every output tick of one export run and run-length collapse the
/// results.
///
/// The run spans exactly one full loop of the longest source
/// (`max(1, ceil(max_duration / frame_delay))` ticks); shorter loops repeat
/// within that span. Each tick paints the background, resolves every
/// source's active frame against the synthetic clock, and draws it at its
/// grid position plus user offset; later sources occlude earlier ones.
/// A tick whose raster is bit-identical to the previous emitted composite is
/// folded into that composite's delay instead of being emitted, so the total
/// displayed duration never changes.
///
/// `cancel` is polled once per tick; a requested abort returns
/// [`GridError::Cancelled`] and drops all partial output.
#[tracing::instrument(skip_all, fields(sources = sources.len(), fps = settings.fps))]
pub fn composite(
    sources: &[Source],
    settings: &LayoutSettings,
    metrics: &LayoutMetrics,
    background: BackgroundMode,
    cancel: &CancelToken,
) -> GridResult<Vec<CompositeFrame>> {
    if sources.is_empty() {
        return Err(GridError::validation("composite requires at least one source"));
    }

    let frame_delay = output_frame_delay_ms(settings.fps);
    let max_duration = sources.iter().map(Source::duration_ms).max().unwrap_or(0);
    let total_frames = u64::from(max_duration).div_ceil(u64::from(frame_delay)).max(1);

    let mut out: Vec<CompositeFrame> = Vec::new();
    let mut removed: u64 = 0;
    let mut surface = PixelBuffer::blank(metrics.width, metrics.height);

    for tick in 0..total_frames {
        if cancel.is_cancelled() {
            return Err(GridError::Cancelled);
        }

        let time_ms = tick * u64::from(frame_delay);
        paint_background(&mut surface, background);

        for (idx, source) in sources.iter().enumerate() {
            let frame_index = resolve_active_frame(source, time_ms);
            let base = item_base_position(idx, settings, metrics);
            let (offset_x, offset_y) = source.offset();
            draw_frame(
                &mut surface,
                source.frame(frame_index).pixels(),
                base.x + f64::from(offset_x),
                base.y + f64::from(offset_y),
                metrics.draw_scale,
            );
        }

        match out.last_mut() {
            Some(last) if last.pixels.content_eq(&surface) => {
                last.delay_ms += frame_delay;
                removed += 1;
            }
            _ => out.push(CompositeFrame {
                pixels: surface.clone(),
                delay_ms: frame_delay,
            }),
        }
    }

    tracing::debug!(
        input_frames = total_frames,
        output_frames = out.len(),
        removed_frames = removed,
        "run-length collapse complete"
    );
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
