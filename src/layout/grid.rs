use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{ConfigWarning, GridError, GridResult};
use crate::source::model::Source;

/// Maximum grid column count; larger requests are clamped before layout.
pub const MAX_COLUMNS: u32 = 30;

/// Output pixel count above which a resolution advisory is raised.
const RESOLUTION_WARN_PIXELS: u64 = 1920 * 1080 * 2;

/// Pixels-times-frames product above which a workload advisory is raised.
const WORKLOAD_WARN_PIXELS: u64 = 240_000_000;

/// Immutable per-render configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayoutSettings {
    /// Grid column count, `1..=MAX_COLUMNS` after sanitizing.
    pub columns: u32,
    /// Inter-cell gap in unscaled pixels.
    pub gap: u32,
    /// Background color for opaque output.
    pub bg_color: Rgba8,
    /// Request transparent output instead of a background fill.
    pub transparent_bg: bool,
    /// Fit the grid into a fixed canvas instead of deriving the canvas from
    /// content.
    pub fixed_size: bool,
    /// Fixed canvas width; only read when `fixed_size` is set.
    pub canvas_width: u32,
    /// Fixed canvas height; only read when `fixed_size` is set.
    pub canvas_height: u32,
    /// Output frame rate in frames per second.
    pub fps: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            columns: 5,
            gap: 0,
            bg_color: Rgba8::WHITE,
            transparent_bg: false,
            fixed_size: false,
            canvas_width: 1920,
            canvas_height: 1080,
            fps: 15,
        }
    }
}

impl LayoutSettings {
    /// Clamp every field into its supported range, collecting advisories for
    /// values that had to change meaningfully.
    ///
    /// Only the column clamp is surfaced as a warning; the remaining ranges
    /// guard against nonsense input (zero-size canvas, runaway fps) and are
    /// adjusted silently.
    pub fn sanitize(&self) -> (Self, Vec<ConfigWarning>) {
        let mut warnings = Vec::new();
        if self.columns > MAX_COLUMNS {
            let warning = ConfigWarning::ColumnsClamped {
                requested: self.columns,
                max: MAX_COLUMNS,
            };
            tracing::warn!(requested = self.columns, max = MAX_COLUMNS, "columns clamped");
            warnings.push(warning);
        }

        let clamped = Self {
            columns: self.columns.clamp(1, MAX_COLUMNS),
            gap: self.gap.min(100),
            canvas_width: self.canvas_width.clamp(64, 4096),
            canvas_height: self.canvas_height.clamp(64, 4096),
            fps: self.fps.clamp(5, 30),
            ..*self
        };
        (clamped, warnings)
    }
}

/// Grid geometry derived from the current source set and settings.
///
/// Recomputed on every settings or source-set change; never cached across a
/// mutation. The draw scale is uniform for every item in a render; layout
/// never stretches one source independently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    /// Cell width: max native width across all sources.
    pub cell_width: u32,
    /// Cell height: max native height across all sources.
    pub cell_height: u32,
    /// Row count, `ceil(count / columns)`.
    pub rows: u32,
    /// Unscaled grid content width.
    pub content_width: u32,
    /// Unscaled grid content height.
    pub content_height: u32,
    /// Output canvas width (settings-driven or content-driven).
    pub width: u32,
    /// Output canvas height (settings-driven or content-driven).
    pub height: u32,
    /// Uniform draw scale in `(0, 1]`; never upscales.
    pub draw_scale: f64,
    /// Content width after scaling.
    pub scaled_content_width: f64,
    /// Content height after scaling.
    pub scaled_content_height: f64,
    /// Centering origin, x axis.
    pub origin_x: f64,
    /// Centering origin, y axis.
    pub origin_y: f64,
}

/// Pure layout function: `(sources, settings) -> LayoutMetrics`.
///
/// Every cell is sized to the single largest source so nothing is cropped.
/// With `fixed_size` off, the canvas is exactly the content size at scale 1;
/// with it on, the grid is uniformly scaled down (never up) to fit and
/// centered. Column counts above [`MAX_COLUMNS`] are clamped here, before any
/// geometry is computed.
pub fn compute_layout(sources: &[Source], settings: &LayoutSettings) -> GridResult<LayoutMetrics> {
    if sources.is_empty() {
        return Err(GridError::validation("layout requires at least one source"));
    }
    if settings.columns == 0 {
        return Err(GridError::validation("column count must be >= 1"));
    }
    let columns = settings.columns.min(MAX_COLUMNS);

    let cell_width = sources.iter().map(Source::width).max().unwrap_or(0);
    let cell_height = sources.iter().map(Source::height).max().unwrap_or(0);
    if cell_width == 0 || cell_height == 0 {
        return Err(GridError::validation("sources must have non-zero size"));
    }

    let count = sources.len() as u32;
    let rows = count.div_ceil(columns);
    let content_width = columns * cell_width + (columns - 1) * settings.gap;
    let content_height = rows * cell_height + (rows - 1) * settings.gap;

    let (width, height, draw_scale) = if settings.fixed_size {
        let width = settings.canvas_width;
        let height = settings.canvas_height;
        let scale = (f64::from(width) / f64::from(content_width))
            .min(f64::from(height) / f64::from(content_height))
            .min(1.0);
        (width, height, scale)
    } else {
        (content_width, content_height, 1.0)
    };

    let scaled_content_width = f64::from(content_width) * draw_scale;
    let scaled_content_height = f64::from(content_height) * draw_scale;
    let origin_x = ((f64::from(width) - scaled_content_width) / 2.0).floor();
    let origin_y = ((f64::from(height) - scaled_content_height) / 2.0).floor();

    Ok(LayoutMetrics {
        cell_width,
        cell_height,
        rows,
        content_width,
        content_height,
        width,
        height,
        draw_scale,
        scaled_content_width,
        scaled_content_height,
        origin_x,
        origin_y,
    })
}

/// Base draw position of grid item `index`, before the per-source user
/// offset.
///
/// The user offset is added after scaling, by the caller, so manual
/// repositioning moves in output-canvas pixels regardless of draw scale.
pub fn item_base_position(
    index: usize,
    settings: &LayoutSettings,
    metrics: &LayoutMetrics,
) -> Point {
    let columns = settings.columns.min(MAX_COLUMNS) as usize;
    let col = (index % columns) as f64;
    let row = (index / columns) as f64;

    let scaled_cell_width = f64::from(metrics.cell_width) * metrics.draw_scale;
    let scaled_cell_height = f64::from(metrics.cell_height) * metrics.draw_scale;
    let scaled_gap = f64::from(settings.gap) * metrics.draw_scale;

    Point::new(
        metrics.origin_x + col * (scaled_cell_width + scaled_gap),
        metrics.origin_y + row * (scaled_cell_height + scaled_gap),
    )
}

/// Advisories for large output resolutions or heavy export workloads.
///
/// `frame_count` is the planned number of output frames when known (export),
/// or `None` for a preview-only check.
pub fn resolution_warnings(
    metrics: &LayoutMetrics,
    frame_count: Option<u64>,
) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let pixels = u64::from(metrics.width) * u64::from(metrics.height);

    if pixels > RESOLUTION_WARN_PIXELS {
        tracing::warn!(
            width = metrics.width,
            height = metrics.height,
            pixels,
            "high output resolution"
        );
        warnings.push(ConfigWarning::HighResolution {
            width: metrics.width,
            height: metrics.height,
        });
    }

    if let Some(frames) = frame_count {
        let workload = pixels.saturating_mul(frames);
        if workload > WORKLOAD_WARN_PIXELS {
            tracing::warn!(pixels, frames, workload, "heavy export workload");
            warnings.push(ConfigWarning::HeavyWorkload { pixels, frames });
        }
    }

    warnings
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
