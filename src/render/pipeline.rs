use crate::codec::{AnimationSink, SinkConfig, Transparency};
use crate::foundation::core::CHROMA_KEY;
use crate::foundation::error::{ConfigWarning, GridError, GridResult};
use crate::layout::grid::{LayoutSettings, compute_layout, resolution_warnings};
use crate::render::blit::BackgroundMode;
use crate::render::cancel::CancelToken;
use crate::render::compositor::{composite, output_frame_delay_ms};
use crate::source::model::Source;

/// Result of one completed export run.
#[derive(Debug)]
pub struct ExportReport {
    /// Encoded container bytes from the sink.
    pub bytes: Vec<u8>,
    /// Advisories raised while sanitizing settings and sizing the run.
    pub warnings: Vec<ConfigWarning>,
    /// Output ticks painted before run-length collapsing.
    pub frames_painted: u64,
    /// Composite frames actually handed to the sink.
    pub frames_emitted: usize,
}

/// One-shot batch export: layout, composite, and stream into `sink`.
///
/// This is the synthetic-clock twin of the preview loop: both run the same
/// layout and draw code, so what exports is what previewed. The run:
///
/// 1. sanitizes `settings` (clamping surfaces [`ConfigWarning`]s, processing
///    continues),
/// 2. composites one full loop of the longest source,
/// 3. pushes each [`crate::CompositeFrame`] into the sink, reporting
///    progress in `[0, 1]` through `progress` after every push.
///
/// Transparent output uses true alpha when the sink supports it and falls
/// back to the reserved chroma key otherwise. `cancel` is polled once per
/// composite tick and once per pushed frame; an abort returns
/// [`GridError::Cancelled`] (distinct from an encode failure) and no
/// artifact is produced. All fatal paths leave the core ready for a fresh
/// export immediately.
#[tracing::instrument(skip_all, fields(sources = sources.len()))]
pub fn export_animation(
    sources: &[Source],
    settings: &LayoutSettings,
    sink: &mut dyn AnimationSink,
    progress: &mut dyn FnMut(f64),
    cancel: &CancelToken,
) -> GridResult<ExportReport> {
    let (settings, mut warnings) = settings.sanitize();
    let metrics = compute_layout(sources, &settings)?;

    let frame_delay = output_frame_delay_ms(settings.fps);
    let max_duration = sources.iter().map(Source::duration_ms).max().unwrap_or(0);
    let frames_painted = u64::from(max_duration).div_ceil(u64::from(frame_delay)).max(1);
    warnings.extend(resolution_warnings(&metrics, Some(frames_painted)));

    let transparency = if settings.transparent_bg {
        if sink.supports_alpha() {
            Transparency::AlphaNative
        } else {
            Transparency::ChromaKey(CHROMA_KEY)
        }
    } else {
        Transparency::Opaque
    };
    let background = match transparency {
        Transparency::Opaque => BackgroundMode::Opaque(settings.bg_color),
        Transparency::AlphaNative => BackgroundMode::AlphaClear,
        Transparency::ChromaKey(key) => BackgroundMode::ChromaKey(key),
    };

    let frames = composite(sources, &settings, &metrics, background, cancel)?;

    sink.begin(SinkConfig {
        width: metrics.width,
        height: metrics.height,
        transparency,
    })?;
    let total = frames.len();
    for (i, frame) in frames.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(GridError::Cancelled);
        }
        sink.push_frame(frame)?;
        progress((i + 1) as f64 / total as f64);
    }
    let bytes = sink.finish()?;

    tracing::debug!(
        frames_painted,
        frames_emitted = total,
        bytes = bytes.len(),
        "export complete"
    );
    Ok(ExportReport {
        bytes,
        warnings,
        frames_painted,
        frames_emitted: total,
    })
}
