use crate::source::model::Source;

/// Fallback output frame rate when no usable delays exist (for example when
/// every source is single-frame).
pub const DEFAULT_FPS: u32 = 15;

/// Pick the integer fps in `[min_fps, max_fps]` that best reconciles every
/// source's true frame delays with a fixed output step.
///
/// For each candidate fps, each real delay `d` occupies
/// `steps = max(1, round(d / frame_ms))` output ticks and contributes
/// `|steps * frame_ms - d|` of quantization error; the candidate with the
/// lowest total wins. Exact ties go to the higher fps for smoother motion at
/// equal fidelity.
///
/// The scan is exhaustive on purpose: the score is not convex in fps, so the
/// whole bounded range is checked every time. Deterministic for identical
/// inputs.
///
/// When no usable delays exist, [`DEFAULT_FPS`] is clamped into
/// `[min_fps, max_fps]` and returned. Zero or inverted bounds describe no
/// valid range at all; those return [`DEFAULT_FPS`] unclamped.
pub fn choose_fps(sources: &[Source], min_fps: u32, max_fps: u32) -> u32 {
    if min_fps == 0 || min_fps > max_fps {
        return DEFAULT_FPS;
    }

    let delays: Vec<f64> = sources
        .iter()
        .flat_map(|s| s.frames().iter().map(|f| f.delay_ms()))
        .filter(|&d| d > 0)
        .map(f64::from)
        .collect();
    if delays.is_empty() {
        return DEFAULT_FPS.clamp(min_fps, max_fps);
    }

    let mut best_fps = min_fps;
    let mut best_score = f64::INFINITY;

    for fps in min_fps..=max_fps {
        let frame_ms = 1000.0 / f64::from(fps);
        let score: f64 = delays
            .iter()
            .map(|&d| {
                let steps = (d / frame_ms).round().max(1.0);
                (steps * frame_ms - d).abs()
            })
            .sum();

        if score < best_score || (score == best_score && fps > best_fps) {
            best_score = score;
            best_fps = fps;
        }
    }

    tracing::debug!(best_fps, best_score, "auto-selected output fps");
    best_fps
}

#[cfg(test)]
#[path = "../../tests/unit/timing/fps.rs"]
mod tests;
