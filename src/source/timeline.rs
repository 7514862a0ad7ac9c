use crate::source::model::Source;

/// Resolve which frame of `source` is showing at global elapsed `time_ms`.
///
/// The global clock is unbounded; each source loops independently at its own
/// period, so sources with different total durations drift in and out of
/// phase exactly as their native timings dictate. No cross-source time
/// normalization happens here.
///
/// Lookup folds the clock into the loop (`time_ms % duration`) and scans the
/// cumulative timeline for the first end-time past the local time. The scan
/// is linear; decoded animations are short enough that a binary search has
/// never been worth it.
pub fn resolve_active_frame(source: &Source, time_ms: u64) -> usize {
    let duration = u64::from(source.duration_ms());
    let local = if duration == 0 { 0 } else { time_ms % duration };

    for (i, &end) in source.timeline().iter().enumerate() {
        if local < u64::from(end) {
            return i;
        }
    }
    // Exact loop-boundary edge: fall back to the last frame.
    source.timeline().len().saturating_sub(1)
}

#[cfg(test)]
#[path = "../../tests/unit/source/timeline.rs"]
mod tests;
