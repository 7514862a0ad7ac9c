use crate::foundation::core::Point;
use crate::source::model::{Source, move_source};

/// Pointer travel (in output-canvas pixels, either axis) past which a drag
/// counts as a real move rather than a sloppy click.
pub const DRAG_MOVE_THRESHOLD_PX: f64 = 2.0;

/// Draw rectangle of one rendered grid item, in output-canvas pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemRect {
    /// Index of the source this rectangle belongs to (render order).
    pub index: usize,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Scaled draw width.
    pub width: f64,
    /// Scaled draw height.
    pub height: f64,
}

impl ItemRect {
    /// Inclusive containment test on both edges.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Topmost (last-rendered, highest index) item under `point`, if any.
pub fn hit_test(point: Point, rects: &[ItemRect]) -> Option<usize> {
    rects.iter().rev().find(|r| r.contains(point)).map(|r| r.index)
}

/// How a finished drag should be applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// Free repositioning within the cell: the new offset set during the drag
    /// stands, nothing else changes.
    Reposition,
    /// List-order swap: the dragged item takes the target's position and its
    /// offset resets to zero.
    Reorder {
        /// Index the drag started on.
        from: usize,
        /// Index the pointer was released over.
        to: usize,
    },
}

/// One in-flight canvas drag.
///
/// Offsets move in output-canvas pixel units: the grabbed source travels the
/// same number of output pixels as the pointer, even on a downscaled canvas.
#[derive(Clone, Copy, Debug)]
pub struct DragSession {
    source_index: usize,
    start_point: Point,
    start_offset: (i32, i32),
    moved: bool,
}

impl DragSession {
    /// Record the grab: which item, where the pointer went down, and the
    /// item's offset at that moment.
    pub fn begin(source_index: usize, start_point: Point, start_offset: (i32, i32)) -> Self {
        Self {
            source_index,
            start_point,
            start_offset,
            moved: false,
        }
    }

    /// Index of the grabbed item.
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    /// Whether the pointer has travelled past [`DRAG_MOVE_THRESHOLD_PX`].
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Advance the drag to `point`; returns the offset the grabbed source
    /// should now carry.
    pub fn update(&mut self, point: Point) -> (i32, i32) {
        let dx = point.x - self.start_point.x;
        let dy = point.y - self.start_point.y;
        if dx.abs() > DRAG_MOVE_THRESHOLD_PX || dy.abs() > DRAG_MOVE_THRESHOLD_PX {
            self.moved = true;
        }
        (
            self.start_offset.0 + dx.round() as i32,
            self.start_offset.1 + dy.round() as i32,
        )
    }

    /// Resolve the drag on pointer release.
    ///
    /// A release over a *different* item's rectangle after a real move swaps
    /// list order; anything else is a plain reposition.
    pub fn finish(self, point: Point, rects: &[ItemRect]) -> DragOutcome {
        match hit_test(point, rects) {
            Some(to) if to != self.source_index && self.moved => DragOutcome::Reorder {
                from: self.source_index,
                to,
            },
            _ => DragOutcome::Reposition,
        }
    }
}

/// Apply a finished drag to the source list.
pub fn apply_drag_outcome(sources: &mut Vec<Source>, outcome: DragOutcome) {
    if let DragOutcome::Reorder { from, to } = outcome {
        move_source(sources, from, to, true);
    }
}
