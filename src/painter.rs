//! Paint Controller — turns pointer events into stroke segments on the
//! [`Surface`].
//!
//! An explicit two-state machine replaces ad-hoc "is drawing" flags:
//! pointer-down enters `Drawing` (recording the position, writing nothing),
//! pointer-move while drawing paints a segment from the last recorded
//! buffer-space point, and pointer-up *or* the pointer leaving the canvas
//! rectangle returns to `Idle`.  There is no resume on re-entry within the
//! same gesture; moves received while `Idle` are ignored.

use egui::{Pos2, Rect};

use crate::surface::Surface;

pub const BRUSH_WIDTH_MIN: u32 = 1;
pub const BRUSH_WIDTH_MAX: u32 = 50;
pub const BRUSH_WIDTH_DEFAULT: u32 = 10;

/// Map a pointer position in the canvas's on-screen rectangle to buffer
/// space.  `rect` is the rendered rectangle (logical points); the surface
/// may have a different pixel resolution (high-density displays,
/// percentage-based layout), so the relative position is rescaled by
/// `buffer / rect` per axis.  `rect.min` maps to `(0,0)` and `rect.max` to
/// `(buffer_w, buffer_h)` exactly.
pub fn screen_to_surface(pos: Pos2, rect: Rect, surface: &Surface) -> (f32, f32) {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return (0.0, 0.0);
    }
    (
        (pos.x - rect.left()) * surface.width() as f32 / rect.width(),
        (pos.y - rect.top()) * surface.height() as f32 / rect.height(),
    )
}

enum StrokePhase {
    Idle,
    Drawing { last: (f32, f32) },
}

/// Current-stroke state machine plus the brush width applied to each new
/// segment.  Width changes take effect on the next segment only, never
/// retroactively.
pub struct PaintController {
    phase: StrokePhase,
    /// Stroke width in buffer pixels, kept in `1..=50` by the UI slider and
    /// by `set_brush_width`.
    pub brush_width: u32,
}

impl Default for PaintController {
    fn default() -> Self {
        Self::new()
    }
}

impl PaintController {
    pub fn new() -> Self {
        Self {
            phase: StrokePhase::Idle,
            brush_width: BRUSH_WIDTH_DEFAULT,
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.phase, StrokePhase::Drawing { .. })
    }

    /// Clamp and store a new brush width for subsequent segments.
    pub fn set_brush_width(&mut self, width: u32) {
        self.brush_width = width.clamp(BRUSH_WIDTH_MIN, BRUSH_WIDTH_MAX);
    }

    /// Pointer-down inside the canvas: begin a new stroke at the mapped
    /// position.  No pixel is written yet — a path with a single point
    /// produces no visible stroke under round-cap semantics.
    pub fn pointer_down(&mut self, pos: Pos2, rect: Rect, surface: &Surface) {
        let point = screen_to_surface(pos, rect, surface);
        self.phase = StrokePhase::Drawing { last: point };
    }

    /// Pointer-move: while drawing, paint a segment from the last recorded
    /// point to the new one and advance.  Returns `true` if the surface was
    /// modified.  A move while `Idle` is a no-op.
    pub fn pointer_move(&mut self, pos: Pos2, rect: Rect, surface: &mut Surface) -> bool {
        match &mut self.phase {
            StrokePhase::Drawing { last } => {
                let point = screen_to_surface(pos, rect, surface);
                let from = *last;
                *last = point;
                surface.stroke_segment(from, point, self.brush_width);
                true
            }
            StrokePhase::Idle => false,
        }
    }

    /// Pointer released: close the current stroke.
    pub fn pointer_up(&mut self) {
        self.phase = StrokePhase::Idle;
    }

    /// Pointer left the canvas rectangle: ends the stroke exactly as a
    /// release would.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }
}
