//! Public geometry types and layout constants.

use serde::{Deserialize, Serialize};

use super::canvas::{Canvas, StateGuard};
use crate::error::Result;
use crate::style::{Rgba, StyleOp};

/// Gap between a label and its neighbour or the surrounding region, in pixels.
pub const DEFAULT_MARGIN: f64 = 8.0;

/// Length of an axis tick mark, in pixels.
pub const DEFAULT_TICK_SIZE: f64 = 4.0;

/// Inset used by [`BoundingBox::from_canvas_size`].
pub const CANVAS_PADDING: f64 = 20.0;

/// Horizontal text alignment within a wrap width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Axis-aligned rectangle in pixel units.
///
/// A box is a plain value: sub-regions are always new boxes. It is also the coordinate
/// frame used to turn data values into pixels via [`map_x`](Self::map_x) and
/// [`map_y`](Self::map_y); every scale goes through these two functions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BoundingBox {
    /// Negative extents are clamped to zero.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    /// Drawing region for a whole canvas, leaving a fixed padding on every side.
    pub fn from_canvas_size(width: u32, height: u32) -> Self {
        Self::new(
            CANVAS_PADDING,
            CANVAS_PADDING,
            width as f64 - CANVAS_PADDING * 2.0,
            height as f64 - CANVAS_PADDING * 2.0,
        )
    }

    /// Absolute x of a box-local offset (0 = left edge).
    pub fn rel_x(&self, pos: f64) -> f64 {
        self.x + pos
    }

    /// Absolute y of a box-local offset (0 = top edge).
    pub fn rel_y(&self, pos: f64) -> f64 {
        self.y + pos
    }

    pub fn right(&self) -> f64 {
        self.rel_x(self.w)
    }

    pub fn bottom(&self) -> f64 {
        self.rel_y(self.h)
    }

    /// Shrink by `d` on every side.
    pub fn inset(&self, d: f64) -> Self {
        Self::new(self.x + d, self.y + d, self.w - 2.0 * d, self.h - 2.0 * d)
    }

    /// Map `value` from `[min, max]` onto `[rel_x(0), rel_x(w)]`.
    ///
    /// E.g. value 2 in `[1, 3]` on a 100px wide box at x=0 returns 50.
    pub fn map_x(&self, min: f64, max: f64, value: f64) -> f64 {
        self.rel_x(normalize_to_range(value, min, max, self.w))
    }

    /// Map `value` from `[min, max]` onto the box height, inverted so that `min` lands on
    /// the bottom edge and `max` on the top edge.
    pub fn map_y(&self, min: f64, max: f64, value: f64) -> f64 {
        self.rel_y(self.h) - normalize_to_range(value, min, max, self.h)
    }

    /// Outline the box and print its geometry in the top-left corner.
    pub fn debug_render(&self, canvas: &mut dyn Canvas) -> Result<()> {
        let mut c = StateGuard::new(canvas);
        c.apply_style(&StyleOp::Color(Rgba::new(0, 0, 0, 128)))?;
        c.draw_rectangle(self.x, self.y, self.w, self.h);
        c.stroke()?;
        let text = format!(
            "x: {:.0} y: {:.0} w: {:.0} h: {:.0}",
            self.x, self.y, self.w, self.h
        );
        c.draw_text_wrapped(&text, self.x, self.y, 0.0, 0.0, self.w, 1.0, TextAlign::Left)
    }
}

/// Scale `val` from `[val_min, val_max]` to `[0, extent]`.
///
/// A zero or non-finite span maps everything to 0 so flat data stays on screen.
pub(crate) fn normalize_to_range(val: f64, val_min: f64, val_max: f64, extent: f64) -> f64 {
    let span = val_max - val_min;
    if span == 0.0 || !span.is_finite() {
        return 0.0;
    }
    ((val - val_min) / span) * extent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_x_midpoint() {
        let b = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(b.map_x(1.0, 3.0, 2.0), 50.0);
    }

    #[test]
    fn zero_span_does_not_produce_nan() {
        let b = BoundingBox::new(10.0, 10.0, 100.0, 50.0);
        assert_eq!(b.map_y(5.0, 5.0, 5.0), 60.0);
        assert_eq!(b.map_x(0.0, 0.0, 3.0), 10.0);
    }

    #[test]
    fn debug_render_outlines_the_box() {
        let mut c = crate::viz::recording::RecordingCanvas::new();
        BoundingBox::new(1.0, 2.0, 30.0, 40.0)
            .debug_render(&mut c)
            .unwrap();
        assert_eq!(c.texts(), vec!["x: 1 y: 2 w: 30 h: 40"]);
        assert_eq!(c.state_depth(), 0);
    }

    #[test]
    fn negative_extent_is_clamped() {
        let b = BoundingBox::new(0.0, 0.0, -5.0, 3.0);
        assert_eq!(b.w, 0.0);
    }
}
