//! Drawing-surface boundary.
//!
//! [`Canvas`] is everything the engine needs from the outside world: path building,
//! stroking/filling, text drawing and measurement, a save/restore stack for drawing state,
//! and rotation. Two implementations ship with the crate:
//! [`RecordingCanvas`](super::recording::RecordingCanvas) and
//! [`PlottersCanvas`](super::plotters_canvas::PlottersCanvas). Both share [`StateStack`]
//! for the bookkeeping part.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use super::types::{BoundingBox, TextAlign};
use crate::error::Result;
use crate::style::{FontSpec, Rgba, StyleOp, Styles};

pub trait Canvas {
    /// Add a line segment to the current path.
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    /// Add a circle to the current path.
    fn draw_circle(&mut self, cx: f64, cy: f64, r: f64);
    /// Add a rectangle to the current path. `h` may be negative (grows upward).
    fn draw_rectangle(&mut self, x: f64, y: f64, w: f64, h: f64);
    /// Stroke and clear the current path.
    fn stroke(&mut self) -> Result<()>;
    /// Fill and clear the current path.
    fn fill(&mut self) -> Result<()>;

    /// Draw `text` anchored at `(x, y)`. `ax`/`ay` are the anchor fractions of the text box
    /// (0 = left/top, 1 = right/bottom); `width` is the wrap width used for alignment.
    #[allow(clippy::too_many_arguments)]
    fn draw_text_wrapped(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        ax: f64,
        ay: f64,
        width: f64,
        line_spacing: f64,
        align: TextAlign,
    ) -> Result<()>;

    /// `(width, height)` of `text` under the current font state.
    fn measure_string(&self, text: &str) -> Result<(f64, f64)>;

    fn push_state(&mut self);
    fn pop_state(&mut self);

    /// Rotate subsequent geometry by `angle_degrees` (clockwise on screen) about `(x, y)`.
    fn rotate_about(&mut self, angle_degrees: f64, x: f64, y: f64);

    /// Angle text will actually be drawn at when `degrees` is requested. Surfaces that
    /// can only draw some angles override this so layout measures what gets drawn.
    fn effective_rotation(&self, degrees: f64) -> f64 {
        degrees
    }

    fn apply_style(&mut self, op: &StyleOp) -> Result<()>;

    fn apply_styles(&mut self, styles: &Styles) -> Result<()> {
        for op in styles.ops() {
            self.apply_style(op)?;
        }
        Ok(())
    }
}

/// Anything that can draw itself into a box: plots, axes, layouts.
pub trait Renderable {
    fn render(&self, canvas: &mut dyn Canvas, container: BoundingBox) -> Result<()>;
}

impl<T: Renderable + ?Sized> Renderable for Box<T> {
    fn render(&self, canvas: &mut dyn Canvas, container: BoundingBox) -> Result<()> {
        (**self).render(canvas, container)
    }
}

/// Saves the canvas state on creation and restores it when dropped, so style changes made
/// through the guard never leak to sibling components, whichever way the scope exits.
pub struct StateGuard<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
}

impl<'a, C: Canvas + ?Sized> StateGuard<'a, C> {
    pub fn new(canvas: &'a mut C) -> Self {
        canvas.push_state();
        Self { canvas }
    }
}

impl<C: Canvas + ?Sized> Deref for StateGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for StateGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for StateGuard<'_, C> {
    fn drop(&mut self) {
        self.canvas.pop_state();
    }
}

/// Text measurement service.
pub trait TextMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<(f64, f64)>;
}

/// Heuristic: estimate pixel extent of text without glyph metrics.
/// Width is 0.6 × font size per character, height is the font size.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMetrics;

impl TextMetrics for HeuristicMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<(f64, f64)> {
        Ok(estimate_text_size(text, font.size))
    }
}

pub fn estimate_text_size(text: &str, font_px: f64) -> (f64, f64) {
    if text.is_empty() {
        return (0.0, font_px);
    }
    ((text.chars().count() as f64 * font_px * 0.60).ceil(), font_px)
}

/// Primitive added to the current path, in absolute (already transformed) coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Circle { cx: f64, cy: f64, r: f64 },
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Polygon { points: Vec<(f64, f64)> },
}

/// 2x3 affine transform (rotation/translation only in practice).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn rotation_about(angle_degrees: f64, x: f64, y: f64) -> Self {
        let (s, c) = angle_degrees.to_radians().sin_cos();
        Affine {
            a: c,
            b: s,
            c: -s,
            d: c,
            e: x - c * x + s * y,
            f: y - s * x - c * y,
        }
    }

    /// `self` applied after `inner`.
    fn then(&self, inner: &Affine) -> Affine {
        Affine {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            e: self.a * inner.e + self.c * inner.f + self.e,
            f: self.b * inner.e + self.d * inner.f + self.f,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Affine::IDENTITY
    }
}

/// Style state that push/pop saves and restores.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub color: Rgba,
    pub line_width: f64,
    pub dash: Vec<f64>,
    pub font: FontSpec,
    pub transform: Affine,
    /// Accumulated rotation in degrees, kept alongside the matrix for text.
    pub rotation: f64,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            line_width: 1.0,
            dash: Vec::new(),
            font: FontSpec::default(),
            transform: Affine::IDENTITY,
            rotation: 0.0,
        }
    }
}

/// Current state, saved states and the pending path.
#[derive(Debug, Default)]
pub struct StateStack {
    pub current: DrawState,
    saved: Vec<DrawState>,
    path: Vec<Shape>,
}

impl StateStack {
    pub fn push(&mut self) {
        self.saved.push(self.current.clone());
    }

    pub fn pop(&mut self) {
        match self.saved.pop() {
            Some(s) => self.current = s,
            None => log::warn!("pop_state called without a matching push_state"),
        }
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn apply(&mut self, op: &StyleOp) {
        match op {
            StyleOp::Color(c) => self.current.color = *c,
            StyleOp::Dash(d) => self.current.dash = d.clone(),
            StyleOp::LineWidth(w) => self.current.line_width = *w,
            StyleOp::FontFace(f) => self.current.font = f.clone(),
        }
    }

    pub fn rotate_about(&mut self, angle_degrees: f64, x: f64, y: f64) {
        let r = Affine::rotation_about(angle_degrees, x, y);
        self.current.transform = self.current.transform.then(&r);
        self.current.rotation += angle_degrees;
    }

    pub fn point(&self, x: f64, y: f64) -> (f64, f64) {
        self.current.transform.apply(x, y)
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let (x1, y1) = self.point(x1, y1);
        let (x2, y2) = self.point(x2, y2);
        self.path.push(Shape::Line { x1, y1, x2, y2 });
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64) {
        let (cx, cy) = self.point(cx, cy);
        self.path.push(Shape::Circle { cx, cy, r });
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        // normalise negative extents so backends only see top-left + positive size
        let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
        let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };
        if self.current.transform.is_identity() {
            self.path.push(Shape::Rect { x, y, w, h });
        } else {
            let points = [(x, y), (x + w, y), (x + w, y + h), (x, y + h)]
                .iter()
                .map(|&(px, py)| self.point(px, py))
                .collect();
            self.path.push(Shape::Polygon { points });
        }
    }

    /// Take the pending path, leaving it empty.
    pub fn take_path(&mut self) -> Vec<Shape> {
        std::mem::take(&mut self.path)
    }
}
