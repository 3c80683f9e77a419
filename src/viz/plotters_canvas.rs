//! [`Canvas`] over a plotters drawing area.
//!
//! Works with any plotters backend; [`render_to_file`](super::render_to_file) uses the SVG
//! and bitmap ones. Text is measured with [`HeuristicMetrics`] so layout never depends on
//! which fonts happen to be registered. Drawing text through the bitmap backend needs a
//! font registered with `plotters::style::register_font`; the SVG backend writes `<text>`
//! elements and does not. Text rotates in quarter turns only, see
//! [`Canvas::effective_rotation`].

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontFamily, FontTransform};
use plotters_backend::DrawingErrorKind;

use super::canvas::{Canvas, HeuristicMetrics, Shape, StateStack, TextMetrics};
use super::types::TextAlign;
use crate::error::{ChartError, Result};
use crate::style::{Rgba, StyleOp};

fn backend_color(c: Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.a as f64 / 255.0)
}

fn px(v: f64) -> i32 {
    v.round() as i32
}

/// plotters sizes fonts by line height; both backends draw `size / 1.24` per em.
const SIZE_PER_EM: f64 = 1.24;

fn backend_err<E: std::fmt::Debug>(e: E) -> ChartError {
    ChartError::Backend(format!("{e:?}"))
}

fn text_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> ChartError {
    match e {
        DrawingAreaErrorKind::BackendError(DrawingErrorKind::FontError(f)) => ChartError::Font(
            format!("{f}: register a font with plotters::style::register_font (plotkit --font)"),
        ),
        other => backend_err(other),
    }
}

/// Nearest quarter turn, in `[0, 360)`.
fn snap_quarter_turn(degrees: f64) -> f64 {
    ((degrees.rem_euclid(360.0) / 90.0).round() * 90.0).rem_euclid(360.0)
}

fn font_transform(degrees: f64) -> FontTransform {
    let snapped = snap_quarter_turn(degrees);
    let off = (degrees.rem_euclid(360.0) - snapped).abs();
    if off.min(360.0 - off) > 1e-6 {
        log::warn!("text rotation {degrees:.1} snapped to {snapped:.0}");
    }
    match (snapped / 90.0) as i64 {
        1 => FontTransform::Rotate90,
        2 => FontTransform::Rotate180,
        3 => FontTransform::Rotate270,
        _ => FontTransform::None,
    }
}

/// Split the segment `(x1, y1) -> (x2, y2)` into the "on" pieces of `pattern`.
fn dash_segments(x1: f64, y1: f64, x2: f64, y2: f64, pattern: &[f64]) -> Vec<[(f64, f64); 2]> {
    let len = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt();
    let period: f64 = pattern.iter().sum();
    if pattern.is_empty() || period <= 0.0 || len == 0.0 {
        return vec![[(x1, y1), (x2, y2)]];
    }
    let (ux, uy) = ((x2 - x1) / len, (y2 - y1) / len);
    let mut out = Vec::new();
    let mut pos = 0.0;
    let mut i = 0;
    while pos < len {
        let step = pattern[i % pattern.len()].max(0.0);
        let end = (pos + step).min(len);
        if i % 2 == 0 && end > pos {
            out.push([(x1 + ux * pos, y1 + uy * pos), (x1 + ux * end, y1 + uy * end)]);
        }
        pos = end;
        i += 1;
    }
    out
}

pub struct PlottersCanvas<'a, DB: DrawingBackend> {
    area: &'a DrawingArea<DB, Shift>,
    state: StateStack,
    metrics: Box<dyn TextMetrics>,
}

impl<'a, DB: DrawingBackend> PlottersCanvas<'a, DB> {
    pub fn new(area: &'a DrawingArea<DB, Shift>) -> Self {
        Self {
            area,
            state: StateStack::default(),
            metrics: Box::new(HeuristicMetrics),
        }
    }

    pub fn with_metrics<M: TextMetrics + 'static>(mut self, metrics: M) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    fn draw_path(&self, points: &[(f64, f64)], style: ShapeStyle) -> Result<()> {
        let pts: Vec<(i32, i32)> = points.iter().map(|&(x, y)| (px(x), px(y))).collect();
        self.area
            .draw(&PathElement::new(pts, style))
            .map_err(backend_err)
    }
}

impl<DB: DrawingBackend> Canvas for PlottersCanvas<'_, DB> {
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.state.line(x1, y1, x2, y2);
    }

    fn draw_circle(&mut self, cx: f64, cy: f64, r: f64) {
        self.state.circle(cx, cy, r);
    }

    fn draw_rectangle(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.state.rect(x, y, w, h);
    }

    fn stroke(&mut self) -> Result<()> {
        let shapes = self.state.take_path();
        let s = &self.state.current;
        let width = s.line_width.round().max(1.0) as u32;
        let style = backend_color(s.color).stroke_width(width);
        for shape in &shapes {
            match shape {
                Shape::Line { x1, y1, x2, y2 } => {
                    for seg in dash_segments(*x1, *y1, *x2, *y2, &s.dash) {
                        self.draw_path(&seg, style)?;
                    }
                }
                Shape::Circle { cx, cy, r } => self
                    .area
                    .draw(&Circle::new((px(*cx), px(*cy)), px(*r).max(1) as u32, style))
                    .map_err(backend_err)?,
                Shape::Rect { x, y, w, h } => self
                    .area
                    .draw(&Rectangle::new(
                        [(px(*x), px(*y)), (px(x + w), px(y + h))],
                        style,
                    ))
                    .map_err(backend_err)?,
                Shape::Polygon { points } => {
                    let mut closed = points.clone();
                    if let Some(first) = points.first() {
                        closed.push(*first);
                    }
                    self.draw_path(&closed, style)?;
                }
            }
        }
        Ok(())
    }

    fn fill(&mut self) -> Result<()> {
        let shapes = self.state.take_path();
        let style = backend_color(self.state.current.color).filled();
        for shape in &shapes {
            match shape {
                // lines have no area
                Shape::Line { .. } => {}
                Shape::Circle { cx, cy, r } => self
                    .area
                    .draw(&Circle::new((px(*cx), px(*cy)), px(*r).max(1) as u32, style))
                    .map_err(backend_err)?,
                Shape::Rect { x, y, w, h } => self
                    .area
                    .draw(&Rectangle::new(
                        [(px(*x), px(*y)), (px(x + w), px(y + h))],
                        style,
                    ))
                    .map_err(backend_err)?,
                Shape::Polygon { points } => self
                    .area
                    .draw(&Polygon::new(
                        points.iter().map(|&(x, y)| (px(x), px(y))).collect::<Vec<_>>(),
                        style,
                    ))
                    .map_err(backend_err)?,
            }
        }
        Ok(())
    }

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
    ) -> Result<()> {
        let s = &self.state.current;
        let left = x - ax * width;
        let (tx, h) = match align {
            TextAlign::Left => (left, HPos::Left),
            TextAlign::Center => (left + width / 2.0, HPos::Center),
            TextAlign::Right => (left + width, HPos::Right),
        };
        let v = if ay <= 0.25 {
            VPos::Top
        } else if ay >= 0.75 {
            VPos::Bottom
        } else {
            VPos::Center
        };
        let color = backend_color(s.color);
        let size = s.font.size * SIZE_PER_EM;
        let style = TextStyle::from((FontFamily::from(s.font.family.as_str()), size))
            .color(&color)
            .pos(Pos::new(h, v))
            .transform(font_transform(s.rotation));
        let advance = s.font.size * line_spacing.max(1.0);
        for (i, line) in text.lines().enumerate() {
            let (px_x, px_y) = self.state.point(tx, y + advance * i as f64);
            self.area
                .draw(&Text::new(line, (px(px_x), px(px_y)), style.clone()))
                .map_err(text_err)?;
        }
        Ok(())
    }

    fn measure_string(&self, text: &str) -> Result<(f64, f64)> {
        self.metrics.measure(text, &self.state.current.font)
    }

    fn push_state(&mut self) {
        self.state.push();
    }

    fn pop_state(&mut self) {
        self.state.pop();
    }

    fn rotate_about(&mut self, angle_degrees: f64, x: f64, y: f64) {
        self.state.rotate_about(angle_degrees, x, y);
    }

    fn effective_rotation(&self, degrees: f64) -> f64 {
        snap_quarter_turn(degrees)
    }

    fn apply_style(&mut self, op: &StyleOp) -> Result<()> {
        if let StyleOp::FontFace(f) = op {
            if !(f.size.is_finite() && f.size > 0.0) {
                return Err(ChartError::Font(format!(
                    "invalid size {} for font {:?}",
                    f.size, f.family
                )));
            }
        }
        self.state.apply(op);
        Ok(())
    }
}
