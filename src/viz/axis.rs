//! Axes: boundary line, ticks and fitted labels for a scale.

use std::sync::Arc;

use super::canvas::{Canvas, Renderable, StateGuard};
use super::scale::{HorizontalScale, OrdinalScale, Scale, VerticalScale, YScale};
use super::text::{
    reduce_labels_to_fit, tallest_label_height, total_labels_width, truncate_to_width,
    widest_label_size,
};
use super::types::{BoundingBox, DEFAULT_MARGIN, DEFAULT_TICK_SIZE, TextAlign};
use crate::error::Result;
use crate::models::Label;
use crate::style::{FontSpec, StyleOp, Styles};

/// Rotation used by [`XAxis::compact`], in degrees.
pub const DEFAULT_COMPACT_ROTATION: f64 = 45.0;

/// Styles for the two parts of an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisStyle {
    /// Boundary and tick lines. Default: black, 2px.
    pub line: Styles,
    /// Labels. Default: black, 12px sans.
    pub font: Styles,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            line: Styles::axis_default(),
            font: Styles::axis_default().with(StyleOp::FontFace(FontSpec::default())),
        }
    }
}

impl AxisStyle {
    pub fn with_line<I: IntoIterator<Item = StyleOp>>(mut self, ops: I) -> Self {
        self.line.extend(ops);
        self
    }

    pub fn with_font<I: IntoIterator<Item = StyleOp>>(mut self, ops: I) -> Self {
        self.font.extend(ops);
        self
    }
}

/// Vertical axis. Drawn on the right edge of its box (next to the plot), or on the left
/// edge when mirrored.
#[derive(Debug, Clone)]
pub struct YAxis {
    scale: Arc<YScale>,
    mirrored: bool,
    style: AxisStyle,
}

impl YAxis {
    pub fn new(scale: Arc<YScale>) -> Self {
        Self {
            scale,
            mirrored: false,
            style: AxisStyle::default(),
        }
    }

    /// Put the boundary on the left edge with left-aligned labels after the ticks.
    pub fn mirrored(mut self) -> Self {
        self.mirrored = true;
        self
    }

    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn scale(&self) -> &Arc<YScale> {
        &self.scale
    }

    /// Width of the widest label under this axis's font.
    pub fn required_width(&self, canvas: &mut dyn Canvas) -> Result<f64> {
        let mut c = StateGuard::new(canvas);
        c.apply_styles(&self.style.font)?;
        let (w, _) = widest_label_size(&*c, &self.scale.labels())?;
        log::trace!("y axis labels need {w:.1}px");
        Ok(w)
    }

    fn label_y(&self, label: &Label, b: BoundingBox) -> f64 {
        self.scale.position(self.scale.tick_value(label.tick), b)
    }
}

impl Renderable for YAxis {
    fn render(&self, canvas: &mut dyn Canvas, b: BoundingBox) -> Result<()> {
        let mut c = StateGuard::new(canvas);
        c.apply_styles(&self.style.line)?;

        let edge = if self.mirrored { b.rel_x(0.0) } else { b.rel_x(b.w) };
        let tick_end = if self.mirrored {
            edge + DEFAULT_TICK_SIZE
        } else {
            edge - DEFAULT_TICK_SIZE
        };

        let labels = self.scale.labels();
        c.draw_line(edge, b.rel_y(0.0), edge, b.rel_y(b.h));
        for label in &labels {
            let y = self.label_y(label, b);
            c.draw_line(tick_end, y, edge, y);
        }
        c.stroke()?;

        c.apply_styles(&self.style.font)?;
        // ticks sit inside the margin, so a box of widest label + margin fits every label
        let text_w = (b.w - DEFAULT_MARGIN).max(0.0);
        let (text_x, align) = if self.mirrored {
            (b.rel_x(0.0) + DEFAULT_MARGIN, TextAlign::Left)
        } else {
            (b.rel_x(0.0), TextAlign::Right)
        };
        for label in &labels {
            let text = truncate_to_width(&*c, &label.value, text_w)?;
            if text.is_empty() {
                continue;
            }
            let y = self.label_y(label, b);
            c.draw_text_wrapped(&text, text_x, y, 0.0, 0.5, text_w, 1.0, align)?;
        }
        Ok(())
    }
}

/// Horizontal axis along the top edge of its box, which sits under the plot region.
#[derive(Debug, Clone)]
pub struct XAxis {
    scale: Arc<OrdinalScale>,
    style: AxisStyle,
    /// Label rotation in degrees; `None` draws upright, reduced labels.
    rotation: Option<f64>,
}

impl XAxis {
    pub fn new(scale: Arc<OrdinalScale>) -> Self {
        Self {
            scale,
            style: AxisStyle::default(),
            rotation: None,
        }
    }

    /// Rotated labels, for long category names on narrow charts.
    pub fn compact(scale: Arc<OrdinalScale>) -> Self {
        Self::new(scale).with_rotation(DEFAULT_COMPACT_ROTATION)
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    pub fn scale(&self) -> &Arc<OrdinalScale> {
        &self.scale
    }

    pub fn is_compact(&self) -> bool {
        self.rotation.is_some()
    }

    /// Height the labels need under this axis's font. Rotated labels are measured by the
    /// vertical extent of their box at the angle the canvas will draw them.
    pub fn required_height(&self, canvas: &mut dyn Canvas) -> Result<f64> {
        let mut c = StateGuard::new(canvas);
        c.apply_styles(&self.style.font)?;
        let labels = self.scale.labels();
        let h = match self.rotation {
            Some(deg) => {
                let (w, h) = widest_label_size(&*c, &labels)?;
                let (sin, cos) = c.effective_rotation(deg).to_radians().sin_cos();
                w * sin.abs() + h * cos.abs()
            }
            None => tallest_label_height(&*c, &labels)?,
        };
        log::trace!("x axis labels need {h:.1}px");
        Ok(h)
    }

    /// Labels that fit `b` under the current font. Rotated labels take up about one line
    /// height each along the axis.
    fn fitted_labels(&self, c: &dyn Canvas, b: BoundingBox) -> Result<Vec<Label>> {
        let labels = self.scale.labels();
        match self.rotation {
            None => reduce_labels_to_fit(c, labels, b.w),
            Some(_) => {
                let step = tallest_label_height(c, &labels)? + DEFAULT_MARGIN;
                let mut labels = labels;
                while !labels.is_empty() && labels.len() as f64 * step > b.w {
                    if labels.len() == 1 {
                        labels.clear();
                        break;
                    }
                    labels = labels.into_iter().step_by(2).collect();
                }
                Ok(labels)
            }
        }
    }
}

impl Renderable for XAxis {
    fn render(&self, canvas: &mut dyn Canvas, b: BoundingBox) -> Result<()> {
        let mut c = StateGuard::new(canvas);

        // measure with the font that will draw the labels
        let (labels, spacing) = {
            let mut m = StateGuard::new(&mut *c);
            m.apply_styles(&self.style.font)?;
            let labels = self.fitted_labels(&*m, b)?;
            let spacing = if labels.is_empty() {
                0.0
            } else {
                total_labels_width(&*m, &labels, DEFAULT_MARGIN * 2.0)? / labels.len() as f64
            };
            (labels, spacing)
        };

        c.apply_styles(&self.style.line)?;
        let top = b.rel_y(0.0);
        c.draw_line(b.rel_x(0.0), top, b.rel_x(b.w), top);
        for label in &labels {
            let x = self.scale.position(label.tick, b);
            c.draw_line(x, top, x, top + DEFAULT_TICK_SIZE);
        }
        c.stroke()?;

        c.apply_styles(&self.style.font)?;
        let text_y = top + DEFAULT_TICK_SIZE;
        for label in &labels {
            let x = self.scale.position(label.tick, b);
            match self.rotation {
                None => c.draw_text_wrapped(
                    &label.value,
                    x,
                    text_y,
                    0.5,
                    0.0,
                    spacing,
                    1.0,
                    TextAlign::Center,
                )?,
                Some(deg) => {
                    let deg = c.effective_rotation(deg);
                    let mut r = StateGuard::new(&mut *c);
                    r.rotate_about(deg, x, text_y);
                    let (w, _) = r.measure_string(&label.value)?;
                    r.draw_text_wrapped(&label.value, x, text_y, 0.0, 0.5, w, 1.0, TextAlign::Left)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Series;
    use crate::viz::recording::{DrawCommand, RecordingCanvas};

    fn y_axis(values: Vec<f64>, ticks: usize) -> YAxis {
        let s = Series::from_values(values);
        YAxis::new(Arc::new(YScale::with_ticks(ticks, [&s])))
    }

    #[test]
    fn y_axis_zero_ticks_draws_only_boundary() {
        let mut c = RecordingCanvas::new();
        y_axis(vec![1.0], 0)
            .render(&mut c, BoundingBox::new(0.0, 0.0, 40.0, 100.0))
            .unwrap();
        assert_eq!(c.stroked_lines(), vec![(40.0, 0.0, 40.0, 100.0)]);
        assert!(c.texts().is_empty());
    }

    #[test]
    fn mirrored_y_axis_flips_boundary_and_alignment() {
        let mut c = RecordingCanvas::new();
        y_axis(vec![4.0], 4)
            .mirrored()
            .render(&mut c, BoundingBox::new(10.0, 0.0, 60.0, 100.0))
            .unwrap();
        let lines = c.stroked_lines();
        assert_eq!(lines[0], (10.0, 0.0, 10.0, 100.0));
        assert_eq!(lines[1].0, 14.0);
        let aligns: Vec<_> = c
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { align, x, .. } => Some((*align, *x)),
                _ => None,
            })
            .collect();
        assert_eq!(aligns.len(), 5);
        assert!(aligns.iter().all(|(a, x)| *a == TextAlign::Left && *x == 18.0));
    }

    #[test]
    fn y_axis_labels_sit_on_their_ticks() {
        let mut c = RecordingCanvas::new();
        y_axis(vec![5.0], 5)
            .render(&mut c, BoundingBox::new(0.0, 0.0, 60.0, 100.0))
            .unwrap();
        let ys: Vec<f64> = c
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { y, .. } => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(ys, vec![100.0, 80.0, 60.0, 40.0, 20.0, 0.0]);
        assert_eq!(c.state_depth(), 0);
    }

    #[test]
    fn y_axis_sized_by_required_width_keeps_whole_labels() {
        let axis = y_axis(vec![3.0], 10);
        let mut c = RecordingCanvas::new();
        let w = axis.required_width(&mut c).unwrap() + DEFAULT_MARGIN;
        axis.render(&mut c, BoundingBox::new(0.0, 0.0, w, 100.0))
            .unwrap();
        let texts = c.texts();
        assert_eq!(texts.first().copied(), Some("0.00"));
        assert_eq!(texts.last().copied(), Some("3.00"));
    }

    #[test]
    fn x_axis_reduces_and_centres_labels() {
        let labels: Vec<String> = (0..40).map(|i| format!("L{i:02}")).collect();
        let s = Series::from_labeled(labels, vec![1.0; 40]);
        let axis = XAxis::new(Arc::new(OrdinalScale::new(&s, 0.0)));
        let mut c = RecordingCanvas::new();
        axis.render(&mut c, BoundingBox::new(0.0, 200.0, 300.0, 30.0))
            .unwrap();
        let texts = c.texts();
        assert!(!texts.is_empty() && texts.len() < 40);
        assert_eq!(texts[0], "L00");
        // boundary plus one tick per label
        assert_eq!(c.stroked_lines().len(), texts.len() + 1);
    }

    #[test]
    fn compact_axis_needs_more_height_than_upright() {
        let s = Series::from_labeled(vec!["a long category name"], vec![1.0]);
        let scale = Arc::new(OrdinalScale::new(&s, 0.0));
        let mut c = RecordingCanvas::new();
        let upright = XAxis::new(Arc::clone(&scale)).required_height(&mut c).unwrap();
        let rotated = XAxis::compact(scale).required_height(&mut c).unwrap();
        assert_eq!(upright, 12.0);
        assert!(rotated > upright);
        assert_eq!(c.state_depth(), 0);
    }

    #[test]
    fn compact_axis_rotates_text() {
        let s = Series::from_labeled(vec!["a", "b"], vec![1.0, 2.0]);
        let axis = XAxis::compact(Arc::new(OrdinalScale::new(&s, 0.0)));
        let mut c = RecordingCanvas::new();
        axis.render(&mut c, BoundingBox::new(0.0, 0.0, 100.0, 40.0))
            .unwrap();
        let rotations: Vec<f64> = c
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { rotation, .. } => Some(*rotation),
                _ => None,
            })
            .collect();
        assert_eq!(rotations, vec![45.0, 45.0]);
    }
}
