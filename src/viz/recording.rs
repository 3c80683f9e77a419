//! Canvas that records geometric draw instructions instead of producing pixels.
//!
//! Useful for tests, for inspecting layouts, and for handing geometry to an external
//! renderer (`serde_json::to_string(canvas.commands())`).

use serde::Serialize;

use super::canvas::{Canvas, HeuristicMetrics, Shape, StateStack, TextMetrics};
use super::types::TextAlign;
use crate::error::Result;
use crate::style::{FontSpec, Rgba, StyleOp};

/// One emitted instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Stroke {
        shapes: Vec<Shape>,
        color: Rgba,
        line_width: f64,
        dash: Vec<f64>,
    },
    Fill {
        shapes: Vec<Shape>,
        color: Rgba,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        anchor_x: f64,
        anchor_y: f64,
        width: f64,
        line_spacing: f64,
        align: TextAlign,
        font: FontSpec,
        color: Rgba,
        rotation: f64,
    },
}

pub struct RecordingCanvas {
    state: StateStack,
    metrics: Box<dyn TextMetrics>,
    commands: Vec<DrawCommand>,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::with_metrics(HeuristicMetrics)
    }

    pub fn with_metrics<M: TextMetrics + 'static>(metrics: M) -> Self {
        Self {
            state: StateStack::default(),
            metrics: Box::new(metrics),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Number of unmatched `push_state` calls. Zero after any complete render.
    pub fn state_depth(&self) -> usize {
        self.state.depth()
    }

    /// Current style state, as seen by the next primitive.
    pub fn current_line_width(&self) -> f64 {
        self.state.current.line_width
    }

    pub fn current_color(&self) -> Rgba {
        self.state.current.color
    }

    /// All stroked line segments as `(x1, y1, x2, y2)`.
    pub fn stroked_lines(&self) -> Vec<(f64, f64, f64, f64)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Stroke { shapes, .. } => Some(shapes),
                _ => None,
            })
            .flatten()
            .filter_map(|s| match s {
                Shape::Line { x1, y1, x2, y2 } => Some((*x1, *y1, *x2, *y2)),
                _ => None,
            })
            .collect()
    }

    /// All filled shapes in draw order.
    pub fn filled_shapes(&self) -> Vec<&Shape> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Fill { shapes, .. } => Some(shapes),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Text strings in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
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
        if !shapes.is_empty() {
            let s = &self.state.current;
            self.commands.push(DrawCommand::Stroke {
                shapes,
                color: s.color,
                line_width: s.line_width,
                dash: s.dash.clone(),
            });
        }
        Ok(())
    }

    fn fill(&mut self) -> Result<()> {
        let shapes = self.state.take_path();
        if !shapes.is_empty() {
            self.commands.push(DrawCommand::Fill {
                shapes,
                color: self.state.current.color,
            });
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
        let (x, y) = self.state.point(x, y);
        let s = &self.state.current;
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            anchor_x: ax,
            anchor_y: ay,
            width,
            line_spacing,
            align,
            font: s.font.clone(),
            color: s.color,
            rotation: s.rotation,
        });
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

    fn apply_style(&mut self, op: &StyleOp) -> Result<()> {
        self.state.apply(op);
        Ok(())
    }
}
