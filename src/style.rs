//! Style configuration applied to a canvas before drawing.
//!
//! A [`Styles`] value is an ordered list of [`StyleOp`]s. Components apply their list verbatim
//! inside a scoped state guard; the ops are never interpreted beyond their effect on the
//! current drawing state:
//!
//! - `Color` sets stroke and fill colour
//! - `Dash` sets the stroke dash pattern (empty = solid)
//! - `LineWidth` sets the stroke width
//! - `FontFace` sets the text font
//!
//! Defaults are explicit constructors ([`Styles::axis_default`], [`Styles::plot_default`])
//! rather than process-wide lists.

use serde::{Deserialize, Serialize};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    /// Light gray used for background reference lines.
    pub const GRID: Rgba = Rgba::rgb(220, 220, 220);

    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// Font selection. The family name is resolved by the canvas implementation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    pub fn sans(size: f64) -> Self {
        Self::new("sans-serif", size)
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::sans(12.0)
    }
}

/// Named dash patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineDash {
    Solid,
    Dash,
    Dot,
    DashDot,
}

impl LineDash {
    /// On/off segment lengths in pixels.
    pub fn pattern(&self) -> Vec<f64> {
        match self {
            LineDash::Solid => vec![],
            LineDash::Dash => vec![6.0, 4.0],
            LineDash::Dot => vec![2.0, 3.0],
            LineDash::DashDot => vec![6.0, 3.0, 2.0, 3.0],
        }
    }
}

/// One change to the current drawing state.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleOp {
    Color(Rgba),
    Dash(Vec<f64>),
    LineWidth(f64),
    FontFace(FontSpec),
}

impl From<LineDash> for StyleOp {
    fn from(d: LineDash) -> Self {
        StyleOp::Dash(d.pattern())
    }
}

/// Ordered list of style operations. Later ops win.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Styles {
    ops: Vec<StyleOp>,
}

impl Styles {
    pub fn new(ops: Vec<StyleOp>) -> Self {
        Self { ops }
    }

    /// Black 2px strokes, used for axis lines and labels.
    pub fn axis_default() -> Self {
        Self::new(vec![StyleOp::Color(Rgba::BLACK), StyleOp::LineWidth(2.0)])
    }

    /// Palette colour for the `idx`th plot.
    pub fn plot_default(idx: usize) -> Self {
        Self::new(vec![StyleOp::Color(palette_color(idx))])
    }

    /// Thin light-gray strokes for reference lines.
    pub fn grid_default() -> Self {
        Self::new(vec![StyleOp::Color(Rgba::GRID), StyleOp::LineWidth(1.0)])
    }

    /// Append overrides; they are applied after the existing ops.
    pub fn extend<I: IntoIterator<Item = StyleOp>>(&mut self, ops: I) {
        self.ops.extend(ops);
    }

    pub fn with(mut self, op: StyleOp) -> Self {
        self.ops.push(op);
        self
    }

    pub fn ops(&self) -> &[StyleOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl FromIterator<StyleOp> for Styles {
    fn from_iter<I: IntoIterator<Item = StyleOp>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [Rgba; 10] = [
    Rgba::rgb(68, 114, 196),  // blue      (#4472C4)
    Rgba::rgb(237, 125, 49),  // orange    (#ED7D31)
    Rgba::rgb(165, 165, 165), // gray      (#A5A5A5)
    Rgba::rgb(255, 192, 0),   // gold      (#FFC000)
    Rgba::rgb(91, 155, 213),  // light blue(#5B9BD5)
    Rgba::rgb(112, 173, 71),  // green     (#70AD47)
    Rgba::rgb(38, 68, 120),   // dark blue (#264478)
    Rgba::rgb(158, 72, 14),   // dark org. (#9E480E)
    Rgba::rgb(99, 99, 99),    // dark gray (#636363)
    Rgba::rgb(153, 115, 0),   // brownish  (#997300)
];

/// Get a color from the Office palette.
#[inline]
pub fn palette_color(idx: usize) -> Rgba {
    OFFICE10[idx % OFFICE10.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_creation() {
        let color = Rgba::rgb(255, 128, 64);
        assert_eq!(color.r, 255);
        assert_eq!(color.g, 128);
        assert_eq!(color.b, 64);
        assert_eq!(color.a, 255);
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(palette_color(0), palette_color(10));
    }

    #[test]
    fn overrides_come_after_defaults() {
        let mut s = Styles::axis_default();
        s.extend([StyleOp::LineWidth(1.0)]);
        assert_eq!(s.ops().last(), Some(&StyleOp::LineWidth(1.0)));
    }
}
