//! Coordinate mapping and layout engine.
//!
//! - [`scale`]: ordinal x scales and continuous / stacked / fixed y scales
//! - [`axis`]: vertical and horizontal axes with label fitting
//! - [`plot`]: points, lines, bars, horizontal grid and composites
//! - [`stack`]: cumulative stacking over a shared scale
//! - [`layout`]: N-column grid and label-measuring dynamic layout
//!
//! Everything draws through the [`Canvas`] trait. [`RecordingCanvas`] keeps the draw
//! instructions; [`PlottersCanvas`] paints them with `plotters`, and [`render_to_file`] wires
//! that up for **SVG** and **PNG** output.

pub mod axis;
pub mod canvas;
pub mod layout;
pub mod plot;
pub mod plotters_canvas;
pub mod recording;
pub mod scale;
pub mod stack;
pub mod text;
pub mod types;

pub use axis::{AxisStyle, XAxis, YAxis};
pub use canvas::{Canvas, HeuristicMetrics, Renderable, StateGuard, TextMetrics};
pub use layout::{DynamicLayout, GridColumn, GridLayout, GridRow, LayoutRegions};
pub use plot::{Plot, PlotKind, PlotOptions};
pub use plotters_canvas::PlottersCanvas;
pub use recording::{DrawCommand, RecordingCanvas};
pub use scale::{HorizontalScale, OrdinalScale, Scale, VerticalScale, YScale};
pub use stack::stack_plots;
pub use types::{BoundingBox, TextAlign};

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

/// Render `chart` into an image file. `.svg` paths get the SVG backend, anything else is
/// written as a bitmap (format from the extension, usually PNG). The chart is laid out in
/// [`BoundingBox::from_canvas_size`] on a white background.
pub fn render_to_file<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    chart: &dyn Renderable,
) -> Result<()> {
    let out_path = path.as_ref();
    let is_svg = out_path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(out_path, (width, height)).into_drawing_area();
        draw_on(&root, width, height, chart)?;
    } else {
        let root = BitMapBackend::new(out_path, (width, height)).into_drawing_area();
        draw_on(&root, width, height, chart)?;
    }
    log::info!("wrote {}x{} chart to {}", width, height, out_path.display());
    Ok(())
}

/// Render `chart` as an SVG document held in memory.
pub fn render_svg_string(width: u32, height: u32, chart: &dyn Renderable) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (width, height)).into_drawing_area();
        draw_on(&root, width, height, chart)?;
    }
    Ok(buf)
}

/// Helper that draws to any plotters backend.
fn draw_on<DB>(
    root: &DrawingArea<DB, Shift>,
    width: u32,
    height: u32,
    chart: &dyn Renderable,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let mut canvas = PlottersCanvas::new(root);
    chart
        .render(&mut canvas, BoundingBox::from_canvas_size(width, height))
        .context("rendering chart")?;
    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
