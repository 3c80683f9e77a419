//! Layouts: split a container box into regions and render children into them.

use super::axis::{XAxis, YAxis};
use super::canvas::{Canvas, Renderable};
use super::plot::Plot;
use super::types::{BoundingBox, DEFAULT_MARGIN};
use crate::error::{ChartError, Result};

/// Column count used by [`GridLayout::twelve_col`].
pub const DEFAULT_GRID_COLUMNS: usize = 12;

/// One cell of a grid row. A column without content is a spacer.
pub struct GridColumn {
    pub span: usize,
    content: Option<Box<dyn Renderable>>,
}

impl GridColumn {
    pub fn new<R: Renderable + 'static>(span: usize, content: R) -> Self {
        Self {
            span,
            content: Some(Box::new(content)),
        }
    }

    pub fn spacer(span: usize) -> Self {
        Self { span, content: None }
    }
}

/// A horizontal band taking `height_percent` (0..=1) of the container height.
pub struct GridRow {
    pub height_percent: f64,
    pub columns: Vec<GridColumn>,
}

impl GridRow {
    pub fn new(height_percent: f64, columns: Vec<GridColumn>) -> Self {
        Self {
            height_percent,
            columns,
        }
    }
}

/// Rows stacked top to bottom, each split into spans of an N-column grid.
pub struct GridLayout {
    num_columns: usize,
    rows: Vec<GridRow>,
}

impl GridLayout {
    pub fn new(num_columns: usize, rows: Vec<GridRow>) -> Self {
        Self { num_columns, rows }
    }

    pub fn twelve_col(rows: Vec<GridRow>) -> Self {
        Self::new(DEFAULT_GRID_COLUMNS, rows)
    }

    /// Box of every column, row by row, spacers included.
    pub fn cells(&self, container: BoundingBox) -> Result<Vec<Vec<BoundingBox>>> {
        if self.num_columns == 0 {
            return Err(ChartError::InvalidLayout(
                "grid layout needs at least one column".into(),
            ));
        }
        let col_unit = container.w / self.num_columns as f64;
        let mut y_offset = 0.0;
        let mut out = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let row_h = container.h * row.height_percent.clamp(0.0, 1.0);
            let mut x_offset = 0.0;
            let mut used = 0usize;
            let mut cells = Vec::with_capacity(row.columns.len());
            for col in &row.columns {
                // spans past the last column are cut to what is left
                let span = col.span.min(self.num_columns.saturating_sub(used));
                let w = col_unit * span as f64;
                cells.push(BoundingBox::new(
                    container.rel_x(x_offset),
                    container.rel_y(y_offset),
                    w,
                    row_h,
                ));
                x_offset += w;
                used += col.span;
            }
            y_offset += row_h;
            out.push(cells);
        }
        Ok(out)
    }
}

impl Renderable for GridLayout {
    fn render(&self, canvas: &mut dyn Canvas, container: BoundingBox) -> Result<()> {
        let cells = self.cells(container)?;
        for (row, boxes) in self.rows.iter().zip(cells) {
            for (col, b) in row.columns.iter().zip(boxes) {
                if let Some(content) = &col.content {
                    content.render(canvas, b)?;
                }
            }
        }
        Ok(())
    }
}

/// Sub-regions computed by [`DynamicLayout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRegions {
    pub plot: BoundingBox,
    pub y_axis: BoundingBox,
    pub x_axis: BoundingBox,
}

/// Sizes the axis strips from the measured labels and gives the rest to the plots.
pub struct DynamicLayout {
    y_axis: YAxis,
    x_axis: XAxis,
    plots: Vec<Plot>,
    margin: f64,
}

impl DynamicLayout {
    pub fn new(y_axis: YAxis, x_axis: XAxis, plots: Vec<Plot>) -> Self {
        Self {
            y_axis,
            x_axis,
            plots,
            margin: DEFAULT_MARGIN,
        }
    }

    /// Padding added to each measured axis extent. Default [`DEFAULT_MARGIN`].
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    pub fn regions(&self, canvas: &mut dyn Canvas, container: BoundingBox) -> Result<LayoutRegions> {
        let yw = self.y_axis.required_width(canvas)? + self.margin;
        let xh = self.x_axis.required_height(canvas)? + self.margin;

        let regions = LayoutRegions {
            plot: BoundingBox::new(
                container.rel_x(yw),
                container.rel_y(0.0),
                container.w - yw,
                container.h - xh,
            ),
            y_axis: BoundingBox::new(
                container.rel_x(0.0),
                container.rel_y(0.0),
                yw,
                container.h - xh,
            ),
            x_axis: BoundingBox::new(
                container.rel_x(yw),
                container.rel_y(container.h) - xh,
                container.w - yw,
                xh,
            ),
        };
        log::debug!(
            "dynamic layout in {:?}: plot {:?}, y axis {:?}, x axis {:?}",
            container,
            regions.plot,
            regions.y_axis,
            regions.x_axis
        );
        Ok(regions)
    }
}

impl Renderable for DynamicLayout {
    fn render(&self, canvas: &mut dyn Canvas, container: BoundingBox) -> Result<()> {
        let r = self.regions(canvas, container)?;
        for p in &self.plots {
            p.render(canvas, r.plot)?;
        }
        self.y_axis.render(canvas, r.y_axis)?;
        self.x_axis.render(canvas, r.x_axis)
    }
}
