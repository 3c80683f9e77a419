//! Data marks drawn against a pair of scales.

use std::fmt;
use std::sync::Arc;

use super::canvas::{Canvas, Renderable, StateGuard};
use super::scale::{HorizontalScale, OrdinalScale, Scale, VerticalScale, YScale};
use super::types::{BoundingBox, DEFAULT_MARGIN};
use crate::error::Result;
use crate::models::Series;
use crate::style::{StyleOp, Styles};

/// Per-value style override, e.g. colour bars by threshold.
pub type StyleFn = Arc<dyn Fn(f64) -> Styles + Send + Sync>;

/// Kinds of plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    /// Circle markers.
    Points,
    /// Polyline through consecutive values.
    Lines,
    /// Bars from the baseline up to each value.
    Bars,
    /// Horizontal reference lines at each vertical tick.
    Grid,
    /// Several plots drawn into the same box.
    Composite,
}

/// Rendering options shared by the series-bearing plots.
#[derive(Clone)]
pub struct PlotOptions {
    /// Applied before drawing; defaults to the first palette colour.
    pub styles: Styles,
    /// Marker radius for points, in pixels. Default 2.
    pub point_size: f64,
    /// Upper bound on bar width before the margin is removed. Default 20.
    pub bar_max_width: f64,
    pub style_fn: Option<StyleFn>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            styles: Styles::plot_default(0),
            point_size: 2.0,
            bar_max_width: 20.0,
            style_fn: None,
        }
    }
}

impl fmt::Debug for PlotOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotOptions")
            .field("styles", &self.styles)
            .field("point_size", &self.point_size)
            .field("bar_max_width", &self.bar_max_width)
            .field("style_fn", &self.style_fn.is_some())
            .finish()
    }
}

/// A series drawn against an ordinal x scale and a vertical scale.
#[derive(Debug, Clone)]
pub struct SeriesPlot {
    series: Arc<Series>,
    x_scale: Arc<OrdinalScale>,
    y_scale: Arc<YScale>,
    opts: PlotOptions,
}

impl SeriesPlot {
    pub fn new(y_scale: Arc<YScale>, x_scale: Arc<OrdinalScale>, series: Arc<Series>) -> Self {
        Self {
            series,
            x_scale,
            y_scale,
            opts: PlotOptions::default(),
        }
    }

    pub fn series(&self) -> &Arc<Series> {
        &self.series
    }

    pub fn y_scale(&self) -> &Arc<YScale> {
        &self.y_scale
    }

    pub fn x_scale(&self) -> &Arc<OrdinalScale> {
        &self.x_scale
    }

    pub fn options(&self) -> &PlotOptions {
        &self.opts
    }

    /// Same plot over a different series and vertical scale.
    pub fn with_series_and_scale(&self, series: Arc<Series>, y_scale: Arc<YScale>) -> Self {
        Self {
            series,
            y_scale,
            x_scale: Arc::clone(&self.x_scale),
            opts: self.opts.clone(),
        }
    }

    /// Pixel coordinates of every value.
    pub fn points(&self, b: BoundingBox) -> Vec<(f64, f64)> {
        self.series
            .ys()
            .iter()
            .enumerate()
            .map(|(i, v)| (self.x_scale.position(i, b), self.y_scale.position(*v, b)))
            .collect()
    }

    /// Bar width for box `b`: `max(min(w / ticks, bar_max_width) - margin, 1)`.
    pub fn bar_width(&self, b: BoundingBox) -> f64 {
        let ticks = self.x_scale.num_ticks().max(1) as f64;
        ((b.w / ticks).min(self.opts.bar_max_width) - DEFAULT_MARGIN).max(1.0)
    }

    fn render_points(&self, canvas: &mut dyn Canvas, b: BoundingBox) -> Result<()> {
        let mut canvas = StateGuard::new(canvas);
        canvas.apply_styles(&self.opts.styles)?;
        let r = self.opts.point_size;
        for (i, (x, y)) in self.points(b).into_iter().enumerate() {
            match &self.opts.style_fn {
                Some(f) => {
                    let mut inner = StateGuard::new(&mut *canvas);
                    inner.apply_styles(&f(self.series.y(i)))?;
                    inner.draw_circle(x, y, r);
                    inner.fill()?;
                }
                None => canvas.draw_circle(x, y, r),
            }
        }
        canvas.fill()
    }

    fn render_lines(&self, canvas: &mut dyn Canvas, b: BoundingBox) -> Result<()> {
        let mut canvas = StateGuard::new(canvas);
        canvas.apply_styles(&self.opts.styles)?;
        // each segment joins a point to its predecessor, so the first point draws nothing
        for pair in self.points(b).windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            canvas.draw_line(x1, y1, x0, y0);
        }
        canvas.stroke()
    }

    fn render_bars(&self, canvas: &mut dyn Canvas, b: BoundingBox) -> Result<()> {
        let mut canvas = StateGuard::new(canvas);
        canvas.apply_styles(&self.opts.styles)?;
        let bar_w = self.bar_width(b);
        let base = self.y_scale.position(0.0, b);
        for (i, v) in self.series.ys().iter().enumerate() {
            let x = self.x_scale.position(i, b) - bar_w / 2.0;
            let top = self.y_scale.position(*v, b);
            match &self.opts.style_fn {
                Some(f) => {
                    let mut inner = StateGuard::new(&mut *canvas);
                    inner.apply_styles(&f(*v))?;
                    inner.draw_rectangle(x, base, bar_w, top - base);
                    inner.fill()?;
                }
                None => canvas.draw_rectangle(x, base, bar_w, top - base),
            }
        }
        canvas.fill()
    }
}

/// Horizontal reference lines at each tick of a vertical scale.
#[derive(Debug, Clone)]
pub struct GridPlot {
    y_scale: Arc<YScale>,
    styles: Styles,
}

impl GridPlot {
    pub fn new(y_scale: Arc<YScale>) -> Self {
        Self {
            y_scale,
            styles: Styles::grid_default(),
        }
    }

    pub fn y_scale(&self) -> &Arc<YScale> {
        &self.y_scale
    }
}

impl Renderable for GridPlot {
    fn render(&self, canvas: &mut dyn Canvas, b: BoundingBox) -> Result<()> {
        let mut canvas = StateGuard::new(canvas);
        canvas.apply_styles(&self.styles)?;
        for label in self.y_scale.labels() {
            let y = self.y_scale.position(self.y_scale.tick_value(label.tick), b);
            canvas.draw_line(b.rel_x(0.0), y, b.rel_x(b.w), y);
        }
        canvas.stroke()
    }
}

/// Drawable data element.
#[derive(Debug, Clone)]
pub enum Plot {
    Points(SeriesPlot),
    Lines(SeriesPlot),
    Bars(SeriesPlot),
    Grid(GridPlot),
    Composite(Vec<Plot>),
}

impl Plot {
    pub fn points(y_scale: Arc<YScale>, x_scale: Arc<OrdinalScale>, series: Arc<Series>) -> Self {
        Plot::Points(SeriesPlot::new(y_scale, x_scale, series))
    }

    pub fn lines(y_scale: Arc<YScale>, x_scale: Arc<OrdinalScale>, series: Arc<Series>) -> Self {
        Plot::Lines(SeriesPlot::new(y_scale, x_scale, series))
    }

    pub fn bars(y_scale: Arc<YScale>, x_scale: Arc<OrdinalScale>, series: Arc<Series>) -> Self {
        Plot::Bars(SeriesPlot::new(y_scale, x_scale, series))
    }

    pub fn grid(y_scale: Arc<YScale>) -> Self {
        Plot::Grid(GridPlot::new(y_scale))
    }

    pub fn composite(plots: Vec<Plot>) -> Self {
        Plot::Composite(plots)
    }

    pub fn kind(&self) -> PlotKind {
        match self {
            Plot::Points(_) => PlotKind::Points,
            Plot::Lines(_) => PlotKind::Lines,
            Plot::Bars(_) => PlotKind::Bars,
            Plot::Grid(_) => PlotKind::Grid,
            Plot::Composite(_) => PlotKind::Composite,
        }
    }

    /// The data series, for the series-bearing kinds.
    pub fn series(&self) -> Option<&Arc<Series>> {
        self.series_plot().map(SeriesPlot::series)
    }

    pub fn y_scale(&self) -> Option<&Arc<YScale>> {
        match self {
            Plot::Points(p) | Plot::Lines(p) | Plot::Bars(p) => Some(p.y_scale()),
            Plot::Grid(g) => Some(g.y_scale()),
            Plot::Composite(_) => None,
        }
    }

    pub fn series_plot(&self) -> Option<&SeriesPlot> {
        match self {
            Plot::Points(p) | Plot::Lines(p) | Plot::Bars(p) => Some(p),
            _ => None,
        }
    }

    fn series_plot_mut(&mut self) -> Option<&mut SeriesPlot> {
        match self {
            Plot::Points(p) | Plot::Lines(p) | Plot::Bars(p) => Some(p),
            _ => None,
        }
    }

    /// Replace the style list (grid plots included).
    pub fn with_styles(mut self, styles: Styles) -> Self {
        match &mut self {
            Plot::Grid(g) => g.styles = styles,
            Plot::Composite(children) => {
                for c in children.iter_mut() {
                    *c = c.clone().with_styles(styles.clone());
                }
            }
            other => {
                if let Some(p) = other.series_plot_mut() {
                    p.opts.styles = styles;
                }
            }
        }
        self
    }

    /// Append style overrides after the current list.
    pub fn with_style<I: IntoIterator<Item = StyleOp>>(mut self, ops: I) -> Self {
        let ops: Vec<StyleOp> = ops.into_iter().collect();
        match &mut self {
            Plot::Grid(g) => g.styles.extend(ops),
            Plot::Composite(children) => {
                for c in children.iter_mut() {
                    *c = c.clone().with_style(ops.clone());
                }
            }
            other => {
                if let Some(p) = other.series_plot_mut() {
                    p.opts.styles.extend(ops);
                }
            }
        }
        self
    }

    pub fn with_point_size(mut self, size: f64) -> Self {
        if let Some(p) = self.series_plot_mut() {
            p.opts.point_size = size;
        }
        self
    }

    pub fn with_bar_max_width(mut self, width: f64) -> Self {
        if let Some(p) = self.series_plot_mut() {
            p.opts.bar_max_width = width;
        }
        self
    }

    pub fn with_style_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(f64) -> Styles + Send + Sync + 'static,
    {
        if let Some(p) = self.series_plot_mut() {
            p.opts.style_fn = Some(Arc::new(f));
        }
        self
    }

    /// Same plot with its series (if any) swapped for `series` and every vertical scale
    /// pointed at `y_scale`.
    pub(crate) fn restacked(&self, series: Option<Arc<Series>>, y_scale: &Arc<YScale>) -> Plot {
        let swap = |p: &SeriesPlot| {
            let s = series.clone().unwrap_or_else(|| Arc::clone(p.series()));
            p.with_series_and_scale(s, Arc::clone(y_scale))
        };
        match self {
            Plot::Points(p) => Plot::Points(swap(p)),
            Plot::Lines(p) => Plot::Lines(swap(p)),
            Plot::Bars(p) => Plot::Bars(swap(p)),
            Plot::Grid(g) => Plot::Grid(GridPlot {
                y_scale: Arc::clone(y_scale),
                styles: g.styles.clone(),
            }),
            Plot::Composite(children) => Plot::Composite(
                children
                    .iter()
                    .map(|c| c.restacked(None, y_scale))
                    .collect(),
            ),
        }
    }
}

impl Renderable for Plot {
    fn render(&self, canvas: &mut dyn Canvas, b: BoundingBox) -> Result<()> {
        match self {
            Plot::Points(p) => p.render_points(canvas, b),
            Plot::Lines(p) => p.render_lines(canvas, b),
            Plot::Bars(p) => p.render_bars(canvas, b),
            Plot::Grid(g) => g.render(canvas, b),
            Plot::Composite(children) => {
                for c in children {
                    c.render(canvas, b)?;
                }
                Ok(())
            }
        }
    }
}
