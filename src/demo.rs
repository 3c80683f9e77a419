//! Synthetic data and ready-made charts for demos, docs and smoke tests.
//!
//! The generators are deterministic so rendered demo output is reproducible.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::models::Series;
use crate::style::{LineDash, Rgba, StyleOp, Styles};
use crate::viz::{
    AxisStyle, DynamicLayout, GridColumn, GridLayout, GridRow, OrdinalScale, Plot, Renderable,
    XAxis, YAxis, YScale, stack_plots,
};

/// `i²` for `i` in `0..num`.
pub fn gen_test_data(num: usize) -> Vec<f64> {
    (0..num).map(|i| (i * i) as f64).collect()
}

/// `num` copies of `val`.
pub fn gen_test_data_flat(num: usize, val: f64) -> Vec<f64> {
    vec![val; num]
}

/// [`gen_test_data`] in reverse order.
pub fn gen_test_data_reversed(num: usize) -> Vec<f64> {
    let mut v = gen_test_data(num);
    v.reverse();
    v
}

/// `1 + sin(i)`, always within `0..=2`.
pub fn gen_sin_wave(num: usize) -> Vec<f64> {
    (0..num).map(|i| 1.0 + (i as f64).sin()).collect()
}

/// Hourly timestamps starting at 2020-01-01T00:00:00Z.
pub fn gen_times(num: usize) -> Vec<DateTime<Utc>> {
    let start = DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(1_577_836_800);
    (0..num as i64).map(|i| start + Duration::hours(i)).collect()
}

/// `S01E01`, `S01E02`, ... with thirteen episodes per season.
pub fn gen_episode_labels(num: usize) -> Vec<String> {
    (0..num)
        .map(|i| format!("S{:02}E{:02}", i / 13 + 1, i % 13 + 1))
        .collect()
}

/// Built-in example charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoChart {
    /// Bars over a background grid in a 12-column grid layout.
    Bars,
    /// Five stacked bar series plus a line on a mirrored right-hand axis.
    Stacked,
    /// Single line plot.
    Lines,
    /// Bare line without axes.
    Sparkline,
    /// Hourly time series with bucketed labels.
    Timeseries,
    /// Per-value coloured bars with rotated episode labels.
    Ratings,
    /// Stacked bars, a dashed line and points in a dynamic layout.
    Mixed,
}

impl DemoChart {
    pub const ALL: [DemoChart; 7] = [
        DemoChart::Bars,
        DemoChart::Stacked,
        DemoChart::Lines,
        DemoChart::Sparkline,
        DemoChart::Timeseries,
        DemoChart::Ratings,
        DemoChart::Mixed,
    ];

    /// Canvas size the chart is designed for.
    pub fn default_size(&self) -> (u32, u32) {
        match self {
            DemoChart::Sparkline => (882, 88),
            DemoChart::Ratings => (1400, 600),
            _ => (800, 400),
        }
    }

    pub fn build(&self) -> Box<dyn Renderable> {
        match self {
            DemoChart::Bars => Box::new(bars_chart()),
            DemoChart::Stacked => Box::new(stacked_chart()),
            DemoChart::Lines => Box::new(lines_chart()),
            DemoChart::Sparkline => Box::new(sparkline_chart()),
            DemoChart::Timeseries => Box::new(timeseries_chart()),
            DemoChart::Ratings => Box::new(ratings_chart()),
            DemoChart::Mixed => Box::new(mixed_chart()),
        }
    }
}

/// Plot in 11 of 12 columns next to a one-column y axis, with the x axis in a thin row
/// underneath.
fn axis_grid(y_axis: YAxis, x_axis: XAxis, plot: Plot) -> GridLayout {
    GridLayout::twelve_col(vec![
        GridRow::new(
            0.95,
            vec![GridColumn::new(1, y_axis), GridColumn::new(11, plot)],
        ),
        GridRow::new(0.05, vec![GridColumn::spacer(1), GridColumn::new(11, x_axis)]),
    ])
}

fn bars_chart() -> GridLayout {
    let series = Series::from_labeled(gen_episode_labels(8), gen_sin_wave(8));
    let y = Arc::new(YScale::with_ticks(10, [&series]));
    // half the bar width, so the outer bars stay inside the box
    let x = Arc::new(OrdinalScale::new(&series, 25.0));
    let series = Arc::new(series);
    let plot = Plot::composite(vec![
        Plot::grid(Arc::clone(&y)),
        Plot::bars(Arc::clone(&y), Arc::clone(&x), series).with_bar_max_width(50.0),
    ]);
    axis_grid(YAxis::new(y), XAxis::new(x), plot)
}

/// Half falling, half rising values.
fn valley(num: usize) -> Vec<f64> {
    let mut v = gen_test_data_reversed(num / 2);
    v.extend(gen_test_data(num / 2));
    v
}

fn stacked_bars(series: &Arc<Series>, x: &Arc<OrdinalScale>, n: usize) -> Vec<Plot> {
    (0..n)
        .map(|i| {
            let y = Arc::new(YScale::with_ticks(10, [&**series]));
            Plot::bars(y, Arc::clone(x), Arc::clone(series)).with_styles(Styles::plot_default(i))
        })
        .collect()
}

fn stacked_chart() -> GridLayout {
    let series = Arc::new(Series::from_values(valley(22)));
    let series2 = Series::from_values(gen_test_data_reversed(22));
    let x = Arc::new(OrdinalScale::new(&series, 10.0));

    let (stacked, stacked_scale) = stack_plots(&stacked_bars(&series, &x, 5));

    let right_scale = Arc::new(YScale::with_ticks(10, [&series2]));
    let line = Plot::lines(Arc::clone(&right_scale), Arc::clone(&x), Arc::new(series2))
        .with_style([StyleOp::Color(Rgba::BLACK), StyleOp::LineWidth(2.0)]);

    let mut plots = vec![Plot::grid(Arc::clone(&stacked_scale))];
    plots.extend(stacked);
    plots.push(line);

    GridLayout::twelve_col(vec![
        GridRow::new(
            0.95,
            vec![
                GridColumn::new(1, YAxis::new(stacked_scale)),
                GridColumn::new(10, Plot::composite(plots)),
                GridColumn::new(1, YAxis::new(right_scale).mirrored()),
            ],
        ),
        GridRow::new(
            0.05,
            vec![
                GridColumn::spacer(1),
                GridColumn::new(10, XAxis::new(x)),
                GridColumn::spacer(1),
            ],
        ),
    ])
}

fn lines_chart() -> GridLayout {
    let series = Series::from_values(gen_test_data(22));
    let y = Arc::new(YScale::with_ticks(10, [&series]));
    let x = Arc::new(OrdinalScale::new(&series, 0.0));
    let plot = Plot::lines(Arc::clone(&y), Arc::clone(&x), Arc::new(series));
    let y_axis = YAxis::new(y).with_style(
        AxisStyle::default().with_font([StyleOp::Color(Rgba::rgb(255, 0, 0))]),
    );
    let x_axis = XAxis::new(x).with_style(
        AxisStyle::default().with_font([StyleOp::Color(Rgba::rgb(0, 0, 255))]),
    );
    axis_grid(y_axis, x_axis, plot)
}

fn sparkline_chart() -> Plot {
    let series = Series::from_values(gen_sin_wave(128));
    let y = Arc::new(YScale::with_ticks(10, [&series]));
    let x = Arc::new(OrdinalScale::new(&series, 0.0));
    Plot::lines(y, x, Arc::new(series)).with_styles(Styles::new(vec![
        StyleOp::LineWidth(1.0),
        StyleOp::Color(Rgba::rgb(170, 57, 57)),
    ]))
}

fn timeseries_chart() -> GridLayout {
    let series = Series::from_time_values(&gen_times(23), gen_test_data(23));
    let y = Arc::new(YScale::with_ticks(10, [&series]));
    let x = Arc::new(OrdinalScale::new(&series, 0.0));
    let plot = Plot::lines(Arc::clone(&y), Arc::clone(&x), Arc::new(series));
    axis_grid(YAxis::new(y), XAxis::new(x), plot)
}

fn rating_style(v: f64) -> Styles {
    let color = if v < 1.0 {
        Rgba::rgb(220, 0, 0)
    } else if v < 3.0 {
        Rgba::rgb(245, 138, 39)
    } else {
        Rgba::rgb(23, 220, 0)
    };
    Styles::new(vec![StyleOp::Color(color)])
}

fn ratings_chart() -> DynamicLayout {
    let n = 60;
    let ratings: Vec<f64> = gen_sin_wave(n).into_iter().map(|v| v * 2.5).collect();
    let series = Series::from_labeled(gen_episode_labels(n), ratings);
    let y = Arc::new(YScale::with_ticks(5, [&series]));
    let x = Arc::new(OrdinalScale::new(&series, 0.0));
    let bars = Plot::bars(Arc::clone(&y), Arc::clone(&x), Arc::new(series))
        .with_style([StyleOp::Color(Rgba::rgb(255, 0, 0))])
        .with_style_fn(rating_style);
    DynamicLayout::new(
        YAxis::new(Arc::clone(&y)),
        XAxis::compact(x),
        vec![Plot::grid(y), bars],
    )
}

fn mixed_chart() -> DynamicLayout {
    let series = Arc::new(Series::from_values(valley(22)));
    let flat = Arc::new(Series::new(None, gen_test_data_flat(22, 50.0)));
    let x = Arc::new(OrdinalScale::new(&series, 10.0));

    let mut contributors = stacked_bars(&series, &x, 5);
    contributors[0] = contributors[0].clone().with_style([
        StyleOp::Color(Rgba::rgb(255, 0, 0)),
        StyleOp::from(LineDash::Dash),
    ]);
    let (stacked, scale) = stack_plots(&contributors);

    let mut plots = vec![Plot::grid(Arc::clone(&scale))];
    plots.extend(stacked);
    plots.push(
        Plot::lines(Arc::clone(&scale), Arc::clone(&x), Arc::clone(&series)).with_style([
            StyleOp::Color(Rgba::BLACK),
            StyleOp::from(LineDash::Dash),
        ]),
    );
    plots.push(
        Plot::points(Arc::clone(&scale), Arc::clone(&x), flat)
            .with_point_size(5.0)
            .with_style([StyleOp::Color(Rgba::rgb(0, 0, 255))]),
    );

    DynamicLayout::new(YAxis::new(scale), XAxis::new(x), plots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::{BoundingBox, RecordingCanvas};

    #[test]
    fn generators_have_requested_length() {
        assert_eq!(gen_test_data(4), vec![0.0, 1.0, 4.0, 9.0]);
        assert_eq!(gen_test_data_reversed(3), vec![4.0, 1.0, 0.0]);
        assert_eq!(gen_test_data_flat(2, 5.0), vec![5.0, 5.0]);
        assert!(gen_sin_wave(50).iter().all(|v| (0.0..=2.0).contains(v)));
    }

    #[test]
    fn episode_labels_roll_over_seasons() {
        let labels = gen_episode_labels(15);
        assert_eq!(labels[0], "S01E01");
        assert_eq!(labels[12], "S01E13");
        assert_eq!(labels[13], "S02E01");
    }

    #[test]
    fn times_are_hourly() {
        let t = gen_times(3);
        assert_eq!(t[0].to_rfc3339(), "2020-01-01T00:00:00+00:00");
        assert_eq!(t[2] - t[1], Duration::hours(1));
    }

    #[test]
    fn every_demo_renders_with_balanced_state() {
        for chart in DemoChart::ALL {
            let (w, h) = chart.default_size();
            let mut c = RecordingCanvas::new();
            chart
                .build()
                .render(&mut c, BoundingBox::from_canvas_size(w, h))
                .unwrap();
            assert!(!c.commands().is_empty(), "{chart:?} drew nothing");
            assert_eq!(c.state_depth(), 0, "{chart:?} leaked state");
        }
    }
}
