//! Scales: map a tick index or a data value to a pixel coordinate inside a box.
//!
//! Horizontal scales are ordinal ([`OrdinalScale`]). Vertical scales are a closed set of
//! variants behind [`YScale`]:
//!
//! - `Continuous`: zero-floored range of the supplied series
//! - `Stacked`: smallest single contributor up to the tallest cumulative total
//! - `Fixed`: `0..max` regardless of data
//!
//! Pixel positions of every vertical variant are computed over the zero-floored domain
//! `[min(0, lo), max(0, hi)]`, so bars, gridlines and ticks share one baseline.

use super::types::BoundingBox;
use crate::models::{Label, Series};
use crate::stats::{additive_float_merge, floats_range};

/// Tick count used when the caller does not configure one.
pub const DEFAULT_NUM_TICKS: usize = 10;

pub trait Scale {
    /// Number of ticks. Stable for the lifetime of the scale.
    fn num_ticks(&self) -> usize;
    fn labels(&self) -> Vec<Label>;
}

pub trait HorizontalScale: Scale {
    /// Pixel x of tick `index`.
    fn position(&self, index: usize, b: BoundingBox) -> f64;
    /// Distance kept between the outermost ticks and the box edges.
    fn offset(&self) -> f64;
}

pub trait VerticalScale: Scale {
    fn min_max(&self) -> (f64, f64);

    /// Range used for pixel mapping.
    fn domain(&self) -> (f64, f64) {
        let (lo, hi) = self.min_max();
        (lo.min(0.0), hi.max(0.0))
    }

    /// Pixel y of `value`.
    fn position(&self, value: f64, b: BoundingBox) -> f64 {
        let (lo, hi) = self.domain();
        b.map_y(lo, hi, value)
    }

    /// Data value at tick `tick`; ticks are evenly spaced over the domain.
    fn tick_value(&self, tick: usize) -> f64 {
        let (lo, hi) = self.domain();
        let n = self.num_ticks();
        if n == 0 {
            return lo;
        }
        lo + (hi - lo) / n as f64 * tick as f64
    }
}

/// `num_ticks + 1` labels, one per tick value, two decimals.
fn value_labels<S: VerticalScale + ?Sized>(scale: &S) -> Vec<Label> {
    let n = scale.num_ticks();
    if n == 0 {
        return Vec::new();
    }
    (0..=n)
        .map(|i| Label::new(format!("{:.2}", scale.tick_value(i)), i))
        .collect()
}

/// Ordinal scale over category positions.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale {
    labels: Vec<String>,
    offset: f64,
}

impl OrdinalScale {
    /// Ticks are taken from the series labels. `offset` keeps the first and last tick that
    /// far from the box edges (half a bar width is a good value for bar charts).
    pub fn new(series: &Series, offset: f64) -> Self {
        Self {
            labels: series.xs().to_vec(),
            offset: offset.max(0.0),
        }
    }
}

impl Scale for OrdinalScale {
    fn num_ticks(&self) -> usize {
        self.labels.len()
    }

    fn labels(&self) -> Vec<Label> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, l)| Label::new(l.clone(), i))
            .collect()
    }
}

impl HorizontalScale for OrdinalScale {
    fn position(&self, index: usize, b: BoundingBox) -> f64 {
        let n = self.num_ticks();
        match n {
            0 => b.rel_x(self.offset),
            1 => b.rel_x(b.w / 2.0),
            _ if index >= n => b.rel_x(b.w - self.offset),
            _ => {
                // the usable width is the box with the offset removed on both sides
                let inner = BoundingBox::new(b.x + self.offset, b.y, b.w - self.offset * 2.0, b.h);
                inner.map_x(0.0, (n - 1) as f64, index as f64)
            }
        }
    }

    fn offset(&self) -> f64 {
        self.offset
    }
}

/// Linear scale over the zero-floored range of one or more series.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousScale {
    min: f64,
    max: f64,
    num_ticks: usize,
}

impl ContinuousScale {
    pub fn new<'a, I>(num_ticks: usize, series: I) -> Self
    where
        I: IntoIterator<Item = &'a Series>,
    {
        let (lo, hi) = floats_range(series.into_iter().map(Series::ys)).unwrap_or((0.0, 0.0));
        Self {
            min: lo.min(0.0),
            max: hi.max(0.0),
            num_ticks,
        }
    }
}

impl Scale for ContinuousScale {
    fn num_ticks(&self) -> usize {
        self.num_ticks
    }

    fn labels(&self) -> Vec<Label> {
        value_labels(self)
    }
}

impl VerticalScale for ContinuousScale {
    fn min_max(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Scale spanning stacked totals: min of the original contributors, max of the
/// cumulative sums at each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedScale {
    min: f64,
    max: f64,
    num_ticks: usize,
}

impl StackedScale {
    /// `series` are the original, unmerged contributors.
    pub fn new<'a, I>(num_ticks: usize, series: I) -> Self
    where
        I: IntoIterator<Item = &'a Series>,
        I::IntoIter: Clone,
    {
        let iter = series.into_iter();
        let min = floats_range(iter.clone().map(Series::ys))
            .map(|(lo, _)| lo)
            .unwrap_or(0.0);
        let totals = additive_float_merge(iter.map(Series::ys));
        let max = totals.iter().copied().fold(0.0, f64::max);
        Self {
            min,
            max,
            num_ticks,
        }
    }
}

impl Scale for StackedScale {
    fn num_ticks(&self) -> usize {
        self.num_ticks
    }

    fn labels(&self) -> Vec<Label> {
        value_labels(self)
    }
}

impl VerticalScale for StackedScale {
    fn min_max(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Caller-chosen ceiling, ignoring data. Keeps the scale stable across renders.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedScale {
    max: f64,
    num_ticks: usize,
}

impl FixedScale {
    pub fn new(num_ticks: usize, max: f64) -> Self {
        Self { max, num_ticks }
    }
}

impl Scale for FixedScale {
    fn num_ticks(&self) -> usize {
        self.num_ticks
    }

    fn labels(&self) -> Vec<Label> {
        value_labels(self)
    }
}

impl VerticalScale for FixedScale {
    fn min_max(&self) -> (f64, f64) {
        (0.0, self.max)
    }
}

/// Vertical scale variants.
#[derive(Debug, Clone, PartialEq)]
pub enum YScale {
    Continuous(ContinuousScale),
    Stacked(StackedScale),
    Fixed(FixedScale),
}

impl YScale {
    /// Continuous scale with [`DEFAULT_NUM_TICKS`] ticks.
    pub fn new<'a, I>(series: I) -> Self
    where
        I: IntoIterator<Item = &'a Series>,
    {
        Self::with_ticks(DEFAULT_NUM_TICKS, series)
    }

    /// Continuous scale with an explicit tick count.
    pub fn with_ticks<'a, I>(num_ticks: usize, series: I) -> Self
    where
        I: IntoIterator<Item = &'a Series>,
    {
        YScale::Continuous(ContinuousScale::new(num_ticks, series))
    }

    pub fn stacked<'a, I>(series: I) -> Self
    where
        I: IntoIterator<Item = &'a Series>,
        I::IntoIter: Clone,
    {
        Self::stacked_with_ticks(DEFAULT_NUM_TICKS, series)
    }

    pub fn stacked_with_ticks<'a, I>(num_ticks: usize, series: I) -> Self
    where
        I: IntoIterator<Item = &'a Series>,
        I::IntoIter: Clone,
    {
        YScale::Stacked(StackedScale::new(num_ticks, series))
    }

    pub fn fixed(max: f64) -> Self {
        Self::fixed_with_ticks(DEFAULT_NUM_TICKS, max)
    }

    pub fn fixed_with_ticks(num_ticks: usize, max: f64) -> Self {
        YScale::Fixed(FixedScale::new(num_ticks, max))
    }

    fn inner(&self) -> &dyn VerticalScale {
        match self {
            YScale::Continuous(s) => s,
            YScale::Stacked(s) => s,
            YScale::Fixed(s) => s,
        }
    }
}

impl Scale for YScale {
    fn num_ticks(&self) -> usize {
        self.inner().num_ticks()
    }

    fn labels(&self) -> Vec<Label> {
        self.inner().labels()
    }
}

impl VerticalScale for YScale {
    fn min_max(&self) -> (f64, f64) {
        self.inner().min_max()
    }
}
