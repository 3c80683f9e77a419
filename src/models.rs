use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::time_series_duration;

/// Display text of a tick plus the tick index it came from.
///
/// Reduction and truncation only ever drop or shorten labels, so `tick` always maps a
/// surviving label back to its position on the scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub value: String,
    pub tick: usize,
}

impl Label {
    pub fn new(value: impl Into<String>, tick: usize) -> Self {
        Self {
            value: value.into(),
            tick,
        }
    }
}

/// Ordered numeric values with parallel category labels.
///
/// Built once from caller data and never mutated afterwards; merged series are new values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl Series {
    /// Build a series. Missing labels are synthesized as `"0"`, `"1"`, ...
    pub fn new(labels: Option<Vec<String>>, values: Vec<f64>) -> Self {
        let labels = labels.unwrap_or_else(|| (0..values.len()).map(|i| i.to_string()).collect());
        Self { labels, values }
    }

    /// Value-only series with index labels.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self::new(None, values)
    }

    /// Series with caller-provided category labels.
    pub fn from_labeled<S: Into<String>>(labels: Vec<S>, values: Vec<f64>) -> Self {
        Self::new(Some(labels.into_iter().map(Into::into).collect()), values)
    }

    /// Series keyed by timestamps. Labels are formatted with a bucket chosen from the
    /// overall time span, see [`TimeBucket::for_span`].
    pub fn from_time_values(times: &[DateTime<Utc>], values: Vec<f64>) -> Self {
        let bucket = if times.len() > 1 {
            TimeBucket::for_span(time_series_duration(times))
        } else {
            TimeBucket::Minute
        };
        let labels = times.iter().map(|t| bucket.format(t)).collect();
        Self { labels, values }
    }

    /// Value at `i`, or `0.0` when out of range.
    pub fn y(&self, i: usize) -> f64 {
        self.values.get(i).copied().unwrap_or(0.0)
    }

    /// Label at `i`, or `""` when out of range.
    pub fn x(&self, i: usize) -> &str {
        self.labels.get(i).map(String::as_str).unwrap_or("")
    }

    pub fn ys(&self) -> &[f64] {
        &self.values
    }

    pub fn xs(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Element-wise sum with `other`, keeping this series' labels and length.
    /// Positions missing from `other` (or a missing `other`) count as zero.
    pub fn additive_merge(&self, other: Option<&Series>) -> Series {
        let values = self
            .values
            .iter()
            .enumerate()
            .map(|(k, v)| v + other.map_or(0.0, |o| o.y(k)))
            .collect();
        Series {
            labels: (0..self.values.len()).map(|k| self.x(k).to_string()).collect(),
            values,
        }
    }
}

/// Granularity used to label time series ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBucket {
    /// Single timestamp or unknown span: `2020-01-01 13:00`
    Minute,
    /// Span under one day: `13:00`
    Hour,
    /// Span under 90 days: `2020-01-01`
    Day,
    /// Anything longer: `2020-01`
    Month,
}

impl TimeBucket {
    pub fn for_span(span: chrono::Duration) -> Self {
        if span < chrono::Duration::days(1) {
            TimeBucket::Hour
        } else if span < chrono::Duration::days(90) {
            TimeBucket::Day
        } else {
            TimeBucket::Month
        }
    }

    pub fn format(&self, t: &DateTime<Utc>) -> String {
        let fmt = match self {
            TimeBucket::Minute => "%Y-%m-%d %H:%M",
            TimeBucket::Hour => "%H:%M",
            TimeBucket::Day => "%Y-%m-%d",
            TimeBucket::Month => "%Y-%m",
        };
        t.format(fmt).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn labels_are_synthesized() {
        let s = Series::from_values(vec![1.0, 2.0, 3.0]);
        assert_eq!(s.xs(), &["0", "1", "2"]);
    }

    #[test]
    fn out_of_range_access_returns_sentinels() {
        let s = Series::from_labeled(vec!["a"], vec![1.0, 2.0]);
        assert_eq!(s.y(5), 0.0);
        assert_eq!(s.x(1), "");
        assert_eq!(s.x(0), "a");
    }

    #[test]
    fn merge_with_shorter_or_missing_series() {
        let a = Series::from_labeled(vec!["a", "b", "c"], vec![1.0, 2.0, 3.0]);
        let b = Series::from_values(vec![10.0]);
        let m = a.additive_merge(Some(&b));
        assert_eq!(m.ys(), &[11.0, 2.0, 3.0]);
        assert_eq!(m.xs(), a.xs());
        assert_eq!(a.additive_merge(None), a);
        // input untouched
        assert_eq!(a.ys(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn hourly_timestamps_use_clock_labels() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let times: Vec<_> = (0..3).map(|h| start + chrono::Duration::hours(h)).collect();
        let s = Series::from_time_values(&times, vec![1.0, 2.0, 3.0]);
        assert_eq!(s.xs(), &["00:00", "01:00", "02:00"]);
    }

    #[test]
    fn long_spans_use_month_labels() {
        let a = Utc.with_ymd_and_hms(2020, 1, 15, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap();
        let s = Series::from_time_values(&[a, b], vec![1.0, 2.0]);
        assert_eq!(s.xs(), &["2020-01", "2021-03"]);
    }
}
