//! Range and merge helpers over raw value slices.

use chrono::{DateTime, Utc};

/// True (min, max) of a slice, ignoring NaN. `None` when there is nothing to compare.
pub fn float_range(values: &[f64]) -> Option<(f64, f64)> {
    let finite = values.iter().copied().filter(|v| !v.is_nan());
    let mut out: Option<(f64, f64)> = None;
    for v in finite {
        out = Some(match out {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        });
    }
    out
}

/// Overall (min, max) across several slices.
pub fn floats_range<'a, I>(slices: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    slices
        .into_iter()
        .filter_map(float_range)
        .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
}

/// Element-wise sum of all slices. The result is as long as the longest input.
pub fn additive_float_merge<'a, I>(slices: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut res: Vec<f64> = Vec::new();
    for sl in slices {
        for (k, v) in sl.iter().enumerate() {
            match res.get_mut(k) {
                Some(acc) => *acc += v,
                None => res.push(*v),
            }
        }
    }
    res
}

/// Earliest and latest timestamp.
pub fn time_range(times: &[DateTime<Utc>]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let min = times.iter().min()?;
    let max = times.iter().max()?;
    Some((*min, *max))
}

/// Span between the earliest and latest timestamp (zero for fewer than two).
pub fn time_series_duration(times: &[DateTime<Utc>]) -> chrono::Duration {
    time_range(times)
        .map(|(min, max)| max - min)
        .unwrap_or_else(chrono::Duration::zero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_skips_nan_and_handles_empty() {
        assert_eq!(float_range(&[]), None);
        assert_eq!(float_range(&[f64::NAN, 3.0, -1.0]), Some((-1.0, 3.0)));
    }

    #[test]
    fn merge_extends_to_longest_slice() {
        let a = [1.0, 2.0];
        let b = [10.0, 20.0, 30.0];
        assert_eq!(
            additive_float_merge([&a[..], &b[..]]),
            vec![11.0, 22.0, 30.0]
        );
    }
}
