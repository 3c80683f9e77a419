//! Stacking: turn independent plots into cumulative ones over a shared scale.

use std::sync::Arc;

use super::plot::Plot;
use super::scale::{DEFAULT_NUM_TICKS, Scale, VerticalScale, YScale};
use crate::models::Series;

/// Stack `plots` so each series-bearing plot sits on top of the ones before it.
///
/// Plots are folded left to right: the `k`-th series becomes its own values plus the
/// merged series of plots `0..k`. The result is returned in reverse order so the tallest
/// (outermost) cumulative series is drawn first and the bottom contributor is drawn last,
/// on top. Every returned plot points at one new stacked scale built from the original
/// series. Grid plots are re-pointed at that scale and take no part in the fold, and
/// composite plots have their children re-pointed without merging.
///
/// The inputs are left untouched.
pub fn stack_plots(plots: &[Plot]) -> (Vec<Plot>, Arc<YScale>) {
    let originals: Vec<&Series> = plots
        .iter()
        .filter_map(|p| p.series().map(Arc::as_ref))
        .collect();

    let num_ticks = plots
        .iter()
        .find_map(|p| p.y_scale().map(|s| s.num_ticks()))
        .unwrap_or(DEFAULT_NUM_TICKS);
    let shared = Arc::new(YScale::stacked_with_ticks(num_ticks, originals.iter().copied()));

    let mut merged: Option<Arc<Series>> = None;
    let mut out: Vec<Plot> = Vec::with_capacity(plots.len());
    for plot in plots {
        let next = match plot.series() {
            Some(own) => {
                let m = Arc::new(own.additive_merge(merged.as_deref()));
                merged = Some(Arc::clone(&m));
                plot.restacked(Some(m), &shared)
            }
            None => plot.restacked(None, &shared),
        };
        out.push(next);
    }
    out.reverse();

    log::debug!(
        "stacked {} plots ({} series), shared range {:?}",
        plots.len(),
        originals.len(),
        shared.min_max()
    );
    (out, shared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::scale::OrdinalScale;

    fn bars(values: Vec<f64>) -> Plot {
        let s = Series::from_values(values);
        let y = Arc::new(YScale::with_ticks(5, [&s]));
        let x = Arc::new(OrdinalScale::new(&s, 0.0));
        Plot::bars(y, x, Arc::new(s))
    }

    #[test]
    fn output_is_reversed_and_cumulative() {
        let input = vec![bars(vec![1.0, 2.0]), bars(vec![10.0, 20.0])];
        let (out, scale) = stack_plots(&input);
        assert_eq!(out[0].series().unwrap().ys(), &[11.0, 22.0]);
        assert_eq!(out[1].series().unwrap().ys(), &[1.0, 2.0]);
        assert_eq!(scale.min_max(), (1.0, 22.0));
        assert_eq!(scale.num_ticks(), 5);
        for p in &out {
            assert!(Arc::ptr_eq(p.y_scale().unwrap(), &scale));
        }
    }

    #[test]
    fn inputs_are_not_mutated() {
        let input = vec![bars(vec![1.0]), bars(vec![2.0])];
        let before: Vec<Vec<f64>> = input
            .iter()
            .map(|p| p.series().unwrap().ys().to_vec())
            .collect();
        let _ = stack_plots(&input);
        let after: Vec<Vec<f64>> = input
            .iter()
            .map(|p| p.series().unwrap().ys().to_vec())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn grid_is_repointed_but_not_merged() {
        let first = bars(vec![4.0]);
        let grid = Plot::grid(Arc::clone(first.y_scale().unwrap()));
        let (out, scale) = stack_plots(&[first, grid, bars(vec![6.0])]);
        assert_eq!(out.len(), 3);
        assert!(out[1].series().is_none());
        assert!(Arc::ptr_eq(out[1].y_scale().unwrap(), &scale));
        assert_eq!(out[0].series().unwrap().ys(), &[10.0]);
    }

    #[test]
    fn empty_input_gets_default_ticks() {
        let (out, scale) = stack_plots(&[]);
        assert!(out.is_empty());
        assert_eq!(scale.num_ticks(), DEFAULT_NUM_TICKS);
        assert_eq!(scale.min_max(), (0.0, 0.0));
    }
}
