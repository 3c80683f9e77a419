use std::sync::Arc;

use plotkit::Series;
use plotkit::viz::{OrdinalScale, Plot, VerticalScale, YScale, stack_plots};

fn bar(values: Vec<f64>, x: &Arc<OrdinalScale>) -> Plot {
    let s = Series::from_values(values);
    let y = Arc::new(YScale::new([&s]));
    Plot::bars(y, Arc::clone(x), Arc::new(s))
}

#[test]
fn three_equal_series_stack_to_thirty() {
    let x = Arc::new(OrdinalScale::new(&Series::from_values(vec![0.0; 3]), 0.0));
    let plots: Vec<Plot> = (0..3).map(|_| bar(vec![10.0, 10.0, 10.0], &x)).collect();
    let (stacked, scale) = stack_plots(&plots);

    // reversed: the full cumulative series comes first
    assert_eq!(stacked[0].series().unwrap().ys(), &[30.0, 30.0, 30.0]);
    assert_eq!(stacked[1].series().unwrap().ys(), &[20.0, 20.0, 20.0]);
    assert_eq!(stacked[2].series().unwrap().ys(), &[10.0, 10.0, 10.0]);
    assert_eq!(scale.min_max(), (10.0, 30.0));
}

#[test]
fn cumulative_values_equal_column_sums() {
    let columns = vec![
        vec![1.0, 5.0, 2.0, 0.5],
        vec![3.0, 0.0, 7.0, 1.5],
        vec![2.5, 2.5, 2.5, 2.5],
        vec![0.0, 9.0, 1.0, 4.0],
    ];
    let x = Arc::new(OrdinalScale::new(&Series::from_values(vec![0.0; 4]), 0.0));
    let plots: Vec<Plot> = columns.iter().map(|c| bar(c.clone(), &x)).collect();
    let (stacked, scale) = stack_plots(&plots);

    let sums: Vec<f64> = (0..4).map(|k| columns.iter().map(|c| c[k]).sum()).collect();
    assert_eq!(stacked[0].series().unwrap().ys(), sums.as_slice());

    let max = sums.iter().copied().fold(f64::MIN, f64::max);
    assert_eq!(scale.min_max().1, max);
}

#[test]
fn composite_children_share_the_stacked_scale() {
    let x = Arc::new(OrdinalScale::new(&Series::from_values(vec![0.0; 2]), 0.0));
    let first = bar(vec![1.0, 2.0], &x);
    let composite = Plot::composite(vec![Plot::grid(Arc::new(YScale::fixed(1.0)))]);
    let (stacked, scale) = stack_plots(&[first, composite]);

    match &stacked[0] {
        Plot::Composite(children) => {
            assert!(Arc::ptr_eq(children[0].y_scale().unwrap(), &scale));
        }
        other => panic!("expected composite, got {:?}", other.kind()),
    }
    assert_eq!(stacked[1].series().unwrap().ys(), &[1.0, 2.0]);
}
