use plotkit::Series;
use plotkit::viz::{BoundingBox, HorizontalScale, OrdinalScale, Scale, VerticalScale, YScale};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn map_x_is_linear_for_any_minimum() {
    let b = BoundingBox::new(10.0, 0.0, 200.0, 50.0);
    for (min, max) in [(0.0, 10.0), (-10.0, 10.0), (5.0, 25.0), (-30.0, -10.0)] {
        let span = max - min;
        let v1 = min + span * 0.25;
        let v2 = min + span * 0.75;
        let d = b.map_x(min, max, v2) - b.map_x(min, max, v1);
        assert!(close(d, 0.5 * 200.0), "({min}, {max}) gave {d}");
        assert!(close(b.map_x(min, max, min), b.rel_x(0.0)));
        assert!(close(b.map_x(min, max, max), b.rel_x(b.w)));
    }
}

#[test]
fn map_y_puts_minimum_at_the_bottom() {
    for b in [
        BoundingBox::new(0.0, 0.0, 100.0, 100.0),
        BoundingBox::new(15.0, 40.0, 30.0, 7.5),
    ] {
        for (min, max) in [(0.0, 1.0), (-4.0, 12.0), (3.0, 9.0)] {
            assert!(close(b.map_y(min, max, min), b.rel_y(b.h)));
            assert!(close(b.map_y(min, max, max), b.rel_y(0.0)));
        }
    }
}

#[test]
fn ordinal_edges_stay_inside_offset() {
    let b = BoundingBox::new(5.0, 0.0, 300.0, 10.0);
    for n in 1..12 {
        let s = Series::from_values(vec![1.0; n]);
        let x = OrdinalScale::new(&s, 12.0);
        for i in [0, x.num_ticks() - 1] {
            let p = x.position(i, b);
            assert!(p >= b.rel_x(12.0) - 1e-9 && p <= b.rel_x(b.w - 12.0) + 1e-9);
        }
    }
}

#[test]
fn five_ticks_over_one_to_five() {
    let s = Series::from_values(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    let y = YScale::with_ticks(5, [&s]);
    assert_eq!(y.min_max(), (0.0, 5.0));
    let labels: Vec<String> = y.labels().into_iter().map(|l| l.value).collect();
    assert_eq!(labels, vec!["0.00", "1.00", "2.00", "3.00", "4.00", "5.00"]);
}

#[test]
fn negative_values_extend_the_domain_below_zero() {
    let s = Series::from_values(vec![-5.0, 5.0]);
    let y = YScale::new([&s]);
    assert_eq!(y.min_max(), (-5.0, 5.0));
    let b = BoundingBox::new(0.0, 0.0, 10.0, 100.0);
    assert!(close(y.position(0.0, b), 50.0));
}

#[test]
fn positive_values_keep_zero_baseline() {
    let s = Series::from_values(vec![3.0, 9.0]);
    let y = YScale::new([&s]);
    let b = BoundingBox::new(0.0, 0.0, 10.0, 90.0);
    assert!(close(y.position(0.0, b), 90.0));
    assert!(close(y.position(9.0, b), 0.0));
}

#[test]
fn fixed_scale_ignores_data() {
    let y = YScale::fixed_with_ticks(4, 100.0);
    assert_eq!(y.min_max(), (0.0, 100.0));
    assert_eq!(y.labels().len(), 5);
    assert_eq!(y.labels()[1].value, "25.00");
}

#[test]
fn flat_series_maps_to_finite_positions() {
    let s = Series::from_values(vec![0.0, 0.0]);
    let y = YScale::new([&s]);
    let b = BoundingBox::new(0.0, 0.0, 10.0, 40.0);
    let p = y.position(0.0, b);
    assert!(p.is_finite());
    assert_eq!(p, 40.0);
}
