use std::sync::Arc;

use plotkit::style::FontSpec;
use plotkit::viz::text::{reduce_labels_to_fit, total_labels_width, truncate_to_width};
use plotkit::viz::{
    BoundingBox, OrdinalScale, RecordingCanvas, Renderable, TextMetrics, XAxis, YAxis, YScale,
};
use plotkit::{Label, Result, Series};

/// Every string measures the same.
struct FixedWidth(f64);

impl TextMetrics for FixedWidth {
    fn measure(&self, _text: &str, font: &FontSpec) -> Result<(f64, f64)> {
        Ok((self.0, font.size))
    }
}

fn labels(n: usize) -> Vec<Label> {
    (0..n).map(|i| Label::new(format!("label {i}"), i)).collect()
}

#[test]
fn forty_labels_in_three_hundred_pixels() {
    let c = RecordingCanvas::with_metrics(FixedWidth(20.0));
    let out = reduce_labels_to_fit(&c, labels(40), 300.0).unwrap();
    assert_eq!(out.len(), 5);
    assert_eq!(
        out.iter().map(|l| l.tick).collect::<Vec<_>>(),
        vec![0, 8, 16, 24, 32]
    );
}

#[test]
fn reduction_always_fits_or_empties() {
    let c = RecordingCanvas::new();
    for n in 0..60 {
        for space in [0.0, 10.0, 55.0, 300.0, 1000.0] {
            let out = reduce_labels_to_fit(&c, labels(n), space).unwrap();
            assert!(out.len() <= n);
            if !out.is_empty() {
                assert!(total_labels_width(&c, &out, 16.0).unwrap() <= space);
            }
        }
    }
}

#[test]
fn truncation_is_idempotent() {
    let c = RecordingCanvas::new();
    for text in ["", "a", "1000000.00", "a rather long axis label"] {
        for max in [0.0, 10.0, 40.0, 500.0] {
            let once = truncate_to_width(&c, text, max).unwrap();
            assert!(text.starts_with(&once));
            assert_eq!(truncate_to_width(&c, &once, max).unwrap(), once);
        }
    }
}

#[test]
fn y_axis_truncates_labels_to_its_box() {
    let s = Series::from_values(vec![123456.0]);
    let axis = YAxis::new(Arc::new(YScale::with_ticks(2, [&s])));
    let mut c = RecordingCanvas::new();
    axis.render(&mut c, BoundingBox::new(0.0, 0.0, 40.0, 100.0))
        .unwrap();
    // 32px for text: four 7.2px characters
    for t in c.texts() {
        assert!(t.chars().count() <= 4, "{t} too long");
    }
}

#[test]
fn x_axis_with_no_labels_draws_only_the_boundary() {
    let s = Series::from_values(vec![]);
    let axis = XAxis::new(Arc::new(OrdinalScale::new(&s, 0.0)));
    let mut c = RecordingCanvas::new();
    axis.render(&mut c, BoundingBox::new(0.0, 50.0, 100.0, 20.0))
        .unwrap();
    assert_eq!(c.stroked_lines(), vec![(0.0, 50.0, 100.0, 50.0)]);
    assert!(c.texts().is_empty());
}

#[test]
fn x_axis_required_height_follows_font() {
    let s = Series::from_labeled(vec!["a", "b"], vec![1.0, 2.0]);
    let x = Arc::new(OrdinalScale::new(&s, 0.0));
    let mut c = RecordingCanvas::new();
    let style = plotkit::viz::AxisStyle::default()
        .with_font([plotkit::style::StyleOp::FontFace(FontSpec::sans(20.0))]);
    let h = XAxis::new(x).with_style(style).required_height(&mut c).unwrap();
    assert_eq!(h, 20.0);
    assert_eq!(c.state_depth(), 0);
}
