//! Text fitting: truncation, label reduction and label extents.
//!
//! Every function measures through the canvas, so callers must have applied the font
//! that will be used for drawing before calling in here.

use super::canvas::Canvas;
use super::types::DEFAULT_MARGIN;
use crate::error::Result;
use crate::models::Label;

/// Drop trailing characters until `text` measures at most `max_px` wide.
/// Text that already fits is returned unchanged.
pub fn truncate_to_width(canvas: &dyn Canvas, text: &str, max_px: f64) -> Result<String> {
    let mut out: String = text.to_string();
    loop {
        if out.is_empty() {
            return Ok(out);
        }
        let (w, _) = canvas.measure_string(&out)?;
        if w <= max_px {
            return Ok(out);
        }
        out.pop();
    }
}

/// Sum of label widths, each padded by `margins`.
pub fn total_labels_width(canvas: &dyn Canvas, labels: &[Label], margins: f64) -> Result<f64> {
    let mut total = 0.0;
    for l in labels {
        let (w, _) = canvas.measure_string(&l.value)?;
        total += w + margins;
    }
    Ok(total)
}

/// Halve the label set (keeping every other label) until the padded total width fits
/// `space`, or nothing is left.
pub fn reduce_labels_to_fit(
    canvas: &dyn Canvas,
    labels: Vec<Label>,
    space: f64,
) -> Result<Vec<Label>> {
    let original = labels.len();
    let mut labels = labels;
    loop {
        if labels.is_empty() {
            break;
        }
        if total_labels_width(canvas, &labels, DEFAULT_MARGIN * 2.0)? <= space {
            break;
        }
        // Keep even positions. A single label that still does not fit leaves an empty set.
        if labels.len() == 1 {
            labels.clear();
            break;
        }
        labels = labels
            .into_iter()
            .enumerate()
            .filter(|(k, _)| k % 2 == 0)
            .map(|(_, l)| l)
            .collect();
    }
    if labels.len() != original {
        log::debug!(
            "reduced {} labels to {} to fit {:.1}px",
            original,
            labels.len(),
            space
        );
    }
    Ok(labels)
}

/// Width and height of the widest label.
pub fn widest_label_size(canvas: &dyn Canvas, labels: &[Label]) -> Result<(f64, f64)> {
    let mut best = (0.0, 0.0);
    for l in labels {
        let (w, h) = canvas.measure_string(&l.value)?;
        if w > best.0 {
            best = (w, h);
        }
    }
    Ok(best)
}

/// Height of the tallest label.
pub fn tallest_label_height(canvas: &dyn Canvas, labels: &[Label]) -> Result<f64> {
    let mut best: f64 = 0.0;
    for l in labels {
        let (_, h) = canvas.measure_string(&l.value)?;
        best = best.max(h);
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::recording::RecordingCanvas;

    fn labels(n: usize) -> Vec<Label> {
        (0..n).map(|i| Label::new(format!("L{i:02}"), i)).collect()
    }

    #[test]
    fn truncate_is_noop_when_fitting() {
        let c = RecordingCanvas::new();
        let once = truncate_to_width(&c, "hello world", 40.0).unwrap();
        assert!(once.len() < "hello world".len());
        assert_eq!(truncate_to_width(&c, &once, 40.0).unwrap(), once);
        assert_eq!(truncate_to_width(&c, "hi", 1000.0).unwrap(), "hi");
    }

    #[test]
    fn truncate_handles_multibyte() {
        let c = RecordingCanvas::new();
        // 12px font: 7.2px per char
        assert_eq!(truncate_to_width(&c, "ÄÖÜäöü", 22.0).unwrap(), "ÄÖÜ");
    }

    #[test]
    fn reduction_keeps_even_positions() {
        let c = RecordingCanvas::new();
        // "L00" is 3 chars -> 22px (ceil 21.6) + 16 margin = 38px each
        let out = reduce_labels_to_fit(&c, labels(8), 200.0).unwrap();
        assert_eq!(
            out.iter().map(|l| l.tick).collect::<Vec<_>>(),
            vec![0, 2, 4, 6]
        );
    }

    #[test]
    fn reduction_of_empty_is_empty() {
        let c = RecordingCanvas::new();
        assert!(reduce_labels_to_fit(&c, vec![], 10.0).unwrap().is_empty());
    }

    #[test]
    fn single_label_that_never_fits_is_dropped() {
        let c = RecordingCanvas::new();
        assert!(reduce_labels_to_fit(&c, labels(1), 5.0).unwrap().is_empty());
    }
}
