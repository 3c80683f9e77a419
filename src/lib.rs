//! plotkit
//!
//! A small charting engine: maps data series onto a 2D canvas as axes, grids and plots,
//! and composes them with grid or auto-sizing layouts. Pairs with the `plotkit` CLI.
//!
//! ### Features
//! - Ordinal, continuous, stacked and fixed scales over a shared pixel mapping
//! - Axes that truncate, thin out or rotate labels to fit their box
//! - Points, lines, bars (with per-value styling), horizontal grids and composites
//! - Pure stacking of plots onto a derived shared scale
//! - 12-column grid layout and a dynamic layout sized from measured labels
//! - Output through a recording canvas (JSON instructions) or plotters (SVG/PNG)
//!
//! ### Example
//! ```no_run
//! use std::sync::Arc;
//! use plotkit::Series;
//! use plotkit::viz::{DynamicLayout, OrdinalScale, Plot, XAxis, YAxis, YScale};
//!
//! let series = Series::from_labeled(vec!["a", "b", "c"], vec![1.0, 4.0, 2.0]);
//! let y = Arc::new(YScale::new([&series]));
//! let x = Arc::new(OrdinalScale::new(&series, 10.0));
//! let chart = DynamicLayout::new(
//!     YAxis::new(Arc::clone(&y)),
//!     XAxis::new(Arc::clone(&x)),
//!     vec![Plot::grid(Arc::clone(&y)), Plot::bars(y, x, Arc::new(series))],
//! );
//! plotkit::viz::render_to_file("chart.svg", 800, 400, &chart)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod demo;
pub mod error;
pub mod models;
pub mod stats;
pub mod style;
pub mod viz;

pub use error::{ChartError, Result};
pub use models::{Label, Series, TimeBucket};
