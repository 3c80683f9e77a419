//! Error type shared by every render path.
//!
//! Only the drawing surface and the text measurement service can fail. Everything
//! computed inside the crate (normalization, label fitting, layout arithmetic) is total.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// The drawing surface rejected a primitive.
    #[error("drawing backend error: {0}")]
    Backend(String),

    /// The requested font is unavailable or could not be loaded.
    #[error("font error: {0}")]
    Font(String),

    /// Text could not be measured under the current font state.
    #[error("text measurement failed: {0}")]
    Measure(String),

    /// A layout was configured in a way that cannot be rendered.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
