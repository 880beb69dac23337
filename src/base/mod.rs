//! Foundation types for the tidyts engine.
//!
//! This module provides the span primitives used throughout the organizer:
//! - [`TextRange`], [`TextSize`] - Source positions
//! - [`offset`], [`slice`] - Conversion and slicing helpers
//!
//! This module has NO dependencies on other tidyts modules.

mod span;

pub use span::{TextRange, TextSize, offset, slice};

// Re-export text-size types for convenience
pub use text_size;
