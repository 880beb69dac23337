//! Source text positions and ranges.

// Re-export from text-size for compatibility
pub use text_size::TextRange;
pub use text_size::TextSize;

/// Convert a parser byte offset into a [`TextSize`].
///
/// The external parser reports offsets as `usize`; documents larger than
/// 4 GiB are not supported, matching the `text-size` representation.
#[inline]
pub fn offset(value: usize) -> TextSize {
    TextSize::new(value as u32)
}

/// Slice `text` with a `[start, end)` span.
#[inline]
pub fn slice(text: &str, start: TextSize, end: TextSize) -> &str {
    &text[usize::from(start)..usize::from(end)]
}
