//! Error types for minidown.

use thiserror::Error;

/// Main error type for minidown operations.
///
/// Every variant is fatal at the point of detection: processing stops,
/// and only output flushed before the failing line remains valid.
#[derive(Error, Debug)]
pub enum MinidownError {
    /// IO error during input acquisition or output writing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unbalanced `[`, `]`, `(`, or `)` in a link or image construct
    #[error("malformed inline syntax: {0}")]
    MalformedInlineSyntax(String),

    /// Ordered-list line without a `.` separator
    #[error("malformed list item: {0}")]
    MalformedListItem(String),
}

/// Result type alias for minidown operations
pub type Result<T> = std::result::Result<T, MinidownError>;
