//! Parse state for line-oriented markdown processing.
//!
//! [`BlockState`] is the per-document state mutated by the block
//! classifier as it walks the input lines. [`InlineState`] is the
//! per-line toggle set used by the inline scanner.

use serde::{Deserialize, Serialize};

/// The block context a line can belong to.
///
/// Exactly one of these holds at any time. Code-mode is tracked
/// separately in [`BlockState::in_code`] because the classifier runs
/// the list and quote checks ahead of the fence test, so code-mode can
/// overlap with an open list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Block {
    /// Not inside any multi-line block
    None,
    /// Inside a blockquote (`>` prefix)
    Quote,
    /// Inside an ordered list (digit-prefixed items)
    OrderedList,
    /// Inside an unordered list (`* ` prefixed items)
    UnorderedList,
}

impl Default for Block {
    fn default() -> Self {
        Block::None
    }
}

/// Per-document state for the block classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockState {
    /// Current multi-line block, if any
    pub block: Block,
    /// Whether a code fence is open; independent of `block`
    pub in_code: bool,
}

impl BlockState {
    /// Create a fresh state, as it stands before the first line.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Inline formatting toggles, scoped to a single paragraph line.
///
/// Reset at the start of every paragraph line; never persists across
/// lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineState {
    /// Bold formatting is active
    pub bold: bool,
    /// Italic formatting is active
    pub italic: bool,
    /// Underline formatting is active
    pub underline: bool,
}
