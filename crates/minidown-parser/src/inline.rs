//! Inline span scanner.
//!
//! Walks a single paragraph line character by character, toggling
//! bold/italic/underline state and delegating bracketed constructs to
//! the link and image emitters. Each emitter reports how many
//! characters it consumed so the outer cursor can advance past the
//! whole construct.

use minidown_core::{InlineState, MinidownError, Result};

/// An inline construct produced by the scanner.
///
/// Open/close spans are raw toggles: the scanner emits whatever the
/// per-line state machine produces, balanced or not, and the renderer
/// writes the tags verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    /// A run of literal characters, unescaped
    Text(String),
    BoldOpen,
    BoldClose,
    ItalicOpen,
    ItalicClose,
    UnderlineOpen,
    UnderlineClose,
    /// `[label](target)`
    Link { label: String, target: String },
    /// `![label](target)`
    Image { label: String, target: String },
}

/// Scan one paragraph line into inline spans.
///
/// Toggle state is fresh for every call; it never carries across lines.
pub fn scan_line(line: &str) -> Result<Vec<InlineSpan>> {
    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut buf = String::new();
    let mut state = InlineState::default();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '_' => {
                flush(&mut spans, &mut buf);
                state.underline = !state.underline;
                spans.push(if state.underline {
                    InlineSpan::UnderlineOpen
                } else {
                    InlineSpan::UnderlineClose
                });
                i += 1;
            }

            '*' => {
                flush(&mut spans, &mut buf);
                if i + 2 < chars.len() && chars[i + 1] == '*' && chars[i + 2] == '*' {
                    // Triple star toggles both; the tags come out paired,
                    // keyed on the state after the toggle.
                    state.bold = !state.bold;
                    state.italic = !state.italic;
                    if state.bold && state.italic {
                        spans.push(InlineSpan::BoldOpen);
                        spans.push(InlineSpan::ItalicOpen);
                    } else {
                        spans.push(InlineSpan::ItalicClose);
                        spans.push(InlineSpan::BoldClose);
                    }
                    i += 3;
                } else if i + 1 < chars.len() && chars[i + 1] == '*' {
                    state.bold = !state.bold;
                    spans.push(if state.bold {
                        InlineSpan::BoldOpen
                    } else {
                        InlineSpan::BoldClose
                    });
                    i += 2;
                } else {
                    state.italic = !state.italic;
                    spans.push(if state.italic {
                        InlineSpan::ItalicOpen
                    } else {
                        InlineSpan::ItalicClose
                    });
                    i += 1;
                }
            }

            '!' if i + 1 < chars.len() && chars[i + 1] == '[' => {
                flush(&mut spans, &mut buf);
                i += emit_image(&chars, i, &mut spans)?;
                // The position after an image is only tested against the
                // link rule; any other character lands in the output
                // as-is without reaching the star/underscore rules.
                if i < chars.len() {
                    if chars[i] == '[' {
                        i += emit_link(&chars, i, &mut spans)?;
                    } else {
                        buf.push(chars[i]);
                        i += 1;
                    }
                }
            }

            '[' => {
                flush(&mut spans, &mut buf);
                i += emit_link(&chars, i, &mut spans)?;
            }

            c => {
                buf.push(c);
                i += 1;
            }
        }
    }

    flush(&mut spans, &mut buf);
    Ok(spans)
}

/// Flush the literal-text buffer into a span, if non-empty.
fn flush(spans: &mut Vec<InlineSpan>, buf: &mut String) {
    if !buf.is_empty() {
        spans.push(InlineSpan::Text(std::mem::take(buf)));
    }
}

/// Find `needle` at or after `start`.
fn find_from(chars: &[char], start: usize, needle: char) -> Option<usize> {
    chars
        .iter()
        .skip(start)
        .position(|&c| c == needle)
        .map(|p| start + p)
}

/// Emit a link from a cursor sitting on `[`.
///
/// Returns the number of characters of the full `[label](target)`
/// construct, so the caller can advance past it.
fn emit_link(chars: &[char], start: usize, spans: &mut Vec<InlineSpan>) -> Result<usize> {
    let label_end = find_from(chars, start + 1, ']').ok_or_else(|| {
        MinidownError::MalformedInlineSyntax(format!(
            "link at column {} has no closing `]`",
            start + 1
        ))
    })?;
    let target_start = find_from(chars, label_end, '(').ok_or_else(|| {
        MinidownError::MalformedInlineSyntax(format!("link at column {} has no `(`", start + 1))
    })?;
    let target_end = find_from(chars, target_start + 1, ')').ok_or_else(|| {
        MinidownError::MalformedInlineSyntax(format!(
            "link at column {} has no closing `)`",
            start + 1
        ))
    })?;

    spans.push(InlineSpan::Link {
        label: chars[start + 1..label_end].iter().collect(),
        target: chars[target_start + 1..target_end].iter().collect(),
    });

    Ok(target_end - start + 1)
}

/// Emit an image from a cursor sitting on `!`.
///
/// Seeks forward to the `[` first, then walks the same bracket and
/// parenthesis sequence as a link. The returned count is measured from
/// the original pre-`!` position through the closing `)`.
fn emit_image(chars: &[char], start: usize, spans: &mut Vec<InlineSpan>) -> Result<usize> {
    let bracket = find_from(chars, start, '[').ok_or_else(|| {
        MinidownError::MalformedInlineSyntax(format!("image at column {} has no `[`", start + 1))
    })?;
    let label_end = find_from(chars, bracket + 1, ']').ok_or_else(|| {
        MinidownError::MalformedInlineSyntax(format!(
            "image at column {} has no closing `]`",
            start + 1
        ))
    })?;
    let target_start = find_from(chars, label_end, '(').ok_or_else(|| {
        MinidownError::MalformedInlineSyntax(format!("image at column {} has no `(`", start + 1))
    })?;
    let target_end = find_from(chars, target_start + 1, ')').ok_or_else(|| {
        MinidownError::MalformedInlineSyntax(format!(
            "image at column {} has no closing `)`",
            start + 1
        ))
    })?;

    spans.push(InlineSpan::Image {
        label: chars[bracket + 1..label_end].iter().collect(),
        target: chars[target_start + 1..target_end].iter().collect(),
    });

    Ok(target_end - start + 1)
}
