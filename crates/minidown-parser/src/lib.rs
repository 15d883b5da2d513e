//! Minidown Parser
//!
//! The line-oriented parsing engine for minidown. Input is consumed one
//! line at a time; each line is classified into a block role and turned
//! into a stream of [`ParseEvent`] values for the renderer.
//!
//! # Example
//!
//! ```
//! use minidown_parser::{BlockParser, ParseEvent};
//!
//! let mut parser = BlockParser::new();
//! let (_, events) = parser.parse_line("# Hello World").unwrap();
//! assert!(matches!(
//!     events[0],
//!     ParseEvent::Heading { level: 1, .. }
//! ));
//! ```

pub mod inline;

pub use inline::{scan_line, InlineSpan};

use minidown_core::{Block, BlockState, MinidownError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Regex for headings: leading hashes, rest of line as content
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#+)(.*)$").unwrap());

/// Regex for ordered-list items: leading digit, content after the
/// first `.` on the line
static ORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9][^.]*\.(.*)$").unwrap());

/// Events emitted by the block classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent {
    Heading { level: usize, content: String },
    QuoteStart,
    QuoteLine(String),
    QuoteEnd,
    OrderedListStart,
    OrderedListEnd,
    UnorderedListStart,
    UnorderedListEnd,
    ListItem(String),
    CodeStart,
    CodeLine(String),
    CodeEnd,
    Rule,
    Paragraph(Vec<InlineSpan>),
}

/// What became of a line after classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line produced its own block content.
    Classified,
    /// The line was consumed closing an open block and received no
    /// further classification.
    SpentOnClose,
}

/// Iterate the lines of a normalized document.
///
/// Splits on line-feed and drops empty lines: consecutive newlines
/// collapse, so a blank line never reaches the classifier and an empty
/// document yields no lines at all.
pub fn document_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').filter(|line| !line.is_empty())
}

/// Trim leading and trailing blanks (spaces and tabs) from a line or
/// substring. Other whitespace is left alone.
pub fn trim_blanks(s: &str) -> &str {
    s.trim_matches(|c| c == ' ' || c == '\t')
}

/// Line-oriented block classifier.
///
/// Holds the per-document [`BlockState`] and classifies each line in
/// strict priority order: heading, quote, ordered list, unordered
/// list, code fence, code passthrough, rule, paragraph. A line that
/// closes an open block is spent and gets no further classification.
#[derive(Debug, Default)]
pub struct BlockParser {
    state: BlockState,
    events: Vec<ParseEvent>,
}

impl BlockParser {
    /// Create a parser with fresh state.
    pub fn new() -> Self {
        Self {
            state: BlockState::new(),
            events: Vec::new(),
        }
    }

    /// Current block state, mainly for inspection in tests.
    pub fn state(&self) -> &BlockState {
        &self.state
    }

    /// Classify a single line and return its events.
    ///
    /// On error nothing is emitted for the failing line; events from
    /// earlier lines are unaffected.
    pub fn parse_line(&mut self, line: &str) -> Result<(LineOutcome, Vec<ParseEvent>)> {
        self.events.clear();

        // Headings win outright and never touch open-block state.
        if self.try_parse_heading(line) {
            return Ok((LineOutcome::Classified, self.take_events()));
        }

        if line.starts_with('>') {
            self.parse_quote_line(line);
            return Ok((LineOutcome::Classified, self.take_events()));
        }
        if self.state.block == Block::Quote {
            self.events.push(ParseEvent::QuoteEnd);
            self.state.block = Block::None;
            return Ok((LineOutcome::SpentOnClose, self.take_events()));
        }

        if line.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            self.parse_ordered_item(line)?;
            return Ok((LineOutcome::Classified, self.take_events()));
        }
        if self.state.block == Block::OrderedList {
            self.events.push(ParseEvent::OrderedListEnd);
            self.state.block = Block::None;
            return Ok((LineOutcome::SpentOnClose, self.take_events()));
        }

        if line.starts_with("* ") {
            self.parse_unordered_item(line);
            return Ok((LineOutcome::Classified, self.take_events()));
        }
        // A line starting with `*` but no space neither continues nor
        // closes the list; it falls through to the later checks.
        if !line.starts_with('*') && self.state.block == Block::UnorderedList {
            self.events.push(ParseEvent::UnorderedListEnd);
            self.state.block = Block::None;
            return Ok((LineOutcome::SpentOnClose, self.take_events()));
        }

        // The fence test runs before the in-code passthrough, so a
        // fence line inside an open code block always closes it.
        if trim_blanks(line) == "```" {
            if self.state.in_code {
                self.events.push(ParseEvent::CodeEnd);
            } else {
                self.events.push(ParseEvent::CodeStart);
            }
            self.state.in_code = !self.state.in_code;
            return Ok((LineOutcome::Classified, self.take_events()));
        }

        if self.state.in_code {
            self.events.push(ParseEvent::CodeLine(line.to_string()));
            return Ok((LineOutcome::Classified, self.take_events()));
        }

        if trim_blanks(line) == "---" {
            self.events.push(ParseEvent::Rule);
            return Ok((LineOutcome::Classified, self.take_events()));
        }

        let spans = inline::scan_line(line)?;
        self.events.push(ParseEvent::Paragraph(spans));
        Ok((LineOutcome::Classified, self.take_events()))
    }

    /// Parse a complete normalized document into one event stream.
    ///
    /// Blocks still open at the end of input stay open: no closing
    /// events are synthesized.
    pub fn parse_document(&mut self, text: &str) -> Result<Vec<ParseEvent>> {
        let mut all_events = Vec::new();
        for line in document_lines(text) {
            let (_, events) = self.parse_line(line)?;
            all_events.extend(events);
        }
        Ok(all_events)
    }

    /// Reset the parser to initial state.
    pub fn reset(&mut self) {
        self.state = BlockState::new();
        self.events.clear();
    }

    fn take_events(&mut self) -> Vec<ParseEvent> {
        std::mem::take(&mut self.events)
    }

    fn try_parse_heading(&mut self, line: &str) -> bool {
        if !line.starts_with('#') {
            return false;
        }
        if let Some(caps) = HEADING_RE.captures(line) {
            let level = caps.get(1).map_or(0, |m| m.as_str().len());
            let content = trim_blanks(caps.get(2).map_or("", |m| m.as_str()));
            self.events.push(ParseEvent::Heading {
                level,
                content: content.to_string(),
            });
            true
        } else {
            false
        }
    }

    fn parse_quote_line(&mut self, line: &str) {
        if self.state.block != Block::Quote {
            self.events.push(ParseEvent::QuoteStart);
            self.state.block = Block::Quote;
        }
        let content = trim_blanks(&line[1..]);
        self.events.push(ParseEvent::QuoteLine(content.to_string()));
    }

    fn parse_ordered_item(&mut self, line: &str) -> Result<()> {
        // Validate before emitting anything for this line.
        let caps = ORDERED_ITEM_RE.captures(line).ok_or_else(|| {
            MinidownError::MalformedListItem(format!("no `.` separator in line: {line}"))
        })?;
        if self.state.block != Block::OrderedList {
            self.events.push(ParseEvent::OrderedListStart);
            self.state.block = Block::OrderedList;
        }
        let content = trim_blanks(caps.get(1).map_or("", |m| m.as_str()));
        self.events.push(ParseEvent::ListItem(content.to_string()));
        Ok(())
    }

    fn parse_unordered_item(&mut self, line: &str) {
        if self.state.block != Block::UnorderedList {
            self.events.push(ParseEvent::UnorderedListStart);
            self.state.block = Block::UnorderedList;
        }
        let content = trim_blanks(&line[1..]);
        self.events.push(ParseEvent::ListItem(content.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(parser: &mut BlockParser, line: &str) -> (LineOutcome, Vec<ParseEvent>) {
        parser.parse_line(line).unwrap()
    }

    #[test]
    fn test_heading_levels() {
        let mut parser = BlockParser::new();
        for level in 1..=6 {
            let line = format!("{} text", "#".repeat(level));
            let (_, events) = classify(&mut parser, &line);
            assert_eq!(
                events,
                vec![ParseEvent::Heading {
                    level,
                    content: "text".to_string(),
                }]
            );
        }
    }

    #[test]
    fn test_heading_level_unbounded() {
        let mut parser = BlockParser::new();
        let (_, events) = classify(&mut parser, "####### deep");
        assert_eq!(
            events,
            vec![ParseEvent::Heading {
                level: 7,
                content: "deep".to_string(),
            }]
        );
    }

    #[test]
    fn test_heading_trims_blanks() {
        let mut parser = BlockParser::new();
        let (_, events) = classify(&mut parser, "#\t padded \t");
        assert_eq!(
            events,
            vec![ParseEvent::Heading {
                level: 1,
                content: "padded".to_string(),
            }]
        );
    }

    #[test]
    fn test_quote_open_continue_close() {
        let mut parser = BlockParser::new();

        let (outcome, events) = classify(&mut parser, "> a");
        assert_eq!(outcome, LineOutcome::Classified);
        assert_eq!(
            events,
            vec![
                ParseEvent::QuoteStart,
                ParseEvent::QuoteLine("a".to_string()),
            ]
        );

        let (_, events) = classify(&mut parser, "> b");
        assert_eq!(events, vec![ParseEvent::QuoteLine("b".to_string())]);

        // The closing line is spent: nothing of its own comes out.
        let (outcome, events) = classify(&mut parser, "plain text");
        assert_eq!(outcome, LineOutcome::SpentOnClose);
        assert_eq!(events, vec![ParseEvent::QuoteEnd]);
    }

    #[test]
    fn test_heading_does_not_close_quote() {
        let mut parser = BlockParser::new();
        classify(&mut parser, "> a");
        let (_, events) = classify(&mut parser, "# interleaved");
        assert!(matches!(events[0], ParseEvent::Heading { .. }));
        assert_eq!(parser.state().block, Block::Quote);

        let (_, events) = classify(&mut parser, "> b");
        assert_eq!(events, vec![ParseEvent::QuoteLine("b".to_string())]);
    }

    #[test]
    fn test_ordered_list() {
        let mut parser = BlockParser::new();

        let (_, events) = classify(&mut parser, "1. foo");
        assert_eq!(
            events,
            vec![
                ParseEvent::OrderedListStart,
                ParseEvent::ListItem("foo".to_string()),
            ]
        );

        let (_, events) = classify(&mut parser, "2. bar");
        assert_eq!(events, vec![ParseEvent::ListItem("bar".to_string())]);

        let (outcome, events) = classify(&mut parser, "done");
        assert_eq!(outcome, LineOutcome::SpentOnClose);
        assert_eq!(events, vec![ParseEvent::OrderedListEnd]);
    }

    #[test]
    fn test_ordered_item_splits_on_first_dot() {
        let mut parser = BlockParser::new();
        let (_, events) = classify(&mut parser, "1. see a.b");
        assert_eq!(
            events,
            vec![
                ParseEvent::OrderedListStart,
                ParseEvent::ListItem("see a.b".to_string()),
            ]
        );
    }

    #[test]
    fn test_ordered_item_without_dot_is_fatal() {
        let mut parser = BlockParser::new();
        let err = parser.parse_line("1 no separator").unwrap_err();
        assert!(matches!(err, MinidownError::MalformedListItem(_)));
    }

    #[test]
    fn test_malformed_item_emits_nothing() {
        let mut parser = BlockParser::new();
        assert!(parser.parse_line("9oops").is_err());
        // The failed line must not have opened the list.
        let (_, events) = classify(&mut parser, "1. ok");
        assert_eq!(events[0], ParseEvent::OrderedListStart);
    }

    #[test]
    fn test_unordered_list() {
        let mut parser = BlockParser::new();

        let (_, events) = classify(&mut parser, "* one");
        assert_eq!(
            events,
            vec![
                ParseEvent::UnorderedListStart,
                ParseEvent::ListItem("one".to_string()),
            ]
        );

        let (outcome, events) = classify(&mut parser, "after");
        assert_eq!(outcome, LineOutcome::SpentOnClose);
        assert_eq!(events, vec![ParseEvent::UnorderedListEnd]);
    }

    #[test]
    fn test_star_without_space_falls_through() {
        let mut parser = BlockParser::new();
        classify(&mut parser, "* item");

        // `*emph*` starts with a star, so the list neither continues
        // nor closes; the line becomes a paragraph.
        let (outcome, events) = classify(&mut parser, "*emph*");
        assert_eq!(outcome, LineOutcome::Classified);
        assert!(matches!(events[0], ParseEvent::Paragraph(_)));
        assert_eq!(parser.state().block, Block::UnorderedList);
    }

    #[test]
    fn test_code_fence_toggle() {
        let mut parser = BlockParser::new();

        let (_, events) = classify(&mut parser, "```");
        assert_eq!(events, vec![ParseEvent::CodeStart]);

        let (_, events) = classify(&mut parser, "# not a heading? yes it is");
        // Priority order puts the heading check ahead of the in-code
        // passthrough.
        assert!(matches!(events[0], ParseEvent::Heading { .. }));

        let (_, events) = classify(&mut parser, "let x = 1;");
        assert_eq!(
            events,
            vec![ParseEvent::CodeLine("let x = 1;".to_string())]
        );

        let (_, events) = classify(&mut parser, "```");
        assert_eq!(events, vec![ParseEvent::CodeEnd]);
        assert!(!parser.state().in_code);
    }

    #[test]
    fn test_fence_requires_exact_backticks() {
        let mut parser = BlockParser::new();
        let (_, events) = classify(&mut parser, "````");
        assert!(matches!(events[0], ParseEvent::Paragraph(_)));

        let (_, events) = classify(&mut parser, "  ```  ");
        assert_eq!(events, vec![ParseEvent::CodeStart]);
    }

    #[test]
    fn test_list_state_changes_inside_code() {
        // List checks run ahead of the fence test, so a list can open
        // while code-mode is active.
        let mut parser = BlockParser::new();
        classify(&mut parser, "```");
        let (_, events) = classify(&mut parser, "* sneaky");
        assert_eq!(
            events,
            vec![
                ParseEvent::UnorderedListStart,
                ParseEvent::ListItem("sneaky".to_string()),
            ]
        );
        assert!(parser.state().in_code);
        assert_eq!(parser.state().block, Block::UnorderedList);

        let (outcome, events) = classify(&mut parser, "plain");
        assert_eq!(outcome, LineOutcome::SpentOnClose);
        assert_eq!(events, vec![ParseEvent::UnorderedListEnd]);

        let (_, events) = classify(&mut parser, "still code");
        assert_eq!(events, vec![ParseEvent::CodeLine("still code".to_string())]);
    }

    #[test]
    fn test_horizontal_rule() {
        let mut parser = BlockParser::new();
        let (_, events) = classify(&mut parser, "---");
        assert_eq!(events, vec![ParseEvent::Rule]);

        let (_, events) = classify(&mut parser, " --- ");
        assert_eq!(events, vec![ParseEvent::Rule]);

        let (_, events) = classify(&mut parser, "----");
        assert!(matches!(events[0], ParseEvent::Paragraph(_)));
    }

    #[test]
    fn test_paragraph_fallback() {
        let mut parser = BlockParser::new();
        let (_, events) = classify(&mut parser, "just text");
        assert_eq!(
            events,
            vec![ParseEvent::Paragraph(vec![InlineSpan::Text(
                "just text".to_string()
            )])]
        );
    }

    #[test]
    fn test_inline_error_propagates() {
        let mut parser = BlockParser::new();
        let err = parser.parse_line("[broken").unwrap_err();
        assert!(matches!(err, MinidownError::MalformedInlineSyntax(_)));
    }

    #[test]
    fn test_document_lines_drop_blanks() {
        let lines: Vec<&str> = document_lines("a\n\n\nb\n").collect();
        assert_eq!(lines, vec!["a", "b"]);
        assert_eq!(document_lines("").count(), 0);
    }

    #[test]
    fn test_parse_document_leaves_open_block_unclosed() {
        let mut parser = BlockParser::new();
        let events = parser.parse_document("> only a quote\n").unwrap();
        assert_eq!(
            events,
            vec![
                ParseEvent::QuoteStart,
                ParseEvent::QuoteLine("only a quote".to_string()),
            ]
        );
        assert_eq!(parser.state().block, Block::Quote);
    }

    #[test]
    fn test_reset() {
        let mut parser = BlockParser::new();
        classify(&mut parser, "```");
        classify(&mut parser, "> q");
        parser.reset();
        assert_eq!(*parser.state(), BlockState::new());
    }

    #[test]
    fn test_trim_blanks_leaves_other_whitespace() {
        assert_eq!(trim_blanks(" \ta b\t "), "a b");
        assert_eq!(trim_blanks("x"), "x");
        assert_eq!(trim_blanks(""), "");
    }
}
