//! Minidown Render
//!
//! Converts [`ParseEvent`] streams into HTML fragments. Each
//! block-level emission is followed by a single newline, except the
//! `<pre><code>` opener, which runs straight into the first code line.
//! No document wrapper is produced; the output is a fragment.
//!
//! # Example
//!
//! ```
//! use minidown_render::render_document;
//!
//! let mut output = Vec::new();
//! render_document("# Hello", &mut output).unwrap();
//! assert_eq!(output, b"<h1>Hello</h1>\n");
//! ```

use std::io::Write;

use minidown_core::Result;
use minidown_parser::{document_lines, BlockParser, InlineSpan, ParseEvent};

/// HTML renderer for minidown parse events.
pub struct HtmlRenderer<W: Write> {
    writer: W,
}

impl<W: Write> HtmlRenderer<W> {
    /// Create a renderer writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Render a single parse event.
    pub fn render_event(&mut self, event: &ParseEvent) -> std::io::Result<()> {
        match event {
            ParseEvent::Heading { level, content } => {
                writeln!(self.writer, "<h{level}>{content}</h{level}>")
            }
            ParseEvent::QuoteStart => writeln!(self.writer, "<blockquote><p>"),
            ParseEvent::QuoteLine(s) => writeln!(self.writer, "{s}"),
            ParseEvent::QuoteEnd => writeln!(self.writer, "</p></blockquote>"),
            ParseEvent::OrderedListStart => writeln!(self.writer, "<ol>"),
            ParseEvent::OrderedListEnd => writeln!(self.writer, "</ol>"),
            ParseEvent::UnorderedListStart => writeln!(self.writer, "<ul>"),
            ParseEvent::UnorderedListEnd => writeln!(self.writer, "</ul>"),
            ParseEvent::ListItem(s) => writeln!(self.writer, "<li>{s}</li>"),
            // The opener deliberately has no newline; the first code
            // line follows on the same output line.
            ParseEvent::CodeStart => write!(self.writer, "<pre><code>"),
            ParseEvent::CodeLine(s) => writeln!(self.writer, "{s}"),
            ParseEvent::CodeEnd => writeln!(self.writer, "</code></pre>"),
            ParseEvent::Rule => writeln!(self.writer, "<hr>"),
            ParseEvent::Paragraph(spans) => {
                write!(self.writer, "<p>")?;
                for span in spans {
                    self.render_span(span)?;
                }
                writeln!(self.writer, "</p>")
            }
        }
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    fn render_span(&mut self, span: &InlineSpan) -> std::io::Result<()> {
        match span {
            InlineSpan::Text(s) => write!(self.writer, "{s}"),
            InlineSpan::BoldOpen => write!(self.writer, "<b>"),
            InlineSpan::BoldClose => write!(self.writer, "</b>"),
            InlineSpan::ItalicOpen => write!(self.writer, "<i>"),
            InlineSpan::ItalicClose => write!(self.writer, "</i>"),
            InlineSpan::UnderlineOpen => write!(self.writer, "<u>"),
            InlineSpan::UnderlineClose => write!(self.writer, "</u>"),
            InlineSpan::Link { label, target } => {
                write!(self.writer, "<a href=\"{target}\">{label}</a>")
            }
            InlineSpan::Image { label, target } => {
                write!(self.writer, "<img src=\"{target}\" alt=\"{label}\"></img>")
            }
        }
    }
}

/// Convert a whole normalized document, writing output incrementally
/// as each line is classified.
///
/// Stops at the first error; everything written for earlier lines
/// stays in the output. Blocks still open at end of input get no
/// closing tags.
pub fn render_document<W: Write>(text: &str, writer: W) -> Result<()> {
    let mut parser = BlockParser::new();
    let mut renderer = HtmlRenderer::new(writer);

    for line in document_lines(text) {
        let (_, events) = parser.parse_line(line)?;
        for event in &events {
            renderer.render_event(event)?;
        }
    }

    renderer.flush()?;
    Ok(())
}
