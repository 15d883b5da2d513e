//! Minidown - a small line-oriented markdown to HTML converter.
//!
//! This binary wires the text-acquisition and output collaborators to
//! the core: it reads the whole input into memory with carriage
//! returns stripped, then hands the normalized blob to the parser and
//! renderer, writing HTML incrementally as each line is classified.

mod cli;

use clap::Parser as ClapParser;
use cli::Cli;
use log::{debug, error, trace, LevelFilter};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use minidown_core::Result;
use minidown_parser::{document_lines, BlockParser};
use minidown_render::HtmlRenderer;

fn main() {
    let cli = <Cli as ClapParser>::parse();

    setup_logging(&cli.log_level);
    debug!("minidown v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Set up logging based on the log level argument.
fn setup_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Main application logic.
fn run(cli: &Cli) -> Result<()> {
    let text = read_input(cli.input.as_deref())?;
    debug!("read {} bytes of input", text.len());

    match cli.output.as_deref() {
        Some(path) => {
            debug!("writing to {}", path.display());
            let file = File::create(path)?;
            convert(&text, BufWriter::new(file))
        }
        None => {
            let stdout = io::stdout();
            convert(&text, BufWriter::new(stdout.lock()))
        }
    }
}

/// Acquire the complete input text, with carriage returns stripped.
fn read_input(path: Option<&Path>) -> io::Result<String> {
    let raw = match path {
        Some(p) => {
            debug!("reading from {}", p.display());
            std::fs::read_to_string(p)?
        }
        None => {
            debug!("reading from stdin");
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(raw.replace('\r', ""))
}

/// Drive the parser and renderer over the normalized text, flushing
/// output after each processed line.
fn convert<W: Write>(text: &str, writer: W) -> Result<()> {
    let mut parser = BlockParser::new();
    let mut renderer = HtmlRenderer::new(writer);

    for line in document_lines(text) {
        trace!("input line: {}", line);
        let (outcome, events) = parser.parse_line(line)?;
        trace!("line outcome: {:?}, {} event(s)", outcome, events.len());
        for event in &events {
            renderer.render_event(event)?;
        }
    }

    renderer.flush()?;
    Ok(())
}
