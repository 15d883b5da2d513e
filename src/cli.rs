//! Command-line interface for minidown.

use clap::Parser;
use std::path::PathBuf;

/// Minidown - a small line-oriented markdown to HTML converter.
///
/// Reads a whole document, classifies it line by line, and writes the
/// HTML fragment as each line is processed.
#[derive(Parser, Debug)]
#[command(
    name = "mdh",
    author = "Minidown Contributors",
    version,
    about = "Convert lightweight markup to HTML",
    after_help = "Examples:\n  \
                  cat README.md | mdh\n  \
                  mdh input.md\n  \
                  mdh input.md output.html"
)]
pub struct Cli {
    /// Input markdown file (reads stdin if not provided)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output HTML file (writes stdout if not provided)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "loglevel", default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Check if we should read from stdin.
    pub fn should_read_stdin(&self) -> bool {
        self.input.is_none()
    }
}
