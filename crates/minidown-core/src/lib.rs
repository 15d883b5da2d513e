//! Minidown Core
//!
//! Core types shared by the minidown crates: the block and inline state
//! models used by the parser, and the error definitions used everywhere.

pub mod error;
pub mod state;

pub use error::{MinidownError, Result};
pub use state::{Block, BlockState, InlineState};
