//! Configuration
//!
//! Runtime settings for the three tasks and the chart, with defaults that
//! match the built-in timing constants, plus a reader for the
//! `hygrograph.toml` format.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
