//! Output module
//!
//! Renders entries, the resumable cursor and action failures.
//!
//! # Formats
//!
//! - `simple` - one URL per line
//! - `structured` - `push-url` / `set-env` / `message` command lines
//! - `dump` - YAML record per entry

mod formatter;

pub use formatter::{
    build_formatter, shell_quote, CommandFormatter, DumpFormatter, OutputFormat,
    OutputFormatter, SimpleFormatter,
};

#[cfg(test)]
mod tests;
