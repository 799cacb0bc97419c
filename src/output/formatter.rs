//! Output formatters
//!
//! Every formatter renders entries; cursor and error lines are optional
//! capabilities that default to no-ops.

use crate::error::{Error, Result};
use crate::pagination::Cursor;
use crate::types::Entry;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use tracing::error;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One URL per line
    #[default]
    Simple,
    /// One `push-url` command per entry, plus cursor and error lines
    Structured,
    /// YAML dump of each entry with its full post record
    Dump,
}

/// Sink for run output
pub trait OutputFormatter {
    /// Render one entry
    fn emit(&mut self, entry: &Entry<'_>) -> Result<()>;

    /// Render the resumable cursor
    fn emit_cursor(&mut self, _cursor: &Cursor) -> Result<()> {
        Ok(())
    }

    /// Report a non-fatal failure
    fn emit_error(&mut self, message: &str) -> Result<()> {
        error!("{message}");
        Ok(())
    }

    /// Push buffered output to the consumer
    fn flush(&mut self) -> Result<()>;
}

/// Build the formatter for `format` writing to `writer`
pub fn build_formatter<'w, W: Write + 'w>(
    format: OutputFormat,
    writer: W,
) -> Box<dyn OutputFormatter + 'w> {
    match format {
        OutputFormat::Simple => Box::new(SimpleFormatter::new(writer)),
        OutputFormat::Structured => Box::new(CommandFormatter::new(writer)),
        OutputFormat::Dump => Box::new(DumpFormatter::new(writer)),
    }
}

// ============================================================================
// Simple
// ============================================================================

/// One URL per line
#[derive(Debug)]
pub struct SimpleFormatter<W: Write> {
    writer: W,
}

impl<W: Write> SimpleFormatter<W> {
    /// Create a new simple formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the formatter, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputFormatter for SimpleFormatter<W> {
    fn emit(&mut self, entry: &Entry<'_>) -> Result<()> {
        writeln!(self.writer, "{}", entry.url)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

// ============================================================================
// Structured command
// ============================================================================

/// Command lines for a downstream consumer:
///
/// ```text
/// push-url --as image --meta id=1 --meta blog_name=b --meta reblog_key=k --meta note_count=0 --meta index=0 https://...
/// set-env before_id 1
/// message reblog failed
/// ```
#[derive(Debug)]
pub struct CommandFormatter<W: Write> {
    writer: W,
}

impl<W: Write> CommandFormatter<W> {
    /// Create a new command formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the formatter, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputFormatter for CommandFormatter<W> {
    fn emit(&mut self, entry: &Entry<'_>) -> Result<()> {
        let post = entry.post;
        let meta = [
            ("id", post.id.to_string()),
            ("blog_name", post.blog_name.clone()),
            ("reblog_key", post.reblog_key.clone()),
            ("note_count", post.note_count.to_string()),
            ("index", entry.index.to_string()),
        ];

        let mut line = String::from("push-url --as image");
        for (key, value) in meta {
            line.push_str(" --meta ");
            line.push_str(&shell_quote(&format!("{key}={value}")));
        }
        line.push(' ');
        line.push_str(&shell_quote(entry.url));

        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    fn emit_cursor(&mut self, cursor: &Cursor) -> Result<()> {
        writeln!(self.writer, "set-env {} {}", cursor.name(), cursor.value())?;
        Ok(())
    }

    fn emit_error(&mut self, message: &str) -> Result<()> {
        let message = message.replace(['\r', '\n'], " ");
        writeln!(self.writer, "message {message}")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Quote `value` for a POSIX shell unless it is made of safe characters
pub fn shell_quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,~".contains(c));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

// ============================================================================
// Dump
// ============================================================================

#[derive(Serialize)]
struct DumpRecord<'a> {
    url: &'a str,
    index: usize,
    post: &'a Value,
}

/// YAML document per entry, separated by blank lines
#[derive(Debug)]
pub struct DumpFormatter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> DumpFormatter<W> {
    /// Create a new dump formatter
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Consume the formatter, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputFormatter for DumpFormatter<W> {
    fn emit(&mut self, entry: &Entry<'_>) -> Result<()> {
        let record = DumpRecord {
            url: entry.url,
            index: entry.index,
            post: &entry.post.raw,
        };
        let yaml = serde_yaml::to_string(&record)
            .map_err(|e| Error::output(format!("Failed to dump post {}: {e}", entry.post.id)))?;

        if self.written > 0 {
            writeln!(self.writer)?;
        }
        self.writer.write_all(yaml.as_bytes())?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
