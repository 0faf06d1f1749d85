//! CLI utility functions
//!
//! Output helpers. Results go to stdout as JSON; everything else is stderr.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Write};

/// Render a value as indented JSON
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to render JSON output")
}

/// Print a value as indented JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = render_json(value)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered).context("Failed to write to stdout")?;
    Ok(())
}

/// Print one plain line on stdout
pub fn print_line(line: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", line).context("Failed to write to stdout")?;
    Ok(())
}
