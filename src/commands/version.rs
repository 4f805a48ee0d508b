//! `confluence-rest version`: human-readable or JSON build metadata.

use anyhow::{Context, Result};
use serde_json::json;

use crate::color::ColorScheme;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const GIT_HASH: &str = env!("GIT_HASH");
const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP");
const TARGET: &str = env!("TARGET");
const RUSTC_VERSION: &str = env!("RUSTC_VERSION");

/// Render version and build metadata.
///
/// # Arguments
/// * `json` - Emit a JSON document instead of colored text.
/// * `short` - Print only the semantic version string.
/// * `colors` - Shared color palette for styled terminal output.
pub(crate) fn handle_version_command(json: bool, short: bool, colors: &ColorScheme) -> Result<()> {
  if short {
    println!("{VERSION}");
    return Ok(());
  }

  let built = format_timestamp(BUILD_TIMESTAMP);

  if json {
    let document = json!({
      "version": VERSION,
      "git_commit": GIT_HASH,
      "build_timestamp": built,
      "target": TARGET,
      "rust_version": RUSTC_VERSION,
    });
    let rendered = serde_json::to_string_pretty(&document).context("Failed to serialize version info")?;
    println!("{rendered}");
    return Ok(());
  }

  println!("{} {}", colors.emphasis("confluence-rest"), colors.number(VERSION));
  println!("{}: {}", colors.emphasis("Git commit"), colors.code(GIT_HASH));
  println!("{}: {}", colors.emphasis("Built"), colors.dimmed(built));
  println!("{}: {}", colors.emphasis("Target"), TARGET);
  println!("{}: {}", colors.emphasis("Rust version"), RUSTC_VERSION);
  Ok(())
}

/// Unix epoch seconds as an ISO-8601 UTC string, or the raw input when it
/// does not parse.
fn format_timestamp(timestamp: &str) -> String {
  timestamp
    .parse::<i64>()
    .ok()
    .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
    .map(|datetime| datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string())
    .unwrap_or_else(|| timestamp.to_string())
}
