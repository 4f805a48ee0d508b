//! CLI subcommand handlers and the helpers they share.

pub mod auth;
pub mod content;
pub mod spaces;
pub mod version;

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::Cli;
use crate::client::Confluence;
use crate::credentials::{self, CredentialsProvider, NetrcProvider};

/// Build a client from `--url` and the resolved credentials.
///
/// # Errors
/// Returns an error when no base URL is configured, no credentials can be
/// found, or the client cannot be constructed.
pub(crate) fn connect(cli: &Cli) -> Result<Confluence> {
  let base_url = cli
    .auth
    .url
    .as_deref()
    .context("Base URL not provided; use --url or set CONFLUENCE_URL")?;
  connect_to(base_url, cli)
}

/// Like [`connect`] against an explicit base URL.
pub(crate) fn connect_to(base_url: &str, cli: &Cli) -> Result<Confluence> {
  let host = extract_host(base_url).context("Invalid base URL")?;
  let netrc = NetrcProvider::new();
  let providers: [&dyn CredentialsProvider; 1] = [&netrc];
  let credential = credentials::resolve(&host, cli.auth.user.as_deref(), cli.auth.password.as_deref(), &providers)?;

  Confluence::with_timeout(base_url, credential.username, credential.password, cli.network.timeout)
    .with_context(|| format!("Failed to create API client for {base_url}"))
}

/// Host component of a base URL, used for `.netrc` lookups.
pub(crate) fn extract_host(url: &str) -> Option<String> {
  url::Url::parse(url).ok()?.host_str().map(str::to_string)
}

/// Write each item as one line of JSON to stdout, stopping at the first
/// error or after `limit` items.
pub(crate) fn print_json_lines<T, I>(items: I, limit: Option<usize>) -> Result<usize>
where
  T: Serialize,
  I: IntoIterator<Item = crate::Result<T>>,
{
  let stdout = io::stdout();
  let mut out = stdout.lock();
  let mut count = 0;

  for item in items.into_iter().take(limit.unwrap_or(usize::MAX)) {
    let item = item?;
    serde_json::to_writer(&mut out, &item).context("Failed to serialize result")?;
    writeln!(out).context("Failed to write to stdout")?;
    count += 1;
  }

  Ok(count)
}

/// Write a single value as pretty JSON to stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
  let rendered = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
  println!("{rendered}");
  Ok(())
}
