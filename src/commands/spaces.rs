//! `spaces` and `space` subcommands.

use anyhow::{Context, Result};
use tracing::info;

use super::{connect, print_json, print_json_lines};
use crate::api::SpaceQuery;
use crate::cli::Cli;
use crate::models::SpaceType;

/// List spaces as JSON lines.
pub(crate) fn handle_spaces_command(
  keys: &[String],
  space_type: Option<SpaceType>,
  limit: Option<usize>,
  cli: &Cli,
) -> Result<()> {
  let mut client = connect(cli)?;
  let session = client.session()?;

  let mut query = SpaceQuery::default();
  for key in keys {
    query = query.key(key.as_str());
  }
  if let Some(space_type) = space_type {
    query = query.space_type(space_type);
  }

  let count = print_json_lines(session.get_spaces(&query)?, limit)?;
  info!(count, "listed spaces");
  Ok(())
}

/// Show one space with its description and home page.
pub(crate) fn handle_space_command(key: &str, cli: &Cli) -> Result<()> {
  let client = connect(cli)?;
  let space = client
    .get_space(key, &["description.plain", "homepage"])
    .with_context(|| format!("Failed to fetch space {key}"))?;
  print_json(&space)
}
