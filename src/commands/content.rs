//! `content` and `search` subcommands.

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::{connect, connect_to, print_json, print_json_lines};
use crate::api::ContentQuery;
use crate::cli::{Cli, ContentCommand};
use crate::models::ContentType;
use crate::page_url::parse_page_ref;

pub(crate) fn handle_content_command(subcommand: &ContentCommand, cli: &Cli) -> Result<()> {
  match subcommand {
    ContentCommand::Get { target, expand } => get_page(target, expand, cli),
    ContentCommand::List {
      space,
      content_type,
      title,
      limit,
    } => {
      let content_type = ContentType::from(*content_type);
      let mut query = ContentQuery::of_type(content_type).space(space.as_str());
      if let Some(title) = title {
        query = query.title(title.as_str());
      }

      let mut client = connect(cli)?;
      let session = client.session()?;
      let count = print_json_lines(session.get_content(&query)?, *limit)?;
      info!(count, space = %space, "listed content");
      Ok(())
    }
  }
}

/// Fetch one page; a URL argument supplies the base URL when `--url` is unset.
fn get_page(target: &str, expand: &[String], cli: &Cli) -> Result<()> {
  let page = parse_page_ref(target)?;
  debug!(page_id = %page.page_id, space = ?page.space_key, "resolved page");

  let client = match (&cli.auth.url, &page.base_url) {
    (Some(_), _) => connect(cli)?,
    (None, Some(base_url)) => connect_to(base_url, cli)?,
    (None, None) => anyhow::bail!("--url is required when using a numeric page ID"),
  };

  let expand: Vec<&str> = expand.iter().map(String::as_str).collect();
  let content = client
    .get_content_by_id(&page.page_id, None, None, &expand)
    .with_context(|| format!("Failed to fetch page {}", page.page_id))?;
  print_json(&content)
}

/// Run a CQL query and print matches as JSON lines.
pub(crate) fn handle_search_command(cql: &str, limit: Option<usize>, cli: &Cli) -> Result<()> {
  let mut client = connect(cli)?;
  let session = client.session()?;
  let count = print_json_lines(session.search(cql, None, &[])?, limit)?;
  info!(count, "search finished");
  Ok(())
}
