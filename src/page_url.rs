//! Turn the page argument of the command line tool into a content id.

use anyhow::{Context, Result, anyhow, bail};
use url::Url;

/// Path segments that start the page part of a Confluence URL; anything
/// before them is the instance's context path.
const PAGE_ROOTS: [&str; 3] = ["spaces", "pages", "display"];

/// A page reference given as an id or a browser URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
  /// Instance URL including its context path, when the input was a URL.
  pub base_url: Option<String>,
  pub page_id: String,
  pub space_key: Option<String>,
}

/// Parse a numeric id or a page URL.
///
/// Accepted forms:
/// - `123456`
/// - `https://wiki.example.com/confluence/pages/viewpage.action?pageId=123456`
/// - `https://wiki.example.com/spaces/DOCS/pages/123456/Page+Title`
/// - `https://example.atlassian.net/wiki/pages/123456`
///
/// # Errors
/// Returns an error when the input is neither a number nor a URL that
/// carries a numeric page id.
pub fn parse_page_ref(input: &str) -> Result<PageRef> {
  let input = input.trim();
  if is_numeric(input) {
    return Ok(PageRef {
      base_url: None,
      page_id: input.to_string(),
      space_key: None,
    });
  }

  let parsed = Url::parse(input).context("Page must be a numeric id or a Confluence URL")?;
  let host = parsed.host_str().context("URL missing host")?;
  let segments: Vec<&str> = parsed.path_segments().map(|s| s.filter(|s| !s.is_empty()).collect()).unwrap_or_default();

  let root = segments
    .iter()
    .position(|s| PAGE_ROOTS.contains(s))
    .context("URL does not point at a Confluence page")?;

  let mut base_url = format!("{}://{host}", parsed.scheme());
  if let Some(port) = parsed.port() {
    base_url.push_str(&format!(":{port}"));
  }
  for segment in &segments[..root] {
    base_url.push('/');
    base_url.push_str(segment);
  }

  let page_id = match parsed.query_pairs().find(|(key, _)| key == "pageId") {
    Some((_, id)) => id.into_owned(),
    None => {
      let pos = segments[root..]
        .iter()
        .position(|s| *s == "pages")
        .map(|p| p + root)
        .context("URL does not contain a 'pages' segment or pageId parameter")?;
      segments
        .get(pos + 1)
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow!("URL does not contain page ID after 'pages' segment"))?
    }
  };

  if !is_numeric(&page_id) {
    bail!("Page ID is not numeric: {page_id}");
  }

  let space_key = match segments[root..] {
    ["spaces", key, ..] | ["display", key, ..] => Some(key.to_string()),
    _ => None,
  };

  Ok(PageRef {
    base_url: Some(base_url),
    page_id,
    space_key,
  })
}

fn is_numeric(value: &str) -> bool {
  !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
