//! Domain operations on [`Confluence`](crate::Confluence), one module per
//! REST resource.
//!
//! Every operation checks its arguments before building a request, so an
//! [`InvalidArgument`](crate::ConfluenceError::InvalidArgument) is never
//! preceded by network traffic.

mod admin;
mod attachments;
mod content;
mod labels;
mod properties;
mod spaces;
mod users;
mod watches;

use serde::Deserialize;
use serde_json::{Value, json};

pub use content::{CommentQuery, ContentQuery, ContentUpdate, NewContent};
pub use spaces::SpaceQuery;
pub use users::UserRef;

use crate::error::{ConfluenceError, Result};

/// Non-paginated `{"results": [...]}` responses (label creation, uploads).
#[derive(Debug, Deserialize)]
struct Results<T> {
  results: Vec<T>,
}

fn ensure(condition: bool, message: &str) -> Result<()> {
  if condition {
    Ok(())
  } else {
    Err(ConfluenceError::invalid(message))
  }
}

fn ensure_present(value: &str, name: &str) -> Result<()> {
  ensure(!value.trim().is_empty(), &format!("{name} must not be empty"))
}

/// `{"storage": {"value": ..., "representation": "storage"}}`
fn storage_body(value: &str) -> Value {
  json!({
    "storage": {
      "value": value,
      "representation": "storage",
    }
  })
}
