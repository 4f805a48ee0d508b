//! Labels attached to content.

use serde_json::{Value, json};

use super::{Results, ensure, ensure_present};
use crate::client::Confluence;
use crate::error::Result;
use crate::models::{Label, LabelPrefix};
use crate::paging::Paged;
use crate::request::{ApiRequest, Query, api_path, segment};
use crate::transport::Transport;

fn ensure_label_name(name: &str) -> Result<()> {
  ensure_present(name, "label name")?;
  ensure(
    !name.chars().any(char::is_whitespace),
    &format!("label {name:?} must not contain whitespace"),
  )
}

impl<Tr: Transport> Confluence<Tr> {
  /// Labels on a piece of content, optionally restricted to one prefix.
  pub fn get_labels(&self, id: &str, prefix: Option<LabelPrefix>) -> Result<Paged<'_, Label, Tr>> {
    ensure_present(id, "content id")?;
    let params = Query::new().push_opt("prefix", prefix.map(|p| p.as_str())).build();
    Ok(self.paged(ApiRequest::get(api_path(&format!("content/{}/label", segment(id)))).with_params(params)))
  }

  /// Add labels to a piece of content and return the content's labels.
  pub fn create_labels(&self, id: &str, labels: &[(LabelPrefix, &str)]) -> Result<Vec<Label>> {
    ensure_present(id, "content id")?;
    ensure(!labels.is_empty(), "at least one label is required")?;
    for (_, name) in labels {
      ensure_label_name(name)?;
    }

    let body: Value = labels
      .iter()
      .map(|(prefix, name)| json!({ "prefix": prefix, "name": name }))
      .collect();

    let created: Results<Label> =
      self.execute_json(ApiRequest::post(api_path(&format!("content/{}/label", segment(id)))).with_json(body))?;
    Ok(created.results)
  }

  /// Remove the label `name` from a piece of content.
  pub fn delete_label(&self, id: &str, name: &str) -> Result<()> {
    ensure_present(id, "content id")?;
    ensure_label_name(name)?;

    let params = Query::new().push("name", name).build();
    self.execute_unit(ApiRequest::delete(api_path(&format!("content/{}/label", segment(id)))).with_params(params))
  }
}
