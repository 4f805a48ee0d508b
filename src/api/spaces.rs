//! Spaces and the content inside them.

use serde_json::json;

use super::{ensure, ensure_present};
use crate::client::Confluence;
use crate::error::Result;
use crate::models::{Content, ContentType, LongTaskRef, Space, SpaceStatus, SpaceType};
use crate::paging::Paged;
use crate::request::{ApiRequest, Query, api_path, segment};
use crate::transport::Transport;

/// Filters for [`Confluence::get_spaces`]. The default lists every space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpaceQuery {
  /// Only these spaces; unknown keys are ignored by the server. Each key is
  /// sent as its own `spaceKey` parameter rather than one comma-joined value.
  pub space_keys: Vec<String>,
  pub space_type: Option<SpaceType>,
  pub status: Option<SpaceStatus>,
  pub label: Option<String>,
  /// Sent verbatim as `favourite=true|false`. Whether the server honours it
  /// is undocumented.
  pub favourite: Option<bool>,
  pub expand: Vec<String>,
}

impl SpaceQuery {
  pub fn key(mut self, key: impl Into<String>) -> Self {
    self.space_keys.push(key.into());
    self
  }

  pub fn space_type(mut self, space_type: SpaceType) -> Self {
    self.space_type = Some(space_type);
    self
  }

  pub fn status(mut self, status: SpaceStatus) -> Self {
    self.status = Some(status);
    self
  }

  pub fn label(mut self, label: impl Into<String>) -> Self {
    self.label = Some(label.into());
    self
  }

  pub fn favourite(mut self, favourite: bool) -> Self {
    self.favourite = Some(favourite);
    self
  }

  pub fn expand(mut self, fields: &[&str]) -> Self {
    self.expand.extend(fields.iter().map(|f| f.to_string()));
    self
  }
}

fn space_content_request(space_key: &str, content_type: ContentType, just_root: bool, expand: &[&str]) -> ApiRequest {
  let mut params = Query::new();
  if just_root {
    params.push("depth", "root");
  }
  let params = params.expand(expand).build();

  let path = format!("space/{}/content/{}", segment(space_key), content_type);
  ApiRequest::get(api_path(&path)).with_params(params)
}

fn ensure_space_key(key: &str) -> Result<()> {
  ensure_present(key, "space key")?;
  ensure(
    key.chars().all(|c| c.is_ascii_alphanumeric() || c == '~'),
    &format!("space key {key:?} must be alphanumeric"),
  )
}

impl<Tr: Transport> Confluence<Tr> {
  /// List spaces matching `query`.
  pub fn get_spaces(&self, query: &SpaceQuery) -> Result<Paged<'_, Space, Tr>> {
    let mut params = Query::new();
    for key in &query.space_keys {
      params.push("spaceKey", key);
    }
    let params = params
      .push_opt("type", query.space_type.map(|t| t.as_str()))
      .push_opt("status", query.status.map(|s| s.as_str()))
      .push_opt("label", query.label.as_deref())
      .push_opt("favourite", query.favourite)
      .expand(&query.expand)
      .build();

    Ok(self.paged(ApiRequest::get(api_path("space")).with_params(params)))
  }

  /// Fetch one space by key.
  ///
  /// Useful expansions: `icon`, `description.plain`, `metadata`, `homepage`.
  pub fn get_space(&self, space_key: &str, expand: &[&str]) -> Result<Space> {
    ensure_present(space_key, "space key")?;
    let params = Query::new().expand(expand).build();
    self.execute_json(ApiRequest::get(api_path(&format!("space/{}", segment(space_key)))).with_params(params))
  }

  /// All pages then all blog posts of a space.
  ///
  /// With `just_root` only top-level content is returned.
  pub fn get_space_content(&self, space_key: &str, just_root: bool, expand: &[&str]) -> Result<Paged<'_, Content, Tr>> {
    ensure_present(space_key, "space key")?;
    let starts = [ContentType::Page, ContentType::BlogPost]
      .into_iter()
      .map(|content_type| space_content_request(space_key, content_type, just_root, expand))
      .collect();
    Ok(self.paged_chain(starts))
  }

  /// Pages or blog posts of a space.
  pub fn get_space_content_with_type(
    &self,
    space_key: &str,
    content_type: ContentType,
    just_root: bool,
    expand: &[&str],
  ) -> Result<Paged<'_, Content, Tr>> {
    ensure_present(space_key, "space key")?;
    ensure(
      matches!(content_type, ContentType::Page | ContentType::BlogPost),
      &format!("space content type must be page or blogpost, got {content_type}"),
    )?;
    Ok(self.paged(space_content_request(space_key, content_type, just_root, expand)))
  }

  /// Create a space, private to the current user when `is_private`.
  ///
  /// # Arguments
  /// * `space_key` - Alphanumeric key of the new space.
  /// * `name` - Display name.
  /// * `description` - Plain text description.
  /// * `is_private` - Restrict the space to its creator.
  pub fn create_space(
    &self,
    space_key: &str,
    name: &str,
    description: Option<&str>,
    is_private: bool,
  ) -> Result<Space> {
    ensure_space_key(space_key)?;
    ensure_present(name, "space name")?;

    let mut body = json!({ "key": space_key, "name": name });
    if let Some(description) = description {
      body["description"] = json!({ "plain": { "value": description, "representation": "plain" } });
    }

    let path = if is_private { "space/_private" } else { "space" };
    self.execute_json(ApiRequest::post(api_path(path)).with_json(body))
  }

  /// Rename a space or replace its description.
  pub fn update_space(&self, space_key: &str, new_name: Option<&str>, new_description: Option<&str>) -> Result<Space> {
    ensure_present(space_key, "space key")?;
    ensure(
      new_name.is_some() || new_description.is_some(),
      "a new name or description is required",
    )?;
    if let Some(name) = new_name {
      ensure_present(name, "space name")?;
    }

    let mut body = json!({ "key": space_key });
    if let Some(name) = new_name {
      body["name"] = json!(name);
    }
    if let Some(description) = new_description {
      body["description"] = json!({ "plain": { "value": description, "representation": "plain" } });
    }

    self.execute_json(ApiRequest::put(api_path(&format!("space/{}", segment(space_key)))).with_json(body))
  }

  /// Delete a space. The server removes it in the background and answers
  /// with a handle to poll via [`Confluence::get_long_task`].
  pub fn delete_space(&self, space_key: &str) -> Result<LongTaskRef> {
    ensure_present(space_key, "space key")?;
    self.execute_json(ApiRequest::delete(api_path(&format!("space/{}", segment(space_key)))))
  }
}
