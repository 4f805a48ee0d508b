//! Key/value properties stored on content and spaces.
//!
//! Properties are versioned like content: a created property has version 1
//! and each update must send the next number.

use serde_json::{Value, json};

use super::ensure_present;
use crate::client::Confluence;
use crate::error::Result;
use crate::models::{ContentProperty, SpaceProperty};
use crate::paging::Paged;
use crate::request::{ApiRequest, Query, api_path, segment};
use crate::transport::Transport;

fn content_properties(id: &str) -> String {
  api_path(&format!("content/{}/property", segment(id)))
}

fn space_properties(key: &str) -> String {
  api_path(&format!("space/{}/property", segment(key)))
}

fn property_update(key: &str, value: &Value, version: u64, minor_edit: bool) -> Result<Value> {
  ensure_present(key, "property key")?;
  Ok(json!({
    "key": key,
    "value": value,
    "version": { "number": version, "minorEdit": minor_edit },
  }))
}

impl<Tr: Transport> Confluence<Tr> {
  /// All properties of a piece of content.
  pub fn get_content_properties(&self, id: &str, expand: &[&str]) -> Result<Paged<'_, ContentProperty, Tr>> {
    ensure_present(id, "content id")?;
    let params = Query::new().expand(expand).build();
    Ok(self.paged(ApiRequest::get(content_properties(id)).with_params(params)))
  }

  pub fn get_content_property(&self, id: &str, key: &str, expand: &[&str]) -> Result<ContentProperty> {
    ensure_present(id, "content id")?;
    ensure_present(key, "property key")?;
    let params = Query::new().expand(expand).build();
    let path = format!("{}/{}", content_properties(id), segment(key));
    self.execute_json(ApiRequest::get(path).with_params(params))
  }

  pub fn create_content_property(&self, id: &str, key: &str, value: &Value) -> Result<ContentProperty> {
    ensure_present(id, "content id")?;
    ensure_present(key, "property key")?;
    let body = json!({ "key": key, "value": value });
    self.execute_json(ApiRequest::post(content_properties(id)).with_json(body))
  }

  /// Replace the value of a content property.
  ///
  /// # Errors
  /// `VersionConflict` if `version` is not the property's next version.
  pub fn update_content_property(
    &self,
    id: &str,
    key: &str,
    value: &Value,
    version: u64,
    minor_edit: bool,
  ) -> Result<ContentProperty> {
    ensure_present(id, "content id")?;
    let body = property_update(key, value, version, minor_edit)?;
    let path = format!("{}/{}", content_properties(id), segment(key));
    self.execute_json(ApiRequest::put(path).with_json(body))
  }

  pub fn delete_content_property(&self, id: &str, key: &str) -> Result<()> {
    ensure_present(id, "content id")?;
    ensure_present(key, "property key")?;
    self.execute_unit(ApiRequest::delete(format!("{}/{}", content_properties(id), segment(key))))
  }

  /// All properties of a space.
  pub fn get_space_properties(&self, space_key: &str, expand: &[&str]) -> Result<Paged<'_, SpaceProperty, Tr>> {
    ensure_present(space_key, "space key")?;
    let params = Query::new().expand(expand).build();
    Ok(self.paged(ApiRequest::get(space_properties(space_key)).with_params(params)))
  }

  pub fn get_space_property(&self, space_key: &str, key: &str, expand: &[&str]) -> Result<SpaceProperty> {
    ensure_present(space_key, "space key")?;
    ensure_present(key, "property key")?;
    let params = Query::new().expand(expand).build();
    let path = format!("{}/{}", space_properties(space_key), segment(key));
    self.execute_json(ApiRequest::get(path).with_params(params))
  }

  pub fn create_space_property(&self, space_key: &str, key: &str, value: &Value) -> Result<SpaceProperty> {
    ensure_present(space_key, "space key")?;
    ensure_present(key, "property key")?;
    let body = json!({ "key": key, "value": value });
    self.execute_json(ApiRequest::post(space_properties(space_key)).with_json(body))
  }

  /// Replace the value of a space property; see
  /// [`Confluence::update_content_property`] for versioning.
  pub fn update_space_property(
    &self,
    space_key: &str,
    key: &str,
    value: &Value,
    version: u64,
    minor_edit: bool,
  ) -> Result<SpaceProperty> {
    ensure_present(space_key, "space key")?;
    let body = property_update(key, value, version, minor_edit)?;
    let path = format!("{}/{}", space_properties(space_key), segment(key));
    self.execute_json(ApiRequest::put(path).with_json(body))
  }

  pub fn delete_space_property(&self, space_key: &str, key: &str) -> Result<()> {
    ensure_present(space_key, "space key")?;
    ensure_present(key, "property key")?;
    self.execute_unit(ApiRequest::delete(format!("{}/{}", space_properties(space_key), segment(key))))
  }
}
