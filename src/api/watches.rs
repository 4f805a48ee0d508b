//! Watch subscriptions for content, spaces and labels.
//!
//! Every call acts on the current user unless a [`UserRef`] is given; use
//! [`UserRef::optional`] to build one from loose username/key arguments.

use reqwest::Method;
use serde::Deserialize;

use super::ensure_present;
use super::users::UserRef;
use crate::client::Confluence;
use crate::error::Result;
use crate::request::{ApiRequest, Query, api_path, segment};
use crate::transport::Transport;

#[derive(Debug, Deserialize)]
struct WatchStatus {
  watching: bool,
}

/// What is being watched.
enum Target<'a> {
  Content(&'a str),
  Space(&'a str),
  Label(&'a str),
}

impl Target<'_> {
  fn path(&self) -> Result<String> {
    let (kind, id, name) = match self {
      Self::Content(id) => ("content", *id, "content id"),
      Self::Space(key) => ("space", *key, "space key"),
      Self::Label(label) => ("label", *label, "label name"),
    };
    ensure_present(id, name)?;
    Ok(api_path(&format!("user/watch/{kind}/{}", segment(id))))
  }
}

fn watch_request(method: Method, target: Target<'_>, user: Option<&UserRef>) -> Result<ApiRequest> {
  let path = target.path()?;
  let mut params = Query::new();
  if let Some(user) = user {
    let (name, value) = user.param();
    params.push(name, value);
  }
  Ok(ApiRequest::new(method, path).with_params(params.build()))
}

impl<Tr: Transport> Confluence<Tr> {
  fn is_watching(&self, target: Target<'_>, user: Option<&UserRef>) -> Result<bool> {
    let request = watch_request(Method::GET, target, user)?;
    let status: WatchStatus = self.execute_json(request)?;
    Ok(status.watching)
  }

  pub fn is_user_watching_content(&self, content_id: &str, user: Option<&UserRef>) -> Result<bool> {
    self.is_watching(Target::Content(content_id), user)
  }

  pub fn add_content_watch(&self, content_id: &str, user: Option<&UserRef>) -> Result<()> {
    self.execute_unit(watch_request(Method::POST, Target::Content(content_id), user)?)
  }

  pub fn remove_content_watch(&self, content_id: &str, user: Option<&UserRef>) -> Result<()> {
    self.execute_unit(watch_request(Method::DELETE, Target::Content(content_id), user)?)
  }

  pub fn is_user_watching_space(&self, space_key: &str, user: Option<&UserRef>) -> Result<bool> {
    self.is_watching(Target::Space(space_key), user)
  }

  pub fn add_space_watch(&self, space_key: &str, user: Option<&UserRef>) -> Result<()> {
    self.execute_unit(watch_request(Method::POST, Target::Space(space_key), user)?)
  }

  pub fn remove_space_watch(&self, space_key: &str, user: Option<&UserRef>) -> Result<()> {
    self.execute_unit(watch_request(Method::DELETE, Target::Space(space_key), user)?)
  }

  pub fn is_user_watching_label(&self, label: &str, user: Option<&UserRef>) -> Result<bool> {
    self.is_watching(Target::Label(label), user)
  }

  pub fn add_label_watch(&self, label: &str, user: Option<&UserRef>) -> Result<()> {
    self.execute_unit(watch_request(Method::POST, Target::Label(label), user)?)
  }

  pub fn remove_label_watch(&self, label: &str, user: Option<&UserRef>) -> Result<()> {
    self.execute_unit(watch_request(Method::DELETE, Target::Label(label), user)?)
  }
}
