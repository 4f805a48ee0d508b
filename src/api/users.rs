//! Users and groups.

use super::ensure_present;
use crate::client::Confluence;
use crate::error::{ConfluenceError, Result};
use crate::models::{Group, User};
use crate::paging::Paged;
use crate::request::{ApiRequest, Query, api_path, segment};
use crate::transport::Transport;

/// Identifies a user either by username or by user key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserRef {
  Username(String),
  Key(String),
}

impl UserRef {
  pub fn username(username: impl Into<String>) -> Self {
    Self::Username(username.into())
  }

  pub fn key(key: impl Into<String>) -> Self {
    Self::Key(key.into())
  }

  /// Build a reference from two optional parts, exactly one of which must be
  /// set. Empty strings count as unset.
  ///
  /// # Errors
  /// `InvalidArgument` when both or neither are given.
  pub fn from_parts(username: Option<&str>, user_key: Option<&str>) -> Result<Self> {
    Self::optional(username, user_key)?
      .ok_or_else(|| ConfluenceError::invalid("exactly one of username or user_key must be set"))
  }

  /// Like [`UserRef::from_parts`] but allows neither, meaning "the current
  /// user".
  ///
  /// # Errors
  /// `InvalidArgument` when both are given.
  pub fn optional(username: Option<&str>, user_key: Option<&str>) -> Result<Option<Self>> {
    let username = username.filter(|u| !u.is_empty());
    let user_key = user_key.filter(|k| !k.is_empty());

    match (username, user_key) {
      (Some(_), Some(_)) => Err(ConfluenceError::invalid(
        "at most one of username or user_key may be set",
      )),
      (Some(username), None) => Ok(Some(Self::username(username))),
      (None, Some(key)) => Ok(Some(Self::key(key))),
      (None, None) => Ok(None),
    }
  }

  /// The query parameter identifying this user.
  pub(crate) fn param(&self) -> (&'static str, &str) {
    match self {
      Self::Username(username) => ("username", username),
      Self::Key(key) => ("key", key),
    }
  }
}

impl<Tr: Transport> Confluence<Tr> {
  /// Look up a user.
  pub fn get_user(&self, user: &UserRef, expand: &[&str]) -> Result<User> {
    let (name, value) = user.param();
    ensure_present(value, name)?;
    let params = Query::new().push(name, value).expand(expand).build();
    self.execute_json(ApiRequest::get(api_path("user")).with_params(params))
  }

  /// The user representing anonymous access.
  pub fn get_anonymous_user(&self) -> Result<User> {
    self.execute_json(ApiRequest::get(api_path("user/anonymous")))
  }

  /// The user the client is authenticated as.
  pub fn get_current_user(&self) -> Result<User> {
    self.execute_json(ApiRequest::get(api_path("user/current")))
  }

  /// Groups `user` belongs to.
  pub fn get_user_groups(&self, user: &UserRef, expand: &[&str]) -> Result<Paged<'_, Group, Tr>> {
    let (name, value) = user.param();
    ensure_present(value, name)?;
    let params = Query::new().push(name, value).expand(expand).build();
    Ok(self.paged(ApiRequest::get(api_path("user/memberof")).with_params(params)))
  }

  /// Every group on the instance.
  pub fn get_groups(&self, expand: &[&str]) -> Result<Paged<'_, Group, Tr>> {
    let params = Query::new().expand(expand).build();
    Ok(self.paged(ApiRequest::get(api_path("group")).with_params(params)))
  }

  pub fn get_group(&self, name: &str, expand: &[&str]) -> Result<Group> {
    ensure_present(name, "group name")?;
    let params = Query::new().expand(expand).build();
    self.execute_json(ApiRequest::get(api_path(&format!("group/{}", segment(name)))).with_params(params))
  }

  /// Members of the group `name`.
  pub fn get_group_members(&self, name: &str, expand: &[&str]) -> Result<Paged<'_, User, Tr>> {
    ensure_present(name, "group name")?;
    let params = Query::new().expand(expand).build();
    Ok(self.paged(ApiRequest::get(api_path(&format!("group/{}/member", segment(name)))).with_params(params)))
  }
}
