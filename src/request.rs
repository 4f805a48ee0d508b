//! Transport-agnostic description of a single REST call.

use reqwest::Method;
use serde_json::Value;

use crate::error::Params;

/// Prefix every resource path is resolved under.
pub const API_PREFIX: &str = "/rest/api";

/// Build the path for an API resource, e.g. `content/123` ->
/// `/rest/api/content/123`.
pub fn api_path(resource: &str) -> String {
  format!("{API_PREFIX}/{}", resource.trim_start_matches('/'))
}

/// Percent-encode a caller-supplied value for use as one path segment.
pub(crate) fn segment(value: &str) -> String {
  urlencoding::encode(value).into_owned()
}

/// A file uploaded as part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
  /// Form field name (Confluence expects `file`).
  pub field: String,
  pub file_name: String,
  pub bytes: Vec<u8>,
  pub media_type: Option<String>,
}

/// Multipart form body: files plus plain text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
  pub files: Vec<FilePart>,
  pub fields: Vec<(String, String)>,
}

/// Request payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
  #[default]
  Empty,
  Json(Value),
  Multipart(MultipartForm),
}

/// One HTTP call against the Confluence instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
  pub method: Method,
  /// Path relative to the base URL, optionally with a query string already
  /// attached (pagination links are used verbatim).
  pub path: String,
  pub params: Params,
  pub body: RequestBody,
}

impl ApiRequest {
  pub fn new(method: Method, path: impl Into<String>) -> Self {
    Self {
      method,
      path: path.into(),
      params: Vec::new(),
      body: RequestBody::Empty,
    }
  }

  pub fn get(path: impl Into<String>) -> Self {
    Self::new(Method::GET, path)
  }

  pub fn post(path: impl Into<String>) -> Self {
    Self::new(Method::POST, path)
  }

  pub fn put(path: impl Into<String>) -> Self {
    Self::new(Method::PUT, path)
  }

  pub fn delete(path: impl Into<String>) -> Self {
    Self::new(Method::DELETE, path)
  }

  pub fn with_params(mut self, params: Params) -> Self {
    self.params = params;
    self
  }

  pub fn with_json(mut self, body: Value) -> Self {
    self.body = RequestBody::Json(body);
    self
  }

  pub fn with_multipart(mut self, form: MultipartForm) -> Self {
    self.body = RequestBody::Multipart(form);
    self
  }

  /// Value of the first query parameter named `key`.
  pub fn param(&self, key: &str) -> Option<&str> {
    self
      .params
      .iter()
      .find(|(name, _)| name == key)
      .map(|(_, value)| value.as_str())
  }
}

/// Accumulates query parameters in insertion order.
#[derive(Debug, Default)]
pub(crate) struct Query {
  params: Params,
}

impl Query {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
    self.params.push((key.to_string(), value.to_string()));
    self
  }

  pub(crate) fn push_opt(&mut self, key: &str, value: Option<impl ToString>) -> &mut Self {
    if let Some(value) = value {
      self.push(key, value);
    }
    self
  }

  /// Join `expand` into a single comma separated `expand` parameter.
  pub(crate) fn expand<S: AsRef<str>>(&mut self, expand: &[S]) -> &mut Self {
    if !expand.is_empty() {
      let joined = expand.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
      self.push("expand", joined);
    }
    self
  }

  pub(crate) fn build(&mut self) -> Params {
    std::mem::take(&mut self.params)
  }
}
