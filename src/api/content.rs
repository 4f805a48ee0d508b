//! Pages, blog posts and comments.

use chrono::NaiveDate;
use serde_json::{Map, Value, json};

use super::{ensure, ensure_present, storage_body};
use crate::client::Confluence;
use crate::error::Result;
use crate::models::{
  BodyFormat, BodyRepresentation, CommentDepth, CommentLocation, Content, ContentHistory, ContentStatus, ContentType,
};
use crate::paging::Paged;
use crate::request::{ApiRequest, Query, api_path, segment};
use crate::transport::Transport;

/// Filters for [`Confluence::get_content`].
#[derive(Debug, Clone, PartialEq)]
pub struct ContentQuery {
  /// `page` or `blogpost`; other types are rejected.
  pub content_type: ContentType,
  pub space_key: Option<String>,
  pub title: Option<String>,
  pub status: Option<ContentStatus>,
  /// Only meaningful for blog posts.
  pub posting_day: Option<NaiveDate>,
  pub expand: Vec<String>,
}

impl Default for ContentQuery {
  fn default() -> Self {
    Self::of_type(ContentType::Page)
  }
}

impl ContentQuery {
  pub fn of_type(content_type: ContentType) -> Self {
    Self {
      content_type,
      space_key: None,
      title: None,
      status: None,
      posting_day: None,
      expand: Vec::new(),
    }
  }

  pub fn pages() -> Self {
    Self::of_type(ContentType::Page)
  }

  pub fn blog_posts() -> Self {
    Self::of_type(ContentType::BlogPost)
  }

  pub fn space(mut self, key: impl Into<String>) -> Self {
    self.space_key = Some(key.into());
    self
  }

  pub fn title(mut self, title: impl Into<String>) -> Self {
    self.title = Some(title.into());
    self
  }

  pub fn status(mut self, status: ContentStatus) -> Self {
    self.status = Some(status);
    self
  }

  pub fn posted_on(mut self, day: NaiveDate) -> Self {
    self.posting_day = Some(day);
    self
  }

  pub fn expand(mut self, fields: &[&str]) -> Self {
    self.expand.extend(fields.iter().map(|f| f.to_string()));
    self
  }
}

/// Filters for [`Confluence::get_comments`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentQuery {
  pub depth: Option<CommentDepth>,
  pub parent_version: Option<u64>,
  /// Sent as one `location` parameter per entry.
  pub locations: Vec<CommentLocation>,
  pub expand: Vec<String>,
}

impl CommentQuery {
  pub fn depth(mut self, depth: CommentDepth) -> Self {
    self.depth = Some(depth);
    self
  }

  pub fn parent_version(mut self, version: u64) -> Self {
    self.parent_version = Some(version);
    self
  }

  pub fn location(mut self, location: CommentLocation) -> Self {
    self.locations.push(location);
    self
  }

  pub fn expand(mut self, fields: &[&str]) -> Self {
    self.expand.extend(fields.iter().map(|f| f.to_string()));
    self
  }
}

/// A page or blog post to create with [`Confluence::create_content`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewContent {
  pub content_type: ContentType,
  pub space_key: String,
  pub title: String,
  /// Body in storage format.
  pub body: String,
  pub parent_id: Option<String>,
  /// `current` (the default) or `draft`.
  pub status: Option<ContentStatus>,
}

impl NewContent {
  pub fn page(space_key: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
    Self {
      content_type: ContentType::Page,
      space_key: space_key.into(),
      title: title.into(),
      body: body.into(),
      parent_id: None,
      status: None,
    }
  }

  pub fn blog_post(space_key: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
    Self {
      content_type: ContentType::BlogPost,
      ..Self::page(space_key, title, body)
    }
  }

  pub fn parent(mut self, parent_id: impl Into<String>) -> Self {
    self.parent_id = Some(parent_id.into());
    self
  }

  pub fn status(mut self, status: ContentStatus) -> Self {
    self.status = Some(status);
    self
  }
}

/// Replacement of an existing piece of content, see [`Confluence::update_content`].
///
/// `version` is the number the content will have after the update. The server
/// checks it against the current version; publishing a draft sends `1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentUpdate {
  pub id: String,
  pub content_type: ContentType,
  pub version: u64,
  /// Status the content currently has, sent as the `status` query parameter.
  pub current_status: Option<ContentStatus>,
  pub title: Option<String>,
  /// New body in storage format.
  pub body: Option<String>,
  pub parent_id: Option<String>,
  pub new_status: Option<ContentStatus>,
  pub minor_edit: bool,
  pub message: Option<String>,
}

impl ContentUpdate {
  pub fn new(id: impl Into<String>, content_type: ContentType, version: u64) -> Self {
    Self {
      id: id.into(),
      content_type,
      version,
      current_status: None,
      title: None,
      body: None,
      parent_id: None,
      new_status: None,
      minor_edit: false,
      message: None,
    }
  }

  pub fn title(mut self, title: impl Into<String>) -> Self {
    self.title = Some(title.into());
    self
  }

  pub fn body(mut self, body: impl Into<String>) -> Self {
    self.body = Some(body.into());
    self
  }

  pub fn parent(mut self, parent_id: impl Into<String>) -> Self {
    self.parent_id = Some(parent_id.into());
    self
  }

  pub fn current_status(mut self, status: ContentStatus) -> Self {
    self.current_status = Some(status);
    self
  }

  pub fn new_status(mut self, status: ContentStatus) -> Self {
    self.new_status = Some(status);
    self
  }

  pub fn minor_edit(mut self, minor_edit: bool) -> Self {
    self.minor_edit = minor_edit;
    self
  }

  pub fn message(mut self, message: impl Into<String>) -> Self {
    self.message = Some(message.into());
    self
  }
}

fn ensure_page_or_blog_post(content_type: ContentType) -> Result<()> {
  ensure(
    matches!(content_type, ContentType::Page | ContentType::BlogPost),
    &format!("content type must be page or blogpost, got {content_type}"),
  )
}

impl<Tr: Transport> Confluence<Tr> {
  /// List pages or blog posts, optionally filtered.
  ///
  /// # Errors
  /// `InvalidArgument` for comment/attachment types or a posting day on a
  /// page query.
  pub fn get_content(&self, query: &ContentQuery) -> Result<Paged<'_, Content, Tr>> {
    ensure_page_or_blog_post(query.content_type)?;
    ensure(
      query.posting_day.is_none() || query.content_type == ContentType::BlogPost,
      "posting day is only valid for blog posts",
    )?;

    let params = Query::new()
      .push("type", query.content_type)
      .push_opt("spaceKey", query.space_key.as_deref())
      .push_opt("title", query.title.as_deref())
      .push_opt("status", query.status)
      .push_opt("postingDay", query.posting_day.map(|d| d.format("%Y-%m-%d")))
      .expand(&query.expand)
      .build();

    Ok(self.paged(ApiRequest::get(api_path("content")).with_params(params)))
  }

  /// Fetch one piece of content.
  ///
  /// # Arguments
  /// * `id` - Content id.
  /// * `status` - Status to look the content up in (e.g. `trashed`).
  /// * `version` - Historical version number to return.
  /// * `expand` - Fields to expand, e.g. `body.storage`, `space`, `version`.
  pub fn get_content_by_id(
    &self,
    id: &str,
    status: Option<ContentStatus>,
    version: Option<u64>,
    expand: &[&str],
  ) -> Result<Content> {
    ensure_present(id, "content id")?;
    let params = Query::new()
      .push_opt("status", status)
      .push_opt("version", version)
      .expand(expand)
      .build();

    self.execute_json(ApiRequest::get(api_path(&format!("content/{}", segment(id)))).with_params(params))
  }

  /// History of a piece of content, without the content itself.
  pub fn get_content_history(&self, id: &str, expand: &[&str]) -> Result<ContentHistory> {
    ensure_present(id, "content id")?;
    let params = Query::new().expand(expand).build();
    self.execute_json(ApiRequest::get(api_path(&format!("content/{}/history", segment(id)))).with_params(params))
  }

  /// Direct child pages (not recursive).
  pub fn get_child_pages(
    &self,
    id: &str,
    parent_version: Option<u64>,
    expand: &[&str],
  ) -> Result<Paged<'_, Content, Tr>> {
    ensure_present(id, "content id")?;
    let params = Query::new()
      .push_opt("parentVersion", parent_version)
      .expand(expand)
      .build();

    Ok(self.paged(ApiRequest::get(api_path(&format!("content/{}/child/page", segment(id)))).with_params(params)))
  }

  /// Every page below `id` at any depth.
  pub fn get_descendant_pages(&self, id: &str, expand: &[&str]) -> Result<Paged<'_, Content, Tr>> {
    ensure_present(id, "content id")?;
    let params = Query::new().expand(expand).build();
    Ok(self.paged(ApiRequest::get(api_path(&format!("content/{}/descendant/page", segment(id)))).with_params(params)))
  }

  /// Comments on a piece of content.
  pub fn get_comments(&self, id: &str, query: &CommentQuery) -> Result<Paged<'_, Content, Tr>> {
    ensure_present(id, "content id")?;

    let mut params = Query::new();
    if let Some(depth) = query.depth.as_ref().and_then(CommentDepth::as_str) {
      params.push("depth", depth);
    }
    params.push_opt("parentVersion", query.parent_version);
    for location in &query.locations {
      params.push("location", location.as_str());
    }
    let params = params.expand(&query.expand).build();

    Ok(self.paged(ApiRequest::get(api_path(&format!("content/{}/child/comment", segment(id)))).with_params(params)))
  }

  /// Run a CQL query.
  ///
  /// # Arguments
  /// * `cql` - The query, e.g. `space = DOCS and type = page`.
  /// * `cql_context` - JSON serialized search context.
  /// * `expand` - Fields to expand on each result.
  pub fn search(&self, cql: &str, cql_context: Option<&str>, expand: &[&str]) -> Result<Paged<'_, Content, Tr>> {
    ensure_present(cql, "cql")?;
    let params = Query::new()
      .push("cql", cql)
      .push_opt("cqlcontext", cql_context)
      .expand(expand)
      .build();

    Ok(self.paged(ApiRequest::get(api_path("content/search")).with_params(params)))
  }

  /// Create a page or blog post.
  pub fn create_content(&self, content: &NewContent) -> Result<Content> {
    ensure_page_or_blog_post(content.content_type)?;
    ensure_present(&content.space_key, "space key")?;
    ensure_present(&content.title, "title")?;
    ensure(
      matches!(content.status, None | Some(ContentStatus::Current | ContentStatus::Draft)),
      "new content must be current or draft",
    )?;

    let mut body = json!({
      "type": content.content_type,
      "title": content.title,
      "space": { "key": content.space_key },
      "body": storage_body(&content.body),
    });
    if let Some(parent_id) = &content.parent_id {
      body["ancestors"] = json!([{ "id": parent_id }]);
    }
    if let Some(status) = content.status {
      body["status"] = json!(status);
    }

    self.execute_json(ApiRequest::post(api_path("content")).with_json(body))
  }

  /// Add a comment to a page or blog post.
  ///
  /// # Arguments
  /// * `container_id` - Id of the page or blog post being commented on.
  /// * `container_type` - Type of that container.
  /// * `body` - Comment text in storage format.
  pub fn create_comment(&self, container_id: &str, container_type: ContentType, body: &str) -> Result<Content> {
    ensure_present(container_id, "container id")?;
    ensure_page_or_blog_post(container_type)?;
    ensure_present(body, "comment body")?;

    let body = json!({
      "type": ContentType::Comment,
      "container": { "id": container_id, "type": container_type },
      "body": storage_body(body),
    });

    self.execute_json(ApiRequest::post(api_path("content")).with_json(body))
  }

  /// Replace title, body, parent or status of existing content.
  ///
  /// # Errors
  /// `VersionConflict` if the server rejects `version` for the content's current state.
  pub fn update_content(&self, update: &ContentUpdate) -> Result<Content> {
    ensure_present(&update.id, "content id")?;

    let mut version = Map::new();
    version.insert("number".into(), json!(update.version));
    version.insert("minorEdit".into(), json!(update.minor_edit));
    if let Some(message) = &update.message {
      version.insert("message".into(), json!(message));
    }

    let mut body = json!({
      "id": update.id,
      "type": update.content_type,
      "version": Value::Object(version),
    });
    if let Some(title) = &update.title {
      body["title"] = json!(title);
    }
    if let Some(value) = &update.body {
      body["body"] = storage_body(value);
    }
    if let Some(parent_id) = &update.parent_id {
      body["ancestors"] = json!([{ "id": parent_id }]);
    }
    if let Some(status) = update.new_status {
      body["status"] = json!(status);
    }

    let params = Query::new().push_opt("status", update.current_status).build();
    self.execute_json(
      ApiRequest::put(api_path(&format!("content/{}", segment(&update.id))))
        .with_params(params)
        .with_json(body),
    )
  }

  /// Trash current content, or purge it when `current_status` is `trashed`.
  ///
  /// # Errors
  /// `InvalidArgument` for `historical`, which cannot be deleted.
  pub fn delete_content(&self, id: &str, current_status: Option<ContentStatus>) -> Result<()> {
    ensure_present(id, "content id")?;
    ensure(
      current_status != Some(ContentStatus::Historical),
      "historical versions cannot be deleted",
    )?;

    let params = Query::new().push_opt("status", current_status).build();
    self.execute_unit(ApiRequest::delete(api_path(&format!("content/{}", segment(id)))).with_params(params))
  }

  /// Convert a body between representations on the server.
  pub fn convert_content_body(&self, value: &str, from: BodyFormat, to: BodyFormat) -> Result<BodyRepresentation> {
    let body = json!({ "value": value, "representation": from.as_str() });
    self.execute_json(ApiRequest::post(api_path(&format!("contentbody/convert/{}", to.as_str()))).with_json(body))
  }
}
