//! Attachments on pages and blog posts.

use std::fs;
use std::path::Path;

use serde_json::json;
use tracing::debug;

use super::{Results, ensure, ensure_present};
use crate::client::Confluence;
use crate::error::{ConfluenceError, Result};
use crate::models::{Content, ContentStatus, ContentType};
use crate::paging::Paged;
use crate::request::{ApiRequest, FilePart, MultipartForm, Query, api_path, segment};
use crate::transport::Transport;

/// Read `path` into an upload part named `file`.
fn file_part(path: &Path, file_name: Option<&str>, media_type: Option<&str>) -> Result<FilePart> {
  let bytes = fs::read(path).map_err(|source| ConfluenceError::Io {
    path: path.to_path_buf(),
    source,
  })?;

  let file_name = match file_name {
    Some(name) => name.to_string(),
    None => path
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .ok_or_else(|| ConfluenceError::invalid(format!("{} has no file name", path.display())))?,
  };

  debug!(file = %path.display(), name = %file_name, size = bytes.len(), "read attachment");
  Ok(FilePart {
    field: "file".to_string(),
    file_name,
    bytes,
    media_type: media_type.map(str::to_string),
  })
}

fn attachment_path(content_id: &str, attachment_id: &str) -> String {
  api_path(&format!(
    "content/{}/child/attachment/{}",
    segment(content_id),
    segment(attachment_id)
  ))
}

impl<Tr: Transport> Confluence<Tr> {
  /// Attachments of a piece of content.
  ///
  /// # Arguments
  /// * `id` - Content the attachments belong to.
  /// * `filename` - Exact file name to match.
  /// * `media_type` - Media type to match, e.g. `image/png`.
  /// * `expand` - Fields to expand on each attachment.
  pub fn get_attachments(
    &self,
    id: &str,
    filename: Option<&str>,
    media_type: Option<&str>,
    expand: &[&str],
  ) -> Result<Paged<'_, Content, Tr>> {
    ensure_present(id, "content id")?;
    let params = Query::new()
      .push_opt("filename", filename)
      .push_opt("mediaType", media_type)
      .expand(expand)
      .build();

    Ok(self.paged(ApiRequest::get(api_path(&format!("content/{}/child/attachment", segment(id)))).with_params(params)))
  }

  /// Upload a local file as a new attachment.
  ///
  /// The attachment is named after the file unless `file_name` is given.
  /// Without a `media_type` the server guesses one from the name.
  ///
  /// # Errors
  /// `InvalidArgument` for statuses other than `current` and `draft`, `Io`
  /// if the file cannot be read, `Transport` for a malformed media type.
  pub fn add_attachment(
    &self,
    id: &str,
    file_path: &Path,
    file_name: Option<&str>,
    media_type: Option<&str>,
    status: Option<ContentStatus>,
  ) -> Result<Vec<Content>> {
    ensure_present(id, "content id")?;
    ensure(
      matches!(status, None | Some(ContentStatus::Current | ContentStatus::Draft)),
      "only draft or current are valid states for a new attachment",
    )?;

    let form = MultipartForm {
      files: vec![file_part(file_path, file_name, media_type)?],
      fields: Vec::new(),
    };
    let params = Query::new().push_opt("status", status).build();

    let created: Results<Content> = self.execute_json(
      ApiRequest::post(api_path(&format!("content/{}/child/attachment", segment(id))))
        .with_params(params)
        .with_multipart(form),
    )?;
    Ok(created.results)
  }

  /// Rename an attachment or change its media type.
  ///
  /// `version` is the attachment's next version number.
  pub fn update_attachment(
    &self,
    content_id: &str,
    attachment_id: &str,
    version: u64,
    new_filename: Option<&str>,
    new_media_type: Option<&str>,
  ) -> Result<Content> {
    ensure_present(content_id, "content id")?;
    ensure_present(attachment_id, "attachment id")?;
    ensure(
      new_filename.is_some() || new_media_type.is_some(),
      "a new file name or media type is required",
    )?;

    let mut body = json!({
      "id": attachment_id,
      "type": ContentType::Attachment,
      "version": { "number": version },
    });
    if let Some(name) = new_filename {
      body["title"] = json!(name);
    }
    if let Some(media_type) = new_media_type {
      body["metadata"] = json!({ "mediaType": media_type });
    }

    self.execute_json(ApiRequest::put(attachment_path(content_id, attachment_id)).with_json(body))
  }

  /// Replace the binary data of an attachment with a local file.
  pub fn update_attachment_data(
    &self,
    content_id: &str,
    attachment_id: &str,
    file_path: &Path,
    new_filename: Option<&str>,
    comment: Option<&str>,
    minor_edit: bool,
  ) -> Result<Content> {
    ensure_present(content_id, "content id")?;
    ensure_present(attachment_id, "attachment id")?;

    let mut fields = vec![("minorEdit".to_string(), minor_edit.to_string())];
    if let Some(comment) = comment {
      fields.push(("comment".to_string(), comment.to_string()));
    }
    let form = MultipartForm {
      files: vec![file_part(file_path, new_filename, None)?],
      fields,
    };

    let path = format!("{}/data", attachment_path(content_id, attachment_id));
    self.execute_json(ApiRequest::post(path).with_multipart(form))
  }

  /// Download the bytes of an attachment.
  ///
  /// # Errors
  /// `InvalidArgument` unless `attachment` is an attachment carrying a
  /// download link (fetch it with the default expansions to get one).
  pub fn download_attachment(&self, attachment: &Content) -> Result<Vec<u8>> {
    ensure(
      attachment.content_type == ContentType::Attachment,
      &format!("{} is not an attachment", attachment.id),
    )?;
    let download = attachment
      .links
      .as_ref()
      .and_then(|links| links.download.as_deref())
      .ok_or_else(|| ConfluenceError::invalid(format!("attachment {} has no download link", attachment.id)))?;

    let response = self.execute(ApiRequest::get(download))?;
    Ok(response.body)
  }
}
