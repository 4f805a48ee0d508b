//! Client operations against a scripted transport
//!
//! Covers argument validation, request shapes and status mapping for the
//! non-paginated operations.

mod common;

use std::io::Write;

use chrono::NaiveDate;
use common::fake_transport::FakeTransport;
use common::fixtures;
use confluence_rest::models::{
  BodyFormat, CommentDepth, CommentLocation, Content, ContentStatus, ContentType, LabelPrefix, SpaceType,
};
use confluence_rest::{
  CommentQuery, ConfluenceError, ContentQuery, ContentUpdate, NewContent, RequestBody, SpaceQuery, UserRef,
};
use reqwest::Method;
use serde_json::json;

fn assert_invalid<T: std::fmt::Debug>(result: confluence_rest::Result<T>) {
  match result {
    Err(ConfluenceError::InvalidArgument(_)) => {}
    other => panic!("expected InvalidArgument, got {other:?}"),
  }
}

fn json_body(body: &RequestBody) -> serde_json::Value {
  match body {
    RequestBody::Json(value) => value.clone(),
    other => panic!("expected a JSON body, got {other:?}"),
  }
}

#[test]
fn test_fetch_page_by_id() {
  let client = FakeTransport::new().respond(200, fixtures::expanded_page()).into_client();

  let page = client
    .get_content_by_id("123456", None, None, &["body.storage", "space", "version"])
    .unwrap();

  assert_eq!(page.title, "Getting Started Guide");
  assert_eq!(page.space.unwrap().key, "DOCS");
  assert_eq!(page.version.unwrap().number, 3);
  assert!(page.body.unwrap().storage.unwrap().value.contains("Welcome"));

  let request = client.transport().last_request();
  assert_eq!(request.method, Method::GET);
  assert_eq!(request.path, "/rest/api/content/123456");
  assert_eq!(request.param("expand"), Some("body.storage,space,version"));
  assert_eq!(request.param("status"), None);
}

#[test]
fn test_missing_page_maps_to_not_found() {
  let client = FakeTransport::new()
    .respond(404, fixtures::error_body(404, "No content found with id: 999"))
    .into_client();

  let err = client
    .get_content_by_id("999", Some(ContentStatus::Trashed), None, &[])
    .unwrap_err();

  assert!(err.is_not_found());
  let failure = err.failure().unwrap();
  assert_eq!(failure.path, "/rest/api/content/999");
  assert_eq!(failure.params, vec![("status".to_string(), "trashed".to_string())]);
  assert!(failure.response.text().contains("No content found"));
}

#[test]
fn test_bad_credentials_map_to_authentication() {
  let client = FakeTransport::new()
    .respond_raw(401, b"<html>Unauthorized</html>")
    .into_client();

  let err = client.get_current_user().unwrap_err();
  assert!(matches!(err, ConfluenceError::Authentication(_)));
  assert!(err.to_string().contains("/rest/api/user/current"));
}

#[test]
fn test_unmapped_status_is_unclassified() {
  let client = FakeTransport::new()
    .respond(503, fixtures::error_body(503, "Service unavailable"))
    .into_client();

  let err = client.get_space("DOCS", &[]).unwrap_err();
  assert!(matches!(err, ConfluenceError::Unclassified(_)));
  assert_eq!(err.status(), Some(503));
}

#[test]
fn test_malformed_body_reports_path() {
  let client = FakeTransport::new().respond(200, json!({ "id": 7 })).into_client();

  match client.get_space("DOCS", &[]).unwrap_err() {
    ConfluenceError::MalformedResponse { path, .. } => assert_eq!(path, "/rest/api/space/DOCS"),
    other => panic!("unexpected error {other:?}"),
  }
}

#[test]
fn test_comment_type_is_rejected_before_any_request() {
  let client = FakeTransport::new().into_client();

  let mut content = NewContent::page("DOCS", "Title", "<p>Body</p>");
  content.content_type = ContentType::Comment;

  assert_invalid(client.create_content(&content));
  assert_invalid(client.get_content(&ContentQuery::of_type(ContentType::Attachment)));
  assert_invalid(client.get_content(
    &ContentQuery::pages().posted_on(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
  ));
  assert_eq!(client.transport().request_count(), 0);
}

#[test]
fn test_create_page_under_parent() {
  let client = FakeTransport::new()
    .respond(200, fixtures::page("654321", "Child"))
    .into_client();

  let created = client
    .create_content(&NewContent::page("DOCS", "Child", "<p>Hello</p>").parent("123456"))
    .unwrap();
  assert_eq!(created.id, "654321");

  let request = client.transport().last_request();
  assert_eq!(request.method, Method::POST);
  assert_eq!(request.path, "/rest/api/content");
  assert_eq!(
    json_body(&request.body),
    json!({
      "type": "page",
      "title": "Child",
      "space": { "key": "DOCS" },
      "body": { "storage": { "value": "<p>Hello</p>", "representation": "storage" } },
      "ancestors": [{ "id": "123456" }]
    })
  );
}

#[test]
fn test_blog_posts_by_posting_day() {
  let client = FakeTransport::new()
    .respond(200, fixtures::results_page(vec![fixtures::blog_post("77", "Launch")], 0, 25, None))
    .into_client();

  let query = ContentQuery::blog_posts()
    .space("NEWS")
    .posted_on(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
  let posts: Vec<_> = client.get_content(&query).unwrap().map(Result::unwrap).collect();
  assert_eq!(posts.len(), 1);

  let request = client.transport().last_request();
  assert_eq!(request.param("type"), Some("blogpost"));
  assert_eq!(request.param("postingDay"), Some("2024-03-01"));
}

#[test]
fn test_update_conflict_maps_to_version_conflict() {
  let client = FakeTransport::new()
    .respond(409, fixtures::error_body(409, "Version must be incremented on update. Current version is: 5"))
    .into_client();

  let update = ContentUpdate::new("123456", ContentType::Page, 3)
    .title("Renamed")
    .body("<p>New</p>")
    .minor_edit(true)
    .message("typo");
  let err = client.update_content(&update).unwrap_err();

  assert!(matches!(err, ConfluenceError::VersionConflict(_)));
  assert_eq!(err.failure().unwrap().path, "/rest/api/content/123456");

  let request = client.transport().last_request();
  assert_eq!(request.method, Method::PUT);
  let body = json_body(&request.body);
  assert_eq!(body["version"], json!({ "number": 3, "minorEdit": true, "message": "typo" }));
  assert_eq!(body["title"], "Renamed");
}

#[test]
fn test_publishing_a_draft_sends_version_one() {
  let client = FakeTransport::new()
    .respond(409, fixtures::error_body(409, "Version must be incremented on update. Current version is: 4"))
    .into_client();

  let update = ContentUpdate::new("123456", ContentType::Page, 1)
    .current_status(ContentStatus::Draft)
    .new_status(ContentStatus::Current);
  let err = client.update_content(&update).unwrap_err();

  assert!(matches!(err, ConfluenceError::VersionConflict(_)));
  assert_eq!(err.failure().unwrap().path, "/rest/api/content/123456");
  assert_eq!(client.transport().request_count(), 1);

  let request = client.transport().last_request();
  assert_eq!(request.param("status"), Some("draft"));
  let body = json_body(&request.body);
  assert_eq!(body["version"]["number"], 1);
  assert_eq!(body["status"], "current");
}

#[test]
fn test_content_history() {
  let client = FakeTransport::new()
    .respond(
      200,
      json!({
        "latest": false,
        "createdBy": fixtures::user("alice", "Alice Example"),
        "createdDate": "2024-03-01T09:15:00.000Z"
      }),
    )
    .into_client();

  let history = client.get_content_history("123456", &["lastUpdated"]).unwrap();
  assert!(!history.latest);
  assert_eq!(history.created_by.to_string(), "alice");

  let request = client.transport().last_request();
  assert_eq!(request.method, Method::GET);
  assert_eq!(request.path, "/rest/api/content/123456/history");
  assert_eq!(request.param("expand"), Some("lastUpdated"));
}

#[test]
fn test_delete_content_statuses() {
  let client = FakeTransport::new().respond_raw(204, b"").into_client();

  assert_invalid(client.delete_content("123456", Some(ContentStatus::Historical)));
  assert_eq!(client.transport().request_count(), 0);

  client.delete_content("123456", Some(ContentStatus::Trashed)).unwrap();
  let request = client.transport().last_request();
  assert_eq!(request.method, Method::DELETE);
  assert_eq!(request.param("status"), Some("trashed"));
}

#[test]
fn test_comment_filters() {
  let client = FakeTransport::new()
    .respond(200, fixtures::results_page(vec![], 0, 25, None))
    .respond(200, fixtures::results_page(vec![], 0, 25, None))
    .into_client();

  let query = CommentQuery::default()
    .depth(CommentDepth::All)
    .location(CommentLocation::Inline)
    .location(CommentLocation::Footer)
    .expand(&["body.view", "version"]);
  assert_eq!(client.get_comments("123456", &query).unwrap().count(), 0);

  let request = client.transport().last_request();
  assert_eq!(request.path, "/rest/api/content/123456/child/comment");
  let locations: Vec<&str> = request
    .params
    .iter()
    .filter(|(name, _)| name == "location")
    .map(|(_, value)| value.as_str())
    .collect();
  assert_eq!(locations, vec!["inline", "footer"]);
  assert_eq!(request.param("depth"), Some("all"));
  assert_eq!(request.param("expand"), Some("body.view,version"));

  let root_only = CommentQuery::default().depth(CommentDepth::Root);
  assert_eq!(client.get_comments("123456", &root_only).unwrap().count(), 0);
  assert_eq!(client.transport().last_request().param("depth"), None);
}

#[test]
fn test_space_filters() {
  let client = FakeTransport::new()
    .respond(200, fixtures::results_page(vec![fixtures::space(1, "DOCS", "Documentation")], 0, 25, None))
    .into_client();

  let query = SpaceQuery::default()
    .key("DOCS")
    .key("OPS")
    .space_type(SpaceType::Global)
    .favourite(true);
  let spaces: Vec<_> = client.get_spaces(&query).unwrap().map(Result::unwrap).collect();
  assert_eq!(spaces.len(), 1);

  let params = client.transport().last_request().params;
  assert_eq!(
    params,
    vec![
      ("spaceKey".to_string(), "DOCS".to_string()),
      ("spaceKey".to_string(), "OPS".to_string()),
      ("type".to_string(), "global".to_string()),
      ("favourite".to_string(), "true".to_string()),
    ]
  );
}

#[test]
fn test_create_private_space() {
  let client = FakeTransport::new()
    .respond(200, fixtures::space(2, "TEAM", "Team"))
    .into_client();

  assert_invalid(client.create_space("NOT VALID", "Team", None, false));

  let space = client.create_space("TEAM", "Team", Some("Our team"), true).unwrap();
  assert_eq!(space.key, "TEAM");

  let request = client.transport().last_request();
  assert_eq!(request.path, "/rest/api/space/_private");
  assert_eq!(json_body(&request.body)["description"]["plain"]["value"], "Our team");
  assert_eq!(client.transport().request_count(), 1);
}

#[test]
fn test_update_space_needs_a_change() {
  let client = FakeTransport::new().into_client();
  assert_invalid(client.update_space("DOCS", None, None));
  assert_eq!(client.transport().request_count(), 0);
}

#[test]
fn test_user_reference_must_be_unambiguous() {
  assert_invalid(UserRef::from_parts(None, None));
  assert_invalid(UserRef::from_parts(Some("alice"), Some("8a7f808a")));
  assert_invalid(UserRef::optional(Some("alice"), Some("8a7f808a")));
  assert_eq!(UserRef::optional(Some(""), None).unwrap(), None);
  assert_eq!(UserRef::from_parts(None, Some("8a7f808a")).unwrap(), UserRef::key("8a7f808a"));
}

#[test]
fn test_get_user_by_key() {
  let client = FakeTransport::new()
    .respond(200, fixtures::user("alice", "Alice Example"))
    .into_client();

  let user = client.get_user(&UserRef::key("8a7f808a8b1c2d3e"), &[]).unwrap();
  assert_eq!(user.display_name.as_deref(), Some("Alice Example"));

  let request = client.transport().last_request();
  assert_eq!(request.path, "/rest/api/user");
  assert_eq!(request.param("key"), Some("8a7f808a8b1c2d3e"));
}

#[test]
fn test_watch_operations() {
  let client = FakeTransport::new()
    .respond(200, json!({ "watching": true }))
    .respond_raw(204, b"")
    .respond_raw(204, b"")
    .into_client();

  let bob = UserRef::username("bob");
  assert!(client.is_user_watching_space("DOCS", Some(&bob)).unwrap());
  client.add_label_watch("release-notes", None).unwrap();
  client.remove_content_watch("123456", Some(&bob)).unwrap();

  let requests = client.transport().requests();
  assert_eq!(requests[0].path, "/rest/api/user/watch/space/DOCS");
  assert_eq!(requests[0].param("username"), Some("bob"));
  assert_eq!(requests[1].method, Method::POST);
  assert_eq!(requests[1].path, "/rest/api/user/watch/label/release-notes");
  assert!(requests[1].params.is_empty());
  assert_eq!(requests[2].method, Method::DELETE);
  assert_eq!(requests[2].path, "/rest/api/user/watch/content/123456");
}

#[test]
fn test_labels() {
  let client = FakeTransport::new()
    .respond(
      200,
      json!({ "results": [fixtures::label("1", "howto"), fixtures::label("2", "draft")], "size": 2 }),
    )
    .respond_raw(204, b"")
    .into_client();

  assert_invalid(client.create_labels("123456", &[]));
  assert_invalid(client.create_labels("123456", &[(LabelPrefix::Global, "two words")]));

  let labels = client
    .create_labels("123456", &[(LabelPrefix::Global, "howto"), (LabelPrefix::Global, "draft")])
    .unwrap();
  assert_eq!(labels.len(), 2);
  assert_eq!(
    json_body(&client.transport().last_request().body),
    json!([{ "prefix": "global", "name": "howto" }, { "prefix": "global", "name": "draft" }])
  );

  client.delete_label("123456", "draft").unwrap();
  let request = client.transport().last_request();
  assert_eq!(request.path, "/rest/api/content/123456/label");
  assert_eq!(request.param("name"), Some("draft"));
}

#[test]
fn test_property_versions() {
  let client = FakeTransport::new()
    .respond(200, fixtures::property("owner", json!({ "team": "docs" }), 2))
    .into_client();

  let property = client
    .update_content_property("123456", "owner", &json!({ "team": "docs" }), 2, true)
    .unwrap();
  assert_eq!(property.version.unwrap().number, 2);

  let request = client.transport().last_request();
  assert_eq!(request.path, "/rest/api/content/123456/property/owner");
  assert_eq!(json_body(&request.body)["version"], json!({ "number": 2, "minorEdit": true }));
}

#[test]
fn test_property_version_conflict_comes_from_server() {
  let client = FakeTransport::new()
    .respond(409, fixtures::error_body(409, "Version mismatch"))
    .into_client();

  let err = client
    .update_content_property("123456", "owner", &json!({ "team": "docs" }), 1, false)
    .unwrap_err();

  assert!(matches!(err, ConfluenceError::VersionConflict(_)));
  assert_eq!(err.failure().unwrap().path, "/rest/api/content/123456/property/owner");
  assert_eq!(client.transport().request_count(), 1);
  assert_eq!(
    json_body(&client.transport().last_request().body)["version"],
    json!({ "number": 1, "minorEdit": false })
  );
}

#[test]
fn test_space_property_lifecycle() {
  let client = FakeTransport::new()
    .respond(200, fixtures::results_page(vec![fixtures::property("theme", json!("dark"), 1)], 0, 25, None))
    .respond(200, fixtures::property("theme", json!("dark"), 1))
    .respond(200, fixtures::property("owner", json!({ "team": "docs" }), 1))
    .respond(200, fixtures::property("owner", json!({ "team": "ops" }), 2))
    .respond_raw(204, b"")
    .into_client();

  let listed: Vec<_> = client
    .get_space_properties("DOCS", &["version"])
    .unwrap()
    .map(Result::unwrap)
    .collect();
  assert_eq!(listed[0].key, "theme");

  let theme = client.get_space_property("DOCS", "theme", &[]).unwrap();
  assert_eq!(theme.value, json!("dark"));

  let created = client
    .create_space_property("DOCS", "owner", &json!({ "team": "docs" }))
    .unwrap();
  assert_eq!(created.version.unwrap().number, 1);

  let updated = client
    .update_space_property("DOCS", "owner", &json!({ "team": "ops" }), 2, false)
    .unwrap();
  assert_eq!(updated.value["team"], "ops");

  client.delete_space_property("DOCS", "owner").unwrap();

  let requests = client.transport().requests();
  assert_eq!(requests.len(), 5);

  assert_eq!(requests[0].method, Method::GET);
  assert_eq!(requests[0].path, "/rest/api/space/DOCS/property");
  assert_eq!(requests[0].param("expand"), Some("version"));

  assert_eq!(requests[1].method, Method::GET);
  assert_eq!(requests[1].path, "/rest/api/space/DOCS/property/theme");

  assert_eq!(requests[2].method, Method::POST);
  assert_eq!(requests[2].path, "/rest/api/space/DOCS/property");
  assert_eq!(
    json_body(&requests[2].body),
    json!({ "key": "owner", "value": { "team": "docs" } })
  );

  assert_eq!(requests[3].method, Method::PUT);
  assert_eq!(requests[3].path, "/rest/api/space/DOCS/property/owner");
  assert_eq!(
    json_body(&requests[3].body),
    json!({ "key": "owner", "value": { "team": "ops" }, "version": { "number": 2, "minorEdit": false } })
  );

  assert_eq!(requests[4].method, Method::DELETE);
  assert_eq!(requests[4].path, "/rest/api/space/DOCS/property/owner");
}

#[test]
fn test_delete_space_returns_task_handle() {
  let client = FakeTransport::new()
    .respond(202, json!({ "id": "8519697", "links": { "status": "/rest/api/longtask/8519697" } }))
    .into_client();

  let task = client.delete_space("OLD").unwrap();
  assert_eq!(task.id, "8519697");
  assert_eq!(task.links.status.as_deref(), Some("/rest/api/longtask/8519697"));

  let request = client.transport().last_request();
  assert_eq!(request.method, Method::DELETE);
  assert_eq!(request.path, "/rest/api/space/OLD");
  assert!(request.params.is_empty());
}

#[test]
fn test_user_and_group_lookups() {
  let client = FakeTransport::new()
    .respond(200, json!({ "type": "anonymous", "displayName": "Anonymous" }))
    .respond(200, fixtures::results_page(vec![fixtures::group("confluence-users")], 0, 200, None))
    .respond(200, fixtures::group("confluence-administrators"))
    .respond(200, fixtures::results_page(vec![fixtures::user("alice", "Alice Example")], 0, 200, None))
    .into_client();

  let anonymous = client.get_anonymous_user().unwrap();
  assert!(anonymous.username.is_none());

  let groups: Vec<_> = client
    .get_user_groups(&UserRef::username("alice"), &[])
    .unwrap()
    .map(Result::unwrap)
    .collect();
  assert_eq!(groups[0].name, "confluence-users");

  let group = client.get_group("confluence-administrators", &[]).unwrap();
  assert_eq!(group.group_type, "group");

  let members: Vec<_> = client
    .get_group_members("confluence-administrators", &["status"])
    .unwrap()
    .map(Result::unwrap)
    .collect();
  assert_eq!(members[0].to_string(), "alice");

  let requests = client.transport().requests();
  assert_eq!(requests[0].path, "/rest/api/user/anonymous");
  assert!(requests[0].params.is_empty());
  assert_eq!(requests[1].path, "/rest/api/user/memberof");
  assert_eq!(requests[1].param("username"), Some("alice"));
  assert_eq!(requests[2].path, "/rest/api/group/confluence-administrators");
  assert_eq!(requests[3].path, "/rest/api/group/confluence-administrators/member");
  assert_eq!(requests[3].param("expand"), Some("status"));

  assert_invalid(client.get_group("", &[]));
  assert_invalid(client.get_user_groups(&UserRef::key(""), &[]));
  assert_eq!(client.transport().request_count(), 4);
}

#[test]
fn test_list_long_tasks() {
  let client = FakeTransport::new()
    .respond(
      200,
      fixtures::results_page(
        vec![fixtures::long_task("task-1", 100), fixtures::long_task("task-2", 40)],
        0,
        100,
        None,
      ),
    )
    .into_client();

  let tasks: Vec<_> = client.get_long_tasks(&[]).unwrap().map(Result::unwrap).collect();
  assert_eq!(tasks.len(), 2);
  assert!(tasks[0].is_complete());
  assert!(!tasks[1].is_complete());

  let request = client.transport().last_request();
  assert_eq!(request.path, "/rest/api/longtask");
  assert!(request.params.is_empty());
}

#[test]
fn test_audit_date_range() {
  let client = FakeTransport::new()
    .respond(200, fixtures::results_page(vec![fixtures::audit_record("Space permission added")], 0, 25, None))
    .into_client();

  let march = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
  let april = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();

  assert_invalid(client.get_audit_records(Some(april), Some(march), None));
  assert_eq!(client.transport().request_count(), 0);

  let records: Vec<_> = client
    .get_audit_records(Some(march), Some(april), Some("permission"))
    .unwrap()
    .map(Result::unwrap)
    .collect();
  assert_eq!(records[0].remote_addresses, vec!["10.0.0.12"]);

  let request = client.transport().last_request();
  assert_eq!(request.param("startDate"), Some("2024-03-01"));
  assert_eq!(request.param("endDate"), Some("2024-04-01"));
  assert_eq!(request.param("searchString"), Some("permission"));
}

#[test]
fn test_long_task_progress() {
  let client = FakeTransport::new()
    .respond(200, fixtures::long_task("task-1", 100))
    .into_client();

  let task = client.get_long_task("task-1", &[]).unwrap();
  assert!(task.is_complete());
  assert_eq!(client.transport().last_request().path, "/rest/api/longtask/task-1");
}

#[test]
fn test_upload_attachment() {
  let mut file = tempfile::NamedTempFile::new().unwrap();
  file.write_all(b"\x89PNG fake image").unwrap();

  let client = FakeTransport::new()
    .respond(200, json!({ "results": [fixtures::attachment("att1", "diagram.png")], "size": 1 }))
    .into_client();

  assert_invalid(client.add_attachment("123456", file.path(), None, None, Some(ContentStatus::Trashed)));

  let created = client
    .add_attachment("123456", file.path(), Some("diagram.png"), Some("image/png"), None)
    .unwrap();
  assert_eq!(created[0].title, "diagram.png");

  let request = client.transport().last_request();
  assert_eq!(request.path, "/rest/api/content/123456/child/attachment");
  match &request.body {
    RequestBody::Multipart(form) => {
      assert_eq!(form.files.len(), 1);
      assert_eq!(form.files[0].field, "file");
      assert_eq!(form.files[0].file_name, "diagram.png");
      assert_eq!(form.files[0].bytes, b"\x89PNG fake image");
      assert_eq!(form.files[0].media_type.as_deref(), Some("image/png"));
    }
    other => panic!("expected multipart body, got {other:?}"),
  }
}

#[test]
fn test_rename_attachment() {
  let client = FakeTransport::new()
    .respond(200, fixtures::attachment("att1", "architecture.png"))
    .into_client();

  assert_invalid(client.update_attachment("123456", "att1", 2, None, None));
  assert_eq!(client.transport().request_count(), 0);

  let renamed = client
    .update_attachment("123456", "att1", 2, Some("architecture.png"), Some("image/svg+xml"))
    .unwrap();
  assert_eq!(renamed.title, "architecture.png");

  let request = client.transport().last_request();
  assert_eq!(request.method, Method::PUT);
  assert_eq!(request.path, "/rest/api/content/123456/child/attachment/att1");
  assert_eq!(
    json_body(&request.body),
    json!({
      "id": "att1",
      "type": "attachment",
      "version": { "number": 2 },
      "title": "architecture.png",
      "metadata": { "mediaType": "image/svg+xml" }
    })
  );
}

#[test]
fn test_replace_attachment_data() {
  let mut file = tempfile::NamedTempFile::new().unwrap();
  file.write_all(b"\x89PNG second revision").unwrap();

  let client = FakeTransport::new()
    .respond(200, fixtures::attachment("att1", "diagram.png"))
    .into_client();

  let updated = client
    .update_attachment_data("123456", "att1", file.path(), Some("diagram.png"), Some("new colours"), true)
    .unwrap();
  assert_eq!(updated.id, "att1");

  let request = client.transport().last_request();
  assert_eq!(request.method, Method::POST);
  assert_eq!(request.path, "/rest/api/content/123456/child/attachment/att1/data");
  match &request.body {
    RequestBody::Multipart(form) => {
      assert_eq!(
        form.fields,
        vec![
          ("minorEdit".to_string(), "true".to_string()),
          ("comment".to_string(), "new colours".to_string()),
        ]
      );
      assert_eq!(form.files[0].file_name, "diagram.png");
      assert_eq!(form.files[0].bytes, b"\x89PNG second revision");
      assert!(form.files[0].media_type.is_none());
    }
    other => panic!("expected multipart body, got {other:?}"),
  }
}

#[test]
fn test_upload_missing_file_is_io_error() {
  let client = FakeTransport::new().into_client();
  let err = client
    .add_attachment("123456", std::path::Path::new("/definitely/not/here.png"), None, None, None)
    .unwrap_err();
  assert!(matches!(err, ConfluenceError::Io { .. }));
  assert_eq!(client.transport().request_count(), 0);
}

#[test]
fn test_download_uses_link_verbatim() {
  let client = FakeTransport::new()
    .respond(200, fixtures::results_page(vec![fixtures::attachment("att1", "diagram.png")], 0, 25, None))
    .respond_raw(200, b"\x89PNG")
    .into_client();

  let attachment = client
    .get_attachments("123456", Some("diagram.png"), None, &[])
    .unwrap()
    .next()
    .unwrap()
    .unwrap();
  let bytes = client.download_attachment(&attachment).unwrap();
  assert_eq!(bytes, b"\x89PNG");

  let request = client.transport().last_request();
  assert!(request.path.starts_with("/download/attachments/123456/diagram.png?version=1"));
  assert!(request.params.is_empty());

  let page: Content = serde_json::from_value(fixtures::page("1", "Page")).unwrap();
  assert_invalid(client.download_attachment(&page));
}

#[test]
fn test_session_opens_and_closes_once() {
  let mut client = FakeTransport::new()
    .respond(200, fixtures::user("alice", "Alice Example"))
    .respond(200, fixtures::space(1, "DOCS", "Documentation"))
    .into_client();

  {
    let session = client.session().unwrap();
    session.get_current_user().unwrap();
    session.get_space("DOCS", &[]).unwrap();
  }

  assert_eq!(client.transport().opened(), 1);
  assert_eq!(client.transport().closed(), 1);
  assert_eq!(client.transport().request_count(), 2);
}

#[test]
fn test_session_closes_when_an_operation_fails() {
  fn failing(client: &mut confluence_rest::Confluence<FakeTransport>) -> confluence_rest::Result<()> {
    let session = client.session()?;
    session.get_content_by_id("1", None, None, &[])?;
    Ok(())
  }

  let mut client = FakeTransport::new()
    .respond(403, fixtures::error_body(403, "Not permitted"))
    .into_client();

  assert!(matches!(failing(&mut client), Err(ConfluenceError::PermissionDenied(_))));
  assert_eq!(client.transport().closed(), 1);
}

#[test]
fn test_convert_body() {
  let client = FakeTransport::new()
    .respond(200, json!({ "value": "<p>hi</p>", "representation": "view" }))
    .into_client();

  let converted = client
    .convert_content_body("<p>hi</p>", BodyFormat::Storage, BodyFormat::View)
    .unwrap();
  assert_eq!(converted.representation, "view");
  assert_eq!(client.transport().last_request().path, "/rest/api/contentbody/convert/view");
}
