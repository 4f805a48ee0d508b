//! Test fixtures for Confluence REST API responses
//!
//! Realistic response bodies, trimmed to the fields the client decodes.

use serde_json::{Value, json};

// A page or blog post as returned by `/rest/api/content`
pub fn content(id: &str, title: &str, content_type: &str) -> Value {
  json!({
    "id": id,
    "type": content_type,
    "status": "current",
    "title": title,
    "_links": {
      "webui": format!("/display/DOCS/{}", title.replace(' ', "+")),
      "tinyui": "/x/AbCd",
      "self": format!("https://wiki.example.com/rest/api/content/{id}")
    }
  })
}

pub fn page(id: &str, title: &str) -> Value {
  content(id, title, "page")
}

pub fn blog_post(id: &str, title: &str) -> Value {
  content(id, title, "blogpost")
}

// A page with its storage body, space and version expanded
pub fn expanded_page() -> Value {
  json!({
    "id": "123456",
    "type": "page",
    "status": "current",
    "title": "Getting Started Guide",
    "body": {
      "storage": {
        "value": "<h1>Getting Started</h1><p>Welcome to our documentation!</p>",
        "representation": "storage"
      }
    },
    "space": {
      "id": 98305,
      "key": "DOCS",
      "name": "Documentation",
      "type": "global"
    },
    "version": {
      "by": { "type": "known", "username": "alice", "displayName": "Alice Example", "userKey": "8a7f808a" },
      "when": "2024-03-01T10:15:30.000Z",
      "message": "",
      "number": 3,
      "minorEdit": false
    },
    "_links": {
      "webui": "/display/DOCS/Getting+Started+Guide",
      "self": "https://wiki.example.com/rest/api/content/123456"
    }
  })
}

// An attachment listing entry with a download link
pub fn attachment(id: &str, file_name: &str) -> Value {
  json!({
    "id": id,
    "type": "attachment",
    "status": "current",
    "title": file_name,
    "metadata": { "mediaType": "image/png" },
    "_links": {
      "webui": format!("/pages/viewpageattachments.action?pageId=123456&preview=/123456/{id}/{file_name}"),
      "download": format!("/download/attachments/123456/{file_name}?version=1&modificationDate=1709288130000&api=v2"),
      "self": format!("https://wiki.example.com/rest/api/content/{id}")
    }
  })
}

pub fn space(id: i64, key: &str, name: &str) -> Value {
  json!({
    "id": id,
    "key": key,
    "name": name,
    "type": "global",
    "status": "current",
    "_links": { "webui": format!("/display/{key}") }
  })
}

pub fn user(username: &str, display_name: &str) -> Value {
  json!({
    "type": "known",
    "username": username,
    "userKey": "8a7f808a8b1c2d3e",
    "displayName": display_name,
    "profilePicture": {
      "path": "/images/icons/profilepics/default.svg",
      "width": 48,
      "height": 48,
      "isDefault": true
    }
  })
}

pub fn group(name: &str) -> Value {
  json!({ "type": "group", "name": name })
}

pub fn label(id: &str, name: &str) -> Value {
  json!({ "prefix": "global", "name": name, "id": id })
}

pub fn property(key: &str, value: Value, version: u64) -> Value {
  json!({
    "key": key,
    "value": value,
    "version": { "number": version, "minorEdit": false }
  })
}

pub fn long_task(id: &str, percentage_complete: u32) -> Value {
  json!({
    "id": id,
    "name": { "key": "com.atlassian.confluence.extra.flyingpdf.exporttaskname", "args": [] },
    "elapsedTime": 5234,
    "percentageComplete": percentage_complete,
    "successful": true,
    "messages": []
  })
}

pub fn audit_record(summary: &str) -> Value {
  json!({
    "author": { "type": "user", "displayName": "Alice Example", "username": "alice", "userKey": "8a7f808a" },
    "remoteAddress": "10.0.0.12",
    "creationDate": 1709288130000_i64,
    "summary": summary,
    "description": "",
    "category": "Permissions",
    "sysAdmin": true,
    "affectedObject": { "name": "DOCS", "objectType": "Space" },
    "changedValues": [],
    "associatedObjects": []
  })
}

// One page of a paginated listing; `next` is the server's `_links.next`
pub fn results_page(results: Vec<Value>, start: usize, limit: usize, next: Option<&str>) -> Value {
  let size = results.len();
  let mut links = json!({
    "base": "https://wiki.example.com",
    "context": ""
  });
  if let Some(next) = next {
    links["next"] = json!(next);
  }

  json!({
    "results": results,
    "start": start,
    "limit": limit,
    "size": size,
    "_links": links
  })
}

// Error body in the shape Confluence Server uses
pub fn error_body(status: u16, message: &str) -> Value {
  json!({
    "statusCode": status,
    "data": { "authorized": status != 401, "valid": true, "errors": [], "successful": false },
    "message": message,
    "reason": message
  })
}
