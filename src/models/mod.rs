//! Typed records decoded from Confluence REST API responses.
//!
//! Required keys are plain fields, so a response missing one fails to decode.
//! Expandable substructures are `Option`s that stay `None` unless the key was
//! present, which keeps "not requested" distinguishable from "empty".

mod audit;
mod content;
pub(crate) mod de;
mod label;
mod longtask;
mod property;
mod space;
mod user;

pub use audit::{AffectedObject, AuditRecord, ChangedValue};
pub use content::{
  BodyFormat, BodyRepresentation, CommentDepth, CommentLocation, Content, ContentBody, ContentHistory, ContentLinks,
  ContentStatus, ContentType, ContentVersion, Version,
};
pub use label::{Label, LabelPrefix};
pub use longtask::{LongTask, LongTaskLinks, LongTaskRef, TaskMessage, TaskName};
pub use property::{ContentProperty, SpaceProperty};
pub use space::{Space, SpaceStatus, SpaceType};
pub use user::{Group, Icon, User};
