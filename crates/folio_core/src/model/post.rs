//! Blog post records.

use crate::model::dates::{deserialize_opt, serialize_opt};
use crate::model::portfolio::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Published blog post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "ID", default)]
    pub id: RecordId,
    #[serde(rename = "Title", default)]
    pub title: String,
    /// Rich-text payload, or legacy plain text.
    #[serde(rename = "Content", default)]
    pub content: String,
    #[serde(
        rename = "PublishedAt",
        default,
        serialize_with = "serialize_opt",
        deserialize_with = "deserialize_opt"
    )]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(rename = "UserID", default)]
    pub user_id: RecordId,
}

/// Body of post create/update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostDraft {
    #[serde(rename = "Title")]
    pub title: String,
    /// Encoded rich-text payload.
    #[serde(rename = "Content")]
    pub content: String,
}
