use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::NewDocument;

/// An attachment as carried on the wire: base64 payload plus display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentPayload {
    pub buffer: String,
    pub name: String,
}

impl DocumentPayload {
    /// The stored form keeps the buffer exactly as received; decoding
    /// happens in the media batcher.
    #[must_use]
    pub fn to_new_document(&self) -> NewDocument {
        NewDocument {
            name: self.name.clone(),
            buffer: self.buffer.clone().into_bytes(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    /// Destination chat or channel ids. Must not be empty.
    pub chat_ids: Vec<i64>,
    /// Message body in MarkdownV2.
    pub message: String,
    #[serde(default)]
    pub button_url: Option<String>,
    #[serde(default)]
    pub documents: Option<Vec<DocumentPayload>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub chat_ids: Vec<i64>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<DocumentPayload>>,
    pub created_at: DateTime<Utc>,
}
