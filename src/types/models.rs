use chrono::{DateTime, Utc};
use serde::Serialize;

/// A recorded notification for a single destination chat.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: i64,
    /// Telegram chat or channel id. Signed 64-bit: channel ids exceed i32.
    pub chat_id: i64,
    /// Message body in MarkdownV2.
    pub message: String,
    pub button_url: Option<String>,
    /// Assigned by the store at write time, never client-supplied.
    pub created_at: DateTime<Utc>,
}

/// A stored attachment. The buffer holds the payload exactly as received on
/// the wire (base64 text bytes); it is decoded at delivery time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: i64,
    pub name: String,
    pub buffer: Vec<u8>,
}

/// An attachment to persist, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub name: String,
    pub buffer: Vec<u8>,
}
