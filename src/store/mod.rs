mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::{Document, NewDocument, Notification};

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    /// Records a notification for every destination in one atomic unit.
    ///
    /// Inserts one notification row per chat id, all sharing a single
    /// write-time timestamp. Each document is either reused from an existing
    /// row with identical (name, buffer) or inserted, then linked to every
    /// notification. Either everything commits together or nothing is
    /// visible.
    fn create_notifications(
        &self,
        chat_ids: &[i64],
        message: &str,
        button_url: Option<&str>,
        documents: &[NewDocument],
    ) -> Result<Vec<Notification>>;

    fn get_notification(&self, id: i64) -> Result<Option<Notification>>;

    fn list_notification_documents(&self, notification_id: i64) -> Result<Vec<Document>>;

    fn count_documents(&self) -> Result<i64>;
}
