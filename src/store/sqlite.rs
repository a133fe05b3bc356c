use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::{Document, NewDocument, Notification};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a guard to the underlying database connection.
    /// This allows consuming applications to execute custom SQL.
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn()
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    fn create_notifications(
        &self,
        chat_ids: &[i64],
        message: &str,
        button_url: Option<&str>,
        documents: &[NewDocument],
    ) -> Result<Vec<Notification>> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let created_at = Utc::now();

        let mut created = Vec::with_capacity(chat_ids.len());
        for &chat_id in chat_ids {
            tx.execute(
                "INSERT INTO notifications (chat_id, message, button_url, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![chat_id, message, button_url, format_datetime(&created_at)],
            )?;
            created.push(Notification {
                id: tx.last_insert_rowid(),
                chat_id,
                message: message.to_string(),
                button_url: button_url.map(str::to_string),
                created_at,
            });
        }

        for doc in documents {
            // Reuse an existing row with identical content and name; the
            // lookup sees rows inserted earlier in this transaction, so
            // duplicates within one request also collapse.
            let existing: Option<i64> = tx
                .query_row(
                    "SELECT id FROM documents WHERE name = ?1 AND buffer = ?2",
                    params![doc.name, doc.buffer],
                    |row| row.get(0),
                )
                .optional()?;

            let document_id = match existing {
                Some(id) => id,
                None => {
                    tx.execute(
                        "INSERT INTO documents (name, buffer) VALUES (?1, ?2)",
                        params![doc.name, doc.buffer],
                    )?;
                    tx.last_insert_rowid()
                }
            };

            for notification in &created {
                tx.execute(
                    "INSERT OR IGNORE INTO notification_documents (notification_id, document_id)
                     VALUES (?1, ?2)",
                    params![notification.id, document_id],
                )?;
            }
        }

        tx.commit()?;
        Ok(created)
    }

    fn get_notification(&self, id: i64) -> Result<Option<Notification>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, chat_id, message, button_url, created_at
             FROM notifications WHERE id = ?1",
            params![id],
            |row| {
                Ok(Notification {
                    id: row.get(0)?,
                    chat_id: row.get(1)?,
                    message: row.get(2)?,
                    button_url: row.get(3)?,
                    created_at: parse_datetime(&row.get::<_, String>(4)?),
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_notification_documents(&self, notification_id: i64) -> Result<Vec<Document>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT d.id, d.name, d.buffer
             FROM documents d
             JOIN notification_documents nd ON nd.document_id = d.id
             WHERE nd.notification_id = ?1
             ORDER BY d.id",
        )?;

        let rows = stmt.query_map(params![notification_id], |row| {
            Ok(Document {
                id: row.get(0)?,
                name: row.get(1)?,
                buffer: row.get(2)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn count_documents(&self) -> Result<i64> {
        let conn = self.conn();
        conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
            .map_err(Error::from)
    }
}
