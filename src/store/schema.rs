pub const SCHEMA: &str = r#"
-- One row per destination chat; immutable once created
CREATE TABLE IF NOT EXISTS notifications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    chat_id INTEGER NOT NULL,
    message TEXT NOT NULL,
    button_url TEXT,
    created_at TEXT NOT NULL
);

-- Attachments, deduplicated by (name, buffer); never mutated after insert
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    buffer BLOB NOT NULL
);

-- Many-to-many link between notifications and documents
CREATE TABLE IF NOT EXISTS notification_documents (
    notification_id INTEGER NOT NULL REFERENCES notifications(id) ON DELETE CASCADE,
    document_id INTEGER NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
    PRIMARY KEY (notification_id, document_id)
);

CREATE INDEX IF NOT EXISTS idx_notifications_chat ON notifications(chat_id);
CREATE INDEX IF NOT EXISTS idx_notifications_created ON notifications(created_at);
CREATE INDEX IF NOT EXISTS idx_documents_name ON documents(name);
"#;
