mod models;

pub use models::{Document, NewDocument, Notification};
