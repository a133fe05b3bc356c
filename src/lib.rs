//! # Courier
//!
//! A notification relay, usable both as a standalone binary and as a library.
//! It accepts authenticated HTTP requests describing a message (text,
//! optional inline-button URL, optional file attachments) for one or more
//! chat destinations, records them, and forwards them to the Telegram Bot
//! API.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::path::PathBuf;
//! use courier::server::{AppState, create_router};
//! use courier::store::{SqliteStore, Store};
//! use courier::telegram::TelegramClient;
//!
//! let store = SqliteStore::new(&PathBuf::from("./data/courier.db")).unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState {
//!     store: Arc::new(store),
//!     messenger: Arc::new(TelegramClient::new("123:abc").unwrap()),
//!     access_token: "shared-secret".to_string(),
//! });
//! let router = create_router(state);
//! // Serve with axum...
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod telegram;
pub mod types;
