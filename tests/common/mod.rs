use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use courier::auth::generate_token;
use courier::error::{Error, Result};
use courier::server::{AppState, create_router};
use courier::store::{SqliteStore, Store};
use courier::telegram::{MediaItem, Messenger};

pub const TEST_SECRET: &str = "test-secret";

/// One outbound call the server asked the messenger to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentCall {
    Text {
        chat_id: i64,
        text: String,
        button_url: Option<String>,
    },
    Album {
        chat_id: i64,
        names: Vec<String>,
        captions: Vec<Option<String>>,
    },
}

/// Messenger double that records every call. Calls addressed to `fail_chat`
/// fail with a delivery error instead.
#[derive(Default)]
pub struct RecordingMessenger {
    pub calls: Mutex<Vec<SentCall>>,
    pub fail_chat: Option<i64>,
}

impl RecordingMessenger {
    pub fn failing_for(chat_id: i64) -> Self {
        Self {
            fail_chat: Some(chat_id),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<SentCall> {
        self.calls.lock().unwrap().clone()
    }

    fn check_destination(&self, chat_id: i64) -> Result<()> {
        if self.fail_chat == Some(chat_id) {
            return Err(Error::Delivery(format!("chat {chat_id} unreachable")));
        }
        Ok(())
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(&self, chat_id: i64, text: &str, button_url: Option<&str>) -> Result<()> {
        self.check_destination(chat_id)?;
        self.calls.lock().unwrap().push(SentCall::Text {
            chat_id,
            text: text.to_string(),
            button_url: button_url.map(str::to_string),
        });
        Ok(())
    }

    async fn send_album(&self, chat_id: i64, items: &[MediaItem]) -> Result<()> {
        self.check_destination(chat_id)?;
        self.calls.lock().unwrap().push(SentCall::Album {
            chat_id,
            names: items.iter().map(|i| i.name.clone()).collect(),
            captions: items.iter().map(|i| i.caption.clone()).collect(),
        });
        Ok(())
    }
}

pub struct TestServer {
    pub base_url: String,
    pub messenger: Arc<RecordingMessenger>,
    pub store: Arc<SqliteStore>,
    _temp_dir: TempDir,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(RecordingMessenger::default()).await
    }

    pub async fn start_with(messenger: RecordingMessenger) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let store = Arc::new(
            SqliteStore::new(temp_dir.path().join("courier.db")).expect("open store"),
        );
        store.initialize().expect("initialize schema");

        let messenger = Arc::new(messenger);
        let state = Arc::new(AppState {
            store: store.clone() as Arc<dyn Store>,
            messenger: messenger.clone() as Arc<dyn Messenger>,
            access_token: TEST_SECRET.to_string(),
        });

        let app = create_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self::wait_for_ready(&base_url).await;

        Self {
            base_url,
            messenger,
            store,
            _temp_dir: temp_dir,
        }
    }

    async fn wait_for_ready(base_url: &str) {
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client
                .get(format!("{}/health", base_url))
                .send()
                .await
                .is_ok()
            {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
        panic!("Server did not become ready");
    }

    /// A token valid for the current second, like a real caller would
    /// generate immediately before sending.
    pub fn token(&self) -> String {
        generate_token(TEST_SECRET)
    }

    pub fn notification_url(&self) -> String {
        format!("{}/api/v1/notification", self.base_url)
    }

    /// Posts an authenticated notification request. Tokens expire with the
    /// second they were derived for, so a request that crosses a second
    /// boundary is retried once with a fresh token, as a real caller would.
    pub async fn post(&self, body: &serde_json::Value) -> reqwest::Response {
        let client = reqwest::Client::new();
        let mut attempts = 0;
        loop {
            let response = client
                .post(self.notification_url())
                .header("Authorization", self.token())
                .json(body)
                .send()
                .await
                .expect("send request");

            attempts += 1;
            if response.status() != 403 || attempts >= 2 {
                return response;
            }
        }
    }
}
