use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::{Value, json};

use super::delivery::Messenger;
use super::media::MediaItem;
use crate::error::{Error, Result};

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

const PARSE_MODE: &str = "MarkdownV2";

/// Bot API client. Holds the bot credential and a pooled HTTP connection;
/// constructed once and injected into the server state.
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    bot_token: String,
}

/// The envelope every Bot API method responds with.
#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    description: Option<String>,
}

impl TelegramClient {
    pub fn new(bot_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(bot_token, TELEGRAM_API_BASE)
    }

    pub fn with_base_url(bot_token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.bot_token, method)
    }

    async fn check(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        let reply: ApiReply = response
            .json()
            .await
            .map_err(|e| Error::Delivery(format!("telegram api returned {status}: {e}")))?;

        if reply.ok {
            Ok(())
        } else {
            Err(Error::Delivery(reply.description.unwrap_or_else(|| {
                format!("telegram api returned {status}")
            })))
        }
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_text(&self, chat_id: i64, text: &str, button_url: Option<&str>) -> Result<()> {
        let mut body = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": PARSE_MODE,
        });
        if let Some(url) = button_url {
            body["reply_markup"] = json!({
                "inline_keyboard": [[{ "text": url, "url": url }]],
            });
        }

        let response = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Delivery(e.to_string()))?;

        self.check(response).await
    }

    async fn send_album(&self, chat_id: i64, items: &[MediaItem]) -> Result<()> {
        let mut form = Form::new().text("chat_id", chat_id.to_string());
        let mut media = Vec::with_capacity(items.len());

        for (i, item) in items.iter().enumerate() {
            let part_name = format!("file{i}");
            let mut entry = json!({
                "type": "document",
                "media": format!("attach://{part_name}"),
            });
            if let Some(caption) = &item.caption {
                entry["caption"] = Value::from(caption.as_str());
                entry["parse_mode"] = Value::from(PARSE_MODE);
            }
            media.push(entry);

            form = form.part(
                part_name,
                Part::bytes(item.bytes.clone()).file_name(item.name.clone()),
            );
        }

        let media_json = serde_json::to_string(&media)
            .map_err(|e| Error::Delivery(format!("failed to encode media group: {e}")))?;
        form = form.text("media", media_json);

        let response = self
            .http
            .post(self.method_url("sendMediaGroup"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Delivery(e.to_string()))?;

        self.check(response).await
    }
}
