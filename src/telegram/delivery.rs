use async_trait::async_trait;

use super::media::MediaItem;
use crate::error::Result;

/// Outbound messaging primitives. Implemented by [`super::TelegramClient`]
/// for the Bot API and by test doubles.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a plain text message, with an inline URL button when
    /// `button_url` is present.
    async fn send_text(&self, chat_id: i64, text: &str, button_url: Option<&str>) -> Result<()>;

    /// Sends one media group (album) of up to ten items.
    async fn send_album(&self, chat_id: i64, items: &[MediaItem]) -> Result<()>;
}

/// Delivers one notification to one destination. `groups` comes from
/// [`super::media::build_media_groups`], built once per request.
///
/// - No attachments: a single text message, with the button when present.
/// - Attachments: one album call per group, caption already placed on the
///   final item. With a button, one follow-up text message carries it, since
///   the platform does not support buttons on album items.
///
/// Calls run sequentially; the first failure aborts the rest. No retries.
pub async fn deliver(
    messenger: &dyn Messenger,
    chat_id: i64,
    text: &str,
    button_url: Option<&str>,
    groups: &[Vec<MediaItem>],
) -> Result<()> {
    if groups.is_empty() {
        return messenger.send_text(chat_id, text, button_url).await;
    }

    for group in groups {
        messenger.send_album(chat_id, group).await?;
    }

    if button_url.is_some() {
        messenger.send_text(chat_id, text, button_url).await?;
    }

    Ok(())
}
