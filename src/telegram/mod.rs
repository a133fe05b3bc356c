mod client;
mod delivery;
pub mod media;

pub use client::{TELEGRAM_API_BASE, TelegramClient};
pub use delivery::{Messenger, deliver};
pub use media::{ALBUM_LIMIT, MediaItem};
