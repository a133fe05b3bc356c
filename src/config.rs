use std::net::SocketAddr;
use std::path::PathBuf;

use crate::telegram::TELEGRAM_API_BASE;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Shared secret for request tokens. Callers derive their token from it
    /// per request; see [`crate::auth::token_at`].
    pub access_token: String,
    /// Telegram bot credential, as issued by BotFather.
    pub bot_token: String,
    /// Base URL of the Bot API. Overridable for self-hosted API gateways.
    pub telegram_api_base: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("courier.db")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            data_dir: PathBuf::from("./data"),
            access_token: String::new(),
            bot_token: String::new(),
            telegram_api_base: TELEGRAM_API_BASE.to_string(),
        }
    }
}
