use std::fs;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use courier::auth::generate_token;
use courier::config::ServerConfig;
use courier::server::{AppState, create_router};
use courier::store::{SqliteStore, Store};
use courier::telegram::{TELEGRAM_API_BASE, TelegramClient};

const ACCESS_TOKEN_ENV: &str = "COURIER_ACCESS_TOKEN";
const BOT_TOKEN_ENV: &str = "COURIER_BOT_TOKEN";

#[derive(Parser)]
#[command(name = "courier")]
#[command(about = "A notification relay for Telegram", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, default_value = "8000")]
        port: u16,

        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Base URL of the Bot API (override for self-hosted API gateways)
        #[arg(long, default_value = TELEGRAM_API_BASE)]
        telegram_api_base: String,
    },

    /// Print the request token for the current second
    Token,
}

fn access_token() -> anyhow::Result<String> {
    std::env::var(ACCESS_TOKEN_ENV)
        .with_context(|| format!("{ACCESS_TOKEN_ENV} must be set to the shared request secret"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("courier=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Token => {
            // Tokens are only valid within the second they were derived for,
            // so this is purely a convenience for manual testing.
            println!("{}", generate_token(&access_token()?));
        }
        Commands::Serve {
            host,
            port,
            data_dir,
            telegram_api_base,
        } => {
            let bot_token = match std::env::var(BOT_TOKEN_ENV) {
                Ok(token) if !token.is_empty() => token,
                _ => bail!("{BOT_TOKEN_ENV} must be set to the bot credential"),
            };

            let config = ServerConfig {
                host,
                port,
                data_dir: data_dir.into(),
                access_token: access_token()?,
                bot_token,
                telegram_api_base,
            };

            fs::create_dir_all(&config.data_dir)?;

            let store = SqliteStore::new(config.db_path())?;
            store.initialize()?;

            let messenger =
                TelegramClient::with_base_url(&config.bot_token, &config.telegram_api_base)?;

            let state = Arc::new(AppState {
                store: Arc::new(store),
                messenger: Arc::new(messenger),
                access_token: config.access_token.clone(),
            });

            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
