use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;

use melodika::core::{config, init_logger};
use melodika::telegram::schema;
use melodika::youtube::YouTubeApi;

/// Main entry point for the Telegram bot
///
/// # Errors
/// Returns an error if initialization fails (logging, download directory,
/// missing bot token).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env before any config static is read
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    if config::BOT_TOKEN.is_empty() {
        anyhow::bail!("BOT_TOKEN (or TELOXIDE_TOKEN) is not set");
    }

    std::fs::create_dir_all(config::DOWNLOAD_DIR.as_str())?;
    log::info!("📁 Download directory: {}", config::DOWNLOAD_DIR.as_str());
    log::info!("🌐 Remote API: {}", config::API_BASE_URL.as_str());

    let bot = teloxide::Bot::new(config::BOT_TOKEN.as_str());
    let api = Arc::new(YouTubeApi::new());

    log::info!("🚀 Starting melodika");
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![api])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
