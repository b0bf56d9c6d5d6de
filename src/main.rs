use std::sync::Arc;
use std::time::Duration;

use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;

mod bot;
mod config;
mod error;
mod media;

use bot::dispatcher::{watch_picture_reports, UpdateDispatcher};
use bot::outbound::TelegramOutbound;
use config::AppConfig;
use media::picture::HttpPictureSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🤖 Starting road map bot...");

    let config = AppConfig::from_env()?;
    tracing::info!("Config loaded: {:?}", config);

    let bot = Bot::new(&config.telegram_bot_token);
    let outbound = Arc::new(TelegramOutbound::new(bot.clone()));

    // Published once per process, before polling starts
    bot::commands::register_commands(outbound.as_ref()).await;

    let pictures = Arc::new(HttpPictureSource::new(&config));
    let (dispatcher, reports) = UpdateDispatcher::new(&config, outbound, pictures);
    let dispatcher = Arc::new(dispatcher);
    let monitor = tokio::spawn(watch_picture_reports(reports));

    Dispatcher::builder(bot, bot::build_handler())
        .dependencies(dptree::deps![Arc::clone(&dispatcher)])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("Dispatcher stopped, cancelling pending pictures.");
    dispatcher.shutdown();
    drop(dispatcher);
    if tokio::time::timeout(Duration::from_secs(5), monitor).await.is_err() {
        tracing::warn!("Picture report monitor did not finish in time.");
    }

    Ok(())
}
