use std::fmt;
use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_PICTURE_URL: &str = "https://picsum.photos/400/300?random=1";
pub const DEFAULT_PICTURE_TIMEOUT_SECS: u64 = 15;

#[derive(Clone)]
pub struct AppConfig {
    pub telegram_bot_token: String,

    /// Endpoint returning a random image body
    pub picture_url: String,
    /// Budget for fetching and sending one random picture
    pub picture_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let telegram_bot_token = var("TELEGRAM_BOT_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .context("TELEGRAM_BOT_TOKEN is not set")?;

        let picture_timeout_secs = match var("PICTURE_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid PICTURE_TIMEOUT_SECS: {raw:?}"))?,
            None => DEFAULT_PICTURE_TIMEOUT_SECS,
        };

        Ok(Self {
            telegram_bot_token,
            picture_url: var("PICTURE_URL").unwrap_or_else(|| DEFAULT_PICTURE_URL.to_string()),
            picture_timeout_secs,
        })
    }

    pub fn picture_timeout(&self) -> Duration {
        Duration::from_secs(self.picture_timeout_secs)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("telegram_bot_token", &"<redacted>")
            .field("picture_url", &self.picture_url)
            .field("picture_timeout_secs", &self.picture_timeout_secs)
            .finish()
    }
}
