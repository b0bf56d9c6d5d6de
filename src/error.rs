use std::time::Duration;

/// Failures on the paths that talk to Telegram or the picture endpoint.
///
/// None of these are retried; the handler that hit one is abandoned.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("telegram api error: {0}")]
    Api(#[from] teloxide::RequestError),

    #[error("picture fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("picture endpoint answered {0}")]
    PictureStatus(reqwest::StatusCode),

    #[error("picture job exceeded {0:?}")]
    Timeout(Duration),

    #[error("picture job cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, BotError>;
