use async_trait::async_trait;
use reqwest::Client;

use crate::config::AppConfig;
use crate::error::{BotError, Result};

/// Produces the raw bytes of a random image.
#[async_trait]
pub trait PictureSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>>;
}

pub struct HttpPictureSource {
    client: Client,
    url: String,
}

impl HttpPictureSource {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.picture_url.clone(),
        }
    }
}

#[async_trait]
impl PictureSource for HttpPictureSource {
    /// GET the configured endpoint, following redirects to the actual image.
    async fn fetch(&self) -> Result<Vec<u8>> {
        let resp = self.client.get(&self.url).send().await?;

        if !resp.status().is_success() {
            return Err(BotError::PictureStatus(resp.status()));
        }

        let bytes = resp.bytes().await?.to_vec();
        tracing::debug!("Fetched {} bytes from {}", bytes.len(), self.url);
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> HttpPictureSource {
        let config = AppConfig {
            telegram_bot_token: "test".into(),
            picture_url: format!("{}/400/300", server.uri()),
            picture_timeout_secs: 5,
        };
        HttpPictureSource::new(&config)
    }

    #[tokio::test]
    async fn fetch_returns_body_bytes() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/400/300"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\xff\xd8jpeg".to_vec()))
            .mount(&mock_server)
            .await;

        let bytes = source_for(&mock_server).fetch().await.unwrap();

        assert_eq!(bytes, b"\xff\xd8jpeg");
    }

    #[tokio::test]
    async fn fetch_rejects_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/400/300"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let err = source_for(&mock_server).fetch().await.unwrap_err();

        assert!(
            matches!(err, BotError::PictureStatus(status) if status.as_u16() == 503),
            "unexpected error: {err}"
        );
    }
}
