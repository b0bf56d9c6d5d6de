//! In-memory fakes for the outbound port and the picture source.

use std::sync::Mutex;

use async_trait::async_trait;
use teloxide::types::ChatId;

use crate::bot::outbound::{CommandSpec, Keyboard, Outbound, Photo};
use crate::error::{BotError, Result};
use crate::media::picture::PictureSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(ChatId, String),
    Menu(ChatId, String, Keyboard),
    Photo(ChatId, Photo),
    Commands(Vec<CommandSpec>),
}

fn rejected() -> BotError {
    BotError::PictureStatus(reqwest::StatusCode::BAD_GATEWAY)
}

#[derive(Default)]
pub struct RecordingOutbound {
    sent: Mutex<Vec<Sent>>,
    fail_sends: bool,
    fail_commands: bool,
}

impl RecordingOutbound {
    pub fn failing_sends() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    pub fn failing_commands() -> Self {
        Self {
            fail_commands: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(_, t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn record(&self, fail: bool, entry: Sent) -> Result<()> {
        if fail {
            return Err(rejected());
        }
        self.sent.lock().unwrap().push(entry);
        Ok(())
    }
}

#[async_trait]
impl Outbound for RecordingOutbound {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<()> {
        self.record(self.fail_sends, Sent::Text(chat, text.to_string()))
    }

    async fn send_menu(&self, chat: ChatId, text: &str, keyboard: &Keyboard) -> Result<()> {
        self.record(
            self.fail_sends,
            Sent::Menu(chat, text.to_string(), keyboard.clone()),
        )
    }

    async fn send_photo(&self, chat: ChatId, photo: Photo) -> Result<()> {
        self.record(self.fail_sends, Sent::Photo(chat, photo))
    }

    async fn set_commands(&self, commands: &[CommandSpec]) -> Result<()> {
        self.record(self.fail_commands, Sent::Commands(commands.to_vec()))
    }
}

pub enum StubPictures {
    Bytes(Vec<u8>),
    Failing,
    Hanging,
}

impl StubPictures {
    pub fn bytes(b: &[u8]) -> Self {
        Self::Bytes(b.to_vec())
    }

    pub fn failing() -> Self {
        Self::Failing
    }

    pub fn hanging() -> Self {
        Self::Hanging
    }
}

#[async_trait]
impl PictureSource for StubPictures {
    async fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            Self::Bytes(b) => Ok(b.clone()),
            Self::Failing => Err(BotError::PictureStatus(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            )),
            Self::Hanging => std::future::pending().await,
        }
    }
}
