use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, InlineKeyboardButton, InlineKeyboardMarkup, InputFile};

use crate::error::Result;

/// One inline button: the label shown to the user and the payload that comes
/// back in the callback query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    pub label: String,
    pub payload: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<KeyboardButton>>,
}

impl Keyboard {
    pub fn payloads(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(|b| b.payload.as_str())
    }
}

impl From<&Keyboard> for InlineKeyboardMarkup {
    fn from(kb: &Keyboard) -> Self {
        InlineKeyboardMarkup::new(kb.rows.iter().map(|row| {
            row.iter()
                .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.payload.clone()))
                .collect::<Vec<_>>()
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub caption: String,
}

/// Entry of the command list published with `setMyCommands`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
}

/// The outbound calls the dispatcher makes against the bot platform.
#[async_trait]
pub trait Outbound: Send + Sync {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<()>;
    async fn send_menu(&self, chat: ChatId, text: &str, keyboard: &Keyboard) -> Result<()>;
    async fn send_photo(&self, chat: ChatId, photo: Photo) -> Result<()>;
    async fn set_commands(&self, commands: &[CommandSpec]) -> Result<()>;
}

/// `Outbound` backed by the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramOutbound {
    bot: Bot,
}

impl TelegramOutbound {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Outbound for TelegramOutbound {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<()> {
        self.bot.send_message(chat, text).await?;
        Ok(())
    }

    async fn send_menu(&self, chat: ChatId, text: &str, keyboard: &Keyboard) -> Result<()> {
        tracing::debug!(
            "Sending menu to {} with payloads {:?}",
            chat,
            keyboard.payloads().collect::<Vec<_>>()
        );
        self.bot
            .send_message(chat, text)
            .reply_markup(InlineKeyboardMarkup::from(keyboard))
            .await?;
        Ok(())
    }

    async fn send_photo(&self, chat: ChatId, photo: Photo) -> Result<()> {
        let file = InputFile::memory(photo.bytes).file_name(photo.file_name);
        self.bot
            .send_photo(chat, file)
            .caption(photo.caption)
            .await?;
        Ok(())
    }

    async fn set_commands(&self, commands: &[CommandSpec]) -> Result<()> {
        let commands = commands
            .iter()
            .map(|c| BotCommand::new(c.name.clone(), c.description.clone()));
        self.bot.set_my_commands(commands).await?;
        Ok(())
    }
}
