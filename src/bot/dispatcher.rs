use std::sync::Arc;
use std::time::Duration;

use teloxide::types::ChatId;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::bot::callbacks::{CallbackAction, Course};
use crate::bot::outbound::{Keyboard, KeyboardButton, Outbound, Photo};
use crate::config::AppConfig;
use crate::error::{BotError, Result};
use crate::media::picture::PictureSource;

pub const MENU_TEXT: &str = "Hello!!! Choose your action";
pub const NOT_UNDERSTOOD: &str = "I dont understand you(((";
pub const UNKNOWN_COMMAND: &str = "Unknown command";
pub const LOADING_PICTURE: &str = "Loading Picture...";
pub const PICTURE_CAPTION: &str = "your random picture";
pub const PICTURE_FILE_NAME: &str = "random.jpg";

/// Who pressed a button. Telegram users may leave either name empty.
#[derive(Debug, Clone, Default)]
pub struct Sender {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Sender {
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.last_name]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone)]
pub enum IncomingUpdate {
    Text { chat: ChatId, text: String },
    Callback {
        chat: ChatId,
        sender: Sender,
        payload: String,
    },
}

/// Outcome of one background picture delivery.
#[derive(Debug)]
pub struct PictureReport {
    pub chat: ChatId,
    pub outcome: Result<()>,
}

/// Main menu shown on `/start`, one button per row.
pub fn main_menu() -> Keyboard {
    let button = |label: &str, action: CallbackAction| {
        vec![KeyboardButton {
            label: label.to_string(),
            payload: action.payload().to_string(),
        }]
    };

    Keyboard {
        rows: vec![
            button(
                Course::Sdt101.button_label(),
                CallbackAction::RoadMap(Course::Sdt101),
            ),
            button(
                Course::Sdt104.button_label(),
                CallbackAction::RoadMap(Course::Sdt104),
            ),
            button("Random picture", CallbackAction::RandomPicture),
        ],
    }
}

/// Turns each inbound update into outbound platform calls.
///
/// Holds no per-chat state. The only work outliving a call to [`handle`]
/// is the picture delivery, which runs as a spawned task bounded by the
/// configured timeout and the dispatcher-wide cancellation token.
///
/// [`handle`]: UpdateDispatcher::handle
pub struct UpdateDispatcher {
    outbound: Arc<dyn Outbound>,
    pictures: Arc<dyn PictureSource>,
    picture_timeout: Duration,
    cancel: CancellationToken,
    reports: mpsc::UnboundedSender<PictureReport>,
}

impl UpdateDispatcher {
    pub fn new(
        config: &AppConfig,
        outbound: Arc<dyn Outbound>,
        pictures: Arc<dyn PictureSource>,
    ) -> (Self, mpsc::UnboundedReceiver<PictureReport>) {
        let (reports, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            outbound,
            pictures,
            picture_timeout: config.picture_timeout(),
            cancel: CancellationToken::new(),
            reports,
        };
        (dispatcher, rx)
    }

    pub async fn handle(&self, update: IncomingUpdate) -> Result<()> {
        match update {
            IncomingUpdate::Text { chat, text } => self.on_text(chat, &text).await,
            IncomingUpdate::Callback {
                chat,
                sender,
                payload,
            } => self.on_callback(chat, &sender, &payload).await,
        }
    }

    async fn on_text(&self, chat: ChatId, text: &str) -> Result<()> {
        if text == "/start" {
            self.outbound.send_menu(chat, MENU_TEXT, &main_menu()).await
        } else {
            self.outbound.send_text(chat, NOT_UNDERSTOOD).await
        }
    }

    async fn on_callback(&self, chat: ChatId, sender: &Sender, payload: &str) -> Result<()> {
        match CallbackAction::parse(payload) {
            CallbackAction::RoadMap(course) => self.send_road_map(chat, sender, course).await,
            CallbackAction::RandomPicture => self.send_random_picture(chat).await,
            CallbackAction::Unknown(raw) => {
                tracing::debug!("Unknown callback payload {:?} in chat {}", raw, chat);
                self.outbound.send_text(chat, UNKNOWN_COMMAND).await
            }
        }
    }

    async fn send_road_map(&self, chat: ChatId, sender: &Sender, course: Course) -> Result<()> {
        let greeting = format!(
            "Hello\n{}\nI'm loading your road map for {}...",
            sender.full_name(),
            course.code()
        );
        self.outbound.send_text(chat, &greeting).await?;
        self.outbound.send_text(chat, course.map_url()).await
    }

    /// Acknowledge right away, then deliver the picture in the background.
    async fn send_random_picture(&self, chat: ChatId) -> Result<()> {
        self.outbound.send_text(chat, LOADING_PICTURE).await?;

        let outbound = Arc::clone(&self.outbound);
        let pictures = Arc::clone(&self.pictures);
        let budget = self.picture_timeout;
        let cancel = self.cancel.clone();
        let reports = self.reports.clone();

        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = cancel.cancelled() => Err(BotError::Cancelled),
                res = tokio::time::timeout(budget, deliver_picture(outbound.as_ref(), pictures.as_ref(), chat)) => {
                    res.unwrap_or(Err(BotError::Timeout(budget)))
                }
            };

            if reports.send(PictureReport { chat, outcome }).is_err() {
                tracing::debug!("Picture report for chat {} dropped, no listener", chat);
            }
        });

        Ok(())
    }

    /// Cancel every picture delivery still in flight.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

async fn deliver_picture(
    outbound: &dyn Outbound,
    pictures: &dyn PictureSource,
    chat: ChatId,
) -> Result<()> {
    let bytes = pictures.fetch().await?;
    let photo = Photo {
        bytes,
        file_name: PICTURE_FILE_NAME.to_string(),
        caption: PICTURE_CAPTION.to_string(),
    };
    outbound.send_photo(chat, photo).await
}

/// Drain picture reports until every sender is gone.
pub async fn watch_picture_reports(mut reports: mpsc::UnboundedReceiver<PictureReport>) {
    while let Some(report) = reports.recv().await {
        match report.outcome {
            Ok(()) => tracing::debug!("Random picture delivered to chat {}", report.chat),
            Err(BotError::Cancelled) => {
                tracing::info!("Random picture for chat {} cancelled", report.chat)
            }
            Err(e) => tracing::warn!("Random picture for chat {} failed: {}", report.chat, e),
        }
    }
}
