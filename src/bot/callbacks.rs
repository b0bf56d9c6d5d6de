use std::sync::Arc;
use teloxide::prelude::*;

use crate::bot::dispatcher::{IncomingUpdate, Sender, UpdateDispatcher};
use crate::bot::HandlerResult;

const ROAD_MAP_SDT101: &str = "map_101";
const ROAD_MAP_SDT104: &str = "map_104";
const RANDOM_PICTURE: &str = "random_picture";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Course {
    Sdt101,
    Sdt104,
}

impl Course {
    pub fn code(self) -> &'static str {
        match self {
            Self::Sdt101 => "SDT101",
            Self::Sdt104 => "SDT104",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Self::Sdt101 => "Road map SDT 101: OOP",
            Self::Sdt104 => "Road map SDT 104: UI/UX",
        }
    }

    pub fn map_url(self) -> &'static str {
        match self {
            Self::Sdt101 => {
                "http://ai-maps.eu-north-1.elasticbeanstalk.com/course/sdt101/course-map"
            }
            Self::Sdt104 => {
                "http://ai-maps.eu-north-1.elasticbeanstalk.com/course/sdt104/course-map"
            }
        }
    }
}

/// What an inline button press asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    RoadMap(Course),
    RandomPicture,
    /// Payload we never put on a button.
    Unknown(String),
}

impl CallbackAction {
    pub fn parse(payload: &str) -> Self {
        match payload {
            ROAD_MAP_SDT101 => Self::RoadMap(Course::Sdt101),
            ROAD_MAP_SDT104 => Self::RoadMap(Course::Sdt104),
            RANDOM_PICTURE => Self::RandomPicture,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn payload(&self) -> &str {
        match self {
            Self::RoadMap(Course::Sdt101) => ROAD_MAP_SDT101,
            Self::RoadMap(Course::Sdt104) => ROAD_MAP_SDT104,
            Self::RandomPicture => RANDOM_PICTURE,
            Self::Unknown(raw) => raw,
        }
    }
}

/// Replies to a button press always go to the presser's private chat, even
/// when the button sits on a message in a group.
pub fn reply_chat(q: &CallbackQuery) -> ChatId {
    ChatId(q.from.id.0 as i64)
}

/// A press without data is treated as the empty payload.
pub fn callback_update(q: &CallbackQuery) -> IncomingUpdate {
    IncomingUpdate::Callback {
        chat: reply_chat(q),
        sender: Sender {
            first_name: Some(q.from.first_name.clone()),
            last_name: q.from.last_name.clone(),
        },
        payload: q.data.clone().unwrap_or_default(),
    }
}

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    dispatcher: Arc<UpdateDispatcher>,
) -> HandlerResult {
    // Stop the client-side spinner; the reply itself comes as new messages.
    if let Err(e) = bot.answer_callback_query(&q.id).await {
        tracing::warn!("Failed to answer callback query {}: {}", q.id, e);
    }

    dispatcher.handle(callback_update(&q)).await?;

    Ok(())
}
