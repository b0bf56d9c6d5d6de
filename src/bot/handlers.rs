use std::sync::Arc;
use teloxide::prelude::*;

use crate::bot::dispatcher::{IncomingUpdate, UpdateDispatcher};
use crate::bot::HandlerResult;

/// Non-text messages count as empty text.
pub fn message_update(msg: &Message) -> IncomingUpdate {
    IncomingUpdate::Text {
        chat: msg.chat.id,
        text: msg.text().unwrap_or_default().to_string(),
    }
}

/// Handler for every plain message.
pub async fn handle_message(msg: Message, dispatcher: Arc<UpdateDispatcher>) -> HandlerResult {
    tracing::info!("Received message {:?} from {}", msg.text(), msg.chat.id);

    dispatcher.handle(message_update(&msg)).await?;

    Ok(())
}
