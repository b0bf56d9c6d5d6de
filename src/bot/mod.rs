pub mod callbacks;
pub mod commands;
pub mod dispatcher;
pub mod handlers;
pub mod outbound;

#[cfg(test)]
mod testing;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
pub type HandlerResult = Result<(), HandlerError>;

/// Build the teloxide update handler tree.
pub fn build_handler() -> UpdateHandler<HandlerError> {
    let callback_handler = Update::filter_callback_query().endpoint(callbacks::handle_callback);

    let message_handler = Update::filter_message().endpoint(handlers::handle_message);

    dptree::entry()
        .branch(callback_handler)
        .branch(message_handler)
}
