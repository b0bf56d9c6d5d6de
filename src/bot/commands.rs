use teloxide::utils::command::BotCommands;

use crate::bot::outbound::{CommandSpec, Outbound};

/// Commands advertised in the Telegram command menu.
///
/// Only `/start` is acted upon; the dispatcher matches it literally.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum MenuCommand {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Get help information")]
    Help,
    #[command(description = "Get a random picture")]
    Photo,
}

pub fn command_menu() -> Vec<CommandSpec> {
    MenuCommand::bot_commands()
        .into_iter()
        .map(|c| CommandSpec {
            name: c.command.trim_start_matches('/').to_string(),
            description: c.description,
        })
        .collect()
}

/// Publish the command menu. Failure is logged and the bot keeps going.
pub async fn register_commands(outbound: &dyn Outbound) {
    match outbound.set_commands(&command_menu()).await {
        Ok(()) => tracing::info!("Bot commands registered successfully."),
        Err(e) => tracing::error!("Failed to register bot commands: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::testing::{RecordingOutbound, Sent};

    #[test]
    fn menu_lists_start_help_photo_in_order() {
        let names: Vec<_> = command_menu().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["start", "help", "photo"]);
        assert_eq!(command_menu()[2].description, "Get a random picture");
    }

    #[tokio::test]
    async fn registration_sends_the_menu_once() {
        let outbound = RecordingOutbound::default();
        register_commands(&outbound).await;

        let sent = outbound.sent();
        assert_eq!(sent.len(), 1);
        assert!(matches!(&sent[0], Sent::Commands(c) if c.len() == 3));
    }

    #[tokio::test]
    async fn registration_failure_is_swallowed() {
        let outbound = RecordingOutbound::failing_commands();
        register_commands(&outbound).await;
        assert!(outbound.sent().is_empty());
    }
}
