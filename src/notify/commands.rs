//! Bot commands.
//!
//! Lets whoever is setting the relay up find the id of the chat the bot was
//! added to, which is what `TELEGRAM_CHAT_ID` needs.

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::info;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "check that the relay is running")]
    Start,
    #[command(description = "display this list of commands")]
    Help,
    #[command(description = "show the id of this chat")]
    ChatId,
}

/// The plain-text reply for a command sent in `chat_id`.
pub fn reply_text(command: &Command, chat_id: ChatId) -> String {
    match command {
        Command::Start => {
            "Linear relay is running. Send /chatid to get the id to configure.".to_string()
        }
        Command::Help => Command::descriptions().to_string(),
        Command::ChatId => format!("Your chat ID: {chat_id}"),
    }
}

async fn answer(bot: Bot, msg: Message, command: Command) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, reply_text(&command, msg.chat.id))
        .await?;
    Ok(())
}

/// Answers commands until the process is interrupted.
pub async fn run_commands(bot: Bot) {
    info!("Listening for bot commands");
    Command::repl(bot, answer).await;
}
