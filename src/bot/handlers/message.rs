use std::sync::Arc;
use teloxide::prelude::*;

use crate::bot::commands::Command;
use crate::bot::dispatcher::CommandDispatcher;
use crate::utils::validation::validate_telegram_chat_id;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dispatcher: Arc<CommandDispatcher>,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id.0;

    if let Err(e) = validate_telegram_chat_id(chat_id) {
        tracing::warn!("Ignoring command from invalid chat {}: {}", chat_id, e);
        return Ok(());
    }

    // One command per message, handled to completion before replying.
    let reply = dispatcher.handle(chat_id, cmd).await;
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}
