use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::Me;

use crate::bot::dispatcher::CommandDispatcher;

pub async fn handle_general_message(
    bot: Bot,
    msg: Message,
    me: Me,
    dispatcher: Arc<CommandDispatcher>,
) -> ResponseResult<()> {
    if let Some(text) = msg.text() {
        // Unknown or malformed command. Commands for other bots in a group
        // chat get no reply.
        if text.starts_with('/') {
            if let Some(reply) = dispatcher.dispatch(msg.chat.id.0, text, me.username()).await {
                bot.send_message(msg.chat.id, reply).await?;
            }
        }
        // For other messages, we don't respond to avoid spam
    }

    Ok(())
}
