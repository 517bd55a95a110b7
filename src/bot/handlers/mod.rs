pub mod general_message;
pub mod message;

use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*, types::Me};

use crate::bot::commands::Command;
use crate::bot::dispatcher::CommandDispatcher;

pub struct BotHandler {
    pub dispatcher: Arc<CommandDispatcher>,
}

impl BotHandler {
    pub fn new(dispatcher: Arc<CommandDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Commands go to their handler; other slash-prefixed text gets help.
    pub fn schema(&self) -> UpdateHandler<teloxide::RequestError> {
        let dispatcher = self.dispatcher.clone();
        let dispatcher_fallback = self.dispatcher.clone();

        Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let dispatcher = dispatcher.clone();
                        async move { message::command_handler(bot, msg, cmd, dispatcher).await }
                    }),
            )
            .branch(dptree::endpoint(move |bot: Bot, msg: Message, me: Me| {
                let dispatcher = dispatcher_fallback.clone();
                async move { general_message::handle_general_message(bot, msg, me, dispatcher).await }
            }))
    }
}
