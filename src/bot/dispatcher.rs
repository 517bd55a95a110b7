//! Maps parsed commands onto handlers and turns every outcome into reply text.

use chrono::NaiveDate;
use std::sync::Arc;
use teloxide::utils::command::{BotCommands, ParseError};

use crate::bot::commands::{config, general, tt, Command};
use crate::database::models::UserConfig;
use crate::database::store::UserConfigStore;
use crate::errors::{BotError, Result};
use crate::services::portal::ReservationPortal;
use crate::services::saunas::SaunaTable;
use crate::utils::datetime::Clock;
use crate::utils::logging::{
    log_command_error, log_command_start, log_command_success, log_validation_error,
};

pub const REMOTE_FAILURE_REPLY: &str = "Reservation service unavailable, try again later";
pub const STORAGE_FAILURE_REPLY: &str = "Could not access user settings";

/// Everything a handler may touch, injected at construction.
pub struct CommandDispatcher {
    store: Arc<dyn UserConfigStore>,
    portal: Arc<dyn ReservationPortal>,
    saunas: SaunaTable,
    clock: Arc<dyn Clock>,
}

impl CommandDispatcher {
    pub fn new(
        store: Arc<dyn UserConfigStore>,
        portal: Arc<dyn ReservationPortal>,
        saunas: SaunaTable,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            portal,
            saunas,
            clock,
        }
    }

    pub fn store(&self) -> &dyn UserConfigStore {
        self.store.as_ref()
    }

    pub fn portal(&self) -> &dyn ReservationPortal {
        self.portal.as_ref()
    }

    pub fn saunas(&self) -> &SaunaTable {
        &self.saunas
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Stored settings, or defaults for a chat that never configured any.
    pub async fn user_config(&self, chat_id: i64) -> Result<UserConfig> {
        Ok(self
            .store
            .get(chat_id)
            .await?
            .unwrap_or_else(|| UserConfig::new(chat_id)))
    }

    /// Parses raw message text and handles it. Text that is not a known
    /// command gets the help listing. `None` means the command was
    /// addressed to another bot and must go unanswered.
    pub async fn dispatch(&self, chat_id: i64, text: &str, bot_name: &str) -> Option<String> {
        match Command::parse(text, bot_name) {
            Ok(command) => Some(self.handle(chat_id, command).await),
            Err(ParseError::WrongBotName(_)) => None,
            Err(_) => Some(self.fallback(chat_id, text)),
        }
    }

    /// Runs one command. Never fails: errors become the reply.
    pub async fn handle(&self, chat_id: i64, command: Command) -> String {
        let name = command.name();
        log_command_start(name, chat_id, None);

        let outcome = match &command {
            Command::Help(topic) => Ok(general::help_text(topic, "")),
            Command::Start => general::handle_start(self, chat_id).await,
            Command::Tt(args) => tt::handle_tt(self, chat_id, args).await,
            Command::Show => general::handle_show(self).await,
            Command::Config(args) => config::handle_config(self, chat_id, args).await,
        };

        match outcome {
            Ok(reply) => {
                log_command_success(name, chat_id, None);
                reply
            }
            Err(e) => error_reply(name, chat_id, &command, e),
        }
    }

    /// Reply for text that did not parse as a command.
    pub fn fallback(&self, chat_id: i64, text: &str) -> String {
        let name = text
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .trim_start_matches('/')
            .split('@')
            .next()
            .unwrap_or_default();

        log_validation_error("unknown", text, "not a command", chat_id);
        if Command::is_known(name) {
            // Known command whose arguments the parser rejected.
            let usage = Command::usage(name).unwrap_or_default();
            return format!("Invalid arguments\n\n{usage}");
        }
        general::help_text("", name)
    }
}

fn error_reply(name: &str, chat_id: i64, command: &Command, error: BotError) -> String {
    match error {
        BotError::InvalidArgument(message) => {
            log_validation_error(name, &format!("{command:?}"), &message, chat_id);
            message
        }
        e if e.is_remote() => {
            log_command_error(name, chat_id, &e.to_string());
            REMOTE_FAILURE_REPLY.to_string()
        }
        e => {
            log_command_error(name, chat_id, &e.to_string());
            STORAGE_FAILURE_REPLY.to_string()
        }
    }
}
