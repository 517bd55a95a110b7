use teloxide::utils::command::BotCommands;

use crate::bot::commands::Command;
use crate::bot::dispatcher::CommandDispatcher;
use crate::errors::Result;

/// Command list, or the usage of `command` when it names one. A non-empty
/// `fail` is reported as an unknown command above the list.
pub fn help_text(command: &str, fail: &str) -> String {
    let command = command.trim().trim_start_matches('/');
    let listing = Command::descriptions().to_string();

    if !fail.is_empty() {
        return format!("Unknown command: /{fail}\n\n{listing}");
    }
    if command.is_empty() {
        return listing;
    }
    match Command::usage(command) {
        Some(usage) => usage.to_string(),
        None => format!("Unknown command: /{command}\n\n{listing}"),
    }
}

pub async fn handle_start(ctx: &CommandDispatcher, chat_id: i64) -> Result<String> {
    let registered = if ctx.store().add_user(chat_id).await? {
        "You have been registered."
    } else {
        "You are already registered."
    };
    Ok(format!("{registered}\n\n{}", help_text("", "")))
}

pub async fn handle_show(ctx: &CommandDispatcher) -> Result<String> {
    ctx.portal().get_reservations().await
}
