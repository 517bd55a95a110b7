use crate::bot::dispatcher::CommandDispatcher;
use crate::errors::Result;
use crate::utils::validation::validate_setting_pairs;

/// `/config` lists settings; `/config key=value ...` validates every pair
/// before applying any of them.
pub async fn handle_config(ctx: &CommandDispatcher, chat_id: i64, args: &[String]) -> Result<String> {
    let mut user = ctx.user_config(chat_id).await?;

    if args.is_empty() {
        return Ok(format!("Your settings:\n{}", user.describe()));
    }

    let updates = match validate_setting_pairs(args, ctx.saunas()) {
        Ok(updates) => updates,
        Err(e) => return Ok(format!("Error:\n{e}")),
    };

    for (setting, value) in updates {
        user.apply(setting, value);
    }
    ctx.store().save(&user).await?;

    Ok(format!("Settings updated:\n{}", user.describe()))
}
