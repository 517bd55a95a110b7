pub mod config;
pub mod general;
pub mod tt;

use teloxide::utils::command::{BotCommands, ParseError};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Sauna bot commands:")]
pub enum Command {
    #[command(description = "Display this help message, or /help <command> for details", parse_with = optional_word)]
    Help(String),
    #[command(description = "Register and show help")]
    Start,
    #[command(description = "Timetable for a day and sauna, e.g. /tt 1 h", parse_with = split_words)]
    Tt(Vec<String>),
    #[command(description = "Show current reservations")]
    Show,
    #[command(description = "Show or change your settings, e.g. /config lang=fi", parse_with = split_words)]
    Config(Vec<String>),
}

/// Whitespace-separated argument tokens; any count is accepted here and
/// checked by the handler.
pub fn split_words(input: String) -> Result<(Vec<String>,), ParseError> {
    Ok((input.split_whitespace().map(str::to_string).collect(),))
}

/// First argument token, or an empty string.
pub fn optional_word(input: String) -> Result<(String,), ParseError> {
    Ok((input.split_whitespace().next().unwrap_or_default().to_string(),))
}

impl Command {
    pub const NAMES: [&'static str; 5] = ["help", "start", "tt", "show", "config"];

    pub fn name(&self) -> &'static str {
        match self {
            Command::Help(_) => "help",
            Command::Start => "start",
            Command::Tt(_) => "tt",
            Command::Show => "show",
            Command::Config(_) => "config",
        }
    }

    pub fn is_known(name: &str) -> bool {
        Self::NAMES.contains(&name)
    }

    /// Long-form usage shown by `/help <command>`.
    pub fn usage(name: &str) -> Option<&'static str> {
        let text = match name {
            "help" => "/help [command]\nList the commands, or describe one of them.",
            "start" => "/start\nStart a chat with the bot.\nRegisters you with default settings and sends this help.",
            "tt" => {
                "/tt [day] [sauna]\nReturn the timetable for a day and sauna.\n\
                 Day is either a weekday abbreviation of your language\n\
                 or the number of days from now (default today).\n\
                 Sauna is a single letter such as H, M or E\n\
                 (default from your settings)."
            }
            "show" => "/show\nReturn reserved saunas.",
            "config" => {
                "/config [key=value ...]\nUser configuration manager.\n\
                 Arguments as key=value pairs separated by spaces.\n\
                 No arguments for a list of current configurations.\n\
                 Keys: lang (locale code, e.g. en or fi), sauna (sauna letter)."
            }
            _ => return None,
        };
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_variants() {
        let commands = [
            Command::Help(String::new()),
            Command::Start,
            Command::Tt(vec![]),
            Command::Show,
            Command::Config(vec![]),
        ];
        for command in commands {
            assert!(Command::is_known(command.name()));
            assert!(Command::usage(command.name()).is_some());
        }
        assert!(Command::usage("reserve").is_none());
    }

    #[test]
    fn test_split_words() {
        let (words,) = split_words("  1   h ".to_string()).unwrap();
        assert_eq!(words, vec!["1", "h"]);
        let (words,) = split_words(String::new()).unwrap();
        assert!(words.is_empty());
    }
}
