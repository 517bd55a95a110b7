mod common;

use chrono::NaiveDate;
use common::*;
use sauna_bot::bot::commands::Command;
use sauna_bot::bot::dispatcher::{REMOTE_FAILURE_REPLY, STORAGE_FAILURE_REPLY};
use sauna_bot::database::models::UserConfig;
use sauna_bot::database::store::UserConfigStore;

const CHAT: i64 = 123456789;

#[tokio::test]
async fn test_tt_defaults_to_today_and_h_sauna() {
    let bot = test_bot();
    let reply = bot.dispatcher.dispatch(CHAT, "/tt", BOT_NAME).await.unwrap();

    assert_eq!(reply, "Wed 14.10\n17:00-18:00 free @101");
    assert_eq!(bot.portal.timetable_calls(), vec![("101".to_string(), today())]);
}

#[tokio::test]
async fn test_tt_tomorrow_h_in_english() {
    let bot = test_bot();
    let reply = bot.dispatcher.dispatch(CHAT, "/tt 1 h", BOT_NAME).await.unwrap();

    let tomorrow = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
    let mut lines = reply.lines();
    assert_eq!(lines.next(), Some("Thu 15.10"));
    assert_eq!(lines.next(), Some("17:00-18:00 free @101"));
    assert_eq!(bot.portal.timetable_calls(), vec![("101".to_string(), tomorrow)]);
}

#[tokio::test]
async fn test_tt_weekday_and_sauna_in_any_order() {
    let bot = test_bot();
    let reply = bot.dispatcher.dispatch(CHAT, "/tt M fri", BOT_NAME).await.unwrap();

    assert!(reply.starts_with("Fri 16.10\n"));
    assert_eq!(
        bot.portal.timetable_calls(),
        vec![("102".to_string(), NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())]
    );
}

#[tokio::test]
async fn test_tt_rejects_three_arguments_without_remote_call() {
    let bot = test_bot();
    for text in ["/tt 1 h m", "/tt a b c d", "/tt 0 0 0"] {
        let reply = bot.dispatcher.dispatch(CHAT, text, BOT_NAME).await.unwrap();
        assert_eq!(reply, "Invalid arguments", "{text}");
    }
    assert!(bot.portal.timetable_calls().is_empty());
    // No side effects on the store either
    assert!(bot.store.get(CHAT).await.unwrap().is_none());
}

#[tokio::test]
async fn test_tt_unknown_sauna_letter() {
    let bot = test_bot();
    let reply = bot.dispatcher.dispatch(CHAT, "/tt x", BOT_NAME).await.unwrap();

    assert_eq!(reply, "Invalid sauna");
    assert!(bot.portal.timetable_calls().is_empty());
}

#[tokio::test]
async fn test_tt_unrecognized_argument() {
    let bot = test_bot();
    let reply = bot.dispatcher.dispatch(CHAT, "/tt someday", BOT_NAME).await.unwrap();
    assert_eq!(reply, "Invalid arguments");
}

#[tokio::test]
async fn test_tt_uses_user_locale() {
    let bot = test_bot();
    let mut config = UserConfig::new(CHAT);
    config.lang = "fi".to_string();
    bot.store.save(&config).await.unwrap();

    // "to" is Thursday in Finnish
    let reply = bot.dispatcher.dispatch(CHAT, "/tt to", BOT_NAME).await.unwrap();
    assert!(reply.starts_with("to 15.10\n"), "{reply}");

    // English abbreviations are not valid for a Finnish user
    let reply = bot.dispatcher.dispatch(CHAT, "/tt thu", BOT_NAME).await.unwrap();
    assert_eq!(reply, "Invalid arguments");
}

#[tokio::test]
async fn test_tt_uses_configured_default_sauna() {
    let bot = test_bot();
    bot.dispatcher.dispatch(CHAT, "/config sauna=e", BOT_NAME).await.unwrap();

    bot.dispatcher.dispatch(CHAT, "/tt", BOT_NAME).await.unwrap();
    assert_eq!(bot.portal.timetable_calls()[0].0, "103");
}

#[tokio::test]
async fn test_tt_remote_failure_becomes_reply() {
    let bot = test_bot_with(FakePortal::failing());
    let reply = bot.dispatcher.dispatch(CHAT, "/tt", BOT_NAME).await.unwrap();
    assert_eq!(reply, REMOTE_FAILURE_REPLY);
}

#[tokio::test]
async fn test_show_returns_reservations_verbatim() {
    let bot = test_bot();
    let reply = bot.dispatcher.handle(CHAT, Command::Show).await;

    assert_eq!(reply, "user@example.com:\nSauna 1, H-talo 15.10.2026 17:00-18:00");
    assert_eq!(*bot.portal.reservation_calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_start_registers_and_includes_help() {
    let bot = test_bot();
    let reply = bot.dispatcher.dispatch(CHAT, "/start", BOT_NAME).await.unwrap();

    assert!(reply.starts_with("You have been registered.\n\n"));
    for name in Command::NAMES {
        assert!(reply.contains(&format!("/{name}")), "missing /{name}");
    }
    assert_eq!(bot.store.get(CHAT).await.unwrap(), Some(UserConfig::new(CHAT)));

    let again = bot.dispatcher.dispatch(CHAT, "/start", BOT_NAME).await.unwrap();
    assert!(again.starts_with("You are already registered."));
}

#[tokio::test]
async fn test_config_without_args_on_new_chat_shows_defaults() {
    let bot = test_bot();
    let reply = bot.dispatcher.dispatch(CHAT, "/config", BOT_NAME).await.unwrap();
    assert_eq!(reply, "Your settings:\nlang: en\nsauna: h");
}

#[tokio::test]
async fn test_config_updates_all_pairs() {
    let bot = test_bot();
    let reply = bot
        .dispatcher
        .dispatch(CHAT, "/config lang=fi sauna=M", BOT_NAME)
        .await
        .unwrap();

    assert_eq!(reply, "Settings updated:\nlang: fi\nsauna: m");
    let stored = bot.store.get(CHAT).await.unwrap().unwrap();
    assert_eq!(stored.lang, "fi");
    assert_eq!(stored.sauna, "m");
}

#[tokio::test]
async fn test_config_is_all_or_nothing() {
    let bot = test_bot();
    bot.store.add_user(CHAT).await.unwrap();

    let reply = bot
        .dispatcher
        .dispatch(CHAT, "/config lang=fi sauna=q", BOT_NAME)
        .await
        .unwrap();

    assert!(reply.starts_with("Error:\n"));
    assert!(reply.contains("sauna=q"));
    assert_eq!(bot.store.get(CHAT).await.unwrap(), Some(UserConfig::new(CHAT)));
}

#[tokio::test]
async fn test_config_rejects_unknown_key_and_bad_locale() {
    let bot = test_bot();

    let reply = bot.dispatcher.dispatch(CHAT, "/config theme=dark", BOT_NAME).await.unwrap();
    assert!(reply.contains("Unknown setting 'theme'"));

    let reply = bot.dispatcher.dispatch(CHAT, "/config lang=zz_ZZ", BOT_NAME).await.unwrap();
    assert!(reply.contains("lang=zz_ZZ"));
    assert!(bot.store.get(CHAT).await.unwrap().is_none());
}

#[tokio::test]
async fn test_help_variants() {
    let bot = test_bot();

    let listing = bot.dispatcher.dispatch(CHAT, "/help", BOT_NAME).await.unwrap();
    assert!(listing.contains("/tt"));

    let usage = bot.dispatcher.dispatch(CHAT, "/help tt", BOT_NAME).await.unwrap();
    assert!(usage.starts_with("/tt [day] [sauna]"));
}

#[tokio::test]
async fn test_unknown_command_gets_annotated_help() {
    let bot = test_bot();
    let reply = bot.dispatcher.dispatch(CHAT, "/reserve h", BOT_NAME).await.unwrap();

    assert!(reply.starts_with("Unknown command: /reserve"));
    assert!(reply.contains("/config"));
    assert!(bot.portal.timetable_calls().is_empty());
}

#[tokio::test]
async fn test_command_names_are_case_sensitive() {
    let bot = test_bot();
    let reply = bot.dispatcher.dispatch(CHAT, "/TT 1", BOT_NAME).await.unwrap();
    assert!(reply.starts_with("Unknown command: /TT"));
}

#[tokio::test]
async fn test_addressed_command() {
    let bot = test_bot();
    let reply = bot.dispatcher.dispatch(CHAT, "/tt@SaunaBot 0 e", BOT_NAME).await.unwrap();
    assert!(reply.ends_with("@103"));
}

#[test]
fn test_failure_replies_are_distinct() {
    assert_ne!(REMOTE_FAILURE_REPLY, STORAGE_FAILURE_REPLY);
}

#[tokio::test]
async fn test_commands_for_other_bots_get_no_reply() {
    let bot = test_bot();
    for text in ["/tt@OtherBot 1", "/start@OtherBot", "/reserve@OtherBot h"] {
        assert_eq!(bot.dispatcher.dispatch(CHAT, text, BOT_NAME).await, None, "{text}");
    }
    assert!(bot.portal.timetable_calls().is_empty());
    assert!(bot.store.get(CHAT).await.unwrap().is_none());
}

#[tokio::test]
async fn test_user_ids_above_32_bits_are_served() {
    let bot = test_bot();
    let chat_id = 5_000_000_000;

    let reply = bot.dispatcher.dispatch(chat_id, "/start", BOT_NAME).await.unwrap();
    assert!(reply.starts_with("You have been registered."));

    let reply = bot.dispatcher.dispatch(chat_id, "/tt", BOT_NAME).await.unwrap();
    assert_eq!(reply, "Wed 14.10\n17:00-18:00 free @101");
    assert_eq!(bot.store.get(chat_id).await.unwrap(), Some(UserConfig::new(chat_id)));
}

#[tokio::test]
async fn test_argumentless_commands_ignore_trailing_text() {
    let bot = test_bot();

    let reply = bot.dispatcher.dispatch(CHAT, "/show please", BOT_NAME).await.unwrap();
    assert_eq!(reply, "user@example.com:\nSauna 1, H-talo 15.10.2026 17:00-18:00");

    let reply = bot.dispatcher.dispatch(CHAT, "/start now", BOT_NAME).await.unwrap();
    assert!(reply.starts_with("You have been registered."));
}
