//! # Sauna Bot
//!
//! A Telegram bot for checking HOAS sauna timetables and reservations.
//!
//! ## Features
//! - `/tt` timetable for a day and sauna, in each user's own language
//! - `/show` current reservations of the configured accounts
//! - `/config` per-chat settings stored in SQLite
//! - One-time discovery of sauna ids from the booking site

/// Bot commands, the command dispatcher and teloxide handlers
pub mod bot;
/// Configuration file and environment variables
pub mod config;
/// User settings storage
pub mod database;
/// Error types
pub mod errors;
/// Reservation portal client, sauna table and health endpoints
pub mod services;
/// Utility functions for dates, validation, and logging
pub mod utils;
