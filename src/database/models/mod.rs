pub mod user_config;

pub use user_config::*;
