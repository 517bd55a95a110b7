pub mod commands;
pub mod dispatcher;
pub mod handlers;
