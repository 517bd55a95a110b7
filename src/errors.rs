//! Error taxonomy shared by the bot core, the store and the portal client.

/// Core error type.
///
/// `InvalidArgument` carries text meant for the user; everything else is
/// logged and replaced with a generic reply at the handler boundary.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("reservation service error: {0}")]
    Remote(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl BotError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    /// True for failures of the remote reservation portal.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_) | Self::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
