/// Core error type for the bot.
///
/// Adapter crates should map their specific errors into this type so the bot
/// core can turn any failure into a user-facing chat message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level failure (connect, timeout, unreadable body).
    #[error("http error: {0}")]
    Http(String),

    /// The remote API answered with an error payload.
    #[error("api error: {0}")]
    Api(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
