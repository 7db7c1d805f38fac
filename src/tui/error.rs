use crate::client::ClientError;
use crate::config::ConfigError;

/// Errors that can occur in the TUI layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded or was invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}
