/// Errors that can occur while fetching records from the search service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP transport failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not a JSON array of records.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL cannot have path segments appended.
    #[error("base URL cannot carry a path: {0}")]
    InvalidBaseUrl(String),

    /// The request was superseded or aborted before it completed.
    #[error("request cancelled")]
    Cancelled,
}

impl ClientError {
    /// Returns `true` if this is a cancellation rather than a genuine failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
