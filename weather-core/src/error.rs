use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by a [`WeatherProvider`](crate::WeatherProvider) lookup.
///
/// Every error stands for the [`EMPTY_RESULT`](crate::EMPTY_RESULT) record: callers that need a
/// value regardless can fall back to `WeatherInfo::empty()`.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Connection, DNS, timeout or body-read failure.
    #[error("Request to weather provider failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The provider answered with anything other than `200 OK`.
    #[error("Unexpected response: {status}")]
    Status { status: StatusCode },

    #[error("Invalid provider endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ProviderError {
    /// HTTP status returned by the provider, if that is what failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ProviderError::Status { status } => Some(*status),
            ProviderError::Transport(err) => err.status(),
            _ => None,
        }
    }
}
