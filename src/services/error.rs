use reqwest::StatusCode;
use thiserror::Error;

/// Failure of an outbound call to the prediction service or the
/// generative-language API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service responded with {status}")]
    Status { status: StatusCode, body: String },

    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response has no {0}")]
    MissingContent(&'static str),

    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// Whether the remote side could not be reached or did not speak JSON,
    /// as opposed to answering with an unexpected shape.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_) | Self::Url(_))
    }
}
