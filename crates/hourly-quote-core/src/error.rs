//! Errors raised while fetching a quote.
//!
//! None of these reach the render layer: the refresh scheduler logs and
//! drops them, leaving the previous quote on display.

use thiserror::Error;

/// Broad classification used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Network,
    Decode,
    ConfigurationMissing,
}

#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure talking to the quotes API.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Quotes API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body was not a JSON array of quotes.
    #[error("Failed to decode quotes: {0}")]
    Decode(#[from] serde_json::Error),

    /// The body was a valid but empty array.
    #[error("Quotes API returned no quotes")]
    EmptyResponse,

    /// No category selected; the default is applied instead.
    #[error("No category selected")]
    ConfigurationMissing,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Network(_) | Self::Status { .. } => FetchErrorKind::Network,
            Self::Decode(_) | Self::EmptyResponse => FetchErrorKind::Decode,
            Self::ConfigurationMissing => FetchErrorKind::ConfigurationMissing,
        }
    }
}
