//! Error types surfaced by the push client.

use thiserror::Error;

/// Failure reported by a [`Transport`](super::Transport) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The server answered with a non-success HTTP status.
    #[error("request failed with status {code}")]
    Status { code: u16, body: String },

    /// The request never produced an HTTP status (connect error, timeout, ...).
    #[error("request failed: {0}")]
    Request(String),
}

impl TransportError {
    /// HTTP status code, if the server answered at all.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            Self::Request(_) => None,
        }
    }
}

/// User-facing errors raised by [`PushClient`](super::PushClient).
#[derive(Debug, Error)]
pub enum PushError {
    #[error("Language not supported by Juremy: {0}")]
    LanguageNotSupported(String),

    #[error("Juremy app token not found. Run 'juremy-push configure' to set it.")]
    AppTokenNotFound,

    #[error("Juremy rejected the app token. Check that it was copied correctly.")]
    AppTokenError,

    #[error("Could not set up routing to the Juremy app. Is Juremy open and listening for pushes?")]
    RoutingSetupError,

    #[error("Could not understand the routing response from Juremy")]
    RoutingResponseParseError,

    #[error("Juremy rejected the push request as invalid")]
    CallerError,

    #[error("The Juremy app reported a problem with this device")]
    DeviceProblem,

    #[error("Juremy server error")]
    ServerError,

    #[error("Could not reach the Juremy app (gateway timeout)")]
    ConnectionError,

    #[error("Juremy did not accept the push after repeated retries")]
    NoSuccessAfterRetries,

    #[error("Failed to encode push payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
