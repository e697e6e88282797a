mod backoff;
mod client;
mod error;
mod language;
mod payload;
mod route;
mod sequence;
mod transport;

pub use backoff::{BackoffController, BackoffPolicy, DEFAULT_BACKOFF_BASE, DEFAULT_MAX_RETRIES};
pub use client::{APP_TOKEN_KEY, DEFAULT_BASE_URL, PushClient, PushOutcome};
pub use error::{PushError, TransportError};
pub use language::{SUPPORTED_LANGUAGES, to_three_letter};
pub use payload::{MAX_TEXT_LENGTH, PushEnvelope, SearchRequest, limit_text};
pub use route::{RouteHeaders, RouteManager};
pub use sequence::SequenceGuard;
pub use transport::{Headers, ReqwestTransport, Transport};
