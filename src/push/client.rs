use std::sync::Arc;
use tracing::debug;

use super::backoff::{BackoffController, BackoffPolicy};
use super::error::{PushError, TransportError};
use super::language::to_three_letter;
use super::payload::{PushEnvelope, SearchRequest};
use super::route::{RouteHeaders, RouteManager};
use super::sequence::SequenceGuard;
use super::transport::Transport;
use crate::credentials::CredentialStore;

/// Credential key under which the Juremy app token is stored.
pub const APP_TOKEN_KEY: &str = "juremy.app.token";

pub const DEFAULT_BASE_URL: &str = "https://juremy.com";

const API_PATH: &str = "/api/app-push/v1";
const PUSH_PATH: &str = "/push";
const SETUP_ROUTE_PATH: &str = "/setup-route";

const USER_AGENT: &str = concat!("OmegaTJuremySearchPush/", env!("CARGO_PKG_VERSION"));
const APP_TOKEN_HEADER: &str = "X-Juremy-App-Token";

/// How a translate call ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Juremy accepted the push.
    Delivered,
    /// A newer search started while this one was waiting to retry.
    Superseded,
}

/// Result of a single push attempt that reached the push endpoint.
enum Delivery {
    Sent,
    /// 421: the route is stale or the app was briefly not listening.
    Misdirected,
}

/// Pushes searches to the Juremy app.
///
/// Cloning is cheap and all clones share sequencing, backoff and route
/// state, so concurrent translate calls can run on separate tasks. Only the
/// most recent one keeps retrying.
#[derive(Clone)]
pub struct PushClient {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialStore>,
    temporary_token: Option<String>,
    push_url: String,
    routes: Arc<RouteManager>,
    sequence: SequenceGuard,
    backoff: BackoffController,
}

impl PushClient {
    /// Creates a client talking to `base_url` (e.g. `https://juremy.com`).
    pub fn new(
        base_url: &str,
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let api_base = format!("{}{API_PATH}", base_url.trim_end_matches('/'));
        let sequence = SequenceGuard::new();
        let backoff = BackoffController::new(BackoffPolicy::default(), &sequence);

        Self {
            transport,
            credentials,
            temporary_token: None,
            push_url: format!("{api_base}{PUSH_PATH}"),
            routes: Arc::new(RouteManager::new(format!("{api_base}{SETUP_ROUTE_PATH}"))),
            sequence,
            backoff,
        }
    }

    /// Token to fall back on when none is stored.
    #[must_use]
    pub fn with_temporary_token(mut self, token: impl Into<String>) -> Self {
        self.temporary_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_backoff_policy(mut self, policy: BackoffPolicy) -> Self {
        self.backoff = BackoffController::new(policy, &self.sequence);
        self
    }

    pub fn push_url(&self) -> &str {
        &self.push_url
    }

    pub fn setup_route_url(&self) -> &str {
        self.routes.setup_url()
    }

    pub fn backoff_counter(&self) -> u32 {
        self.backoff.counter()
    }

    pub fn current_sequence(&self) -> u64 {
        self.sequence.current()
    }

    pub fn cached_route(&self) -> Option<RouteHeaders> {
        self.routes.cached()
    }

    /// Pushes a search for `text` to the Juremy app.
    ///
    /// Nothing is translated here; Juremy shows the matches in its own UI.
    /// Languages are two-letter codes. Text longer than
    /// [`MAX_TEXT_LENGTH`](super::MAX_TEXT_LENGTH) is truncated.
    ///
    /// A push answered with 421 is retried with backoff after setting up the
    /// route again. If another call starts meanwhile, this one returns
    /// [`PushOutcome::Superseded`] before sending anything more.
    pub async fn translate(
        &self,
        source_lang: &str,
        target_lang: &str,
        text: &str,
    ) -> Result<PushOutcome, PushError> {
        let sequence = self.sequence.start_new_search();
        debug!(sequence, "new search");

        let search = SearchRequest::new(
            to_three_letter(source_lang)?,
            to_three_letter(target_lang)?,
            text,
        );
        let envelope = PushEnvelope::search(search);

        loop {
            if !self.backoff.permits_continuation().await {
                return Err(PushError::NoSuccessAfterRetries);
            }
            // Checked after the backoff wait, so a search that arrived
            // during the sleep wins.
            if !self.sequence.is_current(sequence) {
                debug!(sequence, "no longer the active search");
                return Ok(PushOutcome::Superseded);
            }

            match self.send_push(&envelope).await? {
                Delivery::Sent => {
                    self.backoff.reset();
                    return Ok(PushOutcome::Delivered);
                }
                Delivery::Misdirected => {
                    debug!(sequence, "push misdirected, setting up route again");
                    self.routes.invalidate();
                    self.backoff.record_failure();
                }
            }
        }
    }

    /// Sets up a fresh route and sends a connectivity ping.
    ///
    /// Meant to run right after the app token was entered, so that problems
    /// surface immediately. A 421 on the ping is reported as
    /// [`PushError::RoutingSetupError`] instead of being retried.
    pub async fn test_connection_and_setup(&self) -> Result<(), PushError> {
        self.routes.invalidate();
        match self.send_push(&PushEnvelope::ping()).await? {
            Delivery::Sent => Ok(()),
            Delivery::Misdirected => {
                self.routes.invalidate();
                Err(PushError::RoutingSetupError)
            }
        }
    }

    /// The app token to authenticate with.
    ///
    /// A stored token takes precedence over the temporary one. Surrounding
    /// whitespace is removed, as tokens are usually pasted in.
    pub fn app_token(&self) -> Result<String, PushError> {
        self.credentials
            .get(APP_TOKEN_KEY)
            .filter(|token| !token.is_empty())
            .or_else(|| self.temporary_token.clone())
            .map(|token| token.trim().to_string())
            .ok_or(PushError::AppTokenNotFound)
    }

    fn identity_headers(&self) -> Result<Vec<(String, String)>, PushError> {
        Ok(vec![
            ("User-Agent".to_string(), USER_AGENT.to_string()),
            (APP_TOKEN_HEADER.to_string(), self.app_token()?),
        ])
    }

    async fn send_push(&self, envelope: &PushEnvelope) -> Result<Delivery, PushError> {
        let body = serde_json::to_string(envelope)?;

        let mut headers = self.identity_headers()?;
        let route = self
            .routes
            .ensure_route(self.transport.as_ref(), &headers)
            .await?;
        headers.push((route.header_name, route.header_value));

        match self.transport.post_json(&self.push_url, body, &headers).await {
            Ok(_) => Ok(Delivery::Sent),
            Err(err) if err.status() == Some(421) => Ok(Delivery::Misdirected),
            Err(err) => Err(classify_push_error(err)),
        }
    }
}

fn classify_push_error(err: TransportError) -> PushError {
    match err.status() {
        Some(400) => PushError::CallerError,
        Some(401) => PushError::AppTokenError,
        Some(403) => PushError::DeviceProblem,
        Some(500) => PushError::ServerError,
        Some(504) => PushError::ConnectionError,
        _ => PushError::Transport(err),
    }
}
