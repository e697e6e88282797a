//! Route discovery.
//!
//! Juremy forwards a push to the right app instance based on a header it hands
//! out from the `setup-route` endpoint. The header is fetched once and reused
//! until a push reports that the route went stale.

use parking_lot::RwLock;
use serde::Deserialize;
use tracing::{debug, error};

use super::error::{PushError, TransportError};
use super::transport::{Headers, Transport};

/// Routing header pair handed out by the discovery endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteHeaders {
    pub header_name: String,
    pub header_value: String,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    routing: Option<RouteHeaders>,
}

#[derive(Debug)]
pub struct RouteManager {
    setup_url: String,
    route: RwLock<Option<RouteHeaders>>,
}

impl RouteManager {
    pub fn new(setup_url: String) -> Self {
        Self {
            setup_url,
            route: RwLock::new(None),
        }
    }

    pub fn setup_url(&self) -> &str {
        &self.setup_url
    }

    /// The cached route, if one is still considered valid.
    pub fn cached(&self) -> Option<RouteHeaders> {
        self.route.read().clone()
    }

    /// Forgets the cached route so the next push sets it up again.
    pub fn invalidate(&self) {
        *self.route.write() = None;
    }

    /// Returns the cached route, or sets one up with a discovery request.
    pub async fn ensure_route(
        &self,
        transport: &dyn Transport,
        headers: &Headers,
    ) -> Result<RouteHeaders, PushError> {
        if let Some(route) = self.cached() {
            return Ok(route);
        }

        let body = transport
            .get(&self.setup_url, headers)
            .await
            .map_err(classify_setup_error)?;
        let route = parse_route(&body)?;

        debug!(
            header_name = %route.header_name,
            header_value = %route.header_value,
            "route set up"
        );
        *self.route.write() = Some(route.clone());
        Ok(route)
    }
}

fn classify_setup_error(err: TransportError) -> PushError {
    match err.status() {
        Some(401) => PushError::AppTokenError,
        // Nobody is listening on the other side to be routed to.
        Some(421) => PushError::RoutingSetupError,
        Some(504) => PushError::ConnectionError,
        _ => PushError::Transport(err),
    }
}

fn parse_route(body: &str) -> Result<RouteHeaders, PushError> {
    let response: RouteResponse = serde_json::from_str(body).map_err(|e| {
        error!(error = %e, "failed to parse routing response");
        PushError::RoutingResponseParseError
    })?;

    response.routing.ok_or_else(|| {
        error!("routing response has no routing object");
        PushError::RoutingResponseParseError
    })
}
