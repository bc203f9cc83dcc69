//! HTTP server setup and gateway entrypoint.
//!
//! # Responsibilities
//! - Create the Axum router: liveness banner, health check, proxy fallback
//! - Wire up middleware (request ID, tracing, security headers)
//! - Run the gateway state machine per request:
//!   classify → denylist gate → rewrite → forward
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::classify::{classify, Classification};
use crate::config::ProxyConfig;
use crate::denylist::Denylist;
use crate::http::request::{ProxyRequestId, X_REQUEST_ID};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::proxy::{Forwarder, GatewayError};

/// Application state injected into handlers.
///
/// Both fields are read-only after startup; requests share them without
/// synchronization.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
    pub denylist: Arc<Denylist>,
}

/// HTTP server for the proxy gateway.
pub struct HttpServer {
    router: Router,
    forwarder: Arc<Forwarder>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and denylist.
    pub fn new(config: &ProxyConfig, denylist: Arc<Denylist>) -> Result<Self, reqwest::Error> {
        let forwarder = Arc::new(Forwarder::new(&config.upstream)?);
        let state = AppState {
            forwarder: forwarder.clone(),
            denylist,
        };
        let router = Self::build_router(state);
        Ok(Self { router, forwarder })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Only `GET /` and `GET /health` are fixed routes; every other
    /// method/path combination, including non-GET on those two paths,
    /// falls through to the proxy handler.
    fn build_router(state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, ProxyRequestId))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            // if_not_present: upstream-supplied values win over the defaults
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_XSS_PROTECTION,
                HeaderValue::from_static("1; mode=block"),
            ));

        Router::new()
            .route("/", get(banner).fallback(proxy_handler))
            .route("/health", get(health).fallback(proxy_handler))
            .fallback(proxy_handler)
            .with_state(state)
            .layer(middleware)
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: &Shutdown) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let mut rx = shutdown.subscribe();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = rx.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Shared forwarder handle (dispatch counter introspection).
    pub fn forwarder(&self) -> Arc<Forwarder> {
        self.forwarder.clone()
    }
}

async fn banner() -> &'static str {
    "GitHub Proxy Service Running"
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

/// Main proxy handler: the gateway state machine.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();

    let response = match handle_proxy(state, request).await {
        Ok(response) => response,
        Err(error) => error.into_response(),
    };

    metrics::record_request(&method, response.status().as_u16(), start);
    response
}

async fn handle_proxy(state: AppState, request: Request<Body>) -> Result<Response, GatewayError> {
    let (parts, body) = request.into_parts();
    let raw_path = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_default();
    let raw_path = raw_path.strip_prefix('/').unwrap_or(raw_path);

    match classify(raw_path)? {
        Classification::Api { url } => {
            tracing::debug!(url = %url, "Forwarding API request");
            state.forwarder.forward_api(parts, body, &url).await
        }
        Classification::Unmatched { url } => {
            tracing::warn!(url = %url, "Unrecognized GitHub URL shape");
            Err(GatewayError::UnrecognizedUrl)
        }
        Classification::Resource { family, owner, url } => {
            if state.denylist.is_blocked(owner.as_deref()) {
                tracing::warn!(owner = ?owner, "Denylisted owner rejected");
                return Err(GatewayError::Blocked);
            }
            let target = family.rewrite(url);
            tracing::debug!(family = family.name(), url = %target, "Forwarding resource request");
            state.forwarder.forward(parts, body, &target).await
        }
    }
}
