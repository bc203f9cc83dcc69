//! Outbound request construction and streaming response relay.

use std::sync::atomic::{AtomicU64, Ordering};

use axum::body::Body;
use axum::http::{header, request::Parts, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::Response;
use futures_util::TryStreamExt;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::proxy::client::build_client;
use crate::proxy::error::GatewayError;

/// Declared payloads above this many bytes are redirected, not streamed.
pub const SIZE_LIMIT: u64 = 1024 * 1024 * 1024; // 1 GiB

/// Cache directive overlaid on every non-API proxy response.
const CACHE_CONTROL_VALUE: &str = "public, max-age=604800";

/// User-Agent sent when the caller supplied none (non-API requests only).
const DEFAULT_USER_AGENT: &str = concat!("gh-proxy/", env!("CARGO_PKG_VERSION"));

/// Inbound headers the outbound client derives itself.
const SKIPPED_REQUEST_HEADERS: &[HeaderName] = &[
    header::HOST,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::CONNECTION,
];

/// Upstream response headers managed by the server side of the relay.
const STRIPPED_RESPONSE_HEADERS: &[HeaderName] = &[header::TRANSFER_ENCODING, header::CONNECTION];

/// Forwards requests upstream through one shared pooled client.
///
/// The client's pool is safe for concurrent use by every in-flight request;
/// the forwarder itself holds no per-request state beyond a dispatch
/// counter.
pub struct Forwarder {
    client: reqwest::Client,
    size_limit: u64,
    dispatched: AtomicU64,
}

impl Forwarder {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(config)?,
            size_limit: SIZE_LIMIT,
            dispatched: AtomicU64::new(0),
        })
    }

    /// Total upstream dispatches since startup.
    ///
    /// Denylist rejections happen before dispatch, so a blocked request
    /// leaves this counter untouched.
    pub fn upstream_requests(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    /// Forward a recognized resource request and relay the response.
    ///
    /// Applies the default User-Agent policy, the size-limit redirect
    /// fallback, and the cache-control overlay.
    pub async fn forward(
        &self,
        parts: Parts,
        body: Body,
        target: &str,
    ) -> Result<Response, GatewayError> {
        let upstream = self
            .dispatch(parts, body, target, true)
            .await
            .map_err(GatewayError::Upstream)?;

        // The check only fires on a declared, parseable length: bodies of
        // unknown size stream through regardless of how large they turn
        // out to be.
        if let Some(size) = declared_content_length(upstream.headers()) {
            if size > self.size_limit {
                let location = upstream.url().to_string();
                tracing::info!(
                    url = %location,
                    size,
                    "Declared payload exceeds size limit, redirecting caller"
                );
                metrics::record_size_redirect();
                return Ok(size_redirect(&location));
            }
        }

        let mut response = relay(upstream);
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_VALUE),
        );
        Ok(response)
    }

    /// Forward an API request verbatim.
    ///
    /// No User-Agent default, no size fallback, no cache overlay: the
    /// exchange is an opaque passthrough in both directions.
    pub async fn forward_api(
        &self,
        parts: Parts,
        body: Body,
        target: &str,
    ) -> Result<Response, GatewayError> {
        let upstream = self
            .dispatch(parts, body, target, false)
            .await
            .map_err(GatewayError::UpstreamApi)?;
        Ok(relay(upstream))
    }

    async fn dispatch(
        &self,
        parts: Parts,
        body: Body,
        target: &str,
        default_user_agent: bool,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut headers = HeaderMap::new();
        for (name, value) in &parts.headers {
            if SKIPPED_REQUEST_HEADERS.contains(name) {
                continue;
            }
            // append, not insert: multi-valued headers relay duplicated
            headers.append(name.clone(), value.clone());
        }
        if default_user_agent && !headers.contains_key(header::USER_AGENT) {
            headers.insert(header::USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        }

        let mut request = self.client.request(parts.method, target).headers(headers);
        if !is_bodiless(&body) {
            request = request.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }

        self.dispatched.fetch_add(1, Ordering::Relaxed);
        request.send().await
    }
}

/// Relay an upstream response: status and headers verbatim, body as an
/// unbuffered chunk stream with the caller's backpressure.
///
/// A mid-stream failure is logged and terminates the connection; the status
/// line is already committed by then, so no new status is surfaced.
fn relay(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let mut headers = HeaderMap::new();
    for (name, value) in upstream.headers() {
        if STRIPPED_RESPONSE_HEADERS.contains(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    let stream = upstream.bytes_stream().inspect_err(|error| {
        tracing::warn!(error = %error, "Error relaying upstream body");
    });

    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

fn size_redirect(location: &str) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::TEMPORARY_REDIRECT;
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

fn declared_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// True when the inbound request carries no body (exact size hint of zero),
/// so the outbound request stays bodiless instead of sending an empty
/// chunked stream.
fn is_bodiless(body: &Body) -> bool {
    use hyper::body::Body as _;
    body.size_hint().exact() == Some(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_length_parsing_fails_open() {
        let mut headers = HeaderMap::new();
        assert_eq!(declared_content_length(&headers), None);

        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("not-a-number"));
        assert_eq!(declared_content_length(&headers), None);

        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("2147483648"));
        assert_eq!(declared_content_length(&headers), Some(2_147_483_648));
    }

    #[test]
    fn empty_inbound_body_is_bodiless() {
        assert!(is_bodiless(&Body::empty()));
        assert!(!is_bodiless(&Body::from("payload")));
    }
}
