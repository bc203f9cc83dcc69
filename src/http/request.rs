//! Request identification.
//!
//! Every inbound request gets a UUID v4 request ID as early as possible so
//! log lines across the pipeline correlate; the ID propagates onto the
//! response.

use axum::http::{HeaderName, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates a UUID v4 request ID for each inbound request.
#[derive(Clone, Copy, Default)]
pub struct ProxyRequestId;

impl MakeRequestId for ProxyRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}
