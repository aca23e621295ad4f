//! Response cache gate.
//!
//! Serves a stored copy of a successful GET response for the store's TTL
//! without running the handler. Entity writes do not invalidate entries.

use cachewise_service::{request_key, CachedResponse, ResponseCacheStore};
use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{HeaderName, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

/// Largest body the gate will buffer.
const MAX_CACHED_BODY_BYTES: usize = 1024 * 1024;

/// Axum middleware backed by a [`ResponseCacheStore`].
pub async fn response_cache_middleware(
    State(store): State<Arc<ResponseCacheStore>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let key = request_key(
        request.method().as_str(),
        request.uri().path(),
        request.uri().query(),
    );

    if let Some(cached) = store.get(&key) {
        return replay(cached);
    }

    let response = next.run(request).await;
    if !response.status().is_success() {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_CACHED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Could not buffer response for '{}': {}", key, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    store.put(
        key,
        CachedResponse {
            status: parts.status.as_u16(),
            headers: parts
                .headers
                .iter()
                .map(|(name, value)| (name.as_str().to_string(), value.as_bytes().to_vec()))
                .collect(),
            body: bytes.to_vec(),
        },
    );

    Response::from_parts(parts, Body::from(bytes))
}

/// Rebuilds a response from a stored entry.
fn replay(cached: CachedResponse) -> Response {
    let status = StatusCode::from_u16(cached.status).unwrap_or(StatusCode::OK);
    let mut response = Response::new(Body::from(cached.body));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    for (name, value) in cached.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_bytes(&value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.append(name, value);
            }
            _ => warn!("Skipping unreplayable cached header '{}'", name),
        }
    }

    response
}
