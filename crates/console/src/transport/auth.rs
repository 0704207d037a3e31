// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::missing_authorization;

/// Whether the request carries a non-empty `Authorization` header.
///
/// The proxy does not judge the token itself; Polaris does.
pub fn has_authorization(headers: &HeaderMap) -> bool {
    headers.get("authorization").is_some_and(|v| !v.as_bytes().is_empty())
}

/// Axum middleware that rejects proxied requests without credentials.
///
/// Layered only onto the proxy routes; sign-in and health stay open.
pub async fn require_authorization(req: Request<axum::body::Body>, next: Next) -> Response {
    if !has_authorization(req.headers()) {
        tracing::debug!(path = %req.uri().path(), "rejecting request without authorization");
        return missing_authorization();
    }
    next.run(req).await
}
