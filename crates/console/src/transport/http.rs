// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP handlers owned by the console itself (not proxied).

use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::ConsoleError;
use crate::state::ConsoleState;
use crate::upstream::health::{check_upstream, UpstreamHealth};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub upstream: UpstreamHealth,
}

/// `GET /api/health`
pub async fn health(State(s): State<Arc<ConsoleState>>) -> impl IntoResponse {
    let upstream = check_upstream(&s).await;
    Json(HealthResponse { status: "ok".to_owned(), upstream })
}

/// Fallback for paths no route matches.
pub async fn not_found(uri: Uri) -> Response {
    ConsoleError::NotFound.to_http_response(format!("No route for {}", uri.path())).into_response()
}

/// Fallback for a routed path called with a method it does not serve.
pub async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    ConsoleError::MethodNotAllowed
        .to_http_response(format!("{method} is not allowed on {}", uri.path()))
        .into_response()
}
