// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One proxied request: validate, resolve, forward, relay.
//!
//! Every path ends in a JSON response with a status code; nothing escapes.

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::{internal_error, missing_authorization, ConsoleError};
use crate::proxy::headers::passthrough_headers;
use crate::state::ConsoleState;
use crate::upstream::client::read_json;

/// How a successful upstream response is returned to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relay {
    /// Upstream status and JSON body, unchanged.
    Body,
    /// `204 No Content`, upstream body discarded.
    Empty,
}

/// Per-route behavior: what to synthesize when the upstream body is unreadable,
/// and how to answer on success.
#[derive(Debug, Clone, Copy)]
pub struct ProxyRoute {
    pub failure: &'static str,
    pub kind: ConsoleError,
    pub relay: Relay,
}

impl ProxyRoute {
    pub const fn body(failure: &'static str, kind: ConsoleError) -> Self {
        Self { failure, kind, relay: Relay::Body }
    }

    pub const fn empty(failure: &'static str, kind: ConsoleError) -> Self {
        Self { failure, kind, relay: Relay::Empty }
    }
}

/// A request bound for one management API URL.
pub struct Forward<'a> {
    pub method: Method,
    pub route: &'a ProxyRoute,
    /// Opaque path segments appended to the management API base.
    pub segments: &'a [&'a str],
}

impl<'a> Forward<'a> {
    pub fn new(method: Method, route: &'a ProxyRoute, segments: &'a [&'a str]) -> Self {
        Self { method, route, segments }
    }

    /// Run the request against the upstream and build the UI response.
    pub async fn send(self, state: &ConsoleState, headers: &HeaderMap, body: &[u8]) -> Response {
        match self.try_send(state, headers, body).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(
                    method = %self.method,
                    route = self.route.failure,
                    err = %format!("{e:#}"),
                    "proxy request failed"
                );
                internal_error()
            }
        }
    }

    async fn try_send(
        &self,
        state: &ConsoleState,
        headers: &HeaderMap,
        body: &[u8],
    ) -> anyhow::Result<Response> {
        let Some(authorization) = headers.get(AUTHORIZATION) else {
            return Ok(missing_authorization());
        };

        let url = state.config.management_url(self.segments)?;
        let passthrough = passthrough_headers(headers);
        let body = if self.method == Method::GET { None } else { parse_body(body) };

        let resp = state
            .upstream
            .send_json(self.method.clone(), url, authorization, passthrough, body.as_ref())
            .await?;
        let status = StatusCode::from_u16(resp.status().as_u16())?;
        let json = read_json(resp).await?;

        if !status.is_success() {
            tracing::debug!(
                method = %self.method,
                status = status.as_u16(),
                route = self.route.failure,
                "upstream returned error"
            );
        }
        Ok(relay(self.route, status, json))
    }
}

/// Inbound body as JSON; empty or malformed bodies are treated as absent.
pub fn parse_body(body: &[u8]) -> Option<serde_json::Value> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice(body).ok()
}

/// Map an upstream status and (possibly unreadable) JSON body to the UI response.
pub fn relay(route: &ProxyRoute, status: StatusCode, json: Option<serde_json::Value>) -> Response {
    if !status.is_success() {
        return match json {
            Some(json) => (status, Json(json)).into_response(),
            None => route
                .kind
                .to_http_response_with_status(route.failure, status.as_u16())
                .into_response(),
        };
    }

    match (route.relay, json) {
        (Relay::Empty, _) => StatusCode::NO_CONTENT.into_response(),
        (Relay::Body, Some(json)) => (status, Json(json)).into_response(),
        // A 204 cannot carry the body, so it becomes 200 `{}`.
        (Relay::Body, None) if status == StatusCode::NO_CONTENT => {
            (StatusCode::OK, Json(serde_json::json!({}))).into_response()
        }
        (Relay::Body, None) => (status, Json(serde_json::json!({}))).into_response(),
    }
}

#[cfg(test)]
#[path = "forward_tests.rs"]
mod tests;
