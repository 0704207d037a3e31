// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `POST /api/auth`: exchange client credentials for a bearer token.
//!
//! The proxy keeps nothing: the caller persists the returned token.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::header::{HeaderName, HeaderValue};

use crate::auth::token::SignInRequest;
use crate::error::internal_error;
use crate::proxy::extract::RawBody;
use crate::state::ConsoleState;
use crate::upstream::client::read_json;

/// `POST /api/auth`, `POST /api/signin`
pub async fn exchange_credentials(
    State(s): State<Arc<ConsoleState>>,
    RawBody(body): RawBody,
) -> Response {
    match try_exchange(&s, &body).await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!(err = %format!("{e:#}"), "credential exchange failed");
            internal_error()
        }
    }
}

async fn try_exchange(s: &ConsoleState, body: &[u8]) -> anyhow::Result<Response> {
    let req: SignInRequest = serde_json::from_slice(body)?;
    let extra_header = match req.realm_header() {
        Some((name, value)) => {
            Some((HeaderName::from_bytes(name.as_bytes())?, HeaderValue::from_str(value)?))
        }
        None => None,
    };

    let resp = s.upstream.request_token(s.config.token_url()?, &req.form(), extra_header).await?;
    let status = resp.status();
    let Some(json) = read_json(resp).await? else {
        anyhow::bail!("token endpoint returned {status} with a non-JSON body");
    };

    if !status.is_success() {
        tracing::warn!(client_id = %req.client_id, status = status.as_u16(), "token request rejected");
    }
    let status = StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((status, Json(json)).into_response())
}
