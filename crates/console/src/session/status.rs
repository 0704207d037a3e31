// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session validation. Pure functions of a [`Session`] snapshot and a clock.

use indexmap::IndexMap;
use serde::Serialize;

use crate::auth::token::DEFAULT_TOKEN_TYPE;
use crate::session::Session;

/// Classification of a session at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    pub is_authenticated: bool,
    pub is_expired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Classify `session` at `now_ms`.
///
/// Expiry is strict: a token is expired only when `now_ms > expires_at`.
/// Never mutates anything; an expired token is reported, not cleared.
pub fn check_auth_status(session: &Session, now_ms: u64) -> AuthStatus {
    let token = match session.access_token.as_deref() {
        Some(token) if !token.is_empty() => token.to_owned(),
        _ => return AuthStatus::default(),
    };
    let token_type = match session.token_type.as_deref() {
        Some(kind) if !kind.is_empty() => kind.to_owned(),
        _ => DEFAULT_TOKEN_TYPE.to_owned(),
    };
    let is_expired = session.expires_at.is_some_and(|expires_at| now_ms > expires_at);

    AuthStatus {
        is_authenticated: !is_expired,
        is_expired,
        token: Some(token),
        token_type: Some(token_type),
    }
}

/// Headers for an authenticated call, or `None` when not authenticated.
///
/// Adds the realm header only when both its name and value are set.
pub fn auth_headers(session: &Session, now_ms: u64) -> Option<IndexMap<String, String>> {
    let status = check_auth_status(session, now_ms);
    if !status.is_authenticated {
        return None;
    }
    let (Some(token), Some(token_type)) = (status.token, status.token_type) else {
        return None;
    };

    let mut headers = IndexMap::new();
    headers.insert("Authorization".to_owned(), format!("{token_type} {token}"));
    if let Some((name, value)) = session.realm_header() {
        headers.insert(name.to_owned(), value.to_owned());
    }
    Some(headers)
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
