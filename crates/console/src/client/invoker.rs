// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Authenticated client invoker.
//!
//! Checks the session before every call, injects auth and realm headers,
//! calls the console proxy, and owns the 401 cascade: clear the session,
//! broadcast, send the user to sign-in. Callers never special-case 401.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode, Url};

use crate::auth::token::{SignInRequest, TokenResponse};
use crate::client::notice::{
    UiSignals, EXPIRED_MESSAGE, REJECTED_MESSAGE, REQUEST_FAILED_MESSAGE, SIGNED_OUT_MESSAGE,
    SIGN_IN_MESSAGE, UNKNOWN_ERROR,
};
use crate::client::outcome::{AuthFailure, CallOutcome};
use crate::config::append_segments;
use crate::session::{epoch_ms, AuthStatus, Session, SessionStore};
use crate::upstream::client::build_http_client;

/// Method, extra headers, and optional JSON body for one call.
#[derive(Debug, Clone)]
pub struct CallOptions {
    pub method: Method,
    pub headers: IndexMap<String, String>,
    pub body: Option<serde_json::Value>,
}

impl CallOptions {
    pub fn new(method: Method) -> Self {
        Self { method, headers: IndexMap::new(), body: None }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post(body: serde_json::Value) -> Self {
        Self::new(Method::POST).with_body(body)
    }

    pub fn put(body: serde_json::Value) -> Self {
        Self::new(Method::PUT).with_body(body)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Extra header. Overrides same-named defaults, except `Authorization`.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl Default for CallOptions {
    fn default() -> Self {
        Self::get()
    }
}

/// Why sign-in did not produce a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInError {
    /// The proxy or token endpoint answered with an error status.
    Rejected { status: u16, message: String },
    /// Success status but no usable token in the body.
    InvalidResponse(String),
    /// The proxy could not be reached.
    Transport(String),
}

impl fmt::Display for SignInError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { status, message } => write!(f, "sign-in rejected ({status}): {message}"),
            Self::InvalidResponse(msg) => write!(f, "invalid token response: {msg}"),
            Self::Transport(msg) => write!(f, "sign-in request failed: {msg}"),
        }
    }
}

impl std::error::Error for SignInError {}

/// Browser-side client for the console proxy.
#[derive(Clone)]
pub struct ConsoleClient {
    http: Client,
    base: Url,
    store: Arc<SessionStore>,
    signals: UiSignals,
}

impl ConsoleClient {
    /// `base` is the proxy's API root, e.g. `http://127.0.0.1:3000/api`.
    pub fn new(base: &str, store: Arc<SessionStore>) -> anyhow::Result<Self> {
        let base = Url::parse(base)?;
        Ok(Self { http: build_http_client(), base, store, signals: UiSignals::new() })
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn signals(&self) -> &UiSignals {
        &self.signals
    }

    /// Proxy URL for `segments`, each encoded as an opaque path segment.
    pub fn endpoint(&self, segments: &[&str]) -> anyhow::Result<Url> {
        append_segments(self.base.clone(), segments)
    }

    /// Exchange client credentials for a token and store the session.
    pub async fn sign_in(&self, req: &SignInRequest) -> Result<AuthStatus, SignInError> {
        let url = self.endpoint(&["auth"]).map_err(|e| SignInError::Transport(e.to_string()))?;
        let resp = match self.http.post(url).json(req).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(err = %e, "sign-in request failed");
                self.signals.error(REQUEST_FAILED_MESSAGE);
                return Err(SignInError::Transport(e.to_string()));
            }
        };

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| SignInError::Transport(e.to_string()))?;
        if !status.is_success() {
            let message = error_message(&bytes);
            self.signals.error(message.clone());
            return Err(SignInError::Rejected { status: status.as_u16(), message });
        }

        let token: TokenResponse = serde_json::from_slice(&bytes).map_err(|e| {
            self.signals.error(REQUEST_FAILED_MESSAGE);
            SignInError::InvalidResponse(e.to_string())
        })?;
        let now = epoch_ms();
        let realm = req.realm_header();
        self.store.establish(Session {
            access_token: Some(token.access_token.clone()),
            token_type: Some(token.token_type_or_default().to_owned()),
            expires_at: token.expires_in.map(|secs| now.saturating_add(secs.saturating_mul(1000))),
            realm_header_name: realm.map(|(name, _)| name.to_owned()),
            realm_header_value: realm.map(|(_, value)| value.to_owned()),
        });
        tracing::info!(client_id = %req.client_id, "signed in");
        Ok(self.store.check_auth_status())
    }

    /// Clear the session and tell every subscriber.
    pub fn sign_out(&self) {
        self.store.clear_auth_data();
        self.signals.info(SIGNED_OUT_MESSAGE);
        tracing::info!("signed out");
    }

    /// Make one authenticated call through the proxy.
    pub async fn call(&self, url: Url, options: CallOptions) -> CallOutcome {
        let status = self.store.check_auth_status();
        if !status.is_authenticated {
            let reason =
                if status.is_expired { AuthFailure::Expired } else { AuthFailure::NotSignedIn };
            self.require_sign_in(reason);
            return CallOutcome::AuthFailure(reason);
        }

        let Some(auth) = self.store.auth_headers() else {
            // Expired between the two reads.
            self.store.clear_auth_data();
            self.require_sign_in(AuthFailure::Expired);
            return CallOutcome::AuthFailure(AuthFailure::Expired);
        };

        let headers = match merge_headers(&auth, &options.headers) {
            Ok(headers) => headers,
            Err(e) => {
                tracing::warn!(err = %e, "invalid request header");
                self.signals.error(REQUEST_FAILED_MESSAGE);
                return CallOutcome::failed(None, e.to_string());
            }
        };

        let mut req = self.http.request(options.method, url).headers(headers);
        if let Some(ref body) = options.body {
            req = req.json(body);
        }
        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(err = %e, "console request failed");
                self.signals.error(REQUEST_FAILED_MESSAGE);
                return CallOutcome::failed(None, REQUEST_FAILED_MESSAGE);
            }
        };

        let status = resp.status();
        let bytes = match resp.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(err = %e, "failed to read console response");
                self.signals.error(REQUEST_FAILED_MESSAGE);
                return CallOutcome::failed(None, REQUEST_FAILED_MESSAGE);
            }
        };

        if status == StatusCode::UNAUTHORIZED {
            tracing::info!("proxy rejected credentials, clearing session");
            self.store.clear_auth_data();
            self.require_sign_in(AuthFailure::Rejected);
            return CallOutcome::AuthFailure(AuthFailure::Rejected);
        }
        if !status.is_success() {
            let message = error_message(&bytes);
            self.signals.error(message.clone());
            return CallOutcome::failed(Some(status.as_u16()), message);
        }

        if bytes.is_empty() {
            return CallOutcome::Ok(serde_json::Value::Null);
        }
        match serde_json::from_slice(&bytes) {
            Ok(value) => CallOutcome::Ok(value),
            Err(e) => {
                tracing::warn!(err = %e, "console response is not JSON");
                self.signals.error(REQUEST_FAILED_MESSAGE);
                CallOutcome::failed(Some(status.as_u16()), REQUEST_FAILED_MESSAGE)
            }
        }
    }

    fn require_sign_in(&self, reason: AuthFailure) {
        match reason {
            AuthFailure::NotSignedIn => self.signals.error(SIGN_IN_MESSAGE),
            AuthFailure::Expired => self.signals.warning(EXPIRED_MESSAGE),
            AuthFailure::Rejected => self.signals.error(REJECTED_MESSAGE),
        }
        self.signals.sign_in_required();
    }
}

/// `Content-Type`, then auth headers, then caller headers.
///
/// Later entries win on collision, except that a caller may not replace
/// `Authorization`. Responses are never served from a cache.
pub fn merge_headers(
    auth: &IndexMap<String, String>,
    extra: &IndexMap<String, String>,
) -> anyhow::Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    for (name, value) in auth {
        headers.insert(HeaderName::from_bytes(name.as_bytes())?, HeaderValue::from_str(value)?);
    }
    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        if name == AUTHORIZATION {
            continue;
        }
        headers.insert(name, HeaderValue::from_str(value)?);
    }
    Ok(headers)
}

/// Human-readable message from an error body.
///
/// Accepts `{"error":{"message":..}}`, OAuth-style `{"error":..,"error_description":..}`,
/// and `{"message":..}`; anything else is "Unknown error".
pub fn error_message(body: &[u8]) -> String {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
        return UNKNOWN_ERROR.to_owned();
    };
    let error = value.get("error");
    error
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .or_else(|| value.get("error_description").and_then(|m| m.as_str()))
        .or_else(|| error.and_then(|e| e.as_str()))
        .or_else(|| value.get("message").and_then(|m| m.as_str()))
        .unwrap_or(UNKNOWN_ERROR)
        .to_owned()
}

#[cfg(test)]
#[path = "invoker_tests.rs"]
mod tests;
