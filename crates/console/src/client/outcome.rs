// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result of one authenticated console call.

use std::fmt;

/// Why a call was not made or was refused for lack of credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No token stored.
    NotSignedIn,
    /// A token is stored but its expiry has passed.
    Expired,
    /// The proxy answered 401; the session has been cleared.
    Rejected,
}

/// A non-auth failure, already surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallError {
    /// HTTP status when the proxy answered; `None` for transport or decode failures.
    pub status: Option<u16>,
    pub message: String,
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{status}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// `Ok(data) | AuthFailure | Failed(message)`.
///
/// Every side effect (messages, navigation, session clear) has already
/// happened by the time a caller sees this; callers only pick what to render.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome<T = serde_json::Value> {
    Ok(T),
    AuthFailure(AuthFailure),
    Failed(CallError),
}

impl<T> CallOutcome<T> {
    pub fn failed(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Failed(CallError { status, message: message.into() })
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// The data, or `None` for any failure.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CallOutcome<U> {
        match self {
            Self::Ok(value) => CallOutcome::Ok(f(value)),
            Self::AuthFailure(reason) => CallOutcome::AuthFailure(reason),
            Self::Failed(err) => CallOutcome::Failed(err),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> CallOutcome<U>) -> CallOutcome<U> {
        match self {
            Self::Ok(value) => f(value),
            Self::AuthFailure(reason) => CallOutcome::AuthFailure(reason),
            Self::Failed(err) => CallOutcome::Failed(err),
        }
    }
}
