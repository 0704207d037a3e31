// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client-held session: bearer token, expiry, realm scope.
//!
//! The [`store::SessionStore`] is the only owner of this state. Everything
//! else reads snapshots through it and learns about changes from
//! [`events::SessionEvent`]s instead of polling.

pub mod events;
pub mod persist;
pub mod status;
pub mod store;

use serde::{Deserialize, Serialize};

pub use events::{SessionEvent, SessionSubscription};
pub use status::AuthStatus;
pub use store::SessionStore;

/// Authentication state for one console session.
///
/// Written in one piece on sign-in and cleared in one piece on sign-out or 401.
/// An expired token stays here until something clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Absolute expiry as epoch millis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm_header_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm_header_value: Option<String>,
}

impl Session {
    /// The realm header pair, only when both halves are present and non-empty.
    pub fn realm_header(&self) -> Option<(&str, &str)> {
        match (self.realm_header_name.as_deref(), self.realm_header_value.as_deref()) {
            (Some(name), Some(value)) if !name.is_empty() && !value.is_empty() => {
                Some((name, value))
            }
            _ => None,
        }
    }

    /// Drop token, token type, expiry, and realm pair.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Return current epoch millis.
pub fn epoch_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
