// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The session store: single owner of the console's authentication state.

use std::path::PathBuf;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::session::events::{SessionEvent, SessionEvents, SessionSubscription};
use crate::session::persist::{self, PersistedSession};
use crate::session::status::{self, AuthStatus};
use crate::session::{epoch_ms, Session};

/// Owned session state with optional durable backing.
///
/// Every mutation replaces fields under one write lock, so no reader ever
/// sees a half-cleared session. When a file path is configured the whole
/// record is saved before the lock is released.
pub struct SessionStore {
    state: RwLock<PersistedSession>,
    path: Option<PathBuf>,
    events: SessionEvents,
}

impl SessionStore {
    /// A store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self { state: RwLock::new(PersistedSession::default()), path: None, events: SessionEvents::new() }
    }

    /// A store backed by `path`, loading whatever is already there.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let loaded = persist::load(&path)?;
        Ok(Self { state: RwLock::new(loaded), path: Some(path), events: SessionEvents::new() })
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.state.read().session.clone()
    }

    /// Store a freshly issued session and announce it.
    pub fn establish(&self, session: Session) {
        self.update(|state| state.session = session);
        self.events.emit(SessionEvent::Established);
    }

    /// Remove token, token type, expiry, and realm pair, then announce it.
    ///
    /// Idempotent: clearing an empty store is a no-op that still broadcasts.
    pub fn clear_auth_data(&self) {
        self.update(|state| state.session.clear());
        self.events.emit(SessionEvent::Cleared);
    }

    /// Replace the realm header pair without touching the token.
    pub fn set_realm(&self, name: impl Into<String>, value: impl Into<String>) {
        let (name, value) = (name.into(), value.into());
        self.update(|state| {
            state.session.realm_header_name = Some(name);
            state.session.realm_header_value = Some(value);
        });
        self.events.emit(SessionEvent::RealmChanged);
    }

    /// Drop the realm header pair without touching the token.
    pub fn clear_realm(&self) {
        self.update(|state| {
            state.session.realm_header_name = None;
            state.session.realm_header_value = None;
        });
        self.events.emit(SessionEvent::RealmChanged);
    }

    /// Classify the session now. Never clears an expired token.
    pub fn check_auth_status(&self) -> AuthStatus {
        status::check_auth_status(&self.state.read().session, epoch_ms())
    }

    /// Headers for an authenticated call, or `None` when not authenticated.
    pub fn auth_headers(&self) -> Option<IndexMap<String, String>> {
        status::auth_headers(&self.state.read().session, epoch_ms())
    }

    pub fn last_expanded(&self) -> Option<String> {
        self.state.read().last_expanded.clone()
    }

    pub fn set_last_expanded(&self, key: Option<String>) {
        self.update(|state| state.last_expanded = key);
    }

    pub fn subscribe(&self) -> SessionSubscription {
        self.events.subscribe()
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    fn update(&self, apply: impl FnOnce(&mut PersistedSession)) {
        let mut state = self.state.write();
        apply(&mut state);
        if let Some(ref path) = self.path {
            if let Err(e) = persist::save(path, &state) {
                tracing::warn!(path = %path.display(), err = %e, "failed to persist session");
            }
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
