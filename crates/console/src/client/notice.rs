// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing signals raised by the client invoker.
//!
//! The invoker decides *that* the user must be told something or sent to the
//! sign-in view; whatever renders the UI subscribes and decides *how*.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

pub const EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";
pub const SIGN_IN_MESSAGE: &str = "Please sign in to continue.";
pub const REJECTED_MESSAGE: &str = "Authentication failed. Please sign in again.";
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed. Please try again.";
pub const SIGNED_OUT_MESSAGE: &str = "You have been signed out.";
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiSignal {
    Notice(Notice),
    /// Leave the current view for the sign-in view.
    SignInRequired,
}

/// Fan-out hub for [`UiSignal`]s.
#[derive(Debug, Clone)]
pub struct UiSignals {
    tx: broadcast::Sender<UiSignal>,
}

impl UiSignals {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiSignal> {
        self.tx.subscribe()
    }

    pub fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        let _ = self.tx.send(UiSignal::Notice(Notice { level, message: message.into() }));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(NoticeLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify(NoticeLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(NoticeLevel::Error, message);
    }

    pub fn sign_in_required(&self) {
        let _ = self.tx.send(UiSignal::SignInRequired);
    }
}

impl Default for UiSignals {
    fn default() -> Self {
        Self::new()
    }
}
