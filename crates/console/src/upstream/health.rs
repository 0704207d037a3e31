// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upstream health probe.

use serde::Serialize;

use crate::state::ConsoleState;

/// Reachability of the upstream health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamHealth {
    Up,
    Down,
    /// No `--health-url` configured.
    Unknown,
}

/// Probe the configured health URL, bounded by the configured timeout.
pub async fn check_upstream(state: &ConsoleState) -> UpstreamHealth {
    let Some(ref url) = state.config.health_url else {
        return UpstreamHealth::Unknown;
    };
    match state.upstream.probe(url, state.config.health_timeout()).await {
        Ok(()) => UpstreamHealth::Up,
        Err(e) => {
            tracing::warn!(url = %url, err = %e, "upstream health check failed");
            UpstreamHealth::Down
        }
    }
}
