// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::config::Config;
use crate::upstream::client::UpstreamClient;

/// Shared proxy state. Holds nothing per request.
pub struct ConsoleState {
    pub config: Config,
    pub upstream: UpstreamClient,
}

impl ConsoleState {
    pub fn new(config: Config) -> Self {
        Self { config, upstream: UpstreamClient::new() }
    }
}
