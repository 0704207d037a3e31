// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upstream Polaris communication: HTTP client and health probe.

pub mod client;
pub mod health;
