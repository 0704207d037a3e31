// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Authenticated request proxy to the Polaris management API.

pub mod extract;
pub mod forward;
pub mod headers;
pub mod routes;
