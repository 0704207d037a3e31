// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential exchange: OAuth2 client credentials for a bearer token.

pub mod exchange;
pub mod token;
