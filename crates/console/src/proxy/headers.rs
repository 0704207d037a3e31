// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Header passthrough: everything not on the denylist crosses the proxy.
//!
//! This is how realm/tenant headers reach Polaris without each route naming them.

use axum::http::HeaderMap;

/// Standard request headers never forwarded upstream.
///
/// `authorization` and `content-type` are re-added explicitly by the proxy.
pub const STANDARD_HEADERS: &[&str] = &[
    "authorization",
    "content-type",
    "accept",
    "user-agent",
    "host",
    "connection",
    "cache-control",
    "pragma",
    "accept-encoding",
    "accept-language",
    "cookie",
    "referer",
    "origin",
    "x-forwarded-for",
    "x-forwarded-proto",
    "x-real-ip",
];

/// Message framing and hop-by-hop headers. The outbound request frames its own body.
const FRAMING_HEADERS: &[&str] = &[
    "content-length",
    "transfer-encoding",
    "te",
    "trailer",
    "upgrade",
    "keep-alive",
    "expect",
    "proxy-authorization",
    "proxy-connection",
];

/// Whether `name` is withheld from the upstream request.
///
/// `HeaderName` is already lowercase; `eq_ignore_ascii_case` keeps raw strings safe too.
pub fn is_denied(name: &str) -> bool {
    STANDARD_HEADERS.iter().chain(FRAMING_HEADERS).any(|h| h.eq_ignore_ascii_case(name))
}

/// Copy every inbound header not on the denylist, preserving repeated values.
pub fn passthrough_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for (name, value) in inbound {
        if !is_denied(name.as_str()) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

#[cfg(test)]
#[path = "headers_tests.rs"]
mod tests;
