// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for the upstream Polaris APIs.

use std::sync::Once;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Url};

static CRYPTO_INIT: Once = Once::new();

/// Install the rustls crypto provider (needed for reqwest even on plain HTTP).
pub fn ensure_crypto_provider() {
    CRYPTO_INIT.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// Build a reqwest client with the process-wide crypto provider installed.
///
/// No request timeout: proxied management calls run until the upstream answers.
pub fn build_http_client() -> Client {
    ensure_crypto_provider();
    Client::builder().build().unwrap_or_default()
}

/// HTTP client wrapper shared by every proxy route.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    pub fn new() -> Self {
        Self { client: build_http_client() }
    }

    /// Issue one authenticated JSON request.
    ///
    /// `Content-Type: application/json` is always set explicitly; `passthrough`
    /// must already be stripped of standard headers.
    pub async fn send_json(
        &self,
        method: Method,
        url: Url,
        authorization: &HeaderValue,
        passthrough: HeaderMap,
        body: Option<&serde_json::Value>,
    ) -> reqwest::Result<reqwest::Response> {
        let mut req = self
            .client
            .request(method, url)
            .headers(passthrough)
            .header(reqwest::header::AUTHORIZATION, authorization.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            req = req.json(body);
        }
        req.send().await
    }

    /// POST a `client_credentials` form to the token endpoint.
    pub async fn request_token(
        &self,
        url: Url,
        form: &[(&str, &str)],
        extra_header: Option<(HeaderName, HeaderValue)>,
    ) -> reqwest::Result<reqwest::Response> {
        let mut req = self.client.post(url).form(form);
        if let Some((name, value)) = extra_header {
            req = req.header(name, value);
        }
        req.send().await
    }

    /// GET `url` with a hard timeout and require a success status.
    pub async fn probe(&self, url: &str, timeout: Duration) -> anyhow::Result<()> {
        self.client.get(url).timeout(timeout).send().await?.error_for_status()?;
        Ok(())
    }
}

impl Default for UpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a response body as JSON.
///
/// `Ok(None)` when the body is empty or not JSON; `Err` only on transport failure.
pub async fn read_json(resp: reqwest::Response) -> reqwest::Result<Option<serde_json::Value>> {
    let bytes = resp.bytes().await?;
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(serde_json::from_slice(&bytes).ok())
}
