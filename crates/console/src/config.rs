// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use reqwest::Url;

/// Configuration for the console proxy.
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "polaris-console", about = "Authenticated proxy for the Polaris admin console")]
pub struct Config {
    /// Host to bind on.
    #[arg(long, default_value = "127.0.0.1", env = "POLARIS_CONSOLE_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 3000, env = "POLARIS_CONSOLE_PORT")]
    pub port: u16,

    /// Base URL of the Polaris catalog API (hosts the OAuth token endpoint).
    #[arg(
        long,
        default_value = "http://localhost:8181/api/catalog/v1",
        env = "POLARIS_CATALOG_API_BASE"
    )]
    pub catalog_api_base: String,

    /// Base URL of the Polaris management API.
    #[arg(
        long,
        default_value = "http://localhost:8181/api/management/v1",
        env = "POLARIS_MANAGEMENT_API_BASE"
    )]
    pub management_api_base: String,

    /// Upstream health endpoint probed by `GET /api/health`.
    #[arg(long, env = "POLARIS_HEALTH_URL")]
    pub health_url: Option<String>,

    /// Timeout for the upstream health probe in milliseconds.
    #[arg(long, default_value_t = 5000, env = "POLARIS_CONSOLE_HEALTH_TIMEOUT_MS")]
    pub health_timeout_ms: u64,

    /// Log format (json or text).
    #[arg(long, default_value = "text", env = "POLARIS_CONSOLE_LOG_FORMAT")]
    pub log_format: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "POLARIS_CONSOLE_LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Reject upstream bases that are not absolute http(s) URLs.
    pub fn validate(&self) -> anyhow::Result<()> {
        parse_base("catalog-api-base", &self.catalog_api_base)?;
        parse_base("management-api-base", &self.management_api_base)?;
        if let Some(ref url) = self.health_url {
            parse_base("health-url", url)?;
        }
        Ok(())
    }

    /// `{catalogApiBase}/oauth/tokens`
    pub fn token_url(&self) -> anyhow::Result<Url> {
        let base = parse_base("catalog-api-base", &self.catalog_api_base)?;
        append_segments(base, &["oauth", "tokens"])
    }

    /// Management API URL with `segments` appended as opaque path segments.
    ///
    /// Each segment is percent-encoded on its own, so a `/` or `?` inside a
    /// catalog or role name never changes the shape of the path.
    pub fn management_url(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let base = parse_base("management-api-base", &self.management_api_base)?;
        append_segments(base, segments)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.health_timeout_ms)
    }
}

fn parse_base(name: &str, raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw).map_err(|e| anyhow::anyhow!("invalid --{name} {raw:?}: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => anyhow::bail!("invalid --{name} {raw:?}: unsupported scheme {other}"),
    }
}

/// Append `segments` to `url` as opaque, individually percent-encoded path segments.
pub fn append_segments(mut url: Url, segments: &[&str]) -> anyhow::Result<Url> {
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| anyhow::anyhow!("base URL cannot carry a path"))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
