// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stub Polaris upstream and proxy helpers shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use clap::Parser;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use polaris_console::config::Config;
use polaris_console::state::ConsoleState;
use polaris_console::transport::build_router;

pub const MANAGEMENT_PREFIX: &str = "/api/management/v1";

/// Token endpoint stub.
///
/// `client_id=bad` is rejected, `client_id=garbled` answers with a non-JSON
/// body, and `client_id=revoked` gets a token the management stub refuses.
async fn token(headers: HeaderMap, Form(form): Form<HashMap<String, String>>) -> Response {
    let client_id = form.get("client_id").cloned().unwrap_or_default();
    match client_id.as_str() {
        "bad" => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid_client", "error_description": "Bad client secret"})),
        )
            .into_response(),
        "garbled" => (StatusCode::OK, "<html>not a token</html>").into_response(),
        other => {
            let access_token = if other == "revoked" { "revoked" } else { "tok123" };
            let realm = headers.get("polaris-realm").and_then(|v| v.to_str().ok());
            Json(json!({
                "access_token": access_token,
                "token_type": "Bearer",
                "expires_in": 3600,
                "form": form,
                "realm": realm,
            }))
            .into_response()
        }
    }
}

fn header_map(headers: &HeaderMap) -> Value {
    let mut out = serde_json::Map::new();
    for name in headers.keys() {
        let values: Vec<Value> = headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(|v| Value::String(v.to_owned()))
            .collect();
        out.insert(name.as_str().to_owned(), Value::Array(values));
    }
    Value::Object(out)
}

/// Management API stub: canned lists, canned failures, and an echo of
/// everything else.
async fn management(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let path = uri.path().to_owned();
    let rest = path.strip_prefix(MANAGEMENT_PREFIX).unwrap_or(&path).to_owned();

    if headers.get("authorization").and_then(|v| v.to_str().ok()) == Some("Bearer revoked") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"message": "token revoked", "type": "NotAuthorizedException", "code": 401}})),
        )
            .into_response();
    }
    if rest.contains("missing") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"message": "not found", "type": "NotFoundException", "code": 404}})),
        )
            .into_response();
    }
    if rest.contains("garbled") {
        return (StatusCode::BAD_GATEWAY, "bad gateway").into_response();
    }
    if method == Method::DELETE {
        return StatusCode::NO_CONTENT.into_response();
    }

    if method == Method::GET {
        match rest.as_str() {
            "/catalogs" => {
                return Json(json!({"catalogs": [{"name": "sales"}, {"name": "ops"}]}))
                    .into_response()
            }
            "/principals" => {
                return Json(json!({"principals": [{"name": "root"}]})).into_response()
            }
            "/principal-roles" => {
                return Json(json!({"roles": [{"name": "admin"}, {"name": "reader"}]}))
                    .into_response()
            }
            _ if rest.ends_with("/grants") => {
                return Json(json!({"grants": [{"type": "catalog", "privilege": "CATALOG_MANAGE_CONTENT"}]}))
                    .into_response()
            }
            _ => {}
        }
    }

    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    Json(json!({
        "method": method.as_str(),
        "path": path,
        "headers": header_map(&headers),
        "body": body,
    }))
    .into_response()
}

/// Start the stub upstream on an ephemeral port.
pub async fn spawn_upstream() -> anyhow::Result<SocketAddr> {
    let app = Router::new()
        .route("/api/catalog/v1/oauth/tokens", post(token))
        .route("/healthz", get(|| async { "ok" }))
        .fallback(management);
    serve(app).await
}

async fn serve(app: Router) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(addr)
}

/// Proxy config pointed at the stub upstream.
pub fn config_for(upstream: SocketAddr, extra: &[&str]) -> Config {
    let catalog = format!("http://{upstream}/api/catalog/v1");
    let management = format!("http://{upstream}{MANAGEMENT_PREFIX}");
    let mut args = vec![
        "polaris-console",
        "--port",
        "0",
        "--catalog-api-base",
        catalog.as_str(),
        "--management-api-base",
        management.as_str(),
    ];
    args.extend_from_slice(extra);
    Config::parse_from(args)
}

pub fn state_for(config: Config) -> Arc<ConsoleState> {
    Arc::new(ConsoleState::new(config))
}

/// Serve the proxy itself on an ephemeral port; returns its `/api` base URL.
pub async fn spawn_proxy(config: Config) -> anyhow::Result<String> {
    let addr = serve(build_router(state_for(config))).await?;
    Ok(format!("http://{addr}/api"))
}
