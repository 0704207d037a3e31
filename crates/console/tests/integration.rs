// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end tests: `ConsoleClient` -> proxy on a real port -> stub upstream.

mod support;

use std::sync::Arc;

use serde_json::{json, Value};

use polaris_console::auth::token::SignInRequest;
use polaris_console::client::notice::{UiSignal, REJECTED_MESSAGE};
use polaris_console::client::{AuthFailure, CallError, CallOutcome, ConsoleClient, SignInError};
use polaris_console::session::{epoch_ms, SessionEvent, SessionStore};

use support::{config_for, spawn_proxy, spawn_upstream};

async fn console_with(store: Arc<SessionStore>) -> anyhow::Result<ConsoleClient> {
    let upstream = spawn_upstream().await?;
    let base = spawn_proxy(config_for(upstream, &[])).await?;
    ConsoleClient::new(&base, store)
}

async fn console() -> anyhow::Result<ConsoleClient> {
    console_with(Arc::new(SessionStore::in_memory())).await
}

fn names(items: &[Value]) -> Vec<&str> {
    items.iter().filter_map(|v| v["name"].as_str()).collect()
}

fn drain_signals(rx: &mut tokio::sync::broadcast::Receiver<UiSignal>) -> Vec<UiSignal> {
    let mut out = Vec::new();
    while let Ok(signal) = rx.try_recv() {
        out.push(signal);
    }
    out
}

// -- Sign-in ------------------------------------------------------------------

#[tokio::test]
async fn sign_in_establishes_session() -> anyhow::Result<()> {
    let client = console().await?;
    let mut events = client.store().subscribe();
    let before = epoch_ms();

    let status = client.sign_in(&SignInRequest::new("root", "s3cret")).await?;

    assert!(status.is_authenticated);
    assert!(!status.is_expired);
    assert_eq!(status.token.as_deref(), Some("tok123"));
    assert_eq!(status.token_type.as_deref(), Some("Bearer"));

    let headers = client.store().auth_headers().ok_or_else(|| anyhow::anyhow!("no headers"))?;
    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("Authorization").map(String::as_str), Some("Bearer tok123"));

    let expires_at = client.store().snapshot().expires_at.unwrap_or_default();
    assert!(expires_at >= before + 3_600_000);
    assert_eq!(events.drain(), vec![SessionEvent::Established]);
    Ok(())
}

#[tokio::test]
async fn realm_header_flows_to_every_call() -> anyhow::Result<()> {
    let client = console().await?;
    let mut req = SignInRequest::new("root", "s3cret");
    req.realm_header_name = Some("Polaris-Realm".to_owned());
    req.realm_header_value = Some("prod".to_owned());
    client.sign_in(&req).await?;

    let headers = client.store().auth_headers().ok_or_else(|| anyhow::anyhow!("no headers"))?;
    assert_eq!(headers.get("Polaris-Realm").map(String::as_str), Some("prod"));

    let CallOutcome::Ok(echo) = client.catalog("sales").await else {
        anyhow::bail!("catalog call failed");
    };
    assert_eq!(echo["headers"]["polaris-realm"], json!(["prod"]));
    assert_eq!(echo["headers"]["authorization"], json!(["Bearer tok123"]));
    Ok(())
}

#[tokio::test]
async fn rejected_sign_in_leaves_no_session() -> anyhow::Result<()> {
    let client = console().await?;
    let err = client.sign_in(&SignInRequest::new("bad", "nope")).await;

    assert_eq!(
        err,
        Err(SignInError::Rejected { status: 401, message: "Bad client secret".to_owned() })
    );
    assert!(!client.store().check_auth_status().is_authenticated);
    Ok(())
}

#[tokio::test]
async fn sign_in_survives_restart_with_durable_store() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");

    let client = console_with(Arc::new(SessionStore::open(&path)?)).await?;
    client.sign_in(&SignInRequest::new("root", "s3cret")).await?;

    let reopened = SessionStore::open(&path)?;
    assert!(reopened.check_auth_status().is_authenticated);
    assert_eq!(reopened.snapshot().access_token.as_deref(), Some("tok123"));
    Ok(())
}

// -- 401 cascade --------------------------------------------------------------

#[tokio::test]
async fn upstream_401_clears_session_and_requests_sign_in() -> anyhow::Result<()> {
    let client = console().await?;
    client.sign_in(&SignInRequest::new("revoked", "x")).await?;
    let mut events = client.store().subscribe();
    let mut signals = client.signals().subscribe();

    let outcome = client.catalogs().await;

    assert_eq!(outcome, CallOutcome::AuthFailure(AuthFailure::Rejected));
    assert!(!client.store().check_auth_status().is_authenticated);
    assert_eq!(client.store().snapshot().access_token, None);
    assert_eq!(events.drain(), vec![SessionEvent::Cleared]);

    let signals = drain_signals(&mut signals);
    assert!(signals.contains(&UiSignal::SignInRequired));
    assert!(signals.iter().any(|s| matches!(s, UiSignal::Notice(n) if n.message == REJECTED_MESSAGE)));
    Ok(())
}

#[tokio::test]
async fn concurrent_401s_are_tolerated() -> anyhow::Result<()> {
    let client = console().await?;
    client.sign_in(&SignInRequest::new("revoked", "x")).await?;

    let (a, b, c) = tokio::join!(client.catalogs(), client.principals(), client.principal_roles());

    for outcome in [a, b, c] {
        assert!(matches!(outcome, CallOutcome::AuthFailure(_)), "{outcome:?}");
    }
    assert!(!client.store().check_auth_status().is_authenticated);

    // Signing in again after the cascade works normally.
    client.sign_in(&SignInRequest::new("root", "s3cret")).await?;
    assert!(client.catalogs().await.is_ok());
    Ok(())
}

#[tokio::test]
async fn calls_after_sign_out_are_not_sent() -> anyhow::Result<()> {
    let client = console().await?;
    client.sign_in(&SignInRequest::new("root", "s3cret")).await?;
    client.sign_out();

    assert_eq!(client.catalogs().await, CallOutcome::AuthFailure(AuthFailure::NotSignedIn));
    Ok(())
}

// -- Non-auth failures --------------------------------------------------------

#[tokio::test]
async fn not_found_keeps_session_and_surfaces_message() -> anyhow::Result<()> {
    let client = console().await?;
    client.sign_in(&SignInRequest::new("root", "s3cret")).await?;
    let mut signals = client.signals().subscribe();

    let outcome = client.catalog("missing").await;

    assert_eq!(
        outcome,
        CallOutcome::Failed(CallError { status: Some(404), message: "not found".to_owned() })
    );
    assert!(client.store().check_auth_status().is_authenticated);
    let signals = drain_signals(&mut signals);
    assert!(signals.iter().any(|s| matches!(s, UiSignal::Notice(n) if n.message == "not found")));
    assert!(!signals.contains(&UiSignal::SignInRequired));
    Ok(())
}

// -- Resources ----------------------------------------------------------------

#[tokio::test]
async fn list_shapes_are_normalized() -> anyhow::Result<()> {
    let client = console().await?;
    client.sign_in(&SignInRequest::new("root", "s3cret")).await?;

    let catalogs = client.catalogs().await.into_option().unwrap_or_default();
    assert_eq!(names(&catalogs), vec!["sales", "ops"]);

    let roles = client.principal_roles().await.into_option().unwrap_or_default();
    assert_eq!(names(&roles), vec!["admin", "reader"]);

    let principals = client.principals().await.into_option().unwrap_or_default();
    assert_eq!(names(&principals), vec!["root"]);

    let grants = client.grants("sales", "reader").await.into_option().unwrap_or_default();
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0]["privilege"], "CATALOG_MANAGE_CONTENT");
    Ok(())
}

#[tokio::test]
async fn delete_resolves_to_null() -> anyhow::Result<()> {
    let client = console().await?;
    client.sign_in(&SignInRequest::new("root", "s3cret")).await?;

    assert_eq!(client.delete_catalog("sales").await, CallOutcome::Ok(Value::Null));
    let grant = json!({"grant": {"type": "catalog", "privilege": "CATALOG_MANAGE_CONTENT"}});
    assert_eq!(client.revoke_grant("sales", "reader", grant).await, CallOutcome::Ok(Value::Null));
    Ok(())
}

#[tokio::test]
async fn writes_carry_json_bodies() -> anyhow::Result<()> {
    let client = console().await?;
    client.sign_in(&SignInRequest::new("root", "s3cret")).await?;

    let body = json!({"principalRole": {"name": "admin"}});
    let CallOutcome::Ok(echo) = client.assign_principal_role("root", body.clone()).await else {
        anyhow::bail!("assign failed");
    };
    assert_eq!(echo["method"], "PUT");
    assert_eq!(echo["path"], "/api/management/v1/principals/root/principal-roles");
    assert_eq!(echo["body"], body);
    Ok(())
}
