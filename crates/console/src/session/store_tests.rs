// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use super::*;

fn signed_in(expires_at: Option<u64>) -> Session {
    Session {
        access_token: Some("tok123".to_owned()),
        token_type: Some("Bearer".to_owned()),
        expires_at,
        realm_header_name: Some("Polaris-Realm".to_owned()),
        realm_header_value: Some("prod".to_owned()),
    }
}

#[test]
fn establish_makes_store_authenticated() {
    let store = SessionStore::in_memory();
    let mut sub = store.subscribe();

    store.establish(signed_in(Some(epoch_ms() + 3_600_000)));

    assert!(store.check_auth_status().is_authenticated);
    assert_eq!(sub.drain(), vec![SessionEvent::Established]);
}

#[test]
fn expired_token_is_reported_not_cleared() {
    let store = SessionStore::in_memory();
    store.establish(signed_in(Some(1)));

    let status = store.check_auth_status();
    assert!(!status.is_authenticated);
    assert!(status.is_expired);
    assert!(store.auth_headers().is_none());
    assert_eq!(store.snapshot().access_token.as_deref(), Some("tok123"));
}

#[test]
fn clear_removes_every_auth_field() {
    let store = SessionStore::in_memory();
    store.establish(signed_in(None));

    store.clear_auth_data();

    assert_eq!(store.snapshot(), Session::default());
    assert_eq!(store.check_auth_status(), AuthStatus::default());
}

#[test]
fn clear_twice_is_idempotent_and_broadcasts_both_times() {
    let store = SessionStore::in_memory();
    store.establish(signed_in(None));
    let mut sub = store.subscribe();

    store.clear_auth_data();
    let after_first = store.snapshot();
    store.clear_auth_data();

    assert_eq!(store.snapshot(), after_first);
    assert_eq!(sub.drain(), vec![SessionEvent::Cleared, SessionEvent::Cleared]);
}

#[test]
fn realm_lifecycle_is_independent_of_token() {
    let store = SessionStore::in_memory();
    store.establish(signed_in(None));

    store.clear_realm();
    let session = store.snapshot();
    assert_eq!(session.access_token.as_deref(), Some("tok123"));
    assert!(session.realm_header().is_none());
    assert_eq!(store.auth_headers().map(|h| h.len()), Some(1));

    store.set_realm("X-Tenant", "t1");
    let headers = store.auth_headers().unwrap_or_default();
    assert_eq!(headers.get("X-Tenant").map(String::as_str), Some("t1"));
}

#[test]
fn last_expanded_survives_sign_out() {
    let store = SessionStore::in_memory();
    store.establish(signed_in(None));
    store.set_last_expanded(Some("catalogs/sales".to_owned()));

    store.clear_auth_data();

    assert_eq!(store.last_expanded().as_deref(), Some("catalogs/sales"));
}

#[test]
fn dropped_subscription_unsubscribes() {
    let store = SessionStore::in_memory();
    let sub = store.subscribe();
    assert_eq!(store.events().subscriber_count(), 1);
    drop(sub);
    assert_eq!(store.events().subscriber_count(), 0);
    // Emitting with no listeners must not fail.
    store.clear_auth_data();
}

#[test]
fn durable_store_reloads_session() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");

    {
        let store = SessionStore::open(&path)?;
        store.establish(signed_in(None));
        store.set_last_expanded(Some("principals".to_owned()));
    }

    let reopened = SessionStore::open(&path)?;
    assert_eq!(reopened.snapshot(), signed_in(None));
    assert_eq!(reopened.last_expanded().as_deref(), Some("principals"));

    reopened.clear_auth_data();
    let again = SessionStore::open(&path)?;
    assert_eq!(again.snapshot(), Session::default());
    assert_eq!(again.last_expanded().as_deref(), Some("principals"));
    Ok(())
}

#[test]
fn missing_file_opens_empty() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = SessionStore::open(dir.path().join("absent.json"))?;
    assert_eq!(store.snapshot(), Session::default());
    Ok(())
}

#[tokio::test]
async fn concurrent_clears_never_expose_partial_state() -> anyhow::Result<()> {
    let store = Arc::new(SessionStore::in_memory());
    store.establish(signed_in(None));

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            store.clear_auth_data();
            let s = store.snapshot();
            // Either fully signed in or fully cleared; here always cleared.
            assert!(s.access_token.is_none() && s.realm_header_name.is_none());
        }));
    }
    for task in tasks {
        task.await?;
    }
    assert_eq!(store.snapshot(), Session::default());
    Ok(())
}

#[test]
fn readers_never_see_half_written_session() {
    let store = SessionStore::in_memory();
    let full = signed_in(Some(u64::MAX));

    std::thread::scope(|scope| {
        for _ in 0..2 {
            scope.spawn(|| {
                for _ in 0..500 {
                    store.establish(full.clone());
                    store.clear_auth_data();
                }
            });
        }
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..2000 {
                    let s = store.snapshot();
                    let present = [
                        s.access_token.is_some(),
                        s.token_type.is_some(),
                        s.expires_at.is_some(),
                        s.realm_header_name.is_some(),
                        s.realm_header_value.is_some(),
                    ];
                    assert!(present.iter().all(|p| *p) || present.iter().all(|p| !*p), "{s:?}");

                    if let Some(headers) = store.auth_headers() {
                        assert_eq!(headers.len(), 2, "{headers:?}");
                        assert_eq!(headers.get("Polaris-Realm").map(String::as_str), Some("prod"));
                    }
                }
            });
        }
    });

    assert_eq!(store.snapshot(), Session::default());
}
