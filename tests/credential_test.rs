mod common;

use std::collections::HashMap;
use std::sync::Arc;

use common::{MockProvider, manager_with_token, now_ts, provider_config};
use jamcli::management::{
    AuthError, CredentialManager, FileSessionStore, MemorySessionStore, SESSION_ACCESS_TOKEN,
    SESSION_CODE_VERIFIER, SESSION_TOKEN_EXPIRY, SessionStore,
};
use jamcli::types::Acquired;
use jamcli::utils::generate_code_challenge;
use serde_json::json;

// Helper function to build a manager with an empty in-memory session
fn empty_manager(provider: &MockProvider) -> (CredentialManager, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    let manager = CredentialManager::new(
        provider_config(&provider.base_url()),
        Arc::clone(&store) as Arc<dyn SessionStore>,
    );
    (manager, store)
}

// Helper function to parse a form-encoded body into a key/value map
fn parse_form(body: &str) -> HashMap<String, String> {
    body.split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

#[tokio::test]
async fn test_cached_credential_short_circuits_network() {
    let provider = MockProvider::start().await;
    let manager = manager_with_token(&provider, "cached-token", now_ts() + 3600).await;

    let first = manager.acquire().await.unwrap();
    let second = manager.acquire().await.unwrap();

    // Both calls hand out the identical cached credential
    assert_eq!(first, second);
    match first {
        Acquired::Ready(credential) => assert_eq!(credential.access_token, "cached-token"),
        Acquired::RedirectStarted { .. } => panic!("expected a cached credential"),
    }

    // No request of any kind reached the provider
    assert!(provider.requests().await.is_empty());
}

#[tokio::test]
async fn test_expired_credential_forces_redirect() {
    let provider = MockProvider::start().await;
    let manager = manager_with_token(&provider, "stale-token", now_ts() - 10).await;

    let acquired = manager.acquire().await.unwrap();
    assert!(matches!(acquired, Acquired::RedirectStarted { .. }));

    // The expired token was dropped from the cache, not silently reused
    assert_eq!(manager.current().await.unwrap(), None);

    // Expiry is handled locally; the provider saw nothing
    assert!(provider.requests().await.is_empty());
}

#[tokio::test]
async fn test_acquire_stages_verifier_matching_challenge() {
    let provider = MockProvider::start().await;
    let (manager, store) = empty_manager(&provider);

    let Acquired::RedirectStarted { authorize_url } = manager.acquire().await.unwrap() else {
        panic!("expected a redirect");
    };

    // The verifier is stored for the callback to pick up later
    let verifier = store.get(SESSION_CODE_VERIFIER).await.unwrap();
    assert_eq!(verifier.len(), 128);

    // The URL carries the S256 challenge derived from that verifier
    let challenge = generate_code_challenge(&verifier);
    assert!(authorize_url.starts_with(&format!("{}/authorize?", provider.base_url())));
    assert!(authorize_url.contains(&format!("code_challenge={}", challenge)));
    assert!(authorize_url.contains("code_challenge_method=S256"));
    assert!(authorize_url.contains("client_id=test-client"));
    assert!(authorize_url.contains("response_type=code"));
}

#[tokio::test]
async fn test_overlapping_acquires_share_authorization() {
    let provider = MockProvider::start().await;
    let (manager, store) = empty_manager(&provider);

    let (first, second) = tokio::join!(manager.acquire(), manager.acquire());

    let Acquired::RedirectStarted { authorize_url: first_url } = first.unwrap() else {
        panic!("expected a redirect");
    };
    let Acquired::RedirectStarted { authorize_url: second_url } = second.unwrap() else {
        panic!("expected a redirect");
    };

    // Overlapping acquires reuse one staged authorization instead of
    // clobbering each other's verifier
    assert_eq!(first_url, second_url);

    let verifier = store.get(SESSION_CODE_VERIFIER).await.unwrap();
    assert!(first_url.contains(&format!(
        "code_challenge={}",
        generate_code_challenge(&verifier)
    )));
}

#[tokio::test]
async fn test_redeem_posts_code_and_verifier() {
    let provider = MockProvider::start().await;
    provider
        .respond(
            "POST",
            "/api/token",
            200,
            json!({
                "access_token": "fresh-token",
                "token_type": "Bearer",
                "expires_in": 3600
            }),
        )
        .await;
    let (manager, store) = empty_manager(&provider);

    manager.acquire().await.unwrap();
    let verifier = store.get(SESSION_CODE_VERIFIER).await.unwrap();

    let credential = manager.redeem("test-code").await.unwrap();
    assert_eq!(credential.access_token, "fresh-token");

    // Expiry is an absolute timestamp derived from expires_in
    let expected = now_ts() + 3600;
    assert!((credential.expires_at - expected).abs() <= 5);

    // The exchange is a form POST carrying the staged verifier
    let requests = provider.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/token");
    assert_eq!(requests[0].query, None);
    assert_eq!(requests[0].authorization, None);

    let form = parse_form(&requests[0].body);
    assert_eq!(form["grant_type"], "authorization_code");
    assert_eq!(form["client_id"], "test-client");
    assert_eq!(form["code"], "test-code");
    assert_eq!(form["code_verifier"], verifier);
    assert!(form["redirect_uri"].ends_with("%2Fcallback"));

    // The token is cached for later invocations
    assert_eq!(
        store.get(SESSION_ACCESS_TOKEN).await,
        Some("fresh-token".to_string())
    );
    assert!(store.get(SESSION_TOKEN_EXPIRY).await.is_some());
}

#[tokio::test]
async fn test_redeem_without_verifier_fails_before_network() {
    let provider = MockProvider::start().await;
    let (manager, _store) = empty_manager(&provider);

    // No acquire happened, so nothing is staged
    let err = manager.redeem("test-code").await.unwrap_err();
    assert!(matches!(err, AuthError::MissingVerifier));

    // The failure happened before any exchange request went out
    assert!(provider.requests().await.is_empty());
}

#[tokio::test]
async fn test_authorization_code_is_single_use() {
    let provider = MockProvider::start().await;
    provider
        .respond(
            "POST",
            "/api/token",
            200,
            json!({
                "access_token": "fresh-token",
                "token_type": "Bearer",
                "expires_in": 3600
            }),
        )
        .await;
    let (manager, store) = empty_manager(&provider);

    manager.acquire().await.unwrap();
    manager.redeem("test-code").await.unwrap();

    // Redeeming consumed the verifier
    assert_eq!(store.get(SESSION_CODE_VERIFIER).await, None);

    // Replaying the callback cannot trigger a second exchange
    let err = manager.redeem("test-code").await.unwrap_err();
    assert!(matches!(err, AuthError::MissingVerifier));
    assert_eq!(provider.requests().await.len(), 1);
}

#[tokio::test]
async fn test_rejected_exchange_reports_status() {
    let provider = MockProvider::start().await;
    provider
        .respond("POST", "/api/token", 400, json!({ "error": "invalid_grant" }))
        .await;
    let (manager, _store) = empty_manager(&provider);

    manager.acquire().await.unwrap();
    let err = manager.redeem("bad-code").await.unwrap_err();

    assert!(matches!(
        err,
        AuthError::ExchangeRejected { status } if status.as_u16() == 400
    ));

    // Nothing was cached from the failed exchange
    assert_eq!(manager.current().await.unwrap(), None);
}

#[tokio::test]
async fn test_failed_exchange_allows_fresh_authorization() {
    let provider = MockProvider::start().await;
    provider
        .respond("POST", "/api/token", 400, json!({ "error": "invalid_grant" }))
        .await;
    let (manager, store) = empty_manager(&provider);

    let Acquired::RedirectStarted { authorize_url: first_url } = manager.acquire().await.unwrap()
    else {
        panic!("expected a redirect");
    };
    manager.redeem("bad-code").await.unwrap_err();

    // The rejected exchange ended that authorization; the next acquire
    // stages a new verifier instead of re-serving the dead URL
    let Acquired::RedirectStarted { authorize_url: retry_url } = manager.acquire().await.unwrap()
    else {
        panic!("expected a redirect");
    };
    assert_ne!(retry_url, first_url);

    let verifier = store.get(SESSION_CODE_VERIFIER).await.unwrap();
    assert_eq!(verifier.len(), 128);
    assert!(retry_url.contains(&format!(
        "code_challenge={}",
        generate_code_challenge(&verifier)
    )));

    // A code obtained through the new URL redeems normally
    provider
        .respond(
            "POST",
            "/api/token",
            200,
            json!({
                "access_token": "retry-token",
                "token_type": "Bearer",
                "expires_in": 3600
            }),
        )
        .await;
    let credential = manager.redeem("retry-code").await.unwrap();
    assert_eq!(credential.access_token, "retry-token");
    assert_eq!(provider.requests().await.len(), 2);
}

#[tokio::test]
async fn test_redeem_with_lost_verifier_discards_stale_authorization() {
    let provider = MockProvider::start().await;
    let (manager, store) = empty_manager(&provider);

    let Acquired::RedirectStarted { authorize_url: first_url } = manager.acquire().await.unwrap()
    else {
        panic!("expected a redirect");
    };

    // Another process consumed the verifier out from under this one
    store.remove(SESSION_CODE_VERIFIER).await.unwrap();
    let err = manager.redeem("orphan-code").await.unwrap_err();
    assert!(matches!(err, AuthError::MissingVerifier));

    // The authorization whose verifier is gone is not handed out again
    let Acquired::RedirectStarted { authorize_url: retry_url } = manager.acquire().await.unwrap()
    else {
        panic!("expected a redirect");
    };
    assert_ne!(retry_url, first_url);
    assert!(store.get(SESSION_CODE_VERIFIER).await.is_some());
    assert!(provider.requests().await.is_empty());
}

#[tokio::test]
async fn test_malformed_expiry_treated_as_missing() {
    let provider = MockProvider::start().await;
    let (manager, store) = empty_manager(&provider);
    store
        .set(SESSION_ACCESS_TOKEN, "orphan-token")
        .await
        .unwrap();
    store
        .set(SESSION_TOKEN_EXPIRY, "not-a-number")
        .await
        .unwrap();

    let acquired = manager.acquire().await.unwrap();
    assert!(matches!(acquired, Acquired::RedirectStarted { .. }));

    // The unusable entry was cleaned out of the store
    assert_eq!(store.get(SESSION_ACCESS_TOKEN).await, None);
}

#[tokio::test]
async fn test_clear_drops_session_state() {
    let provider = MockProvider::start().await;
    let manager = manager_with_token(&provider, "cached-token", now_ts() + 3600).await;

    manager.clear().await.unwrap();

    assert_eq!(manager.current().await.unwrap(), None);
    let acquired = manager.acquire().await.unwrap();
    assert!(matches!(acquired, Acquired::RedirectStarted { .. }));
}

#[tokio::test]
async fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = FileSessionStore::at(path.clone());
    store.set(SESSION_ACCESS_TOKEN, "persisted-token").await.unwrap();
    store
        .set(SESSION_TOKEN_EXPIRY, "1750000000")
        .await
        .unwrap();
    store.remove(SESSION_TOKEN_EXPIRY).await.unwrap();

    // A fresh store handle on the same path sees the persisted state
    let reopened = FileSessionStore::at(path);
    assert_eq!(
        reopened.get(SESSION_ACCESS_TOKEN).await,
        Some("persisted-token".to_string())
    );
    assert_eq!(reopened.get(SESSION_TOKEN_EXPIRY).await, None);

    // Removing an absent key is a no-op
    reopened.remove("never-set").await.unwrap();
}
