use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use tokio::sync::Mutex;

use jamcli::{
    config::ProviderConfig,
    management::{
        CredentialManager, MemorySessionStore, SESSION_ACCESS_TOKEN, SESSION_TOKEN_EXPIRY,
        SessionStore,
    },
};

/// One request the fake provider received, in arrival order.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
struct ProviderState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<HashMap<String, (u16, Value)>>>,
}

/// In-process stand-in for the Spotify endpoints, bound to an ephemeral
/// port. Records every request and replies with whatever was scripted for
/// the method and path; unscripted requests get a 404.
pub struct MockProvider {
    pub addr: SocketAddr,
    state: ProviderState,
}

impl MockProvider {
    pub async fn start() -> Self {
        let state = ProviderState::default();
        let app = Router::new().fallback(record).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockProvider { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.state
            .responses
            .lock()
            .await
            .insert(format!("{} {}", method, path), (status, body));
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().await.clone()
    }
}

async fn record(
    State(state): State<ProviderState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&body).to_string(),
    };
    state.requests.lock().await.push(recorded);

    let scripted = state
        .responses
        .lock()
        .await
        .get(&format!("{} {}", method, uri.path()))
        .cloned();

    match scripted {
        Some((status, payload)) => (StatusCode::from_u16(status).unwrap(), Json(payload)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "unexpected request" })),
        )
            .into_response(),
    }
}

// Helper function to build a provider config pointing at the fixture
pub fn provider_config(base_url: &str) -> ProviderConfig {
    ProviderConfig {
        client_id: "test-client".to_string(),
        redirect_uri: format!("{}/callback", base_url),
        scope: "playlist-modify-public playlist-modify-private".to_string(),
        auth_url: format!("{}/authorize", base_url),
        token_url: format!("{}/api/token", base_url),
        api_url: base_url.to_string(),
    }
}

// Helper function to build a credential manager with a token already cached
pub async fn manager_with_token(
    provider: &MockProvider,
    token: &str,
    expires_at: i64,
) -> CredentialManager {
    let store = Arc::new(MemorySessionStore::new());
    store.set(SESSION_ACCESS_TOKEN, token).await.unwrap();
    store
        .set(SESSION_TOKEN_EXPIRY, &expires_at.to_string())
        .await
        .unwrap();
    CredentialManager::new(provider_config(&provider.base_url()), store)
}

pub fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}
