use std::sync::Arc;

use chrono::Utc;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::sync::Mutex;
use urlencoding::encode;

use crate::{
    config::ProviderConfig,
    management::{FileSessionStore, SessionError, SessionStore},
    types::{Acquired, Credential, TokenResponse},
    utils,
};

pub const SESSION_ACCESS_TOKEN: &str = "access_token";
pub const SESSION_TOKEN_EXPIRY: &str = "token_expiry";
pub const SESSION_CODE_VERIFIER: &str = "code_verifier";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no usable credential; run the auth command to log in")]
    NotAuthenticated,
    #[error("an authorization code arrived but no code verifier is staged; restart the login")]
    MissingVerifier,
    #[error("the provider rejected the code exchange with HTTP {status}")]
    ExchangeRejected { status: StatusCode },
    #[error("network failure while talking to the authorization server: {0}")]
    Network(#[from] reqwest::Error),
    #[error(transparent)]
    Store(#[from] SessionError),
}

struct PendingAuthorization {
    authorize_url: String,
}

/// Single owner of the access token lifecycle.
///
/// Every path to a token goes through [`acquire`](Self::acquire): it hands
/// out the cached credential while it is valid, and otherwise stages a PKCE
/// authorization and reports the redirect. Expired tokens are dropped, not
/// refreshed; the user logs in again.
pub struct CredentialManager {
    config: ProviderConfig,
    store: Arc<dyn SessionStore>,
    pending: Mutex<Option<PendingAuthorization>>,
}

impl CredentialManager {
    pub fn new(config: ProviderConfig, store: Arc<dyn SessionStore>) -> Self {
        CredentialManager {
            config,
            store,
            pending: Mutex::new(None),
        }
    }

    /// Builds a manager for the configured provider with the file-backed
    /// session store.
    pub fn from_env() -> Result<Self, String> {
        let config = ProviderConfig::from_env()?;
        Ok(Self::new(config, Arc::new(FileSessionStore::new())))
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Returns a credential, or starts the authorization redirect.
    ///
    /// A valid cached token is returned without any network traffic. When
    /// there is none, a code verifier is generated and stored, and the
    /// caller receives the authorization URL to open. Calling again while
    /// that authorization is still pending returns the same URL instead of
    /// staging a second verifier.
    pub async fn acquire(&self) -> Result<Acquired, AuthError> {
        let mut pending = self.pending.lock().await;

        if let Some(credential) = self.cached().await? {
            *pending = None;
            return Ok(Acquired::Ready(credential));
        }

        if let Some(authorization) = pending.as_ref() {
            return Ok(Acquired::RedirectStarted {
                authorize_url: authorization.authorize_url.clone(),
            });
        }

        let verifier = utils::generate_code_verifier();
        self.store.set(SESSION_CODE_VERIFIER, &verifier).await?;

        let challenge = utils::generate_code_challenge(&verifier);
        let authorize_url = self.authorize_url(&challenge);
        *pending = Some(PendingAuthorization {
            authorize_url: authorize_url.clone(),
        });

        Ok(Acquired::RedirectStarted { authorize_url })
    }

    /// Returns the cached credential if one is present and still valid.
    /// Never triggers a redirect; callers that cannot host a login flow
    /// use this instead of [`acquire`](Self::acquire).
    pub async fn current(&self) -> Result<Option<Credential>, AuthError> {
        self.cached().await
    }

    /// Exchanges an authorization code for a token and caches it.
    ///
    /// The staged code verifier is removed before the exchange request goes
    /// out, so a code can only ever be redeemed once; a second attempt fails
    /// with [`AuthError::MissingVerifier`] without touching the network.
    /// A failed exchange also ends the pending authorization, so the next
    /// [`acquire`](Self::acquire) stages a fresh verifier instead of
    /// re-serving the consumed one's URL.
    pub async fn redeem(&self, code: &str) -> Result<Credential, AuthError> {
        let mut pending = self.pending.lock().await;
        // A returning code finishes the staged authorization, exchanged or
        // not; the next acquire stages a fresh verifier.
        *pending = None;

        let Some(verifier) = self.store.get(SESSION_CODE_VERIFIER).await else {
            return Err(AuthError::MissingVerifier);
        };
        self.store.remove(SESSION_CODE_VERIFIER).await?;

        let client = Client::new();
        let response = client
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.config.client_id.as_str()),
                ("code", code),
                ("code_verifier", verifier.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::ExchangeRejected { status });
        }

        let grant: TokenResponse = response.json().await?;
        let expires_at = Utc::now().timestamp() + grant.expires_in as i64;
        self.store
            .set(SESSION_ACCESS_TOKEN, &grant.access_token)
            .await?;
        self.store
            .set(SESSION_TOKEN_EXPIRY, &expires_at.to_string())
            .await?;

        Ok(Credential {
            access_token: grant.access_token,
            expires_at,
        })
    }

    /// Drops the cached credential and any staged authorization.
    pub async fn clear(&self) -> Result<(), AuthError> {
        let mut pending = self.pending.lock().await;
        *pending = None;
        self.store.remove(SESSION_ACCESS_TOKEN).await?;
        self.store.remove(SESSION_TOKEN_EXPIRY).await?;
        self.store.remove(SESSION_CODE_VERIFIER).await?;
        Ok(())
    }

    async fn cached(&self) -> Result<Option<Credential>, AuthError> {
        let Some(access_token) = self.store.get(SESSION_ACCESS_TOKEN).await else {
            return Ok(None);
        };
        let Some(raw_expiry) = self.store.get(SESSION_TOKEN_EXPIRY).await else {
            self.discard().await?;
            return Ok(None);
        };
        let Ok(expires_at) = raw_expiry.parse::<i64>() else {
            self.discard().await?;
            return Ok(None);
        };

        let credential = Credential {
            access_token,
            expires_at,
        };
        if credential.is_expired(Utc::now().timestamp()) {
            self.discard().await?;
            return Ok(None);
        }

        Ok(Some(credential))
    }

    async fn discard(&self) -> Result<(), SessionError> {
        self.store.remove(SESSION_ACCESS_TOKEN).await?;
        self.store.remove(SESSION_TOKEN_EXPIRY).await
    }

    fn authorize_url(&self, code_challenge: &str) -> String {
        format!(
            "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
            auth_url = self.config.auth_url,
            client_id = self.config.client_id,
            redirect_uri = encode(&self.config.redirect_uri),
            code_challenge = code_challenge,
            scope = encode(&self.config.scope),
        )
    }
}
