mod auth;
mod playlist;
mod results;
mod session;

pub use auth::AuthError;
pub use auth::CredentialManager;
pub use auth::SESSION_ACCESS_TOKEN;
pub use auth::SESSION_CODE_VERIFIER;
pub use auth::SESSION_TOKEN_EXPIRY;
pub use playlist::PlaylistManager;
pub use results::SearchResultsManager;
pub use session::FileSessionStore;
pub use session::MemorySessionStore;
pub use session::SessionError;
pub use session::SessionStore;

use thiserror::Error;

/// Errors from the on-disk caches backing the working playlist and the
/// last search results.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache contains invalid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}
