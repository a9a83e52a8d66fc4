//! Configuration management for the jamcli application.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including the Spotify client ID, OAuth endpoints, and the local
//! callback server address.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (everything except the client ID)

use dotenv;
use std::{env, path::PathBuf};

/// Default bind address for the local OAuth callback server.
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";

/// Default OAuth redirect URI; must match the URI registered with the provider.
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8080/callback";

/// Default OAuth scopes. Playlist creation defaults to private playlists, so
/// both modify scopes are requested.
pub const DEFAULT_SCOPE: &str = "playlist-modify-public playlist-modify-private";

/// Default Spotify OAuth authorization endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";

/// Default Spotify OAuth token exchange endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Default Spotify Web API base URL.
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `jamcli/.env`. This allows users to store
/// configuration securely without hardcoding sensitive values.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/jamcli/.env`
/// - macOS: `~/Library/Application Support/jamcli/.env`
/// - Windows: `%LOCALAPPDATA%/jamcli/.env`
///
/// A missing `.env` file is not an error; all variables may instead come from
/// the process environment.
///
/// # Returns
///
/// Returns `Ok(())` once the environment is prepared, or an error string if
/// the data directory cannot be created.
///
/// # Example
///
/// ```
/// use jamcli::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("jamcli/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    // The .env file is optional; ignore a missing or unreadable file.
    let _ = dotenv::from_path(path);
    Ok(())
}

/// Returns the server address for the local OAuth callback server.
///
/// Retrieves the `SERVER_ADDRESS` environment variable which specifies
/// the address and port where the local HTTP server should bind for
/// handling OAuth callbacks during the authentication flow. Falls back
/// to [`DEFAULT_SERVER_ADDRESS`] when unset.
///
/// # Example
///
/// ```
/// let addr = server_addr(); // e.g., "127.0.0.1:8080"
/// ```
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Resolved OAuth and Web API endpoints for one provider.
///
/// Bundling the endpoints into a value (instead of reading the environment at
/// every call site) lets tests point the credential manager and the gateway at
/// a local fixture server.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Client ID obtained when registering the application with Spotify's
    /// developer platform. The PKCE flow needs no client secret.
    pub client_id: String,
    /// Callback URL the provider redirects to after user authorization.
    /// Must match the redirect URI registered in the application settings.
    pub redirect_uri: String,
    /// Space-separated OAuth scopes requested during authorization.
    pub scope: String,
    /// OAuth authorization endpoint where users grant permissions.
    pub auth_url: String,
    /// OAuth endpoint for exchanging authorization codes for access tokens.
    pub token_url: String,
    /// Base URL for Web API operations after authentication.
    pub api_url: String,
}

impl ProviderConfig {
    /// Builds the provider configuration from the environment.
    ///
    /// Only `SPOTIFY_API_AUTH_CLIENT_ID` is required; every endpoint can be
    /// overridden but falls back to the public Spotify URLs.
    ///
    /// # Environment Variables
    ///
    /// - `SPOTIFY_API_AUTH_CLIENT_ID` (required)
    /// - `SPOTIFY_API_REDIRECT_URI`
    /// - `SPOTIFY_API_AUTH_SCOPE`
    /// - `SPOTIFY_API_AUTH_URL`
    /// - `SPOTIFY_API_TOKEN_URL`
    /// - `SPOTIFY_API_URL`
    ///
    /// # Errors
    ///
    /// Returns an error string if the client ID is not set.
    ///
    /// # Example
    ///
    /// ```
    /// let config = ProviderConfig::from_env()?;
    /// println!("talking to {}", config.api_url);
    /// ```
    pub fn from_env() -> Result<Self, String> {
        let client_id = env::var("SPOTIFY_API_AUTH_CLIENT_ID")
            .map_err(|_| "SPOTIFY_API_AUTH_CLIENT_ID must be set".to_string())?;

        Ok(ProviderConfig {
            client_id,
            redirect_uri: env::var("SPOTIFY_API_REDIRECT_URI")
                .unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string()),
            scope: env::var("SPOTIFY_API_AUTH_SCOPE")
                .unwrap_or_else(|_| DEFAULT_SCOPE.to_string()),
            auth_url: env::var("SPOTIFY_API_AUTH_URL")
                .unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string()),
            token_url: env::var("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
            api_url: env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        })
    }
}
