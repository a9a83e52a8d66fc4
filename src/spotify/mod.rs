//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by
//! jamcli, implementing authentication, track search, and playlist
//! publishing. It serves as the integration layer between the CLI and
//! Spotify's services, handling HTTP communication, the OAuth flow, and
//! error handling.
//!
//! ## Architecture
//!
//! The module follows a feature-based organization where each submodule
//! handles a specific domain of Spotify API functionality:
//!
//! ```text
//! Application Layer (CLI, Management)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── Catalog Search (Tracks)
//!     └── Playlist Publishing (Profile, Create, Add Tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Drives the interactive OAuth 2.0 PKCE login:
//! - **Complete Auth Flow**: From the authorization redirect to the cached token
//! - **PKCE Security**: No client secret is stored or transmitted
//! - **Browser Integration**: Automatic browser launch for user authorization
//! - **Local Callback Server**: Temporary HTTP server for receiving OAuth callbacks
//!
//! Note that tokens are deliberately not refreshed. Once a token expires it
//! is dropped and the user authorizes again; the callback handler in
//! [`crate::api`] is the only place a new token enters the cache.
//!
//! ### Search Module
//!
//! [`search`] - Queries the track catalog:
//! - **Free-Text Queries**: One request per search against `/search`
//! - **Lenient Mapping**: Missing artist or album metadata falls back to
//!   placeholder values instead of failing the whole result set
//! - **Graceful Degradation**: Upstream failures produce an empty result
//!   list rather than an error, so a flaky search never aborts the CLI
//!
//! ### Playlist Module
//!
//! [`playlist`] - Publishes the working playlist to the user's account:
//! - **Sequential Pipeline**: Profile lookup, playlist creation, then track
//!   addition, each depending on the previous response
//! - **Fail Fast**: The first rejected step aborts the remaining ones
//! - **Not Transactional**: A failure after creation leaves an empty
//!   playlist behind on the provider side
//!
//! ## API Coverage
//!
//! The module covers the following Spotify Web API endpoints:
//!
//! - `GET /search` - Track search with free-text queries
//! - `GET /me` - Current user profile for playlist ownership
//! - `POST /users/{user_id}/playlists` - Create new playlists
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks to playlists
//! - `POST /api/token` - Authorization code exchange (PKCE)
//!
//! ## Usage Patterns
//!
//! ### Authentication Flow
//! ```rust
//! use std::sync::Arc;
//!
//! let credentials = Arc::new(CredentialManager::from_env()?);
//! spotify::auth::auth(credentials).await;
//! // A credential is now cached for future API requests
//! ```
//!
//! ### Search and Publish
//! ```rust
//! let tracks = spotify::search::search_tracks(&credentials, "daft punk").await?;
//!
//! let saved = spotify::playlist::publish(
//!     &credentials,
//!     "Road Trip",
//!     &uris,
//! ).await?;
//! ```
//!
//! ## Thread Safety
//!
//! All operations use async/await for non-blocking I/O. The credential
//! manager is shared behind an `Arc` between the CLI command and the
//! callback server; no global mutable state is involved.

pub mod auth;
pub mod playlist;
pub mod search;

pub use playlist::{PublishError, PublishStep};
