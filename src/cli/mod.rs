//! # CLI Module
//!
//! This module provides the command-line interface layer for jamcli, a
//! Spotify client for building and saving playlists from the terminal. It
//! implements all user-facing commands and coordinates between the Spotify
//! integration, local state management, and user interaction.
//!
//! ## Overview
//!
//! The CLI module is the primary interface between users and the
//! application's functionality. It provides commands for:
//!
//! - **Authentication Management**: OAuth 2.0 PKCE flow for Spotify API access
//! - **Catalog Search**: Finding tracks by song, album, or artist
//! - **Playlist Building**: Adding, removing, and renaming tracks locally
//! - **Playlist Publishing**: Saving the working playlist to the account
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Initiates the Spotify OAuth authentication flow with PKCE
//!   security, or drops the cached credential with `--logout`
//!
//! ### Search Operations
//!
//! - [`search`] - Searches the catalog and caches the numbered result list
//!   that the playlist commands refer back to
//!
//! ### Playlist Operations
//!
//! - [`show_playlist`] - Displays the working playlist
//! - [`add_track`] - Adds a track from the last search results by number
//! - [`remove_track`] - Removes a track from the working playlist by number
//! - [`rename_playlist`] - Renames the working playlist
//! - [`save_playlist`] - Publishes the working playlist to Spotify and
//!   starts a fresh one
//!
//! ## Architecture Design
//!
//! The CLI module follows a layered architecture approach:
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Management Layer (Credential/Playlist/Results State)
//!     ↓
//! API Layer (Spotify Integration)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! Each CLI command delegates to the management and Spotify modules while
//! handling user interaction, progress feedback, and error presentation.
//!
//! ## State Between Invocations
//!
//! Unlike a browser session, every CLI invocation is a fresh process, so
//! the commands share state through small JSON caches in the local data
//! directory:
//!
//! - **Session Cache**: Access token, expiry, and staged PKCE verifier
//! - **Playlist Cache**: The working playlist being built
//! - **Results Cache**: The last search results, addressable by number
//!
//! ## Error Handling Philosophy
//!
//! The CLI module implements user-friendly error handling:
//!
//! - **Graceful Degradation**: A failed search prints a notice instead of
//!   aborting with a stack of errors
//! - **Helpful Messages**: Missing credentials point at `jamcli auth`
//! - **Fail Fast on Writes**: Saving a playlist stops at the first rejected
//!   request and reports which step failed
//!
//! ## Usage Patterns
//!
//! ### Initial Setup
//! ```bash
//! jamcli auth                      # Authenticate with Spotify
//! ```
//!
//! ### Building a Playlist
//! ```bash
//! jamcli search daft punk          # Search the catalog
//! jamcli playlist add 3            # Add result number 3
//! jamcli playlist rename Road Trip # Name the playlist
//! jamcli playlist                  # Review the working playlist
//! jamcli playlist save             # Publish it to Spotify
//! ```
//!
//! ## Dependencies
//!
//! This module depends on several core application components:
//! - [`crate::spotify`] - Spotify API integration and authentication
//! - [`crate::management`] - Credential, playlist, and results state
//! - [`crate::types`] - Data structures and type definitions

mod auth;
mod playlist;
mod search;

pub use auth::auth;
pub use playlist::add_track;
pub use playlist::remove_track;
pub use playlist::rename_playlist;
pub use playlist::save_playlist;
pub use playlist::show_playlist;
pub use search::search;
