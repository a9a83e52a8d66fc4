//! # API Module
//!
//! This module provides HTTP API endpoints for jamcli's local web server.
//! It implements the endpoints needed for OAuth authentication and health
//! monitoring.
//!
//! ## Overview
//!
//! The API module is the CLI's stand-in for a web application's redirect
//! page. Spotify cannot call back into a terminal, so during login a small
//! HTTP server accepts the redirect on loopback:
//!
//! - **OAuth Authentication Flow**: Implements the Spotify OAuth 2.0 PKCE
//!   (Proof Key for Code Exchange) callback handler for secure token exchange
//! - **Health Monitoring**: Provides a health check endpoint for verifying
//!   the callback server is up while a login is in flight
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`callback`] - Handles OAuth callback requests from Spotify's
//!   authorization server. This endpoint hands the authorization code to the
//!   credential manager, which redeems it for an access token and caches it.
//!
//! ### Monitoring
//!
//! - [`health`] - Returns application status and version information.
//!
//! ## Architecture
//!
//! The module is built using the [Axum](https://docs.rs/axum) web framework.
//! Each endpoint is an async function wired into Axum's routing system by
//! [`crate::server`]. The callback handler receives the shared credential
//! manager through an axum `Extension` layer.
//!
//! ## Security Considerations
//!
//! - Uses OAuth 2.0 PKCE flow, so no client secret is involved
//! - The staged code verifier is single-use; replaying a callback URL does
//!   not produce a second exchange request
//! - Authentication failures render a plain HTML notice instead of exposing
//!   error internals to the browser
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use jamcli::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```
//!
//! ## Related Modules
//!
//! - [`crate::management`] - Credential manager performing the code exchange
//! - [`crate::server`] - Router setup and server lifecycle

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
