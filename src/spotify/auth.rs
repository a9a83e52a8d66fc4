use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    error,
    management::CredentialManager,
    server::start_api_server,
    success,
    types::{Acquired, Credential},
    warning,
};

/// Runs the complete OAuth 2.0 PKCE authentication flow against Spotify.
///
/// This function orchestrates the interactive login:
/// 1. Asks the credential manager for a credential
/// 2. If one is cached and valid, reports success without any traffic
/// 3. Otherwise starts the local callback server
/// 4. Opens the authorization URL in the user's browser
/// 5. Waits for the callback handler to exchange the code and cache a token
///
/// The PKCE (Proof Key for Code Exchange) flow provides secure OAuth
/// authorization without requiring a client secret to be stored.
///
/// # Arguments
///
/// * `credentials` - Shared credential manager; the callback server holds a
///   clone of this handle and stores the redeemed token into it
///
/// # Redirect Semantics
///
/// Starting the redirect yields no credential from this call. The function
/// only learns about a completed login by polling the manager's cache while
/// the callback handler finishes the exchange in the background.
///
/// # Error Handling
///
/// - Browser launch failures result in a warning with manual URL instructions
/// - Authorization that fails or times out terminates with an error message
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// let credentials = Arc::new(CredentialManager::from_env()?);
/// auth(credentials).await;
/// ```
pub async fn auth(credentials: Arc<CredentialManager>) {
    match credentials.acquire().await {
        Ok(Acquired::Ready(_)) => {
            success!("Already authenticated. The cached credential is still valid.");
        }
        Ok(Acquired::RedirectStarted { authorize_url }) => {
            // start API server
            let server_state = Arc::clone(&credentials);
            tokio::spawn(async move {
                start_api_server(server_state).await;
            });

            // Open the authorization URL in the default browser
            if webbrowser::open(&authorize_url).is_err() {
                warning!(
                    "Failed to open browser. Please navigate to the following URL manually:\n{}",
                    authorize_url
                )
            }

            // wait for the callback handler to cache a credential
            match wait_for_credential(&credentials).await {
                Some(_) => success!("Authentication successful!"),
                None => error!("Authentication failed or timed out."),
            }
        }
        Err(e) => {
            error!("Could not start authorization: {}", e);
        }
    }
}

/// Waits for the OAuth callback to complete and cache a credential.
///
/// Polls the credential cache with a 120-second timeout while the callback
/// handler runs concurrently. Polling the cache instead of sharing a channel
/// keeps the callback handler and this waiter decoupled; both only agree on
/// the session store.
///
/// # Returns
///
/// Returns `Some(Credential)` once a token shows up within the timeout
/// period, or `None` if the timeout is reached without one.
///
/// # Timeout Behavior
///
/// - Maximum wait time: 120 seconds
/// - Polling interval: 1 second
/// - Non-blocking: Uses async sleep to avoid CPU spinning
async fn wait_for_credential(credentials: &CredentialManager) -> Option<Credential> {
    use std::time::Instant;

    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for you to approve access in the browser...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let max_wait = Duration::from_secs(120);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        if let Ok(Some(credential)) = credentials.current().await {
            pb.finish_and_clear();
            return Some(credential);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    pb.finish_and_clear();
    None
}
