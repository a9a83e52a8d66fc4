use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};

use crate::{
    management::{AuthError, CredentialManager},
    warning,
};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(credentials): Extension<Arc<CredentialManager>>,
) -> Html<&'static str> {
    // The provider reports denial via an error query parameter
    if let Some(denied) = params.get("error") {
        warning!("Authorization was denied: {}", denied);
        return Html(
            "<h4>Authorization denied.</h4><p>You can close this window and try again from the terminal.</p>",
        );
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    match credentials.redeem(code).await {
        Ok(_) => Html("<h2>Authentication successful.</h2><p>You can close this window.</p>"),
        Err(AuthError::MissingVerifier) => {
            warning!("Callback received without a staged code verifier.");
            Html("<h4>Missing PKCE code verifier.</h4><p>Restart the login from the terminal.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
