use std::sync::Arc;

use crate::{error, management::CredentialManager, spotify, success};

pub async fn auth(logout: bool) {
    let credentials = match CredentialManager::from_env() {
        Ok(manager) => Arc::new(manager),
        Err(e) => {
            error!("Cannot load configuration. Err: {}", e);
        }
    };

    if logout {
        match credentials.clear().await {
            Ok(()) => success!("Logged out. The cached credential was removed."),
            Err(e) => error!("Failed to clear the session. Err: {}", e),
        }
        return;
    }

    spotify::auth::auth(credentials).await;
}
