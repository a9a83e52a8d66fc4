use std::fmt;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{
    config::ProviderConfig,
    management::{AuthError, CredentialManager},
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse,
        Credential, SavedPlaylist, UserProfile,
    },
};

/// Description attached to every playlist this tool creates.
pub const PLAYLIST_DESCRIPTION: &str = "Created with jamcli";

/// The step of the publish pipeline a rejection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStep {
    CurrentUser,
    CreatePlaylist,
    AddTracks,
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishStep::CurrentUser => "current-user",
            PublishStep::CreatePlaylist => "create-playlist",
            PublishStep::AddTracks => "add-tracks",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("playlist name must not be empty")]
    EmptyName,
    #[error("there are no tracks to save")]
    NoTracks,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("network failure while saving the playlist: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{step} request rejected with HTTP {status}")]
    Rejected {
        step: PublishStep,
        status: StatusCode,
    },
}

/// Publishes a named list of tracks as a new playlist on the user's account.
///
/// Runs the three-step pipeline against the Spotify Web API, each step
/// using the previous step's response:
/// 1. `GET /me` resolves the user id owning the new playlist
/// 2. `POST /users/{user_id}/playlists` creates the (private) playlist
/// 3. `POST /playlists/{playlist_id}/tracks` fills it with the given URIs
///
/// # Arguments
///
/// * `credentials` - Credential manager; only its cached token is used
/// * `name` - Playlist name; must contain non-whitespace characters
/// * `uris` - Track URIs in playback order; must not be empty
///
/// # Guards
///
/// A blank name or an empty URI list fails before any network request goes
/// out, so nothing is created upstream for input the user has to fix anyway.
///
/// # Failure Semantics
///
/// The pipeline fails fast: the first rejected step aborts the remaining
/// ones and its step name is carried in [`PublishError::Rejected`]. The
/// pipeline is not transactional. If adding tracks fails after the playlist
/// was created, the empty playlist stays behind on the provider side and
/// has to be deleted there.
///
/// # Returns
///
/// Returns the created playlist's id, name, and snapshot id on success.
///
/// # Example
///
/// ```
/// let uris = vec!["spotify:track:4uLU6hMCjMI75M1A2tKUQC".to_string()];
/// let saved = publish(&credentials, "Road Trip", &uris).await?;
/// println!("Created playlist {}", saved.id);
/// ```
pub async fn publish(
    credentials: &CredentialManager,
    name: &str,
    uris: &[String],
) -> Result<SavedPlaylist, PublishError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PublishError::EmptyName);
    }
    if uris.is_empty() {
        return Err(PublishError::NoTracks);
    }

    let Some(credential) = credentials.current().await? else {
        return Err(PublishError::Auth(AuthError::NotAuthenticated));
    };

    let config = credentials.config();
    let user = current_user(config, &credential).await?;
    let playlist = create_playlist(config, &credential, &user.id, name).await?;
    let added = add_tracks(config, &credential, &playlist.id, uris).await?;

    Ok(SavedPlaylist {
        id: playlist.id,
        name: playlist.name,
        snapshot_id: added.snapshot_id,
    })
}

/// Resolves the profile of the user the token belongs to.
async fn current_user(
    config: &ProviderConfig,
    credential: &Credential,
) -> Result<UserProfile, PublishError> {
    let api_url = format!("{uri}/me", uri = &config.api_url);

    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(&credential.access_token)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(PublishError::Rejected {
            step: PublishStep::CurrentUser,
            status,
        });
    }

    Ok(response.json::<UserProfile>().await?)
}

/// Creates an empty private playlist owned by the given user.
async fn create_playlist(
    config: &ProviderConfig,
    credential: &Credential,
    user_id: &str,
    name: &str,
) -> Result<CreatePlaylistResponse, PublishError> {
    let api_url = format!(
        "{uri}/users/{user_id}/playlists",
        uri = &config.api_url,
        user_id = user_id
    );

    let request = CreatePlaylistRequest {
        name: name.to_string(),
        description: PLAYLIST_DESCRIPTION.to_string(),
        public: false,
        collaborative: false,
    };

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(&credential.access_token)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(PublishError::Rejected {
            step: PublishStep::CreatePlaylist,
            status,
        });
    }

    Ok(response.json::<CreatePlaylistResponse>().await?)
}

/// Adds the track URIs to the playlist in the given order.
async fn add_tracks(
    config: &ProviderConfig,
    credential: &Credential,
    playlist_id: &str,
    uris: &[String],
) -> Result<AddTracksResponse, PublishError> {
    let api_url = format!(
        "{uri}/playlists/{playlist_id}/tracks",
        uri = &config.api_url,
        playlist_id = playlist_id
    );

    let request = AddTracksRequest {
        uris: uris.to_vec(),
    };

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(&credential.access_token)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(PublishError::Rejected {
            step: PublishStep::AddTracks,
            status,
        });
    }

    Ok(response.json::<AddTracksResponse>().await?)
}
