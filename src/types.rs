use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Name a fresh working playlist starts with and returns to after saving.
pub const DEFAULT_PLAYLIST_NAME: &str = "New Playlist";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    /// Unix timestamp (seconds) after which the token is unusable.
    pub expires_at: i64,
}

impl Credential {
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

/// Outcome of asking for a credential: either one is ready, or a browser
/// redirect has been started and no credential will come out of this call.
/// The caller gets a usable token only on a later attempt, after the
/// callback endpoint has stored one.
#[derive(Debug, Clone, PartialEq)]
pub enum Acquired {
    Ready(Credential),
    RedirectStarted { authorize_url: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub uri: String,
    pub artwork: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingPlaylist {
    pub name: String,
    pub tracks: Vec<Track>,
}

impl Default for WorkingPlaylist {
    fn default() -> Self {
        WorkingPlaylist {
            name: DEFAULT_PLAYLIST_NAME.to_string(),
            tracks: Vec::new(),
        }
    }
}

impl WorkingPlaylist {
    /// Appends the track unless one with the same id is already present.
    /// Returns whether the playlist changed.
    pub fn add(&mut self, track: Track) -> bool {
        if self.tracks.iter().any(|t| t.id == track.id) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Removes the track with the given id, keeping the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<Track> {
        let position = self.tracks.iter().position(|t| t.id == id)?;
        Some(self.tracks.remove(position))
    }

    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn uris(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.uri.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    /// Monotonic counter; results carrying a lower value than the stored
    /// one lost the race against a newer search and are discarded.
    pub seq: u64,
    pub query: String,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub uri: Option<String>,
    #[serde(default)]
    pub artists: Vec<ItemArtist>,
    pub album: Option<ItemAlbum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemArtist {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemAlbum {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}

/// What a successful save leaves behind on the provider side.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedPlaylist {
    pub id: String,
    pub name: String,
    pub snapshot_id: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub number: usize,
    pub title: String,
    pub artist: String,
    pub album: String,
}
