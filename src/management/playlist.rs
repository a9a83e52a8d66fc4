use std::path::PathBuf;

use crate::{
    management::{CacheError, CredentialManager},
    spotify::{self, PublishError},
    types::{SavedPlaylist, Track, WorkingPlaylist},
};

/// Holds the working playlist and its on-disk cache, so the list being
/// built survives across CLI invocations until it is saved.
pub struct PlaylistManager {
    playlist: WorkingPlaylist,
}

impl PlaylistManager {
    pub fn new() -> Self {
        PlaylistManager {
            playlist: WorkingPlaylist::default(),
        }
    }

    pub async fn load() -> Result<Self, CacheError> {
        let path = Self::cache_path();
        let content = async_fs::read_to_string(&path).await?;
        let playlist: WorkingPlaylist = serde_json::from_str(&content)?;
        Ok(PlaylistManager { playlist })
    }

    pub async fn persist(&self) -> Result<(), CacheError> {
        let path = Self::cache_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.playlist)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    pub fn playlist(&self) -> &WorkingPlaylist {
        &self.playlist
    }

    pub fn add(&mut self, track: Track) -> bool {
        self.playlist.add(track)
    }

    /// Removes the track at the given zero-based position.
    pub fn remove_at(&mut self, position: usize) -> Option<Track> {
        let id = self.playlist.tracks.get(position)?.id.clone();
        self.playlist.remove(&id)
    }

    pub fn rename(&mut self, name: &str) {
        self.playlist.rename(name);
    }

    pub fn reset(&mut self) {
        self.playlist = WorkingPlaylist::default();
    }

    /// Saves the working playlist to the user's account and, only when the
    /// whole pipeline succeeded, resets it to an empty default-named list.
    pub async fn save(
        &mut self,
        credentials: &CredentialManager,
    ) -> Result<SavedPlaylist, PublishError> {
        let uris = self.playlist.uris();
        let saved = spotify::playlist::publish(credentials, &self.playlist.name, &uris).await?;
        self.reset();
        Ok(saved)
    }

    fn cache_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("jamcli/cache/playlist.json");
        path
    }
}
