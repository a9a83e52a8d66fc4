use std::path::PathBuf;

use crate::{
    management::CacheError,
    types::{SearchResults, Track},
};

/// Caches the most recent search results so follow-up commands can pick
/// tracks by their printed position.
pub struct SearchResultsManager {
    results: SearchResults,
}

impl SearchResultsManager {
    pub fn new() -> Self {
        SearchResultsManager {
            results: SearchResults::default(),
        }
    }

    pub async fn load() -> Result<Self, CacheError> {
        let path = Self::cache_path();
        let content = async_fs::read_to_string(&path).await?;
        let results: SearchResults = serde_json::from_str(&content)?;
        Ok(SearchResultsManager { results })
    }

    pub async fn persist(&self) -> Result<(), CacheError> {
        let path = Self::cache_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.results)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Sequence number a search started now should carry.
    pub fn next_seq(&self) -> u64 {
        self.results.seq + 1
    }

    /// Installs a completed search. Results older than what is already
    /// stored lost the race against a newer search and are dropped; the
    /// return value tells whether the results were kept.
    pub fn record(&mut self, seq: u64, query: &str, tracks: Vec<Track>) -> bool {
        if seq < self.results.seq {
            return false;
        }
        self.results = SearchResults {
            seq,
            query: query.to_string(),
            tracks,
        };
        true
    }

    /// Track at the given zero-based position in the last results.
    pub fn get(&self, position: usize) -> Option<&Track> {
        self.results.tracks.get(position)
    }

    pub fn results(&self) -> &SearchResults {
        &self.results
    }

    fn cache_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("jamcli/cache/search-results.json");
        path
    }
}
