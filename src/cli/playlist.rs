use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, info,
    management::{CredentialManager, PlaylistManager, SearchResultsManager},
    spotify::{PublishError, PublishStep},
    success,
    types::TrackTableRow,
    warning,
};

pub async fn show_playlist() {
    let playlist_mgr = load_playlist().await;
    let playlist = playlist_mgr.playlist();

    info!("Working playlist: {}", playlist.name);
    if playlist.is_empty() {
        info!("The playlist is empty. Add tracks with: jamcli playlist add <number>");
        return;
    }

    let table_rows: Vec<TrackTableRow> = playlist
        .tracks
        .iter()
        .enumerate()
        .map(|(position, track)| TrackTableRow {
            number: position + 1,
            title: track.name.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);
}

pub async fn add_track(number: usize) {
    if number == 0 {
        error!("Track numbers start at 1.");
    }

    let results_mgr = match SearchResultsManager::load().await {
        Ok(manager) => manager,
        Err(_) => {
            error!("No cached search results. Run jamcli search first.");
        }
    };

    let track = match results_mgr.get(number - 1) {
        Some(track) => track.clone(),
        None => {
            error!(
                "No track at position {} in the last search results.",
                number
            );
        }
    };

    let mut playlist_mgr = load_playlist().await;

    if playlist_mgr.add(track.clone()) {
        if let Err(e) = playlist_mgr.persist().await {
            error!("Failed to save the playlist cache. Err: {}", e);
        }
        success!(
            "Added \"{}\" by {} to {}.",
            track.name,
            track.artist,
            playlist_mgr.playlist().name
        );
    } else {
        info!("\"{}\" is already in the playlist.", track.name);
    }
}

pub async fn remove_track(number: usize) {
    if number == 0 {
        error!("Track numbers start at 1.");
    }

    let mut playlist_mgr = load_playlist().await;

    match playlist_mgr.remove_at(number - 1) {
        Some(track) => {
            if let Err(e) = playlist_mgr.persist().await {
                error!("Failed to save the playlist cache. Err: {}", e);
            }
            success!(
                "Removed \"{}\" from {}.",
                track.name,
                playlist_mgr.playlist().name
            );
        }
        None => {
            info!("No track at position {}. Nothing removed.", number);
        }
    }
}

pub async fn rename_playlist(name: String) {
    let name = name.trim();
    if name.is_empty() {
        error!("Playlist name must not be empty.");
    }

    let mut playlist_mgr = load_playlist().await;
    playlist_mgr.rename(name);
    if let Err(e) = playlist_mgr.persist().await {
        error!("Failed to save the playlist cache. Err: {}", e);
    }

    success!("Renamed the working playlist to {}.", name);
}

pub async fn save_playlist() {
    let credentials = match CredentialManager::from_env() {
        Ok(manager) => manager,
        Err(e) => {
            error!("Cannot load configuration. Err: {}", e);
        }
    };

    let mut playlist_mgr = load_playlist().await;
    let name = playlist_mgr.playlist().name.clone();
    let track_count = playlist_mgr.playlist().tracks.len();

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Saving {} to your Spotify account...", name));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    match playlist_mgr.save(&credentials).await {
        Ok(saved) => {
            pb.finish_and_clear();
            // write the fresh default playlist back to the cache
            if let Err(e) = playlist_mgr.persist().await {
                warning!("Failed to reset the playlist cache. Err: {}", e);
            }
            success!(
                "Saved {} with {} tracks. Playlist id: {}",
                saved.name,
                track_count,
                saved.id
            );
            info!(
                "Started a fresh working playlist: {}",
                playlist_mgr.playlist().name
            );
        }
        Err(PublishError::NoTracks) => {
            pb.finish_and_clear();
            error!("The working playlist is empty. Add tracks before saving.");
        }
        Err(PublishError::EmptyName) => {
            pb.finish_and_clear();
            error!("The playlist name is empty. Rename it before saving.");
        }
        Err(PublishError::Auth(e)) => {
            pb.finish_and_clear();
            error!("Not authenticated. Please run jamcli auth\n Error: {}", e);
        }
        Err(PublishError::Rejected {
            step: PublishStep::AddTracks,
            status,
        }) => {
            pb.finish_and_clear();
            error!(
                "Adding tracks was rejected with HTTP {}. The playlist {} was already created and is empty; delete it in Spotify if you do not want it.",
                status, name
            );
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to save the playlist: {}", e);
        }
    }
}

async fn load_playlist() -> PlaylistManager {
    match PlaylistManager::load().await {
        Ok(manager) => manager,
        Err(_) => PlaylistManager::new(),
    }
}
