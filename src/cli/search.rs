use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, info,
    management::{CredentialManager, SearchResultsManager},
    spotify,
    types::TrackTableRow,
    warning,
};

pub async fn search(term: String) {
    let credentials = match CredentialManager::from_env() {
        Ok(manager) => manager,
        Err(e) => {
            error!("Cannot load configuration. Err: {}", e);
        }
    };

    let mut results_mgr = match SearchResultsManager::load().await {
        Ok(manager) => manager,
        Err(_) => SearchResultsManager::new(),
    };
    let seq = results_mgr.next_seq();

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Searching for \"{}\"...", term));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let tracks = match spotify::search::search_tracks(&credentials, &term).await {
        Ok(tracks) => {
            pb.finish_and_clear();
            tracks
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Not authenticated. Please run jamcli auth\n Error: {}", e);
        }
    };

    if !results_mgr.record(seq, &term, tracks) {
        warning!("A newer search finished first. Discarding these results.");
        return;
    }
    if let Err(e) = results_mgr.persist().await {
        warning!("Failed to cache search results. Err: {}", e);
    }

    let results = results_mgr.results();
    if results.tracks.is_empty() {
        info!("No tracks found for \"{}\".", term);
        return;
    }

    // convert tracks to numbered table rows
    let table_rows: Vec<TrackTableRow> = results
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

    info!("Add a track with: jamcli playlist add <number>");
}
