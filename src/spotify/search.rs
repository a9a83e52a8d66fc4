use reqwest::Client;
use urlencoding::encode;

use crate::{
    management::{AuthError, CredentialManager},
    types::{SearchItem, SearchResponse, Track},
    utils, warning,
};

/// Placeholder shown when the catalog omits a track's artist.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Placeholder shown when the catalog omits a track's album.
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Searches the Spotify catalog for tracks matching a free-text query.
///
/// Issues a single request against the `/search` endpoint and maps the
/// response into the CLI's track records. The query is URL-encoded, so
/// spaces and punctuation are passed through unchanged to the catalog.
///
/// # Arguments
///
/// * `credentials` - Credential manager; only its cached token is used
/// * `query` - Free-text search terms (song, album, or artist)
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<Track>)` - Matching tracks, possibly empty
/// - `Err(AuthError::NotAuthenticated)` - No usable credential is cached
///
/// # Degradation Behavior
///
/// Searching is a lookup, not a transaction, so upstream trouble collapses
/// to an empty result list instead of an error:
/// - A blank or whitespace-only query returns empty without any request
/// - Network failures return empty after printing a warning
/// - Non-success HTTP responses return empty after printing a warning
/// - An unparseable response body returns empty after printing a warning
///
/// Only the missing credential is surfaced as an error, because the caller
/// has to send the user through the login flow to fix it.
///
/// # Result Mapping
///
/// Each catalog item is reduced to id, title, artist, album, URI, and the
/// smallest offered piece of album artwork. Items without an id or URI are
/// unusable for playlist building and are skipped. Missing artist or album
/// names fall back to [`UNKNOWN_ARTIST`] and [`UNKNOWN_ALBUM`].
///
/// # Example
///
/// ```
/// let tracks = search_tracks(&credentials, "daft punk").await?;
/// for track in &tracks {
///     println!("{} - {}", track.artist, track.name);
/// }
/// ```
pub async fn search_tracks(
    credentials: &CredentialManager,
    query: &str,
) -> Result<Vec<Track>, AuthError> {
    let term = query.trim();
    if term.is_empty() {
        return Ok(Vec::new());
    }

    let Some(credential) = credentials.current().await? else {
        return Err(AuthError::NotAuthenticated);
    };

    let api_url = format!(
        "{uri}/search?type=track&q={q}",
        uri = &credentials.config().api_url,
        q = encode(term)
    );

    let client = Client::new();
    let response = match client
        .get(&api_url)
        .bearer_auth(&credential.access_token)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            warning!("Search request failed: {}", e);
            return Ok(Vec::new());
        }
    };

    if !response.status().is_success() {
        warning!("Search returned HTTP {}", response.status());
        return Ok(Vec::new());
    }

    let payload = match response.json::<SearchResponse>().await {
        Ok(payload) => payload,
        Err(e) => {
            warning!("Search response could not be parsed: {}", e);
            return Ok(Vec::new());
        }
    };

    let Some(page) = payload.tracks else {
        return Ok(Vec::new());
    };

    Ok(page.items.into_iter().filter_map(map_item).collect())
}

/// Maps one catalog item to a track record, or drops it when the id or URI
/// is missing.
fn map_item(item: SearchItem) -> Option<Track> {
    let id = item.id?;
    let uri = item.uri?;

    let artist = item
        .artists
        .into_iter()
        .next()
        .map(|artist| artist.name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    let (album, artwork) = match item.album {
        Some(album) => {
            let artwork = utils::smallest_image(&album.images);
            let name = if album.name.is_empty() {
                UNKNOWN_ALBUM.to_string()
            } else {
                album.name
            };
            (name, artwork)
        }
        None => (UNKNOWN_ALBUM.to_string(), None),
    };

    Some(Track {
        id,
        name: item.name,
        artist,
        album,
        uri,
        artwork,
    })
}
