use serde::Deserialize;

use crate::content::Platform;
use crate::error::Result;

use super::matching::{artist_matches, titles_match};
use super::provider::{CatalogHttp, CatalogProvider, LookupKind};

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SEARCH_URL: &str = "https://api.spotify.com/v1/search";

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchResponse {
    #[serde(default)]
    tracks: Option<Page>,
    #[serde(default)]
    albums: Option<Page>,
}

#[derive(Debug, Default, Deserialize)]
struct Page {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    name: String,
    #[serde(default)]
    artists: Vec<ArtistRef>,
    #[serde(default)]
    external_urls: ExternalUrls,
}

#[derive(Debug, Deserialize)]
struct ArtistRef {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct ExternalUrls {
    #[serde(default)]
    spotify: String,
}

/// First search hit credited to `artist` with a matching title.
pub(super) fn pick_match(
    response: &SearchResponse,
    kind: LookupKind,
    title: &str,
    artist: &str,
) -> Option<String> {
    let page = match kind {
        LookupKind::Track => response.tracks.as_ref(),
        LookupKind::Album => response.albums.as_ref(),
    }?;
    page.items
        .iter()
        .filter(|item| artist_matches(item.artists.iter().map(|a| a.name.as_str()), artist))
        .filter(|item| titles_match(title, &item.name))
        .map(|item| item.external_urls.spotify.clone())
        .find(|url| !url.is_empty())
}

pub struct Spotify {
    http: CatalogHttp,
    token: String,
}

impl Spotify {
    /// Authenticate with client credentials. `Ok(None)` when the token
    /// endpoint returned no token.
    pub fn connect(http: CatalogHttp, client_id: &str, client_secret: &str) -> Result<Option<Self>> {
        let token = http.client_credentials_token(TOKEN_URL, client_id, client_secret)?;
        Ok(token.map(|token| Self { http, token }))
    }
}

impl CatalogProvider for Spotify {
    fn platform(&self) -> Platform {
        Platform::Spotify
    }

    fn lookup(&self, kind: LookupKind, title: &str, artist: &str) -> Result<Option<String>> {
        let (field, search_type) = match kind {
            LookupKind::Track => ("track", "track"),
            LookupKind::Album => ("album", "album"),
        };
        let query = [
            ("q", format!("{field}:{title} artist:{artist}")),
            ("type", search_type.to_string()),
            ("limit", "5".to_string()),
        ];
        let response: SearchResponse = self.http.get_json(SEARCH_URL, &query, Some(&self.token))?;
        Ok(pick_match(&response, kind, title, artist))
    }
}
