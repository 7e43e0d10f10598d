use serde::Deserialize;

use crate::content::Platform;
use crate::error::Result;

use super::matching::{artist_matches, titles_match};
use super::provider::{CatalogHttp, CatalogProvider, LookupKind};

const TRACK_SEARCH_URL: &str = "https://api.deezer.com/search/track";
const ALBUM_SEARCH_URL: &str = "https://api.deezer.com/search/album";

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchResponse {
    #[serde(default)]
    data: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: String,
    #[serde(default)]
    link: String,
    artist: Option<ArtistRef>,
}

#[derive(Debug, Deserialize)]
struct ArtistRef {
    name: String,
}

pub(super) fn pick_match(response: &SearchResponse, title: &str, artist: &str) -> Option<String> {
    response
        .data
        .iter()
        .filter(|item| artist_matches(item.artist.as_ref().map(|a| a.name.as_str()), artist))
        .filter(|item| titles_match(title, &item.title))
        .map(|item| item.link.clone())
        .find(|link| !link.is_empty())
}

/// Public Deezer search; needs no credentials.
pub struct Deezer {
    http: CatalogHttp,
}

impl Deezer {
    pub fn new(http: CatalogHttp) -> Self {
        Self { http }
    }
}

impl CatalogProvider for Deezer {
    fn platform(&self) -> Platform {
        Platform::Deezer
    }

    fn rate_limited(&self) -> bool {
        true
    }

    fn lookup(&self, kind: LookupKind, title: &str, artist: &str) -> Result<Option<String>> {
        let url = match kind {
            LookupKind::Track => TRACK_SEARCH_URL,
            LookupKind::Album => ALBUM_SEARCH_URL,
        };
        let query = [("q", format!("{title} {artist}")), ("limit", "10".to_string())];
        let response: SearchResponse = self.http.get_json(url, &query, None)?;
        Ok(pick_match(&response, title, artist))
    }
}
