use serde::Deserialize;

use crate::content::Platform;
use crate::error::Result;

use super::matching::{artist_matches, strip_tracking, titles_match};
use super::provider::{CatalogHttp, CatalogProvider, LookupKind};

const SEARCH_URL: &str = "https://itunes.apple.com/search";

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchResponse {
    #[serde(default)]
    results: Vec<Item>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Item {
    #[serde(default)]
    artist_name: String,
    track_name: Option<String>,
    track_view_url: Option<String>,
    collection_name: Option<String>,
    collection_view_url: Option<String>,
}

pub(super) fn pick_match(
    response: &SearchResponse,
    kind: LookupKind,
    title: &str,
    artist: &str,
) -> Option<String> {
    response
        .results
        .iter()
        .filter(|item| artist_matches([item.artist_name.as_str()], artist))
        .find_map(|item| {
            let (name, url) = match kind {
                LookupKind::Track => (item.track_name.as_deref(), item.track_view_url.as_deref()),
                LookupKind::Album => (
                    item.collection_name.as_deref(),
                    item.collection_view_url.as_deref(),
                ),
            };
            let (name, url) = (name?, url?);
            (titles_match(title, name) && !url.is_empty()).then(|| strip_tracking(url).to_string())
        })
}

/// iTunes search API; needs no credentials.
pub struct AppleMusic {
    http: CatalogHttp,
}

impl AppleMusic {
    pub fn new(http: CatalogHttp) -> Self {
        Self { http }
    }
}

impl CatalogProvider for AppleMusic {
    fn platform(&self) -> Platform {
        Platform::AppleMusic
    }

    fn rate_limited(&self) -> bool {
        true
    }

    fn lookup(&self, kind: LookupKind, title: &str, artist: &str) -> Result<Option<String>> {
        let mut query = vec![
            ("term", format!("{title} {artist}")),
            ("media", "music".to_string()),
            ("limit", "10".to_string()),
        ];
        if kind == LookupKind::Album {
            query.push(("entity", "album".to_string()));
        }
        let response: SearchResponse = self.http.get_json(SEARCH_URL, &query, None)?;
        Ok(pick_match(&response, kind, title, artist))
    }
}
