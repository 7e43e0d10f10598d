use std::cell::OnceCell;

use serde::Deserialize;

use crate::content::Platform;
use crate::error::Result;

use super::matching::{artist_matches, titles_match};
use super::provider::{CatalogHttp, CatalogProvider, LookupKind};

const TOKEN_URL: &str = "https://auth.tidal.com/v1/oauth2/token";
const API_URL: &str = "https://api.tidal.com/v1";

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchResponse {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    artists: Vec<ArtistRef>,
}

#[derive(Debug, Deserialize)]
struct ArtistRef {
    name: String,
}

pub(super) fn pick_match(response: &SearchResponse, title: &str, artist: &str) -> Option<u64> {
    response
        .items
        .iter()
        .filter(|item| artist_matches(item.artists.iter().map(|a| a.name.as_str()), artist))
        .find(|item| titles_match(title, &item.title))
        .map(|item| item.id)
}

/// Top-track catalog keyed by the lowercased title before any `(`.
pub(super) fn catalog_from(response: &SearchResponse) -> Vec<(String, u64)> {
    response
        .items
        .iter()
        .map(|item| {
            let key = item
                .title
                .split('(')
                .next()
                .unwrap_or_default()
                .trim()
                .to_lowercase();
            (key, item.id)
        })
        .collect()
}

pub(super) fn pick_from_catalog(catalog: &[(String, u64)], title: &str) -> Option<u64> {
    catalog
        .iter()
        .find(|(key, _)| titles_match(title, key))
        .map(|(_, id)| *id)
}

pub struct Tidal {
    http: CatalogHttp,
    token: String,
    country_code: String,
    top_tracks: OnceCell<Vec<(String, u64)>>,
}

impl Tidal {
    pub fn connect(
        http: CatalogHttp,
        client_id: &str,
        client_secret: &str,
        country_code: &str,
    ) -> Result<Option<Self>> {
        let token = http.client_credentials_token(TOKEN_URL, client_id, client_secret)?;
        Ok(token.map(|token| Self {
            http,
            token,
            country_code: country_code.to_string(),
            top_tracks: OnceCell::new(),
        }))
    }

    fn search(&self, what: &str, query: String, limit: u32) -> Result<SearchResponse> {
        let params = [
            ("query", query),
            ("countryCode", self.country_code.clone()),
            ("limit", limit.to_string()),
        ];
        self.http
            .get_json(&format!("{API_URL}/search/{what}"), &params, Some(&self.token))
    }

    /// The artist's top tracks, fetched once per run. Failures leave the
    /// catalog empty.
    fn top_tracks(&self, artist: &str) -> &[(String, u64)] {
        self.top_tracks.get_or_init(|| match self.fetch_top_tracks(artist) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("could not fetch Tidal artist tracks: {e}");
                Vec::new()
            }
        })
    }

    fn fetch_top_tracks(&self, artist: &str) -> Result<Vec<(String, u64)>> {
        let artists = self.search("artists", artist.to_string(), 1)?;
        let Some(found) = artists.items.first() else {
            return Ok(Vec::new());
        };
        let params = [
            ("countryCode", self.country_code.clone()),
            ("limit", "100".to_string()),
        ];
        let tracks: SearchResponse = self.http.get_json(
            &format!("{API_URL}/artists/{}/toptracks", found.id),
            &params,
            Some(&self.token),
        )?;
        Ok(catalog_from(&tracks))
    }
}

impl CatalogProvider for Tidal {
    fn platform(&self) -> Platform {
        Platform::Tidal
    }

    fn lookup(&self, kind: LookupKind, title: &str, artist: &str) -> Result<Option<String>> {
        match kind {
            LookupKind::Track => {
                let response = self.search("tracks", format!("{title} {artist}"), 20)?;
                let id = pick_match(&response, title, artist)
                    .or_else(|| pick_from_catalog(self.top_tracks(artist), title));
                Ok(id.map(|id| format!("https://tidal.com/track/{id}")))
            }
            LookupKind::Album => {
                let response = self.search("albums", format!("{title} {artist}"), 10)?;
                Ok(pick_match(&response, title, artist)
                    .map(|id| format!("https://tidal.com/album/{id}")))
            }
        }
    }
}
