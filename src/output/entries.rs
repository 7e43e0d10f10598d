use std::collections::HashSet;
use std::fs;

use chrono::NaiveDate;

use crate::assemble::{
    CollectionRelease, Discography, ReleaseTrack, SingleRelease, SinglesEntry,
    parse_release_date, release_id, sort_by_date_desc,
};
use crate::content::TrackMap;

/// Site-wide values shared by the feed and the track pages.
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub title: String,
    pub artist: String,
    pub bio: String,
    /// Public address without a trailing slash. May be empty.
    pub site_url: String,
    pub language: String,
    /// Web path of the RSS file, relative to the site root.
    pub feed_path: String,
    /// Web path of the page directory, relative to the site root.
    pub pages_path: String,
    /// Artist portrait used as channel artwork. May be empty.
    pub image: String,
}

impl SiteInfo {
    /// Absolute URL for a site-relative path. Already absolute URLs and
    /// sites without an address are left as they are.
    pub fn url(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let path = path.trim_start_matches('/');
        if self.site_url.is_empty() {
            format!("/{path}")
        } else {
            format!("{}/{path}", self.site_url)
        }
    }

    pub fn page_url(&self, id: &str) -> String {
        self.url(&format!("{}/{id}.html", self.pages_path))
    }
}

/// One track as it is published in the feed and on its own page.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub id: String,
    pub title: String,
    /// Album or EP the track belongs to.
    pub release_title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: String,
    pub description: String,
    pub lyrics: String,
    pub cover_art: String,
    pub audio_file: String,
    /// Size of the local audio file in bytes, 0 when unknown.
    pub audio_length: u64,
}

fn audio_length(tracks: &TrackMap, slug: &str) -> u64 {
    tracks
        .get(slug)
        .and_then(|t| t.audio_file.as_ref())
        .and_then(|path| fs::metadata(path).ok())
        .map(|meta| meta.len())
        .unwrap_or(0)
}

fn from_release_track(
    track: &ReleaseTrack,
    release: &CollectionRelease,
    tracks: &TrackMap,
) -> FeedEntry {
    FeedEntry {
        id: release_id(&track.slug),
        title: track.title.clone(),
        release_title: Some(release.title.clone()),
        release_date: parse_release_date(&track.release_date),
        duration: track.duration.clone(),
        description: track.description.clone(),
        lyrics: track.lyrics.clone(),
        cover_art: track.cover_art.clone(),
        audio_file: track.audio_file.clone(),
        audio_length: audio_length(tracks, &track.slug),
    }
}

fn from_single(single: &SingleRelease, tracks: &TrackMap) -> FeedEntry {
    FeedEntry {
        id: single.id.clone(),
        title: single.title.clone(),
        release_title: None,
        release_date: parse_release_date(&single.release_date),
        duration: single.duration.clone(),
        description: single.description.clone(),
        lyrics: single.lyrics.clone(),
        cover_art: single.cover_art.clone(),
        audio_file: single.audio_file.clone(),
        audio_length: audio_length(tracks, &single.slug),
    }
}

/// Every published track, newest first. A track that appears on more than
/// one release is listed once, under its newest appearance.
pub fn feed_entries(discography: &Discography, tracks: &TrackMap) -> Vec<FeedEntry> {
    let mut entries = Vec::new();
    for album in &discography.albums {
        entries.extend(album.tracks.iter().map(|t| from_release_track(t, album, tracks)));
    }
    for entry in &discography.singles {
        match entry {
            SinglesEntry::Single(single) => entries.push(from_single(single, tracks)),
            SinglesEntry::Ep(ep) => {
                entries.extend(ep.tracks.iter().map(|t| from_release_track(t, ep, tracks)));
            }
        }
    }

    sort_by_date_desc(&mut entries, |e| e.release_date);

    let mut seen = HashSet::new();
    entries.retain(|e| seen.insert(e.id.clone()));
    entries
}
