use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::content::{Collection, ContentLayout, StreamingLinks, Track, TrackMap};
use crate::duration::{calculate_duration, format_duration};

/// String pairs serialized as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedMap(pub Vec<(String, String)>);

impl OrderedMap {
    /// Only the links that are set, keyed by their JSON names.
    pub fn from_links(links: &StreamingLinks) -> Self {
        Self(
            links
                .present()
                .map(|(p, url)| (p.json_key().to_string(), url.to_string()))
                .collect(),
        )
    }
}

impl Serialize for OrderedMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A track as it appears inside an album or EP.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseTrack {
    #[serde(skip)]
    pub slug: String,
    pub title: String,
    pub duration: String,
    pub bpm: Option<u32>,
    pub key: String,
    pub mood: Vec<String>,
    pub tags: Vec<String>,
    pub description: String,
    pub lyrics: String,
    pub credits: serde_json::Value,
    pub audio_file: String,
    pub wav_file: String,
    pub cover_art: String,
    pub streaming_links: StreamingLinks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waveform: Option<String>,
    pub track_number: usize,
    #[serde(skip)]
    pub release_date: String,
}

/// An album or EP.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRelease {
    pub id: String,
    pub title: String,
    pub year: String,
    pub release_date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub cover_art: String,
    pub cover_art_high: String,
    pub tags: Vec<String>,
    pub streaming_links: OrderedMap,
    pub tracks: Vec<ReleaseTrack>,
    pub total_duration: String,
}

/// A track released on its own.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleRelease {
    #[serde(skip)]
    pub slug: String,
    pub id: String,
    pub title: String,
    pub year: String,
    pub release_date: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: String,
    pub cover_art: String,
    pub cover_art_high: String,
    pub tags: Vec<String>,
    pub streaming_links: OrderedMap,
    pub duration: String,
    pub bpm: Option<u32>,
    pub key: String,
    pub mood: Vec<String>,
    pub lyrics: String,
    pub credits: serde_json::Value,
    pub audio_file: String,
    pub wav_file: String,
    pub waveform: String,
}

/// Entries of the `singles` array: real singles and EPs side by side.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SinglesEntry {
    Single(SingleRelease),
    Ep(CollectionRelease),
}

impl SinglesEntry {
    pub fn release_date(&self) -> &str {
        match self {
            SinglesEntry::Single(s) => &s.release_date,
            SinglesEntry::Ep(e) => &e.release_date,
        }
    }
}

/// The document written to `discography.json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Discography {
    pub artist: String,
    pub bio: String,
    pub social_links: OrderedMap,
    pub albums: Vec<CollectionRelease>,
    pub singles: Vec<SinglesEntry>,
}

/// Public id of a slug: underscores become dashes.
pub fn release_id(slug: &str) -> String {
    slug.replace('_', "-")
}

/// `covers/x.jpg` → `covers/x-hires.jpg`.
pub fn hires_variant(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    match path.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => {
            format!("{stem}-hires.{ext}")
        }
        _ => format!("{path}-hires"),
    }
}

fn waveform_of(audio_path: &str) -> String {
    match audio_path.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains('/') => format!("{stem}.json"),
        _ => format!("{audio_path}.json"),
    }
}

fn asset(layout: &ContentLayout, file: Option<&std::path::PathBuf>) -> String {
    file.map(|f| layout.asset_path(f)).unwrap_or_default()
}

pub fn release_track(
    layout: &ContentLayout,
    track: &Track,
    track_number: usize,
    fallback_cover: &str,
) -> ReleaseTrack {
    let audio_file = asset(layout, track.audio_file.as_ref());
    let cover_art = match asset(layout, track.cover_file.as_ref()) {
        own if !own.is_empty() => own,
        _ => fallback_cover.to_string(),
    };
    ReleaseTrack {
        slug: track.slug.clone(),
        title: track.title.clone(),
        duration: track.duration.clone(),
        bpm: track.bpm,
        key: track.key.clone(),
        mood: track.mood.clone(),
        tags: track.tags.clone(),
        description: track.description.clone(),
        lyrics: track.lyrics.clone(),
        credits: track.credits.clone(),
        wav_file: asset(layout, track.wav_file.as_ref()),
        cover_art,
        streaming_links: track.streaming.clone(),
        waveform: (!audio_file.is_empty()).then(|| waveform_of(&audio_file)),
        audio_file,
        track_number,
        release_date: track.release_date.clone(),
    }
}

/// Build an album/EP entry. References to unknown tracks are skipped.
pub fn assemble_collection(
    layout: &ContentLayout,
    collection: &Collection,
    tracks: &TrackMap,
) -> CollectionRelease {
    let cover_art = asset(layout, collection.cover_file.as_ref());

    let mut release_tracks = Vec::with_capacity(collection.track_refs.len());
    let mut total_secs: u64 = 0;
    for (idx, slug) in collection.track_refs.iter().enumerate() {
        match tracks.get(slug) {
            Some(track) => {
                let mut entry = release_track(layout, track, idx + 1, &cover_art);
                if entry.release_date.is_empty() {
                    entry.release_date = collection.release_date.clone();
                }
                total_secs = total_secs.saturating_add(calculate_duration(&entry.duration));
                release_tracks.push(entry);
            }
            None => tracing::warn!(collection = %collection.slug, "track not found: {slug}"),
        }
    }

    CollectionRelease {
        id: release_id(&collection.slug),
        title: collection.title.clone(),
        year: collection.year(),
        release_date: collection.release_date.clone(),
        kind: collection.kind.as_str().to_string(),
        description: collection.description.clone(),
        cover_art_high: hires_variant(&cover_art),
        cover_art,
        tags: collection.tags.clone(),
        streaming_links: OrderedMap::from_links(&collection.streaming),
        tracks: release_tracks,
        total_duration: format_duration(total_secs),
    }
}

pub fn assemble_single(layout: &ContentLayout, track: &Track) -> SingleRelease {
    let cover_art = asset(layout, track.cover_file.as_ref());
    let audio_file = asset(layout, track.audio_file.as_ref());
    SingleRelease {
        slug: track.slug.clone(),
        id: release_id(&track.slug),
        title: track.title.clone(),
        year: track.year(),
        release_date: track.release_date.clone(),
        kind: "single",
        description: track.description.clone(),
        cover_art_high: hires_variant(&cover_art),
        cover_art,
        tags: track.tags.clone(),
        streaming_links: OrderedMap::from_links(&track.streaming),
        duration: track.duration.clone(),
        bpm: track.bpm,
        key: track.key.clone(),
        mood: track.mood.clone(),
        lyrics: track.lyrics.clone(),
        credits: track.credits.clone(),
        wav_file: asset(layout, track.wav_file.as_ref()),
        waveform: if audio_file.is_empty() {
            String::new()
        } else {
            waveform_of(&audio_file)
        },
        audio_file,
    }
}
