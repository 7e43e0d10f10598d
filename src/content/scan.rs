use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use walkdir::WalkDir;

use crate::duration;
use crate::error::{Error, Result};
use crate::frontmatter::{self, Frontmatter};

use super::layout::ContentLayout;
use super::model::{
    Artist, COLLECTION_FILE, Collection, DEFAULT_ARTIST_NAME, Platform, ReleaseKind,
    SOCIAL_FIELDS, StreamingLinks, TRACK_FILE, Track, title_from_slug,
};

pub type TrackMap = BTreeMap<String, Track>;

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Immediate entries of `dir`, sorted by name, hidden ones skipped.
fn entries(dir: &Path, want_dirs: bool) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e.path()))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir() == want_dirs)
        .map(|e| e.into_path())
        .collect()
}

pub fn child_dirs(dir: &Path) -> Vec<PathBuf> {
    entries(dir, true)
}

pub fn child_files(dir: &Path) -> Vec<PathBuf> {
    entries(dir, false)
}

/// First visible file in `dir` whose extension matches, trying `extensions`
/// in order.
pub fn find_file<S: AsRef<str>>(dir: &Path, extensions: &[S]) -> Option<PathBuf> {
    let files = child_files(dir);
    extensions.iter().find_map(|ext| {
        files
            .iter()
            .find(|f| has_extension(f, ext.as_ref()))
            .cloned()
    })
}

fn slug_of(dir: &Path) -> String {
    dir.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn parse_bpm(fm: &Frontmatter) -> Option<u32> {
    match fm.get("bpm")? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn credits_of(fm: &Frontmatter) -> serde_json::Value {
    match fm.get("credits") {
        None => serde_json::Value::Object(Default::default()),
        Some(v) => serde_json::to_value(v).unwrap_or_else(|e| {
            tracing::warn!("credits cannot be represented as JSON: {e}");
            serde_json::Value::Object(Default::default())
        }),
    }
}

pub fn load_track(layout: &ContentLayout, dir: &Path) -> Result<Track> {
    let slug = slug_of(dir);
    let (fm, description) = frontmatter::read_md_file(&dir.join(TRACK_FILE))?;

    let audio_file = find_file(dir, &layout.audio_extensions);
    let wav_file = find_file(dir, &["wav"]);
    let cover_file = find_file(dir, &layout.image_extensions);
    let lyrics_file = find_file(dir, &["txt"]);

    let lyrics = match &lyrics_file {
        Some(path) => read_lossy(path)?.trim().to_string(),
        None => String::new(),
    };
    let lyrics = if lyrics.is_empty() {
        frontmatter::get_string(&fm, "lyrics").unwrap_or_default()
    } else {
        lyrics
    };

    Ok(Track {
        title: frontmatter::get_non_empty(&fm, "title").unwrap_or_else(|| title_from_slug(&slug)),
        duration: frontmatter::get_string(&fm, "duration").unwrap_or_default(),
        bpm: parse_bpm(&fm),
        key: frontmatter::get_string(&fm, "key").unwrap_or_default(),
        mood: frontmatter::get_list(&fm, "mood"),
        tags: frontmatter::get_list(&fm, "tags"),
        lyrics,
        credits: credits_of(&fm),
        release_date: frontmatter::get_string(&fm, "release_date").unwrap_or_default(),
        streaming: StreamingLinks::from_frontmatter(&fm),
        description,
        audio_file,
        wav_file,
        cover_file,
        lyrics_file,
        frontmatter: fm,
        dir: dir.to_path_buf(),
        slug,
    })
}

/// Load every track below `tracks/`, keyed and ordered by slug.
///
/// With `sync_durations`, the real length of each track's audio file
/// replaces a stale `duration` in `track.md`.
pub fn load_all_tracks(layout: &ContentLayout, sync_durations: bool) -> Result<TrackMap> {
    let mut tracks = TrackMap::new();
    for dir in child_dirs(&layout.tracks_dir) {
        let mut track = load_track(layout, &dir)?;
        if sync_durations {
            sync_duration(&mut track)?;
        }
        tracks.insert(track.slug.clone(), track);
    }
    tracing::debug!(count = tracks.len(), "loaded tracks");
    Ok(tracks)
}

fn sync_duration(track: &mut Track) -> Result<()> {
    let Some(audio) = &track.audio_file else {
        return Ok(());
    };
    let Some(probed) = duration::probe_audio_duration(audio) else {
        return Ok(());
    };

    let md_path = track.md_path();
    if md_path.is_file() {
        if let Some(old) = frontmatter::update_field(&md_path, "duration", &probed)? {
            let old = if old.is_empty() { "(empty)" } else { old.as_str() };
            tracing::info!("updated duration in {}/{TRACK_FILE}: {old} -> {probed}", track.slug);
            track
                .frontmatter
                .insert(Value::from("duration"), Value::from(probed.as_str()));
        }
    }
    track.duration = probed;
    Ok(())
}

pub fn load_collection(layout: &ContentLayout, dir: &Path) -> Result<Collection> {
    let slug = slug_of(dir);
    let (fm, description) = frontmatter::read_md_file(&dir.join(COLLECTION_FILE))?;
    let kind = ReleaseKind::parse(&frontmatter::get_string(&fm, "type").unwrap_or_default());

    Ok(Collection {
        title: frontmatter::get_non_empty(&fm, "title").unwrap_or_else(|| slug.clone()),
        kind,
        release_date: frontmatter::get_string(&fm, "release_date").unwrap_or_default(),
        track_refs: frontmatter::get_list(&fm, "tracks"),
        tags: frontmatter::get_list(&fm, "tags"),
        cover_file: find_file(dir, &layout.image_extensions),
        streaming: StreamingLinks::from_frontmatter(&fm),
        description,
        frontmatter: fm,
        dir: dir.to_path_buf(),
        slug,
    })
}

/// Collection directories that carry a `collection.md`, sorted by slug.
pub fn collection_dirs(layout: &ContentLayout) -> Vec<PathBuf> {
    child_dirs(&layout.collections_dir)
        .into_iter()
        .filter(|dir| {
            let has_md = dir.join(COLLECTION_FILE).is_file();
            if !has_md {
                tracing::debug!(dir = %dir.display(), "skipping collection without {COLLECTION_FILE}");
            }
            has_md
        })
        .collect()
}

pub fn load_all_collections(layout: &ContentLayout) -> Result<Vec<Collection>> {
    collection_dirs(layout)
        .iter()
        .map(|dir| load_collection(layout, dir))
        .collect()
}

pub fn load_artist(layout: &ContentLayout) -> Result<Artist> {
    let (fm, bio) = frontmatter::read_md_file(&layout.artist_file())?;

    let social_links = SOCIAL_FIELDS
        .iter()
        .filter_map(|field| {
            let url = frontmatter::get_non_empty(&fm, field)?;
            let key = if *field == Platform::AppleMusic.field() {
                Platform::AppleMusic.json_key().to_string()
            } else {
                field.replace('_', "")
            };
            Some((key, url))
        })
        .collect();

    let profile_image = layout
        .image_extensions
        .iter()
        .map(|ext| layout.artist_dir.join(format!("profile.{ext}")))
        .find(|p| p.is_file());

    Ok(Artist {
        name: frontmatter::get_non_empty(&fm, "name")
            .unwrap_or_else(|| DEFAULT_ARTIST_NAME.to_string()),
        bio,
        social_links,
        profile_image,
    })
}
