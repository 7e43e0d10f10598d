use std::fs::{self, OpenOptions};
use std::path::Path;

use serde_yaml::Value;

use crate::content::{self, Collection, ContentLayout, TRACK_FILE, TrackMap};
use crate::error::{Error, Result};
use crate::frontmatter::{self, Frontmatter};

/// Create an empty file unless something is already there.
fn touch(path: &Path) -> Result<()> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|e| Error::io(path, e))
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
}

/// Make a collection buildable by filling gaps with empty placeholder files.
///
/// A missing cover becomes `<slug>.jpg`. Only references absent from
/// `tracks` are repaired: an existing but unloaded track directory without
/// audio gets `<ref>.mp3`, and an unknown track gets a whole directory with
/// a minimal `track.md`. Loaded tracks are never touched, even without
/// audio. Every placeholder is reported in the returned warnings; callers
/// reload tracks when any were created.
pub fn validate_collection(
    layout: &ContentLayout,
    collection: &Collection,
    tracks: &TrackMap,
) -> Result<Vec<String>> {
    let mut warnings = Vec::new();
    let slug = &collection.slug;

    if collection.cover_file.is_none() {
        let name = format!("{slug}.jpg");
        touch(&collection.dir.join(&name))?;
        warnings.push(format!("created placeholder cover: {slug}/{name}"));
    }

    for track_ref in &collection.track_refs {
        if tracks.contains_key(track_ref) {
            continue;
        }
        if !is_plain_name(track_ref) {
            warnings.push(format!(
                "collection {slug} references invalid track name '{track_ref}'"
            ));
            continue;
        }

        let dir = layout.track_dir(track_ref);
        let audio = dir.join(format!("{track_ref}.mp3"));
        if dir.is_dir() {
            if content::find_file(&dir, &layout.audio_extensions).is_none() {
                touch(&audio)?;
                warnings.push(format!(
                    "created placeholder audio: tracks/{track_ref}/{track_ref}.mp3"
                ));
            }
        } else {
            fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
            let mut fm = Frontmatter::new();
            fm.insert(Value::from("title"), Value::from(track_ref.as_str()));
            frontmatter::write_md_file(&dir.join(TRACK_FILE), &fm, "")?;
            touch(&audio)?;
            warnings.push(format!("created placeholder track: tracks/{track_ref}/"));
        }
    }

    for warning in &warnings {
        tracing::warn!(collection = %slug, "{warning}");
    }
    Ok(warnings)
}
