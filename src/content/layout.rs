use std::path::{Component, Path, PathBuf};

use crate::config::Settings;

use super::model::ARTIST_FILE;

/// Where things live inside a project directory.
#[derive(Debug, Clone)]
pub struct ContentLayout {
    pub project_dir: PathBuf,
    pub music_dir: PathBuf,
    pub tracks_dir: PathBuf,
    pub collections_dir: PathBuf,
    pub artist_dir: PathBuf,
    /// Prefix applied to asset paths in the output.
    pub base_url: String,
    pub audio_extensions: Vec<String>,
    pub image_extensions: Vec<String>,
}

impl ContentLayout {
    pub fn new(project_dir: &Path, settings: &Settings) -> Self {
        let music_dir = project_dir.join(&settings.paths.music_dir);
        Self {
            project_dir: project_dir.to_path_buf(),
            tracks_dir: music_dir.join("tracks"),
            collections_dir: music_dir.join("collections"),
            artist_dir: music_dir.join("artist"),
            music_dir,
            base_url: settings.site.base_url.clone(),
            audio_extensions: normalize_extensions(&settings.content.audio_extensions),
            image_extensions: normalize_extensions(&settings.content.image_extensions),
        }
    }

    pub fn track_dir(&self, slug: &str) -> PathBuf {
        self.tracks_dir.join(slug)
    }

    pub fn collection_dir(&self, slug: &str) -> PathBuf {
        self.collections_dir.join(slug)
    }

    /// `music/artist/artist.md`, or the older `music/artist.md` when only
    /// that one exists.
    pub fn artist_file(&self) -> PathBuf {
        let preferred = self.artist_dir.join(ARTIST_FILE);
        let legacy = self.music_dir.join(ARTIST_FILE);
        if !preferred.exists() && legacy.exists() {
            legacy
        } else {
            preferred
        }
    }

    /// Web path for a file below the project directory.
    pub fn asset_path(&self, file: &Path) -> String {
        let rel = file.strip_prefix(&self.project_dir).unwrap_or(file);
        let rel = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<String>>()
            .join("/");

        if self.base_url.is_empty() {
            rel
        } else {
            format!("{}/{}", self.base_url.trim_end_matches('/'), rel)
        }
    }
}

fn normalize_extensions(exts: &[String]) -> Vec<String> {
    exts.iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}
