use std::path::PathBuf;

use serde::Serialize;

use crate::frontmatter::{self, Frontmatter};

pub const TRACK_FILE: &str = "track.md";
pub const COLLECTION_FILE: &str = "collection.md";
pub const ARTIST_FILE: &str = "artist.md";

/// Streaming services a release can link to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Spotify,
    AppleMusic,
    Bandcamp,
    Tidal,
    Deezer,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Spotify,
        Platform::AppleMusic,
        Platform::Bandcamp,
        Platform::Tidal,
        Platform::Deezer,
    ];

    /// Frontmatter key.
    pub fn field(self) -> &'static str {
        match self {
            Platform::Spotify => "spotify",
            Platform::AppleMusic => "apple_music",
            Platform::Bandcamp => "bandcamp",
            Platform::Tidal => "tidal",
            Platform::Deezer => "deezer",
        }
    }

    /// Key in the JSON output.
    pub fn json_key(self) -> &'static str {
        match self {
            Platform::AppleMusic => "appleMusic",
            other => other.field(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Spotify => "Spotify",
            Platform::AppleMusic => "Apple Music",
            Platform::Bandcamp => "Bandcamp",
            Platform::Tidal => "Tidal",
            Platform::Deezer => "Deezer",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingLinks {
    pub spotify: String,
    pub apple_music: String,
    pub bandcamp: String,
    pub tidal: String,
    pub deezer: String,
}

impl StreamingLinks {
    pub fn from_frontmatter(fm: &Frontmatter) -> Self {
        let get = |p: Platform| frontmatter::get_string(fm, p.field()).unwrap_or_default();
        Self {
            spotify: get(Platform::Spotify),
            apple_music: get(Platform::AppleMusic),
            bandcamp: get(Platform::Bandcamp),
            tidal: get(Platform::Tidal),
            deezer: get(Platform::Deezer),
        }
    }

    pub fn get(&self, platform: Platform) -> &str {
        match platform {
            Platform::Spotify => &self.spotify,
            Platform::AppleMusic => &self.apple_music,
            Platform::Bandcamp => &self.bandcamp,
            Platform::Tidal => &self.tidal,
            Platform::Deezer => &self.deezer,
        }
    }

    /// Platforms with a non-blank link, in output order.
    pub fn present(&self) -> impl Iterator<Item = (Platform, &str)> {
        Platform::ALL
            .into_iter()
            .map(|p| (p, self.get(p)))
            .filter(|(_, url)| !url.trim().is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct Track {
    pub slug: String,
    pub dir: PathBuf,
    pub frontmatter: Frontmatter,
    pub title: String,
    pub duration: String,
    pub bpm: Option<u32>,
    pub key: String,
    pub mood: Vec<String>,
    pub tags: Vec<String>,
    /// Markdown body of `track.md`.
    pub description: String,
    pub lyrics: String,
    pub credits: serde_json::Value,
    pub audio_file: Option<PathBuf>,
    pub wav_file: Option<PathBuf>,
    pub cover_file: Option<PathBuf>,
    pub lyrics_file: Option<PathBuf>,
    pub release_date: String,
    pub streaming: StreamingLinks,
}

impl Track {
    pub fn md_path(&self) -> PathBuf {
        self.dir.join(TRACK_FILE)
    }

    pub fn year(&self) -> String {
        year_of(&self.release_date)
    }
}

/// How a collection is bucketed in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseKind {
    Album,
    Ep,
    Other(String),
}

impl ReleaseKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "album" => ReleaseKind::Album,
            "ep" => ReleaseKind::Ep,
            _ => ReleaseKind::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReleaseKind::Album => "album",
            ReleaseKind::Ep => "ep",
            ReleaseKind::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Collection {
    pub slug: String,
    pub dir: PathBuf,
    pub frontmatter: Frontmatter,
    pub title: String,
    pub kind: ReleaseKind,
    pub release_date: String,
    /// Track slugs in play order.
    pub track_refs: Vec<String>,
    pub tags: Vec<String>,
    pub description: String,
    pub cover_file: Option<PathBuf>,
    pub streaming: StreamingLinks,
}

impl Collection {
    pub fn md_path(&self) -> PathBuf {
        self.dir.join(COLLECTION_FILE)
    }

    pub fn year(&self) -> String {
        year_of(&self.release_date)
    }
}

pub const DEFAULT_ARTIST_NAME: &str = "Unknown Artist";

/// Social fields read from the artist file, in output order.
pub const SOCIAL_FIELDS: [&str; 9] = [
    "spotify",
    "apple_music",
    "tidal",
    "deezer",
    "bandcamp",
    "soundcloud",
    "youtube",
    "instagram",
    "website",
];

#[derive(Debug, Clone)]
pub struct Artist {
    pub name: String,
    pub bio: String,
    /// `(json key, url)` pairs.
    pub social_links: Vec<(String, String)>,
    pub profile_image: Option<PathBuf>,
}

impl Default for Artist {
    fn default() -> Self {
        Self {
            name: DEFAULT_ARTIST_NAME.to_string(),
            bio: String::new(),
            social_links: Vec::new(),
            profile_image: None,
        }
    }
}

/// Default title for a slug: underscores become spaces, words capitalised.
pub fn title_from_slug(slug: &str) -> String {
    slug.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// First four characters of a release date.
pub fn year_of(release_date: &str) -> String {
    release_date.trim().chars().take(4).collect()
}
