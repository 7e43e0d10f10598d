use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings for the compiler.
///
/// File format: TOML
/// Path: `MANTIS_CONFIG_PATH`, else `<project>/mantis.toml`, else
/// `$XDG_CONFIG_HOME/mantis/config.toml` or `~/.config/mantis/config.toml`.
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MANTIS__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub content: ContentSettings,
    pub site: SiteSettings,
    pub streaming: StreamingSettings,
    pub feed: FeedSettings,
    pub deploy: DeploySettings,
}

/// Locations of inputs and outputs, relative to the project directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub music_dir: PathBuf,
    pub output: PathBuf,
    pub feed_file: PathBuf,
    pub feed_pages_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            music_dir: PathBuf::from("music"),
            output: PathBuf::from("data").join("discography.json"),
            feed_file: PathBuf::from("feed.rss"),
            feed_pages_dir: PathBuf::from("feed"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    /// Audio extensions in order of preference for the streamed file
    /// (case-insensitive, without dot).
    pub audio_extensions: Vec<String>,
    /// Extensions treated as cover art.
    pub image_extensions: Vec<String>,
    /// Read real durations from audio headers and write them back.
    pub sync_durations: bool,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            audio_extensions: vec!["mp3".into(), "m4a".into(), "flac".into(), "wav".into()],
            image_extensions: vec![
                "jpg".into(),
                "jpeg".into(),
                "png".into(),
                "gif".into(),
                "webp".into(),
            ],
            sync_durations: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Prefix for asset paths in the JSON output. Empty keeps paths relative.
    pub base_url: String,
    /// Public address of the site, used for feed and page links.
    pub site_url: String,
    /// Feed/page title. Falls back to the artist name.
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamingSettings {
    /// Look up missing streaming links during a build.
    pub enabled: bool,
    /// Artist name to match in catalog results. Falls back to the artist file.
    pub artist_name: Option<String>,
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub tidal_client_id: String,
    pub tidal_client_secret: String,
    /// Tidal catalog region.
    pub country_code: String,
    /// Pause after each request to rate-limited catalogs (milliseconds).
    pub request_delay_ms: u64,
    /// HTTP timeout per request (seconds).
    pub timeout_secs: u64,
}

impl Default for StreamingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            artist_name: None,
            spotify_client_id: String::new(),
            spotify_client_secret: String::new(),
            tidal_client_id: String::new(),
            tidal_client_secret: String::new(),
            country_code: "US".to_string(),
            request_delay_ms: 300,
            timeout_secs: 10,
        }
    }
}

impl StreamingSettings {
    /// Spotify credentials, falling back to `SPOTIFY_CLIENT_ID` /
    /// `SPOTIFY_CLIENT_SECRET`.
    pub fn spotify_credentials(&self) -> Option<(String, String)> {
        credentials(
            &self.spotify_client_id,
            &self.spotify_client_secret,
            "SPOTIFY_CLIENT_ID",
            "SPOTIFY_CLIENT_SECRET",
        )
    }

    /// Tidal credentials, falling back to `TIDAL_CLIENT_ID` /
    /// `TIDAL_CLIENT_SECRET`.
    pub fn tidal_credentials(&self) -> Option<(String, String)> {
        credentials(
            &self.tidal_client_id,
            &self.tidal_client_secret,
            "TIDAL_CLIENT_ID",
            "TIDAL_CLIENT_SECRET",
        )
    }
}

fn credentials(id: &str, secret: &str, id_var: &str, secret_var: &str) -> Option<(String, String)> {
    let pick = |value: &str, var: &str| {
        if value.trim().is_empty() {
            std::env::var(var).unwrap_or_default()
        } else {
            value.trim().to_string()
        }
    };
    let id = pick(id, id_var);
    let secret = pick(secret, secret_var);
    if id.is_empty() || secret.is_empty() {
        None
    } else {
        Some((id, secret))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// Write `feed.rss` and the per-track pages.
    pub enabled: bool,
    /// Channel language tag.
    pub language: String,
    /// Cap on feed items, newest first.
    pub max_items: Option<usize>,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            language: "en".to_string(),
            max_items: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeploySettings {
    /// rsync destination, e.g. `user@host:/var/www/site/`.
    pub destination: String,
    /// rsync exclude file, relative to the project directory.
    pub exclude_file: PathBuf,
    /// Entries of the project directory that are uploaded.
    pub include: Vec<PathBuf>,
}

pub const PLACEHOLDER_DESTINATION: &str = "user@server.com:/var/www/music.example.com/";

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            destination: String::new(),
            exclude_file: PathBuf::from(".deployignore"),
            include: ["index.html", "feed.rss", "feed", "js", "css", "data", "music"]
                .into_iter()
                .map(PathBuf::from)
                .collect(),
        }
    }
}
