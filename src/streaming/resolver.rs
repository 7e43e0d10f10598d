use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::config::StreamingSettings;
use crate::content::Platform;
use crate::frontmatter::{self, Frontmatter};

use super::apple::AppleMusic;
use super::deezer::Deezer;
use super::provider::{CatalogHttp, CatalogProvider, LookupKind};
use super::spotify::Spotify;
use super::tidal::Tidal;

/// Fills in missing streaming links by searching each configured catalog.
///
/// Links are written into the source markdown file and existing values are
/// never replaced. Lookup failures are logged and skipped.
pub struct StreamingResolver {
    providers: Vec<Box<dyn CatalogProvider>>,
    artist_name: String,
    delay: Duration,
}

impl StreamingResolver {
    pub fn new(
        providers: Vec<Box<dyn CatalogProvider>>,
        artist_name: impl Into<String>,
        delay: Duration,
    ) -> Self {
        Self {
            providers,
            artist_name: artist_name.into(),
            delay,
        }
    }

    /// Build the resolver from settings, authenticating where credentials
    /// exist. `None` when lookups are disabled or no HTTP client can be built.
    pub fn from_settings(settings: &StreamingSettings, artist_name: &str) -> Option<Self> {
        if !settings.enabled {
            tracing::info!("streaming link lookup disabled");
            return None;
        }
        let http = match CatalogHttp::new(Duration::from_secs(settings.timeout_secs)) {
            Ok(http) => http,
            Err(e) => {
                tracing::warn!("streaming link lookup unavailable: {e}");
                return None;
            }
        };

        let mut providers: Vec<Box<dyn CatalogProvider>> = Vec::new();

        if let Some((id, secret)) = settings.spotify_credentials() {
            match Spotify::connect(http.clone(), &id, &secret) {
                Ok(Some(spotify)) => {
                    tracing::info!("Spotify API: authenticated");
                    providers.push(Box::new(spotify));
                }
                Ok(None) => tracing::warn!("Spotify returned no access token"),
                Err(e) => tracing::warn!("could not get Spotify token: {e}"),
            }
        }

        providers.push(Box::new(AppleMusic::new(http.clone())));

        if let Some((id, secret)) = settings.tidal_credentials() {
            match Tidal::connect(http.clone(), &id, &secret, &settings.country_code) {
                Ok(Some(tidal)) => {
                    tracing::info!("Tidal API: authenticated");
                    providers.push(Box::new(tidal));
                }
                Ok(None) => tracing::warn!("Tidal returned no access token"),
                Err(e) => tracing::warn!("could not get Tidal token: {e}"),
            }
        }

        providers.push(Box::new(Deezer::new(http)));

        let artist_name = settings
            .artist_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| artist_name.to_string());

        Some(Self::new(
            providers,
            artist_name,
            Duration::from_millis(settings.request_delay_ms),
        ))
    }

    /// Look up every platform `frontmatter` has no link for and write hits to
    /// `md_path`. Returns the platforms that were linked.
    pub fn link(
        &self,
        md_path: &Path,
        frontmatter: &Frontmatter,
        title: &str,
        kind: LookupKind,
    ) -> Vec<Platform> {
        let mut linked = Vec::new();

        for provider in &self.providers {
            let platform = provider.platform();
            if frontmatter::has_value(frontmatter, platform.field()) {
                continue;
            }

            match provider.lookup(kind, title, &self.artist_name) {
                Ok(Some(url)) => {
                    match frontmatter::set_field_if_absent(md_path, platform.field(), &url) {
                        Ok(true) => {
                            tracing::info!("linked {}: {title} -> {url}", platform.label());
                            linked.push(platform);
                        }
                        Ok(false) => {}
                        Err(e) => tracing::warn!(
                            "could not write {} link to {}: {e}",
                            platform.label(),
                            md_path.display()
                        ),
                    }
                }
                Ok(None) => tracing::debug!("no {} match for '{title}'", platform.label()),
                Err(e) => tracing::warn!("{} lookup failed for '{title}': {e}", platform.label()),
            }

            if provider.rate_limited() && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }

        linked
    }
}
