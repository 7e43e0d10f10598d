use std::collections::HashSet;
use std::path::{Component, Path};

use crate::assemble;
use crate::config::Settings;
use crate::content::{self, Artist, Collection, ContentLayout, Track};
use crate::error::{Error, Result};
use crate::output::{self, SiteInfo};
use crate::streaming::{LookupKind, StreamingResolver};

/// What a build produced. Warnings do not stop a build but are reported
/// through the exit code.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub warnings: Vec<String>,
    pub tracks: usize,
    pub albums: usize,
    pub singles: usize,
    pub links_added: usize,
    pub feed_items: usize,
    pub pages: usize,
}

impl BuildReport {
    pub fn print(&self, output: &Path) {
        println!("Generated: {}", output.display());
        println!("  Albums: {}", self.albums);
        println!("  Singles/EPs: {}", self.singles);
        println!("  Total tracks: {}", self.tracks);
        if self.links_added > 0 {
            println!("  Streaming links added: {}", self.links_added);
        }
        if self.pages > 0 {
            println!("  Feed items: {}, track pages: {}", self.feed_items, self.pages);
        }
        if !self.warnings.is_empty() {
            println!("\nWarnings ({}):", self.warnings.len());
            for warning in &self.warnings {
                println!("  - {warning}");
            }
        }
    }
}

/// Relative path as used on the web: `/` separated, no `.` parts.
fn web_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn site_info(settings: &Settings, layout: &ContentLayout, artist: &Artist) -> SiteInfo {
    SiteInfo {
        title: settings
            .site
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| artist.name.clone()),
        artist: artist.name.clone(),
        bio: artist.bio.clone(),
        site_url: settings.site.site_url.trim().trim_end_matches('/').to_string(),
        language: settings.feed.language.clone(),
        feed_path: web_path(&settings.paths.feed_file),
        pages_path: web_path(&settings.paths.feed_pages_dir),
        image: artist
            .profile_image
            .as_deref()
            .map(|p| layout.asset_path(p))
            .unwrap_or_default(),
    }
}

fn link_tracks<'a>(
    resolver: &StreamingResolver,
    layout: &ContentLayout,
    tracks: impl Iterator<Item = &'a mut Track>,
) -> Result<usize> {
    let mut added = 0;
    for track in tracks {
        let md_path = track.md_path();
        if !md_path.is_file() {
            continue;
        }
        let linked = resolver.link(&md_path, &track.frontmatter, &track.title, LookupKind::Track);
        if !linked.is_empty() {
            added += linked.len();
            let dir = track.dir.clone();
            let duration = std::mem::take(&mut track.duration);
            *track = content::load_track(layout, &dir)?;
            // Keep a probed duration that was not written back.
            if track.duration.is_empty() {
                track.duration = duration;
            }
        }
    }
    Ok(added)
}

fn link_collection(
    resolver: &StreamingResolver,
    layout: &ContentLayout,
    collection: &mut Collection,
) -> Result<usize> {
    let linked = resolver.link(
        &collection.md_path(),
        &collection.frontmatter,
        &collection.title,
        LookupKind::Album,
    );
    if !linked.is_empty() {
        let dir = collection.dir.clone();
        *collection = content::load_collection(layout, &dir)?;
    }
    Ok(linked.len())
}

/// Compile the content tree below `project_dir` and write every output.
pub fn build(project_dir: &Path, settings: &Settings) -> Result<BuildReport> {
    build_with(project_dir, settings, |artist| {
        StreamingResolver::from_settings(&settings.streaming, &artist.name)
    })
}

/// [`build`] with the streaming resolver chosen by `resolver`, which is only
/// called once the music directory and the artist are known.
pub(super) fn build_with(
    project_dir: &Path,
    settings: &Settings,
    resolver: impl FnOnce(&Artist) -> Option<StreamingResolver>,
) -> Result<BuildReport> {
    let layout = ContentLayout::new(project_dir, settings);
    if !layout.music_dir.is_dir() {
        return Err(Error::MissingMusicDir(layout.music_dir));
    }
    tracing::info!("building discography from {}", layout.music_dir.display());

    let mut report = BuildReport::default();
    let artist = content::load_artist(&layout)?;
    let resolver = resolver(&artist);
    let sync = settings.content.sync_durations;

    let mut tracks = content::load_all_tracks(&layout, sync)?;
    tracing::info!("found {} tracks", tracks.len());
    if let Some(resolver) = &resolver {
        report.links_added += link_tracks(resolver, &layout, tracks.values_mut())?;
    }

    let mut collections = Vec::new();
    for dir in content::collection_dirs(&layout) {
        let mut collection = content::load_collection(&layout, &dir)?;
        tracing::info!("processing collection: {}", collection.slug);

        let warnings = assemble::validate_collection(&layout, &collection, &tracks)?;
        if !warnings.is_empty() {
            report.warnings.extend(warnings);
            let known: HashSet<String> = tracks.keys().cloned().collect();
            tracks = content::load_all_tracks(&layout, sync)?;
            collection = content::load_collection(&layout, &dir)?;
            // Placeholder tracks get the same lookup the others had.
            if let Some(resolver) = &resolver {
                let fresh = tracks.values_mut().filter(|t| !known.contains(&t.slug));
                report.links_added += link_tracks(resolver, &layout, fresh)?;
            }
        }
        if let Some(resolver) = &resolver {
            report.links_added += link_collection(resolver, &layout, &mut collection)?;
        }
        collections.push(collection);
    }

    let discography = assemble::assemble_discography(&layout, &artist, &tracks, &collections);
    report.tracks = tracks.len();
    report.albums = discography.albums.len();
    report.singles = discography.singles.len();

    output::write_json(&project_dir.join(&settings.paths.output), &discography)?;

    if settings.feed.enabled {
        let site = site_info(settings, &layout, &artist);
        if site.site_url.is_empty() {
            tracing::warn!("site.site_url is not set; feed links will be site-relative");
        }
        let entries = output::feed_entries(&discography, &tracks);
        output::write_feed(
            &project_dir.join(&settings.paths.feed_file),
            &site,
            &entries,
            settings.feed.max_items,
        )?;
        report.feed_items = entries.len().min(settings.feed.max_items.unwrap_or(usize::MAX));
        report.pages = output::write_pages(
            &project_dir.join(&settings.paths.feed_pages_dir),
            &site,
            &entries,
        )?;
    }

    Ok(report)
}
