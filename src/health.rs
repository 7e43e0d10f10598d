//! Content health report: what is missing before a release looks complete.

use std::collections::HashSet;
use std::fmt;

use crate::content::{self, Collection, ContentLayout, TrackMap};
use crate::error::Result;
use crate::frontmatter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Scope {
    Track,
    Collection,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scope::Track => "track",
            Scope::Collection => "collection",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub scope: Scope,
    pub slug: String,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.severity, self.scope, self.slug, self.message
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct HealthReport {
    pub total_tracks: usize,
    pub total_collections: usize,
    pub total_singles: usize,
    pub issues: Vec<Issue>,
}

impl HealthReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn push(&mut self, severity: Severity, scope: Scope, slug: &str, message: String) {
        self.issues.push(Issue {
            severity,
            scope,
            slug: slug.to_string(),
            message,
        });
    }
}

/// Load the content tree and check it. Never modifies anything.
pub fn health_report(layout: &ContentLayout) -> Result<HealthReport> {
    let tracks = content::load_all_tracks(layout, false)?;
    let collections = content::load_all_collections(layout)?;
    Ok(check(&tracks, &collections))
}

pub fn check(tracks: &TrackMap, collections: &[Collection]) -> HealthReport {
    use Scope::{Collection as C, Track as T};
    use Severity::{Error, Info, Warning};

    let referenced: HashSet<&str> = collections
        .iter()
        .flat_map(|c| c.track_refs.iter().map(String::as_str))
        .collect();

    let mut report = HealthReport {
        total_tracks: tracks.len(),
        total_collections: collections.len(),
        ..HealthReport::default()
    };

    for (slug, track) in tracks {
        let fm = &track.frontmatter;
        let title = &track.title;
        if track.audio_file.is_none() {
            report.push(Error, T, slug, format!("Track \"{title}\" has no audio file"));
        }
        if track.cover_file.is_none() {
            report.push(Warning, T, slug, format!("Track \"{title}\" has no cover art"));
        }
        let instrumental = track
            .tags
            .iter()
            .any(|t| t.trim().eq_ignore_ascii_case("instrumental"));
        if track.lyrics_file.is_none() && !instrumental {
            report.push(Info, T, slug, format!("Track \"{title}\" has no lyrics file"));
        }
        if !frontmatter::has_value(fm, "tags") {
            report.push(Warning, T, slug, format!("Track \"{title}\" has no tags"));
        }
        if !frontmatter::has_value(fm, "duration") {
            report.push(Warning, T, slug, format!("Track \"{title}\" has no duration"));
        }
        if !frontmatter::has_value(fm, "credits") {
            report.push(Info, T, slug, format!("Track \"{title}\" has no credits"));
        }
        if track.description.is_empty() {
            report.push(Info, T, slug, format!("Track \"{title}\" has no description"));
        }
    }

    for collection in collections {
        let fm = &collection.frontmatter;
        let slug = &collection.slug;
        let title = &collection.title;
        if collection.cover_file.is_none() {
            report.push(Error, C, slug, format!("Collection \"{title}\" has no cover art"));
        }
        if !frontmatter::has_value(fm, "release_date") {
            report.push(Warning, C, slug, format!("Collection \"{title}\" has no release date"));
        }
        for track_ref in &collection.track_refs {
            if !tracks.contains_key(track_ref) {
                report.push(
                    Error,
                    C,
                    slug,
                    format!("Collection \"{title}\" references missing track \"{track_ref}\""),
                );
            }
        }
        if !frontmatter::has_value(fm, "tags") {
            report.push(Warning, C, slug, format!("Collection \"{title}\" has no tags"));
        }
    }

    for (slug, track) in tracks.iter().filter(|(s, _)| !referenced.contains(s.as_str())) {
        report.total_singles += 1;
        let fm = &track.frontmatter;
        let title = &track.title;
        if !frontmatter::has_value(fm, "spotify") && !frontmatter::has_value(fm, "apple_music") {
            report.push(Info, T, slug, format!("Single \"{title}\" has no streaming links"));
        }
        if !frontmatter::has_value(fm, "release_date") {
            report.push(Warning, T, slug, format!("Single \"{title}\" has no release date"));
        }
    }

    report
}
