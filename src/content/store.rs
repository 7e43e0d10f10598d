//! Filesystem edits the admin front end performs on the content tree.

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::frontmatter::{self, Frontmatter};

use super::layout::ContentLayout;
use super::model::{COLLECTION_FILE, ReleaseKind, TRACK_FILE};

/// Turn a title into a directory-safe slug: lowercase, words joined by
/// single underscores, punctuation dropped.
pub fn slugify(title: &str) -> String {
    let cleaned: String = title
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();

    cleaned
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Upper-case the first character of every tag, keeping the rest as typed.
/// Blank tags are dropped.
pub fn capitalize_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| {
            let mut chars = t.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

fn insert_tags(fm: &mut Frontmatter, tags: &[String]) {
    let tags = capitalize_tags(tags);
    if !tags.is_empty() {
        let tags = tags.into_iter().map(Value::from).collect();
        fm.insert(Value::from("tags"), Value::Sequence(tags));
    }
}

fn resolve_slug(title: &str, slug: Option<&str>) -> Result<(String, String)> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::EmptyTitle);
    }
    let slug = match slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => slugify(title),
    };
    if slug.is_empty() || slug.starts_with('.') || slug.contains(['/', '\\']) {
        return Err(Error::InvalidSlug(slug));
    }
    Ok((title.to_string(), slug))
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Create `tracks/<slug>/track.md` for a new track and return the slug.
pub fn create_track(
    layout: &ContentLayout,
    title: &str,
    slug: Option<&str>,
    tags: &[String],
) -> Result<String> {
    let (title, slug) = resolve_slug(title, slug)?;
    let dir = layout.track_dir(&slug);
    if dir.exists() {
        return Err(Error::AlreadyExists { kind: "track", slug });
    }
    create_dir(&dir)?;

    let mut fm = Frontmatter::new();
    fm.insert(Value::from("title"), Value::from(title));
    insert_tags(&mut fm, tags);
    frontmatter::write_md_file(&dir.join(TRACK_FILE), &fm, "")?;
    tracing::info!(%slug, "created track");
    Ok(slug)
}

/// Create `collections/<slug>/collection.md` with an empty track list.
pub fn create_collection(
    layout: &ContentLayout,
    title: &str,
    kind: &ReleaseKind,
    slug: Option<&str>,
    tags: &[String],
) -> Result<String> {
    let (title, slug) = resolve_slug(title, slug)?;
    let dir = layout.collection_dir(&slug);
    if dir.exists() {
        return Err(Error::AlreadyExists {
            kind: "collection",
            slug,
        });
    }
    create_dir(&dir)?;

    let mut fm = Frontmatter::new();
    fm.insert(Value::from("title"), Value::from(title));
    fm.insert(Value::from("type"), Value::from(kind.as_str()));
    fm.insert(Value::from("tracks"), Value::Sequence(Vec::new()));
    insert_tags(&mut fm, tags);
    frontmatter::write_md_file(&dir.join(COLLECTION_FILE), &fm, "")?;
    tracing::info!(%slug, "created collection");
    Ok(slug)
}

/// Replace a collection's track list, keeping every other field and the body.
pub fn reorder_collection(layout: &ContentLayout, slug: &str, order: &[String]) -> Result<()> {
    let md_path = layout.collection_dir(slug).join(COLLECTION_FILE);
    if !md_path.is_file() {
        return Err(Error::NotFound {
            kind: "collection",
            slug: slug.to_string(),
        });
    }
    let (mut fm, body) = frontmatter::read_md_file(&md_path)?;
    let tracks = order.iter().map(|s| Value::from(s.as_str())).collect();
    fm.insert(Value::from("tracks"), Value::Sequence(tracks));
    frontmatter::write_md_file(&md_path, &fm, &body)
}

/// Write `tracks/<slug>/<slug>.txt`; blank lyrics remove the file.
pub fn save_lyrics(layout: &ContentLayout, slug: &str, lyrics: &str) -> Result<()> {
    let dir = layout.track_dir(slug);
    if !dir.is_dir() {
        return Err(Error::NotFound {
            kind: "track",
            slug: slug.to_string(),
        });
    }
    let path = dir.join(format!("{slug}.txt"));
    if !lyrics.trim().is_empty() {
        fs::write(&path, lyrics).map_err(|e| Error::io(&path, e))
    } else if path.exists() {
        fs::remove_file(&path).map_err(|e| Error::io(&path, e))
    } else {
        Ok(())
    }
}
