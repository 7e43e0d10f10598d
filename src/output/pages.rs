use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

use super::entries::{FeedEntry, SiteInfo};
use super::html::{escape, paragraphs, summary};
use super::rss::audio_mime;

fn meta_property(property: &str, content: &str) -> String {
    format!(
        "    <meta property=\"{property}\" content=\"{}\">\n",
        escape(content)
    )
}

/// Standalone page for one track, suitable for sharing.
pub fn render_page(site: &SiteInfo, entry: &FeedEntry) -> String {
    let title = escape(&entry.title);
    let artist = escape(&site.artist);
    let blurb = summary(&entry.description, 200);
    let audio_url = site.url(&entry.audio_file);
    let cover_url = site.url(&entry.cover_art);

    let mut meta = String::new();
    meta.push_str(&meta_property("og:type", "music.song"));
    meta.push_str(&meta_property("og:title", &entry.title));
    meta.push_str(&meta_property("og:site_name", &site.title));
    meta.push_str(&meta_property("og:url", &site.page_url(&entry.id)));
    if !blurb.is_empty() {
        meta.push_str(&meta_property("og:description", &blurb));
    }
    if !cover_url.is_empty() {
        meta.push_str(&meta_property("og:image", &cover_url));
    }
    if !audio_url.is_empty() {
        meta.push_str(&meta_property("og:audio", &audio_url));
        meta.push_str(&meta_property("og:audio:type", audio_mime(&entry.audio_file)));
    }

    let mut body = String::new();
    if let Some(release) = &entry.release_title {
        body.push_str(&format!("    <p class=\"release\">From {}</p>\n", escape(release)));
    }
    if !cover_url.is_empty() {
        body.push_str(&format!(
            "    <img class=\"cover\" src=\"{}\" alt=\"{title}\">\n",
            escape(&cover_url)
        ));
    }
    if !audio_url.is_empty() {
        body.push_str(&format!(
            "    <audio controls preload=\"none\" src=\"{}\"></audio>\n",
            escape(&audio_url)
        ));
    }
    if !entry.duration.is_empty() {
        body.push_str(&format!(
            "    <p class=\"duration\">{}</p>\n",
            escape(&entry.duration)
        ));
    }
    if !entry.description.is_empty() {
        body.push_str(&format!(
            "    <section class=\"description\">\n{}\n    </section>\n",
            paragraphs(&entry.description)
        ));
    }
    if !entry.lyrics.is_empty() {
        body.push_str(&format!(
            "    <section class=\"lyrics\">\n    <h2>Lyrics</h2>\n{}\n    </section>\n",
            paragraphs(&entry.lyrics)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - {artist}</title>
    <meta name="description" content="{description}">
{meta}    <link rel="alternate" type="application/rss+xml" title="{site_title}" href="{feed}">
</head>
<body>
<main>
    <h1>{title}</h1>
    <p class="artist">{artist}</p>
{body}    <p><a href="{home}">More from {artist}</a></p>
</main>
</body>
</html>
"#,
        lang = escape(&site.language),
        description = escape(&blurb),
        site_title = escape(&site.title),
        feed = escape(&site.url(&site.feed_path)),
        home = escape(&site.url("/")),
    )
}

/// Write `<dir>/<id>.html` for every entry. Returns the number written.
pub fn write_pages(dir: &Path, site: &SiteInfo, entries: &[FeedEntry]) -> Result<usize> {
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    for entry in entries {
        let path = dir.join(format!("{}.html", entry.id));
        fs::write(&path, render_page(site, entry)).map_err(|e| Error::io(&path, e))?;
    }
    tracing::info!(dir = %dir.display(), pages = entries.len(), "wrote track pages");
    Ok(entries.len())
}
