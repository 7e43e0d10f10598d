use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Error, Result};

use super::entries::{FeedEntry, SiteInfo};
use super::html::{cdata, escape, paragraphs, summary};
use super::json::ensure_parent;

const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";
const ITUNES_NS: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";
const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// RFC 2822 timestamp at midnight UTC.
pub fn rfc2822(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().to_rfc2822())
        .unwrap_or_default()
}

pub fn audio_mime(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "m4a" | "mp4" | "aac" => "audio/mp4",
        "flac" => "audio/flac",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        _ => "application/octet-stream",
    }
}

fn item_html(entry: &FeedEntry) -> String {
    let mut html = String::new();
    if let Some(release) = &entry.release_title {
        let _ = writeln!(html, "<p><em>From {}</em></p>", escape(release));
    }
    if !entry.description.is_empty() {
        let _ = writeln!(html, "{}", paragraphs(&entry.description));
    }
    if !entry.lyrics.is_empty() {
        let _ = writeln!(html, "<h3>Lyrics</h3>\n{}", paragraphs(&entry.lyrics));
    }
    html
}

fn render_item(out: &mut String, site: &SiteInfo, entry: &FeedEntry) {
    let link = escape(&site.page_url(&entry.id));
    let _ = writeln!(out, "    <item>");
    let _ = writeln!(out, "      <title>{}</title>", escape(&entry.title));
    let _ = writeln!(out, "      <link>{link}</link>");
    let _ = writeln!(out, "      <guid isPermaLink=\"true\">{link}</guid>");
    if let Some(date) = entry.release_date {
        let _ = writeln!(out, "      <pubDate>{}</pubDate>", rfc2822(date));
    }
    if !entry.description.is_empty() {
        let _ = writeln!(
            out,
            "      <description>{}</description>",
            escape(&summary(&entry.description, 300))
        );
    }
    if !entry.audio_file.is_empty() {
        let _ = writeln!(
            out,
            "      <enclosure url=\"{}\" length=\"{}\" type=\"{}\"/>",
            escape(&site.url(&entry.audio_file)),
            entry.audio_length,
            audio_mime(&entry.audio_file)
        );
    }
    if !entry.duration.is_empty() {
        let _ = writeln!(
            out,
            "      <itunes:duration>{}</itunes:duration>",
            escape(&entry.duration)
        );
    }
    if !entry.cover_art.is_empty() {
        let _ = writeln!(
            out,
            "      <itunes:image href=\"{}\"/>",
            escape(&site.url(&entry.cover_art))
        );
    }
    let _ = writeln!(
        out,
        "      <content:encoded>{}</content:encoded>",
        cdata(item_html(entry).trim_end())
    );
    let _ = writeln!(out, "    </item>");
}

/// Render the RSS 2.0 document. `entries` are expected newest first;
/// `max_items` keeps only the leading ones.
pub fn render_feed(site: &SiteInfo, entries: &[FeedEntry], max_items: Option<usize>) -> String {
    let entries = match max_items {
        Some(max) => &entries[..entries.len().min(max)],
        None => entries,
    };

    let mut out = String::new();
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        out,
        r#"<rss version="2.0" xmlns:content="{CONTENT_NS}" xmlns:itunes="{ITUNES_NS}" xmlns:atom="{ATOM_NS}">"#
    );
    let _ = writeln!(out, "  <channel>");
    let _ = writeln!(out, "    <title>{}</title>", escape(&site.title));
    let _ = writeln!(out, "    <link>{}</link>", escape(&site.url("/")));
    let _ = writeln!(
        out,
        "    <description>{}</description>",
        escape(&summary(&site.bio, 1000))
    );
    let _ = writeln!(out, "    <language>{}</language>", escape(&site.language));
    let _ = writeln!(
        out,
        r#"    <atom:link href="{}" rel="self" type="application/rss+xml"/>"#,
        escape(&site.url(&site.feed_path))
    );
    let _ = writeln!(out, "    <itunes:author>{}</itunes:author>", escape(&site.artist));
    if !site.image.is_empty() {
        let image = escape(&site.url(&site.image));
        let _ = writeln!(out, "    <itunes:image href=\"{image}\"/>");
        let _ = writeln!(
            out,
            "    <image><url>{image}</url><title>{}</title><link>{}</link></image>",
            escape(&site.title),
            escape(&site.url("/"))
        );
    }
    if let Some(newest) = entries.iter().find_map(|e| e.release_date) {
        let _ = writeln!(out, "    <lastBuildDate>{}</lastBuildDate>", rfc2822(newest));
    }
    for entry in entries {
        render_item(&mut out, site, entry);
    }
    let _ = writeln!(out, "  </channel>");
    let _ = writeln!(out, "</rss>");
    out
}

pub fn write_feed(
    path: &Path,
    site: &SiteInfo,
    entries: &[FeedEntry],
    max_items: Option<usize>,
) -> Result<()> {
    ensure_parent(path)?;
    let xml = render_feed(site, entries, max_items);
    fs::write(path, xml).map_err(|e| Error::io(path, e))?;
    tracing::info!(path = %path.display(), items = entries.len().min(max_items.unwrap_or(usize::MAX)), "wrote feed");
    Ok(())
}
