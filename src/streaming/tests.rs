use super::matching::{artist_matches, strip_tracking, titles_match};
use super::provider::{CatalogProvider, LookupKind};
use super::resolver::StreamingResolver;
use super::{apple, deezer, spotify, tidal};
use crate::content::Platform;
use crate::error::{Error, Result};
use crate::frontmatter;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tempfile::tempdir;

const ARTIST: &str = "Mantis Audiogram";

#[test]
fn titles_match_exact_and_parenthetical() {
    assert!(titles_match("Song", "Song"));
    assert!(titles_match("Song", "Song (Live)"));
    assert!(titles_match("  song ", "SONG (2024 Remaster)"));
}

#[test]
fn titles_match_substring_needs_sixty_percent() {
    assert!(!titles_match("Song", "So"));
    assert!(!titles_match("So", "Song"));
    // 5 of 8 characters: 62.5%
    assert!(titles_match("Night Dr", "Night"));
    // 4 of 11 characters
    assert!(!titles_match("Night Drive", "Driv"));
    assert!(!titles_match("Song", "Other"));
}

#[test]
fn artist_must_match_exactly_ignoring_case() {
    assert!(artist_matches(["mantis audiogram"], ARTIST));
    assert!(artist_matches(["Someone", "MANTIS AUDIOGRAM "], ARTIST));
    assert!(!artist_matches(["Mantis Audiogram Tribute"], ARTIST));
    assert!(!artist_matches(Vec::<&str>::new(), ARTIST));
    assert!(!artist_matches(["anyone"], ""));
}

#[test]
fn strip_tracking_cuts_affiliate_suffix() {
    assert_eq!(
        strip_tracking("https://music.apple.com/us/album/x?i=1&uo=4"),
        "https://music.apple.com/us/album/x?i=1"
    );
    assert_eq!(strip_tracking("https://a/b"), "https://a/b");
}

#[test]
fn spotify_pick_requires_artist_and_title() {
    let json = r#"{
        "tracks": {"items": [
            {"name": "Glass Harbour", "artists": [{"name": "Someone Else"}],
             "external_urls": {"spotify": "https://open.spotify.com/track/wrong"}},
            {"name": "Harbour Lights", "artists": [{"name": "Mantis Audiogram"}],
             "external_urls": {"spotify": "https://open.spotify.com/track/other"}},
            {"name": "Glass Harbour (Live)", "artists": [{"name": "Mantis Audiogram"}],
             "external_urls": {"spotify": "https://open.spotify.com/track/right"}}
        ]}
    }"#;
    let response: spotify::SearchResponse = serde_json::from_str(json).unwrap();
    assert_eq!(
        spotify::pick_match(&response, LookupKind::Track, "Glass Harbour", ARTIST).as_deref(),
        Some("https://open.spotify.com/track/right")
    );
    assert_eq!(
        spotify::pick_match(&response, LookupKind::Album, "Glass Harbour", ARTIST),
        None
    );
}

#[test]
fn apple_pick_uses_entity_fields_and_strips_tracking() {
    let json = r#"{
        "resultCount": 2,
        "results": [
            {"artistName": "Mantis Audiogram", "trackName": "First Light",
             "trackViewUrl": "https://music.apple.com/us/song/1?uo=4&x=1&uo=4",
             "collectionName": "First Light - EP",
             "collectionViewUrl": "https://music.apple.com/us/album/2?x=1&uo=4"}
        ]
    }"#;
    let response: apple::SearchResponse = serde_json::from_str(json).unwrap();
    assert_eq!(
        apple::pick_match(&response, LookupKind::Track, "First Light", ARTIST).as_deref(),
        Some("https://music.apple.com/us/song/1?uo=4&x=1")
    );
    // "first light - ep" is 16 chars; "first light" is 11 (68%).
    assert_eq!(
        apple::pick_match(&response, LookupKind::Album, "First Light", ARTIST).as_deref(),
        Some("https://music.apple.com/us/album/2?x=1")
    );
}

#[test]
fn deezer_pick_skips_other_artists() {
    let json = r#"{"data": [
        {"title": "Echoes", "link": "https://www.deezer.com/track/1", "artist": {"name": "Other"}},
        {"title": "Echoes", "link": "https://www.deezer.com/track/2", "artist": {"name": "Mantis Audiogram"}}
    ]}"#;
    let response: deezer::SearchResponse = serde_json::from_str(json).unwrap();
    assert_eq!(
        deezer::pick_match(&response, "Echoes", ARTIST).as_deref(),
        Some("https://www.deezer.com/track/2")
    );
    assert_eq!(deezer::pick_match(&response, "Silence", ARTIST), None);
}

#[test]
fn tidal_search_and_catalog_fallback() {
    let json = r#"{"items": [
        {"id": 11, "title": "Echoes", "artists": [{"name": "Mantis Audiogram"}]},
        {"id": 12, "title": "Night Drive (Extended Mix)", "artists": [{"name": "Mantis Audiogram"}]}
    ]}"#;
    let response: tidal::SearchResponse = serde_json::from_str(json).unwrap();
    assert_eq!(tidal::pick_match(&response, "Echoes", ARTIST), Some(11));
    assert_eq!(tidal::pick_match(&response, "Echoes", "Nobody"), None);

    let catalog = tidal::catalog_from(&response);
    assert_eq!(catalog[1], ("night drive".to_string(), 12));
    assert_eq!(tidal::pick_from_catalog(&catalog, "Night Drive"), Some(12));
    assert_eq!(tidal::pick_from_catalog(&catalog, "Nothing"), None);
}

type CallLog = Rc<RefCell<Vec<(LookupKind, String, String)>>>;

struct FakeProvider {
    platform: Platform,
    answer: std::result::Result<Option<String>, String>,
    calls: CallLog,
}

fn fake(
    platform: Platform,
    answer: std::result::Result<Option<&str>, &str>,
) -> (Box<dyn CatalogProvider>, CallLog) {
    let calls = CallLog::default();
    let provider = FakeProvider {
        platform,
        answer: answer.map(|o| o.map(str::to_string)).map_err(str::to_string),
        calls: Rc::clone(&calls),
    };
    (Box::new(provider), calls)
}

impl CatalogProvider for FakeProvider {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn lookup(&self, kind: LookupKind, title: &str, artist: &str) -> Result<Option<String>> {
        self.calls
            .borrow_mut()
            .push((kind, title.to_string(), artist.to_string()));
        self.answer
            .clone()
            .map_err(|msg| Error::io("catalog", std::io::Error::other(msg)))
    }
}

#[test]
fn resolver_writes_missing_links_and_keeps_existing_ones() {
    let dir = tempdir().unwrap();
    let md = dir.path().join("track.md");
    std::fs::write(
        &md,
        "---\ntitle: Echoes\nspotify: https://open.spotify.com/track/mine\n---\nNotes\n",
    )
    .unwrap();
    let (fm, _) = frontmatter::read_md_file(&md).unwrap();

    let (spotify, spotify_calls) = fake(
        Platform::Spotify,
        Ok(Some("https://open.spotify.com/track/theirs")),
    );
    let (tidal, tidal_calls) = fake(Platform::Tidal, Ok(None));
    let (deezer, _) = fake(Platform::Deezer, Ok(Some("https://www.deezer.com/track/2")));

    let resolver = StreamingResolver::new(vec![spotify, tidal, deezer], ARTIST, Duration::ZERO);
    let linked = resolver.link(&md, &fm, "Echoes", LookupKind::Track);
    assert_eq!(linked, vec![Platform::Deezer]);

    // Existing link: the catalog is not even asked.
    assert!(spotify_calls.borrow().is_empty());
    assert_eq!(
        tidal_calls.borrow()[0],
        (LookupKind::Track, "Echoes".to_string(), ARTIST.to_string())
    );

    let (fm, body) = frontmatter::read_md_file(&md).unwrap();
    assert_eq!(
        frontmatter::get_string(&fm, "spotify").as_deref(),
        Some("https://open.spotify.com/track/mine")
    );
    assert_eq!(
        frontmatter::get_string(&fm, "deezer").as_deref(),
        Some("https://www.deezer.com/track/2")
    );
    assert!(!frontmatter::has_value(&fm, "tidal"));
    assert_eq!(body, "Notes");
}

#[test]
fn resolver_swallows_lookup_errors() {
    let dir = tempdir().unwrap();
    let md = dir.path().join("collection.md");
    std::fs::write(&md, "---\ntitle: First Light\n---\n").unwrap();
    let (fm, _) = frontmatter::read_md_file(&md).unwrap();

    let (broken, broken_calls) = fake(Platform::AppleMusic, Err("connection reset"));
    let (deezer, deezer_calls) = fake(Platform::Deezer, Ok(Some("https://www.deezer.com/album/9")));
    let resolver = StreamingResolver::new(vec![broken, deezer], ARTIST, Duration::ZERO);

    let linked = resolver.link(&md, &fm, "First Light", LookupKind::Album);
    assert_eq!(linked, vec![Platform::Deezer]);
    assert_eq!(broken_calls.borrow().len(), 1);
    assert_eq!(deezer_calls.borrow()[0].0, LookupKind::Album);
}
