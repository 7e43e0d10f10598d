use super::*;
use crate::config::Settings;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn layout(root: &Path) -> ContentLayout {
    ContentLayout::new(root, &Settings::default())
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn title_from_slug_capitalises_words() {
    assert_eq!(title_from_slug("night_drive"), "Night Drive");
    assert_eq!(title_from_slug("ECHO"), "Echo");
    assert_eq!(title_from_slug("a__b"), "A B");
}

#[test]
fn slugify_drops_punctuation_and_collapses_underscores() {
    assert_eq!(slugify("  Night Drive  "), "night_drive");
    assert_eq!(slugify("Don't Stop (Remix)"), "dont_stop_remix");
    assert_eq!(slugify("a  -  b"), "a_b");
    assert_eq!(slugify("Café Noir"), "café_noir");
    assert_eq!(slugify("!!!"), "");
}

#[test]
fn capitalize_tags_uppercases_first_letter_only() {
    let tags = vec![
        "ambient".to_string(),
        "lo-fi".to_string(),
        "éthéré".to_string(),
        "  ".to_string(),
        "IDM".to_string(),
    ];
    assert_eq!(
        capitalize_tags(&tags),
        vec![
            "Ambient".to_string(),
            "Lo-fi".to_string(),
            "Éthéré".to_string(),
            "IDM".to_string(),
        ]
    );
}

#[test]
fn created_tracks_store_capitalised_tags() {
    let dir = tempdir().unwrap();
    let l = layout(dir.path());

    let slug = create_track(&l, "Tagged", None, &["ambient".to_string(), "drone".to_string()]).unwrap();
    let track = load_track(&l, &l.track_dir(&slug)).unwrap();
    assert_eq!(track.tags, vec!["Ambient".to_string(), "Drone".to_string()]);

    let bare = create_track(&l, "Bare", None, &[]).unwrap();
    let (fm, _) = crate::frontmatter::read_md_file(&l.track_dir(&bare).join("track.md")).unwrap();
    assert!(fm.get("tags").is_none());
}

#[test]
fn asset_path_is_project_relative_and_prefixed() {
    let dir = tempdir().unwrap();
    let mut l = layout(dir.path());
    let file = l.track_dir("song").join("song.mp3");
    assert_eq!(l.asset_path(&file), "music/tracks/song/song.mp3");

    l.base_url = "https://cdn.example.com/".to_string();
    assert_eq!(
        l.asset_path(&file),
        "https://cdn.example.com/music/tracks/song/song.mp3"
    );
}

#[test]
fn find_file_honours_extension_preference_and_skips_hidden() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("b.wav"), "");
    write(&dir.path().join("a.MP3"), "");
    write(&dir.path().join(".hidden.mp3"), "");

    let found = find_file(dir.path(), &["mp3", "wav"]).unwrap();
    assert_eq!(found.file_name().unwrap(), "a.MP3");
    let found = find_file(dir.path(), &["flac", "wav"]).unwrap();
    assert_eq!(found.file_name().unwrap(), "b.wav");
    assert!(find_file(dir.path(), &["ogg"]).is_none());
}

#[test]
fn load_track_reads_frontmatter_and_files() {
    let dir = tempdir().unwrap();
    let l = layout(dir.path());
    let track_dir = l.track_dir("glass_harbour");
    write(
        &track_dir.join(TRACK_FILE),
        "---\ntitle: Glass Harbour\nduration: '3:41'\nbpm: '96'\nkey: D minor\nmood: Calm\ntags: [Ambient]\ncredits:\n  producer: M\nrelease_date: 2024-05-01\nspotify: https://open.spotify.com/track/1\n---\nWritten at night.\n",
    );
    write(&track_dir.join("glass_harbour.mp3"), "");
    write(&track_dir.join("glass_harbour.wav"), "");
    write(&track_dir.join("glass_harbour.txt"), "  la la la \n");
    write(&track_dir.join("glass_harbour.png"), "");

    let track = load_track(&l, &track_dir).unwrap();
    assert_eq!(track.slug, "glass_harbour");
    assert_eq!(track.title, "Glass Harbour");
    assert_eq!(track.duration, "3:41");
    assert_eq!(track.bpm, Some(96));
    assert_eq!(track.key, "D minor");
    assert_eq!(track.mood, vec!["Calm".to_string()]);
    assert_eq!(track.tags, vec!["Ambient".to_string()]);
    assert_eq!(track.description, "Written at night.");
    assert_eq!(track.lyrics, "la la la");
    assert_eq!(track.credits, serde_json::json!({"producer": "M"}));
    assert_eq!(track.year(), "2024");
    assert_eq!(
        track.audio_file.unwrap().file_name().unwrap(),
        "glass_harbour.mp3"
    );
    assert_eq!(
        track.wav_file.unwrap().file_name().unwrap(),
        "glass_harbour.wav"
    );
    assert!(track.cover_file.is_some());
    assert_eq!(track.streaming.spotify, "https://open.spotify.com/track/1");
    assert_eq!(track.streaming.tidal, "");
}

#[test]
fn load_track_defaults_when_frontmatter_is_missing() {
    let dir = tempdir().unwrap();
    let l = layout(dir.path());
    let track_dir = l.track_dir("quiet_hours");
    fs::create_dir_all(&track_dir).unwrap();

    let track = load_track(&l, &track_dir).unwrap();
    assert_eq!(track.title, "Quiet Hours");
    assert_eq!(track.bpm, None);
    assert_eq!(track.credits, serde_json::json!({}));
    assert!(track.audio_file.is_none());
    assert!(track.lyrics.is_empty());
}

#[test]
fn non_numeric_bpm_is_dropped() {
    let dir = tempdir().unwrap();
    let l = layout(dir.path());
    let track_dir = l.track_dir("fast");
    write(&track_dir.join(TRACK_FILE), "---\nbpm: fast\n---\n");
    assert_eq!(load_track(&l, &track_dir).unwrap().bpm, None);
}

#[test]
fn lyrics_fall_back_to_frontmatter() {
    let dir = tempdir().unwrap();
    let l = layout(dir.path());
    let track_dir = l.track_dir("inline");
    write(&track_dir.join(TRACK_FILE), "---\nlyrics: inline words\n---\n");
    assert_eq!(load_track(&l, &track_dir).unwrap().lyrics, "inline words");
}

#[test]
fn load_all_tracks_is_sorted_and_skips_hidden_dirs() {
    let dir = tempdir().unwrap();
    let l = layout(dir.path());
    for slug in ["zeta", "alpha", ".trash"] {
        write(&l.track_dir(slug).join(TRACK_FILE), "---\n---\n");
    }
    let tracks = load_all_tracks(&l, false).unwrap();
    let slugs: Vec<&str> = tracks.keys().map(String::as_str).collect();
    assert_eq!(slugs, vec!["alpha", "zeta"]);
}

#[test]
fn load_all_tracks_without_tracks_dir_is_empty() {
    let dir = tempdir().unwrap();
    assert!(load_all_tracks(&layout(dir.path()), true).unwrap().is_empty());
}

#[test]
fn duration_sync_keeps_frontmatter_when_audio_is_unreadable() {
    let dir = tempdir().unwrap();
    let l = layout(dir.path());
    let track_dir = l.track_dir("song");
    write(&track_dir.join(TRACK_FILE), "---\nduration: '2:30'\n---\n");
    write(&track_dir.join("song.mp3"), "");

    let tracks = load_all_tracks(&l, true).unwrap();
    assert_eq!(tracks["song"].duration, "2:30");
}

#[test]
fn load_collection_reads_type_and_refs() {
    let dir = tempdir().unwrap();
    let l = layout(dir.path());
    let coll_dir = l.collection_dir("first_light");
    write(
        &coll_dir.join(COLLECTION_FILE),
        "---\ntitle: First Light\ntype: EP\nrelease_date: 2023-10-02\ntracks:\n- one\n- two\n---\nLiner notes.\n",
    );
    write(&coll_dir.join("first_light.jpg"), "");

    let coll = load_collection(&l, &coll_dir).unwrap();
    assert_eq!(coll.title, "First Light");
    assert_eq!(coll.kind, ReleaseKind::Ep);
    assert_eq!(coll.year(), "2023");
    assert_eq!(coll.track_refs, vec!["one".to_string(), "two".to_string()]);
    assert_eq!(coll.description, "Liner notes.");
    assert!(coll.cover_file.is_some());
}

#[test]
fn collections_without_markdown_are_skipped() {
    let dir = tempdir().unwrap();
    let l = layout(dir.path());
    write(&l.collection_dir("real").join(COLLECTION_FILE), "---\ntitle: Real\n---\n");
    fs::create_dir_all(l.collection_dir("empty")).unwrap();

    let colls = load_all_collections(&l).unwrap();
    assert_eq!(colls.len(), 1);
    assert_eq!(colls[0].slug, "real");
    assert_eq!(colls[0].kind, ReleaseKind::Album);
}

#[test]
fn release_kind_parsing() {
    assert_eq!(ReleaseKind::parse(""), ReleaseKind::Album);
    assert_eq!(ReleaseKind::parse("Album"), ReleaseKind::Album);
    assert_eq!(ReleaseKind::parse("ep"), ReleaseKind::Ep);
    assert_eq!(
        ReleaseKind::parse("Compilation"),
        ReleaseKind::Other("Compilation".to_string())
    );
}

#[test]
fn load_artist_prefers_artist_dir_and_maps_social_keys() {
    let dir = tempdir().unwrap();
    let l = layout(dir.path());
    write(
        &l.artist_dir.join(ARTIST_FILE),
        "---\nname: Mantis Audiogram\napple_music: https://music.apple.com/a\nwebsite: https://example.com\nyoutube: ''\n---\nBio here.\n",
    );
    write(&l.music_dir.join(ARTIST_FILE), "---\nname: Legacy\n---\n");
    write(&l.artist_dir.join("profile.png"), "");

    let artist = load_artist(&l).unwrap();
    assert_eq!(artist.name, "Mantis Audiogram");
    assert_eq!(artist.bio, "Bio here.");
    assert_eq!(
        artist.social_links,
        vec![
            ("appleMusic".to_string(), "https://music.apple.com/a".to_string()),
            ("website".to_string(), "https://example.com".to_string()),
        ]
    );
    assert!(artist.profile_image.is_some());
}

#[test]
fn load_artist_falls_back_to_legacy_location_then_default() {
    let dir = tempdir().unwrap();
    let l = layout(dir.path());
    assert_eq!(load_artist(&l).unwrap().name, DEFAULT_ARTIST_NAME);

    write(&l.music_dir.join(ARTIST_FILE), "---\nname: Legacy\n---\n");
    assert_eq!(load_artist(&l).unwrap().name, "Legacy");
}

#[test]
fn create_track_writes_markdown_and_rejects_duplicates() {
    let dir = tempdir().unwrap();
    let l = layout(dir.path());

    let slug = create_track(&l, "Night Drive", None, &[]).unwrap();
    assert_eq!(slug, "night_drive");
    let track = load_track(&l, &l.track_dir(&slug)).unwrap();
    assert_eq!(track.title, "Night Drive");

    assert!(matches!(
        create_track(&l, "Night Drive", None, &[]),
        Err(crate::error::Error::AlreadyExists { .. })
    ));
    assert!(matches!(
        create_track(&l, "   ", None, &[]),
        Err(crate::error::Error::EmptyTitle)
    ));
    assert!(matches!(
        create_track(&l, "???", None, &[]),
        Err(crate::error::Error::InvalidSlug(_))
    ));
}

#[test]
fn create_and_reorder_collection() {
    let dir = tempdir().unwrap();
    let l = layout(dir.path());

    let slug = create_collection(&l, "First Light", &ReleaseKind::Ep, Some("fl"), &[]).unwrap();
    assert_eq!(slug, "fl");
    let coll = load_collection(&l, &l.collection_dir("fl")).unwrap();
    assert_eq!(coll.kind, ReleaseKind::Ep);
    assert!(coll.track_refs.is_empty());

    reorder_collection(&l, "fl", &["b".to_string(), "a".to_string()]).unwrap();
    let coll = load_collection(&l, &l.collection_dir("fl")).unwrap();
    assert_eq!(coll.track_refs, vec!["b".to_string(), "a".to_string()]);
    assert_eq!(coll.title, "First Light");

    assert!(matches!(
        reorder_collection(&l, "missing", &[]),
        Err(crate::error::Error::NotFound { .. })
    ));
}

#[test]
fn save_lyrics_writes_and_removes() {
    let dir = tempdir().unwrap();
    let l = layout(dir.path());
    let slug = create_track(&l, "Words", None, &[]).unwrap();
    let path = l.track_dir(&slug).join("words.txt");

    save_lyrics(&l, &slug, "first line\n").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "first line\n");

    save_lyrics(&l, &slug, "   ").unwrap();
    assert!(!path.exists());

    assert!(save_lyrics(&l, "ghost", "x").is_err());
}
