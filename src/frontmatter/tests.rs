use super::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn mapping(pairs: &[(&str, Value)]) -> Frontmatter {
    let mut m = Frontmatter::new();
    for (k, v) in pairs {
        m.insert(Value::from(*k), v.clone());
    }
    m
}

#[test]
fn parse_splits_frontmatter_and_trims_body() {
    let (fm, body) = parse("---\ntitle: Night Drive\nbpm: 120\n---\n\nSome notes.\n\n");
    assert_eq!(get_string(&fm, "title").as_deref(), Some("Night Drive"));
    assert_eq!(get_string(&fm, "bpm").as_deref(), Some("120"));
    assert_eq!(body, "Some notes.");
}

#[test]
fn parse_without_delimiter_is_all_body() {
    let content = "Just a bio.\n";
    let (fm, body) = parse(content);
    assert!(fm.is_empty());
    assert_eq!(body, content);
}

#[test]
fn parse_without_closing_delimiter_is_all_body() {
    let content = "---\ntitle: Oops\n";
    let (fm, body) = parse(content);
    assert!(fm.is_empty());
    assert_eq!(body, content);
}

#[test]
fn parse_malformed_yaml_degrades_to_body() {
    let content = "---\ntitle: [unclosed\n---\nbody";
    let (fm, body) = parse(content);
    assert!(fm.is_empty());
    assert_eq!(body, content);
}

#[test]
fn parse_non_mapping_yaml_degrades_to_body() {
    let content = "---\n- a\n- b\n---\nbody";
    let (fm, body) = parse(content);
    assert!(fm.is_empty());
    assert_eq!(body, content);
}

#[test]
fn parse_empty_block_gives_empty_mapping() {
    let (fm, body) = parse("---\n---\nBody text");
    assert!(fm.is_empty());
    assert_eq!(body, "Body text");
}

#[test]
fn dates_stay_plain_strings() {
    let (fm, _) = parse("---\nrelease_date: 2024-03-01\n---\n");
    assert_eq!(get_string(&fm, "release_date").as_deref(), Some("2024-03-01"));
}

#[test]
fn write_then_read_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("track.md");

    let fm = mapping(&[
        ("title", Value::from("Glass Harbour")),
        ("duration", Value::from("3:41")),
        ("bpm", Value::from(96)),
        (
            "tags",
            Value::Sequence(vec![Value::from("Ambient"), Value::from("Night")]),
        ),
        ("spotify", Value::from("https://open.spotify.com/track/x")),
    ]);
    write_md_file(&path, &fm, "  A slow one.\n").unwrap();

    let (read_fm, body) = read_md_file(&path).unwrap();
    assert_eq!(read_fm, fm);
    assert_eq!(body, "A slow one.");
}

#[test]
fn render_preserves_key_order() {
    let fm = mapping(&[
        ("title", Value::from("Zed")),
        ("album", Value::from("Alpha")),
    ]);
    let out = render(&fm, "").unwrap();
    let title = out.find("title").unwrap();
    let album = out.find("album").unwrap();
    assert!(title < album);
    assert!(out.starts_with("---\n"));
    assert!(out.ends_with("---\n"));
}

#[test]
fn read_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let (fm, body) = read_md_file(&dir.path().join("nope.md")).unwrap();
    assert!(fm.is_empty());
    assert!(body.is_empty());
}

#[test]
fn set_field_if_absent_never_overwrites() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("track.md");
    std::fs::write(&path, "---\ntitle: Song\nspotify: https://existing\n---\nbody\n").unwrap();

    assert!(!set_field_if_absent(&path, "spotify", "https://new").unwrap());
    assert!(set_field_if_absent(&path, "deezer", "https://deezer").unwrap());

    let (fm, body) = read_md_file(&path).unwrap();
    assert_eq!(get_string(&fm, "spotify").as_deref(), Some("https://existing"));
    assert_eq!(get_string(&fm, "deezer").as_deref(), Some("https://deezer"));
    assert_eq!(body, "body");
}

#[test]
fn set_field_if_absent_fills_blank_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("track.md");
    std::fs::write(&path, "---\ntitle: Song\ntidal: ''\n---\n").unwrap();

    assert!(set_field_if_absent(&path, "tidal", "https://tidal.com/track/1").unwrap());
    let (fm, _) = read_md_file(&path).unwrap();
    assert_eq!(
        get_string(&fm, "tidal").as_deref(),
        Some("https://tidal.com/track/1")
    );
}

#[test]
fn update_field_reports_previous_value() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("track.md");
    std::fs::write(&path, "---\nduration: '3:00'\n---\n").unwrap();

    assert_eq!(update_field(&path, "duration", "3:00").unwrap(), None);
    assert_eq!(
        update_field(&path, "duration", "3:12").unwrap().as_deref(),
        Some("3:00")
    );
    let (fm, _) = read_md_file(&path).unwrap();
    assert_eq!(get_string(&fm, "duration").as_deref(), Some("3:12"));
}

#[test]
fn get_list_accepts_scalar_or_sequence() {
    let (fm, _) = parse("---\nmood: Calm\ntags: [Ambient, 2024]\nempty: ''\n---\n");
    assert_eq!(get_list(&fm, "mood"), vec!["Calm".to_string()]);
    assert_eq!(
        get_list(&fm, "tags"),
        vec!["Ambient".to_string(), "2024".to_string()]
    );
    assert!(get_list(&fm, "empty").is_empty());
    assert!(get_list(&fm, "missing").is_empty());
}
