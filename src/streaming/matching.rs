/// Minimum length of the shorter title, relative to the longer one, for a
/// substring hit to count.
const MIN_SUBSTRING_RATIO: f64 = 0.6;

/// Compare a local title with a catalog title.
///
/// The catalog title is cut at its first `(` so "Song (Live)" or
/// "Song (2024 Remaster)" compare as "Song". Equal titles match; otherwise
/// one must contain the other and the shorter must be at least 60% as long
/// as the longer.
pub fn titles_match(search_title: &str, result_title: &str) -> bool {
    let a = search_title.trim().to_lowercase();
    let b = result_title
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    if a == b {
        return true;
    }
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a.contains(&b) || b.contains(&a) {
        let (la, lb) = (a.chars().count(), b.chars().count());
        let longer = la.max(lb) as f64;
        let shorter = la.min(lb) as f64;
        return shorter >= longer * MIN_SUBSTRING_RATIO;
    }
    false
}

/// Whether any credited artist is `artist` (case-insensitive).
pub fn artist_matches<'a, I>(credited: I, artist: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted = artist.trim().to_lowercase();
    !wanted.is_empty()
        && credited
            .into_iter()
            .any(|name| name.trim().to_lowercase() == wanted)
}

/// Drop the affiliate tracking suffix iTunes appends to store URLs.
pub fn strip_tracking(url: &str) -> &str {
    match url.find("&uo=") {
        Some(i) => &url[..i],
        None => url,
    }
}
