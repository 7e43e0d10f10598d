//! `M:SS` durations as stored in track frontmatter.

use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;

/// Parse an `M:SS` string into seconds.
///
/// Anything that is not exactly two colon-separated integers yields 0.
pub fn calculate_duration(duration: &str) -> u64 {
    let duration = duration.trim();
    if duration.is_empty() {
        return 0;
    }
    let mut parts = duration.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(mins), Some(secs), None) => {
            match (mins.trim().parse::<u64>(), secs.trim().parse::<u64>()) {
                (Ok(m), Ok(s)) => m.checked_mul(60).and_then(|v| v.checked_add(s)).unwrap_or(0),
                _ => 0,
            }
        }
        _ => 0,
    }
}

/// Format seconds as `M:SS`.
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Read the playing time of an audio file from its container headers.
pub fn probe_audio_duration(path: &Path) -> Option<String> {
    match lofty::read_from_path(path) {
        Ok(tagged) => {
            let length: Duration = tagged.properties().duration();
            Some(format_duration(length.as_secs()))
        }
        Err(e) => {
            tracing::warn!(file = %path.display(), "could not read audio duration: {e}");
            None
        }
    }
}
