//! WebVTT subtitle cleaner.
//!
//! Auto-generated captions repeat each line across overlapping cues, so the
//! cleaner deduplicates lines while keeping first-occurrence order.

use std::collections::HashSet;

use regex::Regex;

/// Reduce a raw WebVTT subtitle track to plain transcript text.
///
/// Drops cue timing lines, cue sequence numbers, blank lines, and the
/// `WEBVTT` / `Kind:` / `Language:` header lines; strips inline `<...>`
/// styling tags; removes exact-duplicate lines. Never fails: malformed
/// input just produces a smaller (possibly empty) result.
pub fn clean_vtt(raw: &str) -> String {
    let tag = Regex::new(r"<[^>]+>").expect("valid tag regex");

    let mut seen = HashSet::new();
    let mut cleaned = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty()
            || line.contains("-->")
            || line.chars().all(|c| c.is_ascii_digit())
            || line.starts_with("WEBVTT")
            || line.starts_with("Kind:")
            || line.starts_with("Language:")
        {
            continue;
        }
        let line = tag.replace_all(line, "").to_string();
        if seen.insert(line.clone()) {
            cleaned.push(line);
        }
    }
    cleaned.join("\n")
}
