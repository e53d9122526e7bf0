use lazy_static::lazy_static;
use regex::Regex;

use crate::model::{ClippingEntry, ClippingKind};

/// Keywords checked against the metadata line, in priority order.
pub const KIND_KEYWORDS: &[(&str, ClippingKind)] = &[
    ("highlight", ClippingKind::Highlight),
    ("note", ClippingKind::Note),
    ("bookmark", ClippingKind::Bookmark),
];

pub const MISSING_LOCATION: &str = "0";

lazy_static! {
    static ref RE_LOCATION: Regex = Regex::new(r"(?i)location\s+([\d-]+)").unwrap();
    static ref RE_ADDED_ON: Regex = Regex::new(r"(?i)added on\s+(.*)").unwrap();
}

/// First keyword found in the metadata line wins; `Unknown` if none is present.
pub fn classify_kind(meta_line: &str) -> ClippingKind {
    let meta = meta_line.to_lowercase();
    KIND_KEYWORDS
        .iter()
        .find(|(keyword, _)| meta.contains(keyword))
        .map(|(_, kind)| *kind)
        .unwrap_or(ClippingKind::Unknown)
}

pub fn extract_location(meta_line: &str) -> Option<&str> {
    RE_LOCATION
        .captures(meta_line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn extract_date(meta_line: &str) -> Option<&str> {
    RE_ADDED_ON
        .captures(meta_line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Integer value of the part before the first dash, or 0 when it does not parse.
pub fn numeric_location(location: &str) -> u64 {
    location
        .split('-')
        .next()
        .and_then(|start| start.parse::<u64>().ok())
        .unwrap_or(0)
}

/// Builds a candidate entry from a block's cleaned lines.
///
/// Returns `None` only when the block lacks a title or metadata line. The body may
/// still be empty; the noise filter decides whether the entry is kept.
pub fn extract_entry(lines: &[&str]) -> Option<ClippingEntry> {
    let [book, meta, body @ ..] = lines else {
        return None;
    };

    let location = extract_location(meta).unwrap_or(MISSING_LOCATION).to_string();
    let numeric_location = numeric_location(&location);

    Some(ClippingEntry {
        book: book.to_string(),
        kind: classify_kind(meta),
        numeric_location,
        location,
        date_added: extract_date(meta).unwrap_or_default().to_string(),
        text: body.join("\n").trim().to_string(),
    })
}
