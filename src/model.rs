use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClippingKind {
    Highlight,
    Note,
    Bookmark,
    Unknown,
}

impl ClippingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClippingKind::Highlight => "Highlight",
            ClippingKind::Note => "Note",
            ClippingKind::Bookmark => "Bookmark",
            ClippingKind::Unknown => "Unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "highlight" => Some(ClippingKind::Highlight),
            "note" => Some(ClippingKind::Note),
            "bookmark" => Some(ClippingKind::Bookmark),
            "unknown" => Some(ClippingKind::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for ClippingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One highlight, note or bookmark taken from a clippings export.
///
/// Missing metadata is never absent: an entry without a location carries `"0"`,
/// one without a date carries an empty `date_added`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClippingEntry {
    pub book: String,
    pub kind: ClippingKind,
    pub location: String,
    /// Start of the location range, used for ordering only.
    #[serde(skip_serializing)]
    #[serde(default)]
    pub numeric_location: u64,
    pub date_added: String,
    pub text: String,
}

impl ClippingEntry {
    /// Fields that identify an entry across repeated exports. `date_added` is left out.
    pub fn dedup_key(&self) -> (&str, ClippingKind, &str, &str) {
        (&self.book, self.kind, &self.location, &self.text)
    }
}
