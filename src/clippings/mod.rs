//! Clippings Module
//!
//! Turns an e-reader's "My Clippings.txt" export into an ordered, deduplicated set of
//! entries. The export is a flat log of blocks separated by a `==========` line; each
//! block holds a title line, a metadata line (kind, location, date) and the body text.
//!
//! # Pipeline
//!
//! - `splitter` breaks the export into blocks of cleaned lines
//! - `extract` classifies each block and pulls out its location, date and text
//! - `filter` drops empty bodies and the device's clipping-limit placeholder
//! - `normalize` collapses duplicates and orders by book, then location
//!
//! Parsing is a pure function of the input text. It never fails; content that cannot be
//! used is skipped.
//!
//! # Usage
//!
//! ```rust
//! use clippings::parse_clippings;
//!
//! let export = "Book A\n- Your Highlight on Location 10-12 | Added on Monday\n\nSome text.\n==========\n";
//! let clippings = parse_clippings(export);
//! assert_eq!(clippings.len(), 1);
//! assert_eq!(clippings.entries()[0].location, "10-12");
//! ```

pub mod extract;
pub mod filter;
pub mod normalize;
pub mod splitter;

use serde::Serialize;

use crate::model::ClippingEntry;
use filter::DropReason;

/// An ordered, immutable collection of unique entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Clippings {
    entries: Vec<ClippingEntry>,
}

impl Clippings {
    pub fn entries(&self) -> &[ClippingEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClippingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct book titles in sorted order.
    pub fn books(&self) -> Vec<&str> {
        let mut books: Vec<&str> = self.entries.iter().map(|e| e.book.as_str()).collect();
        books.dedup();
        books
    }
}

impl<'a> IntoIterator for &'a Clippings {
    type Item = &'a ClippingEntry;
    type IntoIter = std::slice::Iter<'a, ClippingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseStats {
    pub blocks: usize,
    pub too_short: usize,
    pub empty: usize,
    pub noise: usize,
    pub duplicates: usize,
    pub kept: usize,
}

pub fn parse_clippings(content: &str) -> Clippings {
    parse_clippings_with_stats(content).0
}

pub fn parse_clippings_with_stats(content: &str) -> (Clippings, ParseStats) {
    let mut stats = ParseStats::default();
    let mut candidates = Vec::new();

    for lines in splitter::split_blocks(content) {
        stats.blocks += 1;

        let Some(entry) = extract::extract_entry(&lines) else {
            tracing::trace!(lines = lines.len(), "skipping block without title and metadata");
            stats.too_short += 1;
            continue;
        };

        match filter::drop_reason(&entry) {
            Some(DropReason::EmptyText) => {
                tracing::trace!(book = %entry.book, location = %entry.location, "skipping entry without text");
                stats.empty += 1;
            }
            Some(DropReason::ClippingLimit) => {
                tracing::trace!(book = %entry.book, "skipping clipping limit placeholder");
                stats.noise += 1;
            }
            None => candidates.push(entry),
        }
    }

    let (mut entries, duplicates) = normalize::dedup(candidates);
    normalize::sort_entries(&mut entries);

    stats.duplicates = duplicates;
    stats.kept = entries.len();

    tracing::debug!(
        blocks = stats.blocks,
        kept = stats.kept,
        too_short = stats.too_short,
        empty = stats.empty,
        noise = stats.noise,
        duplicates = stats.duplicates,
        "parsed clippings"
    );

    (Clippings { entries }, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClippingKind;

    #[test]
    fn test_basic_highlight() {
        let clippings = parse_clippings(
            "Book A\nYour Highlight on Location 10-12 | Added on Monday, 1 Jan\n\nSome text.",
        );

        assert_eq!(clippings.len(), 1);
        let entry = &clippings.entries()[0];
        assert_eq!(entry.book, "Book A");
        assert_eq!(entry.kind, ClippingKind::Highlight);
        assert_eq!(entry.location, "10-12");
        assert_eq!(entry.numeric_location, 10);
        assert_eq!(entry.date_added, "Monday, 1 Jan");
        assert_eq!(entry.text, "Some text.");
    }

    #[test]
    fn test_empty_input() {
        let (clippings, stats) = parse_clippings_with_stats("");
        assert!(clippings.is_empty());
        assert_eq!(stats.kept, 0);
    }

    #[test]
    fn test_stats_count_every_drop() {
        let content = "\
Book A
- Your Highlight on Location 1 | Added on Monday

kept
==========
Book A
- Your Bookmark on Location 2 | Added on Monday

==========
Book A
- Your Highlight on Location 3 | Added on Monday

<You have reached the clipping limit for this item>
==========
Book A
- Your Highlight on Location 1 | Added on Friday

kept
==========
lonely title
==========
";
        let (clippings, stats) = parse_clippings_with_stats(content);

        assert_eq!(clippings.len(), 1);
        assert_eq!(
            stats,
            ParseStats {
                blocks: 6,
                too_short: 2,
                empty: 1,
                noise: 1,
                duplicates: 1,
                kept: 1,
            }
        );
    }

    #[test]
    fn test_books_are_distinct_and_sorted() {
        let content = "\
Zebra
- Your Highlight on Location 1

z
==========
Apple
- Your Highlight on Location 9

a9
==========
Apple
- Your Note on Location 2

a2
==========
";
        let clippings = parse_clippings(content);
        assert_eq!(clippings.books(), vec!["Apple", "Zebra"]);
    }
}
