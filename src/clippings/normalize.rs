use std::collections::HashSet;

use crate::model::ClippingEntry;

/// Keeps the first occurrence of every (book, kind, location, text) key.
/// Returns the survivors in their original order and the number collapsed.
pub fn dedup(entries: Vec<ClippingEntry>) -> (Vec<ClippingEntry>, usize) {
    let keep: Vec<bool> = {
        let mut seen = HashSet::new();
        entries.iter().map(|entry| seen.insert(entry.dedup_key())).collect()
    };

    let before = entries.len();
    let unique: Vec<ClippingEntry> = entries
        .into_iter()
        .zip(keep)
        .filter_map(|(entry, keep)| keep.then_some(entry))
        .collect();

    let collapsed = before - unique.len();
    (unique, collapsed)
}

/// Orders by book title, then by location start. Ties keep their relative order.
pub fn sort_entries(entries: &mut [ClippingEntry]) {
    entries.sort_by(|a, b| {
        a.book
            .cmp(&b.book)
            .then(a.numeric_location.cmp(&b.numeric_location))
    });
}
