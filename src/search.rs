use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::clippings::Clippings;
use crate::model::{ClippingEntry, ClippingKind};

const PREVIEW_MAX_CHARS: usize = 100;
const PREVIEW_ELLIPSIS: &str = "...";

/// Narrows a parsed collection. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub query: Option<String>,
    pub book_query: Option<String>,
    pub kinds: Vec<ClippingKind>,
}

impl Filter {
    pub fn with_query(query: Option<&str>) -> Self {
        Self {
            query: query.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn matches(&self, entry: &ClippingEntry) -> bool {
        if !self.kinds.is_empty() && !self.kinds.contains(&entry.kind) {
            return false;
        }

        if let Some(book_query) = non_empty(&self.book_query) {
            if !contains_ignore_case(&entry.book, book_query) {
                return false;
            }
        }

        match non_empty(&self.query) {
            Some(query) => contains_ignore_case(&entry.text, query),
            None => true,
        }
    }

    pub fn apply<'a>(&self, clippings: &'a Clippings) -> Vec<&'a ClippingEntry> {
        clippings.iter().filter(|entry| self.matches(entry)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummary {
    pub book: String,
    pub count: usize,
    pub preview: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Short form of an entry's text for list views.
pub fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_MAX_CHARS {
        return text.to_string();
    }

    let keep = PREVIEW_MAX_CHARS - PREVIEW_ELLIPSIS.len();
    let mut preview: String = text.chars().take(keep).collect();
    preview.push_str(PREVIEW_ELLIPSIS);
    preview
}

/// Distinct kinds present, ordered by name.
pub fn kinds_present(clippings: &Clippings) -> Vec<ClippingKind> {
    let mut kinds: Vec<ClippingKind> = clippings.iter().map(|e| e.kind).collect();
    kinds.sort_by_key(|k| k.as_str());
    kinds.dedup();
    kinds
}

/// One summary per book with at least one entry matching `filter`.
pub fn book_summaries(clippings: &Clippings, filter: &Filter) -> Vec<BookSummary> {
    let mut summaries: Vec<BookSummary> = Vec::new();

    for entry in filter.apply(clippings) {
        if let Some(summary) = summaries.last_mut().filter(|s| s.book == entry.book) {
            summary.count += 1;
            continue;
        }

        summaries.push(BookSummary {
            book: entry.book.clone(),
            count: 1,
            preview: preview(&entry.text),
        });
    }

    summaries
}

/// A single book's entries in location order.
pub fn entries_for_book<'a>(
    clippings: &'a Clippings,
    book: &str,
    filter: &Filter,
) -> Vec<&'a ClippingEntry> {
    clippings
        .iter()
        .filter(|entry| entry.book == book && filter.matches(entry))
        .collect()
}

/// Uniformly chosen item, `None` when `items` is empty.
pub fn pick_random<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}
