use crate::model::ClippingEntry;

/// Placeholder body the device writes once a book's export quota is used up.
pub const CLIPPING_LIMIT_MARKER: &str = "you have reached the clipping limit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    EmptyText,
    ClippingLimit,
}

pub fn drop_reason(entry: &ClippingEntry) -> Option<DropReason> {
    if entry.text.trim().is_empty() {
        return Some(DropReason::EmptyText);
    }

    if entry.text.to_lowercase().contains(CLIPPING_LIMIT_MARKER) {
        return Some(DropReason::ClippingLimit);
    }

    None
}

pub fn is_content(entry: &ClippingEntry) -> bool {
    drop_reason(entry).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClippingKind;

    fn entry(text: &str) -> ClippingEntry {
        ClippingEntry {
            book: "Book A".to_string(),
            kind: ClippingKind::Bookmark,
            location: "0".to_string(),
            numeric_location: 0,
            date_added: String::new(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_empty_text_is_dropped() {
        assert_eq!(drop_reason(&entry("")), Some(DropReason::EmptyText));
        assert_eq!(drop_reason(&entry("  \n ")), Some(DropReason::EmptyText));
    }

    #[test]
    fn test_clipping_limit_is_dropped_case_insensitively() {
        assert_eq!(
            drop_reason(&entry("<You have reached the clipping limit for this item>")),
            Some(DropReason::ClippingLimit)
        );
        assert_eq!(
            drop_reason(&entry("YOU HAVE REACHED THE CLIPPING LIMIT")),
            Some(DropReason::ClippingLimit)
        );
    }

    #[test]
    fn test_content_is_kept() {
        assert!(is_content(&entry("A real highlight.")));
        assert!(is_content(&entry("the clipping limit is a strange idea")));
    }
}
