use lazy_static::lazy_static;
use regex::Regex;

pub const SEPARATOR: &str = "==========";

const BOM: char = '\u{feff}';

lazy_static! {
    /// Every line boundary a clippings export may use, including bare `\r`.
    static ref RE_LINE_BREAK: Regex =
        Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c\x1d\x1e\x{85}\x{2028}\x{2029}]").unwrap();
}

/// Splits a whole export into blocks of cleaned, non-blank lines.
///
/// Every call walks the input from the start. Blocks with fewer than two lines are
/// still yielded; the extractor rejects them.
pub fn split_blocks(content: &str) -> impl Iterator<Item = Vec<&str>> {
    content
        .trim_start_matches(BOM)
        .trim()
        .split(SEPARATOR)
        .map(block_lines)
}

/// Lines of a single block with stray BOMs and surrounding whitespace removed.
pub fn block_lines(block: &str) -> Vec<&str> {
    RE_LINE_BREAK
        .split(block.trim())
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .collect()
}

fn clean_line(line: &str) -> &str {
    line.trim().trim_matches(BOM).trim()
}
