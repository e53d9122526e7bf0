use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::clippings::Clippings;
use crate::error::ExportError;
use crate::model::ClippingEntry;
use crate::search::{Filter, entries_for_book};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    #[default]
    Markdown,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
        }
    }
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Book")]
    book: &'a str,
    #[serde(rename = "Type")]
    kind: &'a str,
    #[serde(rename = "Location")]
    location: &'a str,
    #[serde(rename = "Date Added")]
    date_added: &'a str,
    #[serde(rename = "Text")]
    text: &'a str,
}

impl<'a> From<&'a ClippingEntry> for CsvRow<'a> {
    fn from(entry: &'a ClippingEntry) -> Self {
        CsvRow {
            book: &entry.book,
            kind: entry.kind.as_str(),
            location: &entry.location,
            date_added: &entry.date_added,
            text: &entry.text,
        }
    }
}

pub fn to_csv(entries: &[&ClippingEntry]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    for entry in entries {
        writer.serialize(CsvRow::from(*entry))?;
    }
    writer.flush()?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn to_markdown(book: &str, entries: &[&ClippingEntry]) -> String {
    let mut out = format!("# {}\n\n", book);

    for entry in entries {
        out.push_str(&format!(
            "**{} (Location {}) — _{}_**\n\n",
            entry.kind, entry.location, entry.date_added
        ));
        for line in entry.text.lines() {
            out.push_str("> ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("\n---\n\n");
    }

    out
}

/// Renders one book's entries, narrowed by `filter`, in the requested format.
pub fn export_book(
    clippings: &Clippings,
    book: &str,
    filter: &Filter,
    format: ExportFormat,
) -> Result<String, ExportError> {
    let entries = entries_for_book(clippings, book, filter);
    if entries.is_empty() {
        return Err(ExportError::EmptyBook(book.to_string()));
    }

    match format {
        ExportFormat::Csv => to_csv(&entries),
        ExportFormat::Markdown => Ok(to_markdown(book, &entries)),
    }
}

pub fn export_file_name(book: &str, format: ExportFormat) -> String {
    format!("{}_highlights.{}", book.replace('/', "_"), format.extension())
}

pub fn write_export(
    dir: &Path,
    book: &str,
    format: ExportFormat,
    contents: &str,
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(book, format));
    fs::write(&path, contents)?;

    tracing::info!(path = %path.display(), book = %book, "wrote export");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clippings::parse_clippings;

    const EXPORT: &str = "\
Essays/Collected
- Your Highlight on Location 12-14 | Added on Monday, 1 January 2024

First line, with a comma.
Second line.
==========
Essays/Collected
- Your Note on Location 3 | Added on Sunday

A \"quoted\" note
==========
";

    #[test]
    fn test_csv_header_and_rows() {
        let clippings = parse_clippings(EXPORT);
        let csv = export_book(&clippings, "Essays/Collected", &Filter::default(), ExportFormat::Csv)
            .unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Book,Type,Location,Date Added,Text"));
        assert_eq!(lines.next(), Some("Essays/Collected,Note,3,Sunday,\"A \"\"quoted\"\" note\""));

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][4], "First line, with a comma.\nSecond line.");
    }

    #[test]
    fn test_markdown_layout() {
        let clippings = parse_clippings(EXPORT);
        let md = export_book(
            &clippings,
            "Essays/Collected",
            &Filter::with_query(Some("comma")),
            ExportFormat::Markdown,
        )
        .unwrap();

        assert_eq!(
            md,
            "# Essays/Collected\n\n\
             **Highlight (Location 12-14) — _Monday, 1 January 2024_**\n\n\
             > First line, with a comma.\n\
             > Second line.\n\
             \n---\n\n"
        );
    }

    #[test]
    fn test_unknown_book_is_an_error() {
        let clippings = parse_clippings(EXPORT);
        let err = export_book(&clippings, "Missing", &Filter::default(), ExportFormat::Csv)
            .unwrap_err();
        assert!(matches!(err, ExportError::EmptyBook(book) if book == "Missing"));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name("Essays/Collected", ExportFormat::Csv),
            "Essays_Collected_highlights.csv"
        );
        assert_eq!(
            export_file_name("Dune", ExportFormat::Markdown),
            "Dune_highlights.md"
        );
    }

    #[test]
    fn test_write_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_export(dir.path(), "A/B", ExportFormat::Markdown, "# A/B\n").unwrap();

        assert_eq!(path, dir.path().join("A_B_highlights.md"));
        assert_eq!(fs::read_to_string(path).unwrap(), "# A/B\n");
    }
}
