// src/extractors/listing.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

// --- CSS Selectors (Lazy Static) ---
// Company search results and per-company filing indexes share this table class
static LISTING_TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table.tableFile2").expect("Failed to compile LISTING_TABLE_SELECTOR")
});

// Document list on a filing detail page
static DOCUMENT_TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table.tableFile").expect("Failed to compile DOCUMENT_TABLE_SELECTOR")
});

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("Failed to compile ROW_SELECTOR"));

static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("Failed to compile CELL_SELECTOR"));

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("Failed to compile LINK_SELECTOR"));

// --- Data Structures ---

/// One data row of a company's filing index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingRow {
    pub detail_href: String,
    pub date_text: String,
}

/// One row of a filing's document table, before eligibility filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRow {
    /// Description cell, trimmed and upper-cased.
    pub description: String,
    pub href: Option<String>,
}

// --- Extraction ---

/// Links found in the first cell of each company search result row.
pub fn company_links(html: &str) -> Result<Vec<String>, ExtractError> {
    let document = Html::parse_document(html);
    let table = document
        .select(&LISTING_TABLE_SELECTOR)
        .next()
        .ok_or(ExtractError::TableNotFound("company listing"))?;

    Ok(data_rows(table)
        .filter_map(|cells| cells.first().and_then(|cell| first_link(*cell)))
        .collect())
}

/// Rows of a filing index that carry a document link.
///
/// Rows without a link in the second cell are dropped; a linked row without a
/// date cell comes back as an error so the caller can log it and move on.
pub fn filing_rows(html: &str) -> Result<Vec<Result<FilingRow, ExtractError>>, ExtractError> {
    let document = Html::parse_document(html);
    let table = document
        .select(&LISTING_TABLE_SELECTOR)
        .next()
        .ok_or(ExtractError::TableNotFound("filings"))?;

    Ok(data_rows(table)
        .filter_map(|cells| {
            let detail_href = cells.get(1).and_then(|cell| first_link(*cell))?;
            Some(match cells.get(3) {
                Some(date_cell) => Ok(FilingRow {
                    detail_href,
                    date_text: cell_text(*date_cell),
                }),
                None => Err(ExtractError::MissingCell("filing date")),
            })
        })
        .collect())
}

/// Rows of a filing's document table with more than three cells.
pub fn document_rows(html: &str) -> Result<Vec<DocumentRow>, ExtractError> {
    let document = Html::parse_document(html);
    let table = document
        .select(&DOCUMENT_TABLE_SELECTOR)
        .next()
        .ok_or(ExtractError::TableNotFound("documents"))?;

    Ok(table
        .select(&ROW_SELECTOR)
        .map(|row| row.select(&CELL_SELECTOR).collect::<Vec<_>>())
        .filter(|cells| cells.len() > 3)
        .map(|cells| DocumentRow {
            description: cell_text(cells[1]).to_uppercase(),
            href: first_link(cells[2]),
        })
        .collect())
}

// --- Helpers ---

/// Cells of every row after the header row.
fn data_rows<'a>(table: ElementRef<'a>) -> impl Iterator<Item = Vec<ElementRef<'a>>> + 'a {
    table
        .select(&ROW_SELECTOR)
        .skip(1)
        .map(|row| row.select(&CELL_SELECTOR).collect())
}

fn first_link(cell: ElementRef<'_>) -> Option<String> {
    cell.select(&LINK_SELECTOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::edgar::testing::{company_listing_page, filing_detail_page, filing_index_page};

    #[test]
    fn company_links_skip_header_and_read_first_cell() {
        let html = company_listing_page(&["0000000001".to_string(), "0000000002".to_string()]);
        let links = company_links(&html).unwrap();
        assert_eq!(links.len(), 2);
        assert!(links[0].contains("CIK=0000000001"));
        assert!(links[1].contains("CIK=0000000002"));
    }

    #[test]
    fn missing_listing_table_is_reported() {
        let html = "<html><body><p>No matching companies.</p></body></html>";
        assert!(matches!(
            company_links(html),
            Err(ExtractError::TableNotFound("company listing"))
        ));
    }

    #[test]
    fn filing_rows_read_link_and_date_columns() {
        let html = filing_index_page(&[
            ("/Archives/edgar/data/1/a-index.htm", "2021-03-01"),
            ("/Archives/edgar/data/1/b-index.htm", "2020-02-28"),
        ]);
        let rows: Vec<FilingRow> = filing_rows(&html).unwrap().into_iter().map(Result::unwrap).collect();
        assert_eq!(
            rows,
            vec![
                FilingRow {
                    detail_href: "/Archives/edgar/data/1/a-index.htm".to_string(),
                    date_text: "2021-03-01".to_string(),
                },
                FilingRow {
                    detail_href: "/Archives/edgar/data/1/b-index.htm".to_string(),
                    date_text: "2020-02-28".to_string(),
                },
            ]
        );
    }

    #[test]
    fn filing_rows_without_a_link_are_dropped_and_short_rows_error() {
        let html = r#"<table class="tableFile2">
            <tr><th>Filings</th><th>Format</th></tr>
            <tr><td>10-K</td><td>no link here</td><td>x</td><td>2020-01-01</td></tr>
            <tr><td>10-K</td><td><a href="/a-index.htm">Documents</a></td></tr>
        </table>"#;
        let rows = filing_rows(html).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(matches!(rows[0], Err(ExtractError::MissingCell("filing date"))));
    }

    #[test]
    fn filing_index_does_not_match_document_table_class() {
        let html = filing_detail_page(&[("10-K", "/a.htm")]);
        assert!(filing_rows(&html).is_err());
    }

    #[test]
    fn document_rows_uppercase_descriptions() {
        let html = filing_detail_page(&[
            ("Annual report pursuant to 10-K", "/Archives/edgar/data/1/form10k.htm"),
            ("Exhibit 32.1", "/Archives/edgar/data/1/ex32.htm"),
        ]);
        let rows = document_rows(&html).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].description, "ANNUAL REPORT PURSUANT TO 10-K");
        assert_eq!(rows[0].href.as_deref(), Some("/Archives/edgar/data/1/form10k.htm"));
        assert_eq!(rows[1].description, "EXHIBIT 32.1");
    }

    #[test]
    fn document_rows_ignore_short_rows() {
        let html = r#"<table class="tableFile">
            <tr><th>Seq</th><th>Description</th><th>Document</th><th>Type</th></tr>
            <tr><td>1</td><td>10-K</td><td><a href="/a.htm">a.htm</a></td></tr>
            <tr><td>2</td><td>Complete submission text file</td><td></td><td>&nbsp;</td></tr>
        </table>"#;
        let rows = document_rows(html).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "COMPLETE SUBMISSION TEXT FILE");
        assert_eq!(rows[0].href, None);
    }
}
