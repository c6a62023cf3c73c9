// src/edgar/models.rs
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Annual report form types fetched for every company, in processing order.
pub const ANNUAL_REPORT_TYPES: [&str; 4] = ["10-K", "10-K/A", "20-F", "40-F"];

/// Description marker for the full SGML submission of a filing.
pub const COMPLETE_SUBMISSION_MARKER: &str = "COMPLETE SUBMISSION TEXT FILE";

/// Central Index Key: EDGAR's identifier for a registered entity.
/// Kept exactly as it appears in the registry's links (leading zeros included).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cik(String);

impl Cik {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inclusive range of filing years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// Returns `None` when `start > end`.
    pub fn new(start: i32, end: i32) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date.year())
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// One located filing within the requested year range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingRecord {
    pub cik: Cik,
    pub report_type: &'static str,
    pub filing_date: NaiveDate,
    pub detail_url: String,
}

/// How a downloaded document is persisted, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Markup or plain text, stored as extracted UTF-8 text.
    Text,
    /// XML or XBRL, stored byte for byte.
    Structured,
    /// Anything else (PDF, images, archives), stored byte for byte.
    Binary,
}

impl DocumentKind {
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "html" | "htm" | "txt" => DocumentKind::Text,
            "xml" | "xbrl" => DocumentKind::Structured,
            _ => DocumentKind::Binary,
        }
    }
}

/// Name a document is stored under inside its company folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentName {
    pub base: String,
    pub extension: String,
}

impl DocumentName {
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_extension(&self.extension)
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.base, self.extension)
    }
}

/// A row of a filing's document table that passed the eligibility rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDescriptor {
    /// Upper-cased description cell.
    pub description: String,
    pub url: String,
    pub name: DocumentName,
}

/// True if an upper-cased document description names one of `report_types`
/// or is the complete submission text file.
pub fn is_eligible_description(description: &str, report_types: &[&str]) -> bool {
    report_types.iter().any(|t| description.contains(t))
        || description.contains(COMPLETE_SUBMISSION_MARKER)
}
