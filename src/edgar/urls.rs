// src/edgar/urls.rs
//! EDGAR URL conventions: where the browse endpoint lives, how company links
//! encode a CIK and how document links map to local file names.

use crate::edgar::models::{Cik, DocumentName};
use crate::utils::error::EdgarError;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.sec.gov";
const BROWSE_PATH: &str = "/cgi-bin/browse-edgar";

static CIK_PARAM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[?&;])CIK=([^&#;]+)").expect("Failed to compile CIK_PARAM_RE")
});

/// Resolves relative links against the registry origin.
#[derive(Debug, Clone)]
pub struct Endpoints {
    origin: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self, EdgarError> {
        let origin = Url::parse(base_url).map_err(|_| EdgarError::InvalidUrl(base_url.to_string()))?;
        if origin.cannot_be_a_base() {
            return Err(EdgarError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { origin })
    }

    /// Company search / filing index facility.
    pub fn browse_url(&self) -> String {
        self.resolve(BROWSE_PATH)
            .unwrap_or_else(|_| format!("{}{}", self.origin.as_str().trim_end_matches('/'), BROWSE_PATH))
    }

    /// Joins `href` onto the origin (absolute hrefs pass through unchanged).
    pub fn resolve(&self, href: &str) -> Result<String, EdgarError> {
        self.origin
            .join(href.trim())
            .map(String::from)
            .map_err(|_| EdgarError::InvalidUrl(href.to_string()))
    }
}

/// Extracts the CIK query parameter from a company link.
pub fn cik_from_href(href: &str) -> Option<Cik> {
    CIK_PARAM_RE
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|value| !value.is_empty())
        .map(Cik::new)
}

/// Derives the stored file name from the text after the last '/' of a document URL.
///
/// Inline XBRL viewer links (`/ix?doc=/Archives/.../report.htm`) carry the
/// document path in the query, so the query is only dropped when it holds no
/// '/'. The base name is everything before the first '.', the extension
/// everything after the last '.', defaulting to `html` for extension-less names.
pub fn document_name_from_url(url: &str) -> Option<DocumentName> {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let tail = without_fragment.rsplit('/').next()?;
    let segment = tail.split('?').next().unwrap_or(tail).trim();

    let base = segment.split('.').next()?;
    if base.is_empty() {
        return None;
    }
    let extension = match segment.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext,
        _ => "html",
    };

    Some(DocumentName {
        base: base.to_string(),
        extension: extension.to_string(),
    })
}
