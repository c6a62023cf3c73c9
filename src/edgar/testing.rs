// src/edgar/testing.rs
//! In-memory EDGAR backend for unit tests.

use crate::edgar::client::{Fetched, Fetcher};
use crate::utils::error::EdgarError;
use async_trait::async_trait;
use std::sync::Mutex;

/// A single recorded request: URL plus its query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl Request {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

type Route = Box<dyn Fn(&Request) -> Option<Result<Vec<u8>, EdgarError>> + Send + Sync>;

/// Answers requests from a list of routes; the first route returning `Some` wins.
/// Unrouted requests fail with `NotFound`.
#[derive(Default)]
pub struct ScriptedFetcher {
    routes: Vec<Route>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Request) -> Option<Result<Vec<u8>, EdgarError>> + Send + Sync + 'static,
    {
        self.routes.push(Box::new(handler));
        self
    }

    /// Serves `body` for every request whose URL ends with `suffix`.
    pub fn page(self, suffix: &'static str, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        self.route(move |req| req.url.ends_with(suffix).then(|| Ok(body.clone())))
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str, query: &[(&str, String)]) -> Result<Fetched, EdgarError> {
        let request = Request {
            url: url.to_string(),
            query: query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        };
        self.requests.lock().unwrap().push(request.clone());

        let outcome = self
            .routes
            .iter()
            .find_map(|route| route(&request))
            .unwrap_or_else(|| Err(EdgarError::NotFound(url.to_string())));

        outcome.map(|body| Fetched {
            url: url.to_string(),
            body,
            content_type: None,
        })
    }
}

/// Builds a company search results page with one row per CIK.
pub fn company_listing_page(ciks: &[String]) -> String {
    let mut html = String::from(
        "<html><body><table class=\"tableFile2\"><tr><th>CIK</th><th>Company</th><th>State</th></tr>",
    );
    for cik in ciks {
        html.push_str(&format!(
            "<tr><td><a href=\"/cgi-bin/browse-edgar?action=getcompany&amp;CIK={cik}&amp;owner=exclude&amp;count=40\">{cik}</a></td><td>Company {cik}</td><td>NY</td></tr>"
        ));
    }
    html.push_str("</table></body></html>");
    html
}

/// Builds a filing index page from `(detail href, filing date)` rows.
pub fn filing_index_page(rows: &[(&str, &str)]) -> String {
    let mut html = String::from(
        "<html><body><table class=\"tableFile2\"><tr><th>Filings</th><th>Format</th><th>Description</th><th>Filing Date</th><th>File/Film Number</th></tr>",
    );
    for (href, date) in rows {
        html.push_str(&format!(
            "<tr><td>10-K</td><td><a href=\"{href}\">Documents</a></td><td>Annual report</td><td>{date}</td><td>001-0001</td></tr>"
        ));
    }
    html.push_str("</table></body></html>");
    html
}

/// Builds a filing detail page from `(description, document href)` rows.
pub fn filing_detail_page(rows: &[(&str, &str)]) -> String {
    let mut html = String::from(
        "<html><body><table class=\"tableFile\" summary=\"Document Format Files\"><tr><th>Seq</th><th>Description</th><th>Document</th><th>Type</th><th>Size</th></tr>",
    );
    for (i, (description, href)) in rows.iter().enumerate() {
        let name = href.rsplit('/').next().unwrap_or(href);
        html.push_str(&format!(
            "<tr><td>{}</td><td>{description}</td><td><a href=\"{href}\">{name}</a></td><td>10-K</td><td>1000</td></tr>",
            i + 1
        ));
    }
    html.push_str("</table></body></html>");
    html
}
