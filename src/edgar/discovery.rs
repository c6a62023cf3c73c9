// src/edgar/discovery.rs
use crate::edgar::client::Fetcher;
use crate::edgar::models::Cik;
use crate::edgar::urls::{cik_from_href, Endpoints};
use crate::extractors::listing;
use crate::utils::error::EdgarError;
use std::collections::HashSet;
use std::time::Duration;

/// Rows requested per company search page.
pub const DISCOVERY_PAGE_SIZE: usize = 100;

/// Why paging through the company search stopped.
#[derive(Debug)]
pub enum DiscoveryStop {
    /// The page had no company table.
    NoListing,
    /// Fewer than a full page of unseen CIKs came back.
    ///
    /// Only unseen CIKs count, so a full page that repeats earlier CIKs ends
    /// discovery even when later pages exist. A final page of exactly
    /// `DISCOVERY_PAGE_SIZE` companies costs one extra request.
    PartialPage { new_on_page: usize },
    /// A page request failed; CIKs seen so far are kept.
    Failed(EdgarError),
}

#[derive(Debug)]
pub struct Discovery {
    /// Unique CIKs in the order they were first seen.
    pub ciks: Vec<Cik>,
    pub pages_fetched: usize,
    pub stop: DiscoveryStop,
}

/// Pages through EDGAR's company search for `sic_code`, collecting unique CIKs.
pub async fn discover_entities<F: Fetcher + ?Sized>(
    fetcher: &F,
    endpoints: &Endpoints,
    sic_code: &str,
    page_delay: Duration,
) -> Discovery {
    let browse_url = endpoints.browse_url();
    let mut seen: HashSet<Cik> = HashSet::new();
    let mut ciks = Vec::new();
    let mut pages_fetched = 0;
    let mut start = 0;

    let stop = loop {
        let params = [
            ("action", "getcompany".to_string()),
            ("SIC", sic_code.to_string()),
            ("owner", "exclude".to_string()),
            ("count", DISCOVERY_PAGE_SIZE.to_string()),
            ("start", start.to_string()),
        ];

        let page = match fetcher.fetch(&browse_url, &params).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Company search for SIC {} failed at offset {}: {}", sic_code, start, e);
                break DiscoveryStop::Failed(e);
            }
        };
        pages_fetched += 1;

        let links = match listing::company_links(&page.text()) {
            Ok(links) => links,
            Err(_) => {
                tracing::info!("No more companies found for SIC code {}.", sic_code);
                break DiscoveryStop::NoListing;
            }
        };

        let mut new_on_page = 0;
        for cik in links.iter().filter_map(|href| cik_from_href(href)) {
            if seen.insert(cik.clone()) {
                ciks.push(cik);
                new_on_page += 1;
            }
        }

        tracing::info!(
            "Found {} new CIKs on page starting at {}. Total so far: {}",
            new_on_page,
            start,
            ciks.len()
        );

        if new_on_page < DISCOVERY_PAGE_SIZE {
            break DiscoveryStop::PartialPage { new_on_page };
        }

        start += DISCOVERY_PAGE_SIZE;
        tokio::time::sleep(page_delay).await;
    };

    Discovery {
        ciks,
        pages_fetched,
        stop,
    }
}
