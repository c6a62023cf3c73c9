// src/edgar/filings.rs
use crate::edgar::client::Fetcher;
use crate::edgar::models::{Cik, FilingRecord, YearRange};
use crate::edgar::urls::Endpoints;
use crate::extractors::listing;
use crate::utils::error::{AppError, ExtractError};
use crate::utils::RunLog;
use chrono::NaiveDate;
use std::collections::VecDeque;

/// Fetches one report type's filing index for `cik` and keeps the rows dated
/// inside `years`. Rows outside the range or with bad dates are logged and dropped.
///
/// Errors: `AppError::Edgar` when the index cannot be fetched,
/// `AppError::Extraction(TableNotFound)` when the page has no filings table.
pub async fn list_filings<F: Fetcher + ?Sized>(
    fetcher: &F,
    endpoints: &Endpoints,
    log: &RunLog,
    cik: &Cik,
    report_type: &'static str,
    count: usize,
    years: YearRange,
) -> Result<Vec<FilingRecord>, AppError> {
    let params = [
        ("action", "getcompany".to_string()),
        ("CIK", cik.to_string()),
        ("type", report_type.to_string()),
        ("count", count.to_string()),
        ("owner", "exclude".to_string()),
    ];
    let page = fetcher.fetch(&endpoints.browse_url(), &params).await?;
    let rows = listing::filing_rows(&page.text())?;

    let mut filings = Vec::new();
    for row in rows {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                log.error(format!("Skipping malformed {} row for CIK {}: {}", report_type, cik, e));
                continue;
            }
        };

        let filing_date = match parse_filing_date(&row.date_text) {
            Ok(date) => date,
            Err(e) => {
                log.error(format!("Skipping {} filing for CIK {}: {}", report_type, cik, e));
                continue;
            }
        };

        if !years.contains(filing_date) {
            log.info(format!(
                "Skipping {} filing for CIK {} on {}, outside of date range.",
                report_type, cik, row.date_text
            ));
            continue;
        }

        let detail_url = match endpoints.resolve(&row.detail_href) {
            Ok(url) => url,
            Err(e) => {
                log.error(format!("Skipping {} filing for CIK {}: {}", report_type, cik, e));
                continue;
            }
        };

        filings.push(FilingRecord {
            cik: cik.clone(),
            report_type,
            filing_date,
            detail_url,
        });
    }

    Ok(filings)
}

pub fn parse_filing_date(text: &str) -> Result<NaiveDate, ExtractError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|source| ExtractError::InvalidDate {
        text: text.to_string(),
        source,
    })
}

/// Lazily walks a company's filings, one report type at a time.
///
/// The next report type's index is only requested once every filing of the
/// current type has been handed out. Types are not merged, so a filing listed
/// under two types is yielded twice. A failed or table-less index is logged
/// and counts as no filings for that type.
pub struct FilingEnumerator<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
    endpoints: &'a Endpoints,
    log: &'a RunLog,
    cik: Cik,
    report_types: &'a [&'static str],
    count: usize,
    years: YearRange,
    next_type: usize,
    pending: VecDeque<FilingRecord>,
    failures: usize,
}

impl<'a, F: Fetcher + ?Sized> FilingEnumerator<'a, F> {
    pub fn new(
        fetcher: &'a F,
        endpoints: &'a Endpoints,
        log: &'a RunLog,
        cik: Cik,
        report_types: &'a [&'static str],
        count: usize,
        years: YearRange,
    ) -> Self {
        Self {
            fetcher,
            endpoints,
            log,
            cik,
            report_types,
            count,
            years,
            next_type: 0,
            pending: VecDeque::new(),
            failures: 0,
        }
    }

    /// Number of report types whose index could not be fetched.
    pub fn failures(&self) -> usize {
        self.failures
    }

    pub async fn next_filing(&mut self) -> Option<FilingRecord> {
        loop {
            if let Some(filing) = self.pending.pop_front() {
                return Some(filing);
            }

            let report_type = *self.report_types.get(self.next_type)?;
            self.next_type += 1;

            self.log.info(format!("Fetching {} filings for CIK: {}", report_type, self.cik));

            let result = list_filings(
                self.fetcher,
                self.endpoints,
                self.log,
                &self.cik,
                report_type,
                self.count,
                self.years,
            )
            .await;

            match result {
                Ok(filings) if filings.is_empty() => {
                    self.log.info(format!(
                        "No {} filings for CIK {} within {}",
                        report_type, self.cik, self.years
                    ));
                }
                Ok(filings) => self.pending.extend(filings),
                Err(AppError::Extraction(ExtractError::TableNotFound(_))) => {
                    self.log.info(format!(
                        "No filings table found for CIK: {}, report type: {}",
                        self.cik, report_type
                    ));
                }
                Err(e) => {
                    self.failures += 1;
                    self.log.error(format!(
                        "Error fetching {} filings for CIK {}: {}",
                        report_type, self.cik, e
                    ));
                }
            }
        }
    }
}
