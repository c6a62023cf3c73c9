// src/pipeline/mod.rs
//! Drives a run: company discovery, resume check, filing enumeration and
//! document download, one company at a time.
//!
//! Failures are contained at the smallest level they occur in. A bad document
//! never aborts its filing, a bad filing never aborts its company, and a bad
//! company never aborts the run. Only setup (download folder, run log) is fatal.

mod documents;

use crate::config::HarvestConfig;
use crate::edgar::models::{Cik, YearRange, ANNUAL_REPORT_TYPES};
use crate::edgar::{discover_entities, DiscoveryStop, Endpoints, FilingEnumerator, Fetcher};
use crate::storage::{is_folder_complete, StorageManager};
use crate::utils::{AppError, RunLog};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Counts reported at the end of a run (and saved as `run_summary.json`).
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RunSummary {
    pub sic_code: String,
    pub started_at: String,
    pub finished_at: String,
    pub entities_discovered: usize,
    pub entities_selected: usize,
    pub entities_skipped: usize,
    pub entities_processed: usize,
    pub filings_visited: usize,
    pub documents_saved: usize,
    pub errors: usize,
}

pub struct Harvester<F: Fetcher> {
    fetcher: F,
    endpoints: Endpoints,
    config: HarvestConfig,
    years: YearRange,
}

impl<F: Fetcher> Harvester<F> {
    pub fn new(fetcher: F, config: HarvestConfig) -> Result<Self, AppError> {
        config.validate()?;
        let years = config.year_range()?;
        let endpoints = Endpoints::new(&config.base_url)?;
        Ok(Self {
            fetcher,
            endpoints,
            config,
            years,
        })
    }

    /// Downloads the annual reports of every company (or a random sample)
    /// filed under `sic_code`.
    pub async fn run<R: Rng + ?Sized>(&self, sic_code: &str, rng: &mut R) -> Result<RunSummary, AppError> {
        let storage = StorageManager::new(self.config.download_root.join(sic_code))?;
        let log = RunLog::create(&self.config.log_file)?;

        let mut summary = RunSummary {
            sic_code: sic_code.to_string(),
            started_at: chrono::Utc::now().to_rfc3339(),
            ..RunSummary::default()
        };

        log.info(format!(
            "Discovering companies for SIC code {}, saving filings under {}",
            sic_code,
            storage.base_dir().display()
        ));
        let discovery = discover_entities(&self.fetcher, &self.endpoints, sic_code, self.config.page_delay()).await;
        match &discovery.stop {
            DiscoveryStop::NoListing => log.info(format!(
                "No more companies found for SIC code {} after {} pages.",
                sic_code, discovery.pages_fetched
            )),
            DiscoveryStop::PartialPage { new_on_page } => log.info(format!(
                "Last company page for SIC code {} listed {} new CIKs ({} pages).",
                sic_code, new_on_page, discovery.pages_fetched
            )),
            DiscoveryStop::Failed(e) => {
                summary.errors += 1;
                log.error(format!(
                    "Error fetching companies for SIC code {} after {} pages: {}",
                    sic_code, discovery.pages_fetched, e
                ));
            }
        }
        summary.entities_discovered = discovery.ciks.len();

        let total = discovery.ciks.len();
        let ciks = select_entities(discovery.ciks, self.config.sample_size, rng);
        if ciks.len() < total {
            log.info(format!("Randomly selected {} CIKs out of {} total CIKs.", ciks.len(), total));
        } else {
            log.info(format!("Using all {} CIKs.", total));
        }
        summary.entities_selected = ciks.len();

        if ciks.is_empty() {
            log.info(format!("No CIKs found for SIC code {}.", sic_code));
            self.finish(&storage, &log, &mut summary);
            return Ok(summary);
        }

        for cik in &ciks {
            self.process_entity(&storage, &log, cik, &mut summary).await;
        }

        self.finish(&storage, &log, &mut summary);
        Ok(summary)
    }

    async fn process_entity(&self, storage: &StorageManager, log: &RunLog, cik: &Cik, summary: &mut RunSummary) {
        let folder = match storage.entity_dir(cik) {
            Ok(folder) => folder,
            Err(e) => {
                summary.errors += 1;
                log.error(format!("Cannot create folder for CIK {}: {}", cik, e));
                return;
            }
        };

        if is_folder_complete(&folder, self.config.expected_file_count, self.config.min_file_size) {
            summary.entities_skipped += 1;
            log.info(format!("Skipping CIK {} as filings are already complete.", cik));
            return;
        }
        summary.entities_processed += 1;

        let mut filings = FilingEnumerator::new(
            &self.fetcher,
            &self.endpoints,
            log,
            cik.clone(),
            &ANNUAL_REPORT_TYPES,
            self.config.num_filings,
            self.years,
        );

        while let Some(filing) = filings.next_filing().await {
            log.info(format!(
                "Filing URL for CIK {}, report type {}, date {}: {}",
                cik, filing.report_type, filing.filing_date, filing.detail_url
            ));
            summary.filings_visited += 1;

            let outcome = self.process_filing(storage, log, &filing, &folder).await;
            summary.documents_saved += outcome.saved;
            summary.errors += outcome.errors;
        }
        summary.errors += filings.failures();
    }

    fn finish(&self, storage: &StorageManager, log: &RunLog, summary: &mut RunSummary) {
        summary.finished_at = chrono::Utc::now().to_rfc3339();
        log.info(format!(
            "Run finished for SIC {}: {} selected, {} skipped, {} filings, {} documents saved, {} errors.",
            summary.sic_code,
            summary.entities_selected,
            summary.entities_skipped,
            summary.filings_visited,
            summary.documents_saved,
            summary.errors
        ));
        if let Err(e) = storage.save_run_summary(&*summary) {
            log.error(format!("Failed to save run summary: {}", e));
        }
        tracing::info!("Run log written to {}", log.path().display());
    }
}

/// Uniform sample of `sample_size` CIKs without replacement, or all of them
/// when no (or a too large) sample size is given.
pub fn select_entities<R: Rng + ?Sized>(ciks: Vec<Cik>, sample_size: Option<usize>, rng: &mut R) -> Vec<Cik> {
    match sample_size {
        Some(n) if n < ciks.len() => ciks.choose_multiple(rng, n).cloned().collect(),
        _ => ciks,
    }
}
