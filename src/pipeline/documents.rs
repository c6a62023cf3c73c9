// src/pipeline/documents.rs
use super::Harvester;
use crate::edgar::models::{
    is_eligible_description, DocumentDescriptor, DocumentKind, FilingRecord, ANNUAL_REPORT_TYPES,
};
use crate::edgar::urls::document_name_from_url;
use crate::edgar::Fetcher;
use crate::extractors::{listing, text, xml, DocumentRow};
use crate::storage::{Payload, StorageManager};
use crate::utils::error::{EdgarError, ExtractError};
use crate::utils::{AppError, RunLog};
use std::path::{Path, PathBuf};

/// What happened to the documents of one filing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilingOutcome {
    pub saved: usize,
    pub errors: usize,
}

impl<F: Fetcher> Harvester<F> {
    /// Downloads every eligible document of a filing into `folder`.
    /// Failures are logged per document and never abort the filing.
    pub(super) async fn process_filing(
        &self,
        storage: &StorageManager,
        log: &RunLog,
        filing: &FilingRecord,
        folder: &Path,
    ) -> FilingOutcome {
        let mut outcome = FilingOutcome::default();
        let cik = &filing.cik;
        let report_type = filing.report_type;

        let page = match self.fetcher.fetch(&filing.detail_url, &[]).await {
            Ok(page) => page,
            Err(e) => {
                outcome.errors += 1;
                log.error(format!(
                    "Error fetching filing page for CIK {}, report type {}: {}",
                    cik, report_type, e
                ));
                return outcome;
            }
        };

        let rows = match listing::document_rows(&page.text()) {
            Ok(rows) => rows,
            Err(_) => {
                log.info(format!(
                    "No documents table found at {} for CIK {}, report type {}",
                    filing.detail_url, cik, report_type
                ));
                return outcome;
            }
        };

        for row in rows {
            if !is_eligible_description(&row.description, &ANNUAL_REPORT_TYPES) {
                continue;
            }

            let descriptor = match self.describe(row) {
                Ok(descriptor) => descriptor,
                Err(e) => {
                    outcome.errors += 1;
                    log.error(format!(
                        "Skipping document row for CIK {}, report type {}: {}",
                        cik, report_type, e
                    ));
                    continue;
                }
            };

            log.info(format!(
                "Document link found for CIK {}, report type {}, date {}: {}, Description: {}",
                cik, report_type, filing.filing_date, descriptor.url, descriptor.description
            ));

            match self.download_document(storage, log, filing, &descriptor, folder).await {
                Ok(_) => outcome.saved += 1,
                Err(e) => {
                    outcome.errors += 1;
                    log.error(format!(
                        "Error downloading document for CIK {}, report type {}: {}",
                        cik, report_type, e
                    ));
                }
            }

            tokio::time::sleep(self.config.document_delay()).await;
        }

        outcome
    }

    fn describe(&self, row: DocumentRow) -> Result<DocumentDescriptor, AppError> {
        let href = row.href.ok_or(ExtractError::MissingCell("document link"))?;
        let url = self.endpoints.resolve(&href)?;
        let name = document_name_from_url(&url).ok_or_else(|| EdgarError::InvalidUrl(url.clone()))?;
        Ok(DocumentDescriptor {
            description: row.description,
            url,
            name,
        })
    }

    /// Fetches one document and stores it according to its extension.
    async fn download_document(
        &self,
        storage: &StorageManager,
        log: &RunLog,
        filing: &FilingRecord,
        descriptor: &DocumentDescriptor,
        folder: &Path,
    ) -> Result<PathBuf, AppError> {
        let document = self.fetcher.fetch(&descriptor.url, &[]).await?;
        let kind = descriptor.name.kind();
        tracing::debug!(
            "Fetched {} ({} bytes, content type {}) as {:?}",
            document.url,
            document.body.len(),
            document.content_type.as_deref().unwrap_or("unknown"),
            kind
        );

        log.info(format!(
            "Saving file for CIK {}, report type {}, date {} at path: {}",
            filing.cik,
            filing.report_type,
            filing.filing_date,
            folder.join(descriptor.name.file_name()).display()
        ));

        let (payload, label) = match kind {
            DocumentKind::Text => (Payload::Text(text::extract_text(&document.body)), "text file"),
            DocumentKind::Structured => {
                if let Err(e) = xml::root_element_name(&document.body) {
                    log.warn(format!(
                        "Structured document {} for CIK {} is not well-formed, saving as fetched: {}",
                        descriptor.url, filing.cik, e
                    ));
                }
                (Payload::Raw(document.body), "XML file")
            }
            DocumentKind::Binary => (Payload::Raw(document.body), "file"),
        };

        let path = storage.save_document(folder, &descriptor.name, &payload)?;
        log.info(format!(
            "Saved {} for CIK {}, report type {} at {}",
            label,
            filing.cik,
            filing.report_type,
            path.display()
        ));
        Ok(path)
    }
}
