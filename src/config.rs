// src/config.rs
use crate::edgar::client::EDGAR_REQUEST_DELAY_MS;
use crate::edgar::models::YearRange;
use crate::edgar::urls::{Endpoints, DEFAULT_BASE_URL};
use crate::utils::AppError;
use chrono::Datelike;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// SEC requires a contact in the User-Agent; override with --user-agent or EDGAR_USER_AGENT.
pub const DEFAULT_USER_AGENT: &str = "sic_filings research contact@example.com";

/// Settings for one harvesting run. Every field has a default, so a JSON
/// config file only needs the keys it changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub user_agent: String,
    pub base_url: String,
    /// Filings land in `<download_root>/<sic code>/<cik>/`.
    pub download_root: PathBuf,
    pub log_file: PathBuf,
    /// Index rows requested per report type and company.
    pub num_filings: usize,
    pub start_year: i32,
    pub end_year: i32,
    pub sample_size: Option<usize>,
    pub seed: Option<u64>,
    /// Resume check: a company folder with at least this many files...
    pub expected_file_count: usize,
    /// ...none smaller than this many bytes, is skipped.
    pub min_file_size: u64,
    pub page_delay_ms: u64,
    pub document_delay_ms: u64,
    pub min_request_interval_ms: u64,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            download_root: PathBuf::from("./sic_filings"),
            log_file: PathBuf::from("debug_log.txt"),
            num_filings: 10,
            start_year: 2000,
            end_year: chrono::Local::now().year(),
            sample_size: None,
            seed: None,
            expected_file_count: 2,
            min_file_size: 100,
            page_delay_ms: 500,
            document_delay_ms: 1000,
            min_request_interval_ms: EDGAR_REQUEST_DELAY_MS,
        }
    }
}

impl HarvestConfig {
    /// Loads a JSON config file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Cannot read config {}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| AppError::Config(format!("Invalid config {}: {}", path.display(), e)))
    }

    pub fn year_range(&self) -> Result<YearRange, AppError> {
        YearRange::new(self.start_year, self.end_year).ok_or_else(|| {
            AppError::Config(format!(
                "start year {} is after end year {}",
                self.start_year, self.end_year
            ))
        })
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.year_range()?;
        if self.user_agent.trim().is_empty() {
            return Err(AppError::Config("user agent must not be empty".to_string()));
        }
        if self.num_filings == 0 {
            return Err(AppError::Config("num_filings must be at least 1".to_string()));
        }
        Endpoints::new(&self.base_url)
            .map_err(|e| AppError::Config(format!("base_url: {}", e)))?;
        Ok(())
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn document_delay(&self) -> Duration {
        Duration::from_millis(self.document_delay_ms)
    }

    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }
}
