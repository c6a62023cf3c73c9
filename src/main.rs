// src/main.rs
mod config;
mod edgar;
mod extractors;
mod pipeline;
mod storage;
mod utils;

use clap::Parser;
use config::HarvestConfig;
use edgar::EdgarClient;
use pipeline::Harvester;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use utils::AppError;

/// Download annual reports (10-K, 10-K/A, 20-F, 40-F) from SEC EDGAR for
/// every company registered under a SIC code.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SIC code to search companies by (e.g. 7311)
    #[arg(short, long)]
    sic: String,

    /// JSON config file; command-line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root folder for downloads (files go to <root>/<sic>/<cik>/)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Run log file, truncated at the start of every run
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Number of index rows requested per report type and company
    #[arg(short, long)]
    num_filings: Option<usize>,

    /// First filing year to keep (inclusive)
    #[arg(long)]
    start_year: Option<i32>,

    /// Last filing year to keep (inclusive)
    #[arg(long)]
    end_year: Option<i32>,

    /// Process a random sample of this many companies
    #[arg(long)]
    sample_size: Option<usize>,

    /// Seed for the company sample
    #[arg(long)]
    seed: Option<u64>,

    /// User-Agent sent to EDGAR (SEC requires a name and contact e-mail)
    #[arg(long, env = "EDGAR_USER_AGENT")]
    user_agent: Option<String>,
}

impl Args {
    fn into_config(self) -> Result<(String, HarvestConfig), AppError> {
        let mut config = match &self.config {
            Some(path) => HarvestConfig::from_file(path)?,
            None => HarvestConfig::default(),
        };

        if let Some(dir) = self.output_dir {
            config.download_root = dir;
        }
        if let Some(log_file) = self.log_file {
            config.log_file = log_file;
        }
        if let Some(n) = self.num_filings {
            config.num_filings = n;
        }
        if let Some(year) = self.start_year {
            config.start_year = year;
        }
        if let Some(year) = self.end_year {
            config.end_year = year;
        }
        if self.sample_size.is_some() {
            config.sample_size = self.sample_size;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(agent) = self.user_agent {
            config.user_agent = agent;
        }

        config.validate()?;
        Ok((self.sic, config))
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments and merge with the optional config file
    let args = Args::parse();
    tracing::debug!("Parsed args: {:?}", args);
    let (sic_code, config) = args.into_config()?;
    tracing::info!(
        "Fetching annual reports for SIC {} ({}-{}) into {}",
        sic_code,
        config.start_year,
        config.end_year,
        config.download_root.display()
    );

    // 3. Initialize the EDGAR client and the pipeline
    let client = EdgarClient::new(&config.user_agent, config.min_request_interval())?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let harvester = Harvester::new(client, config)?;

    // 4. Run
    let summary = harvester.run(&sic_code, &mut rng).await?;

    tracing::info!(
        "Processing finished. Companies: {} processed, {} skipped. Documents saved: {}. Errors: {}",
        summary.entities_processed,
        summary.entities_skipped,
        summary.documents_saved,
        summary.errors
    );

    Ok(())
}
