// src/utils/mod.rs
pub mod error;
pub mod logging;
pub mod run_log;

pub use error::AppError; // Re-export main error type for convenience
pub use run_log::RunLog;
