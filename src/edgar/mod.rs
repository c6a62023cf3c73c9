// src/edgar/mod.rs
pub mod client;
pub mod discovery;
pub mod filings;
pub mod models;
pub mod urls;

#[cfg(test)]
pub mod testing;

pub use client::{EdgarClient, Fetcher};
pub use discovery::{discover_entities, DiscoveryStop};
pub use filings::FilingEnumerator;
pub use urls::Endpoints;
