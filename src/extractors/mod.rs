// src/extractors/mod.rs
pub mod listing;
pub mod text;
pub mod xml;

// Re-export key extraction types for convenience
pub use listing::DocumentRow;
