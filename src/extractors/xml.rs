// src/extractors/xml.rs
use crate::utils::error::ExtractError;

/// Name of the root element of an XML/XBRL document, or why it is not well-formed.
/// Only used for diagnostics; structured documents are always stored as fetched.
pub fn root_element_name(raw: &[u8]) -> Result<String, ExtractError> {
    let source = std::str::from_utf8(raw).map_err(|e| ExtractError::MalformedXml(e.to_string()))?;
    let document = roxmltree::Document::parse(source).map_err(|e| ExtractError::MalformedXml(e.to_string()))?;
    Ok(document.root_element().tag_name().name().to_string())
}
