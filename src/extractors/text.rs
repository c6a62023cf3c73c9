// src/extractors/text.rs
use scraper::{node::Node, Html};

/// Elements whose text content is never part of the readable document.
const NON_CONTENT_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Strips markup from an HTML (or SGML-wrapped text) document, returning the
/// concatenated text nodes in document order.
pub fn extract_text(raw: &[u8]) -> String {
    let source = String::from_utf8_lossy(raw);
    let document = Html::parse_document(&source);

    let mut text = String::with_capacity(source.len() / 2);
    for node in document.tree.root().descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(el) if NON_CONTENT_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            text.push_str(chunk);
        }
    }
    text
}
