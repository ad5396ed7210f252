//! tagtree: a lossless XML parser and serializer with an editable node tree
//!
//! This crate provides functionality to:
//! - Parse XML documents into a node arena without dropping tags, attribute
//!   order, self-closing markup, boolean attributes or `<![...]]>` blocks
//! - Reach every element three ways (first child by name, all children by
//!   name, ordered children) and edit any of those views
//! - Serialize the tree back, reconciling the three views so that a node
//!   removed from any one of them disappears from the output
//! - Handle errors with detailed context
//!
//! # Examples
//! ```
//! use tagtree::{parse, serialize, Result};
//!
//! fn example() -> Result<()> {
//!     let mut document = parse("<game><unit id=\"1\"/><unit id=\"2\"/></game>")?;
//!     let game = document.select(&["game"]).unwrap_or(document.root());
//!     let first = document.node(game).and_then(|node| node.single("unit"));
//!     if let Some(first) = first {
//!         document.remove_child(game, first);
//!     }
//!     assert_eq!(serialize(&document)?, "<game>\n    <unit id=\"2\"/>\n</game>\n");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

use tracing::{debug, info, instrument, warn};

pub mod error;
pub mod formatter;
pub mod intern;
pub mod parser;
pub mod test_utils;
pub mod tree;
pub mod utils;

// Re-exports
pub use error::{IOError, ParseError, ParseErrorKind, Result, SemanticError};
pub use formatter::{FormatConfig, Formatter, XmlFormatter};
pub use parser::{ParserConfig, XmlParser};
pub use tree::{AttrValue, Child, Document, Node, NodeId, Reconciliation};
use utils::{parse_xml, read_file};

/// Parses XML text into a document tree
pub fn parse(text: &str) -> Result<Document> {
    parse_xml(text)
}

/// Writes a document tree back to XML text with the default formatting
pub fn serialize(document: &Document) -> Result<String> {
    XmlFormatter.format(document, &FormatConfig::default())
}

#[instrument]
pub fn parse_file(path: &str) -> Result<Document> {
    debug!("Starting to parse file: {}", path);

    let content = read_file(path)?;

    info!("File read successfully, determining format");

    let result = if path.to_lowercase().ends_with(".xml") {
        parse_xml(&content)
    } else {
        warn!("Unknown file extension");
        Err(ParseError::new(ParseErrorKind::Semantic(
            SemanticError::UnknownFormat,
        )))
    };

    debug!("Parsing completed");
    result
}
