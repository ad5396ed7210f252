// parser/xml.rs
//! XML parser implementation.
//!
//! This module ties the pipeline together:
//! - Strips comments from the raw text
//! - Cuts the remaining text into raw tags
//! - Parses each tag and builds the aliased node tree

use std::sync::Arc;

use tracing::debug;

use super::{builder::TreeBuilder, comments::strip_comments, config::ParserConfig, lexer::Lexer};
use crate::error::Result;
use crate::intern::StringInterner;
use crate::tree::Document;

/// Parser for XML documents
#[derive(Debug)]
pub struct XmlParser {
    /// Source text, comments included
    input: String,
    /// Limits applied while parsing
    config: ParserConfig,
    /// Tag name storage, possibly shared with other parsers
    interner: Arc<StringInterner>,
}

impl XmlParser {
    /// Creates a new XML parser for the given input
    pub fn new(input: &str) -> Result<Self> {
        let config = ParserConfig::default();
        config.validate_input_size(input.len())?;

        Ok(Self {
            input: input.to_string(),
            config,
            interner: Arc::new(StringInterner::new()),
        })
    }

    /// Setter method to configure the parser
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Shares tag name storage with other parsers
    pub fn with_interner(mut self, interner: Arc<StringInterner>) -> Self {
        self.interner = interner;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses the complete document
    /// # Returns
    /// - Ok(Document) whose root holds the top-level elements
    /// - Err on malformed tags or exceeded limits
    pub fn parse(&self) -> Result<Document> {
        self.config.validate_input_size(self.input.len())?;

        let stripped = strip_comments(&self.input);
        let tags = Lexer::new(&stripped).tokenize()?;
        debug!(tags = tags.len(), "Tokenized document");

        TreeBuilder::new(&self.config, &self.interner).build(&tags)
    }
}
