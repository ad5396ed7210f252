use std::fmt;

use crate::error::{ParseError, ParseErrorKind, Result, SecurityError, SyntaxError};

/// Maximum element nesting depth (512), far beyond real game/config documents
pub const DEFAULT_MAX_DEPTH: usize = 512;
/// Maximum input size (64MB) to prevent memory exhaustion
pub const DEFAULT_MAX_SIZE: usize = 67_108_864; // 64MB
/// Maximum number of attributes on a single tag
pub const DEFAULT_MAX_ATTRIBUTES: usize = 1_024;

/// Configuration for parser limits and validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting depth for elements
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub max_size: usize,
    /// Maximum number of attributes per tag
    pub max_attributes: usize,
    /// Fail on elements still open at end of input instead of closing them
    pub require_closed_elements: bool,
}

/// Tracks nesting depth during tree construction
#[derive(Debug)]
pub struct ParsingContext {
    pub current_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: DEFAULT_MAX_SIZE,
            max_attributes: DEFAULT_MAX_ATTRIBUTES,
            require_closed_elements: false,
        }
    }
}

impl fmt::Display for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ParserConfig {{ max_depth: {}, max_size: {}, max_attributes: {}, require_closed_elements: {} }}",
            self.max_depth, self.max_size, self.max_attributes, self.require_closed_elements
        )
    }
}

impl ParserConfig {
    /// Configuration that rejects documents with unclosed elements
    pub fn strict() -> Self {
        Self {
            require_closed_elements: true,
            ..Self::default()
        }
    }

    pub fn validate_input_size(&self, size: usize) -> Result<()> {
        if size > self.max_size {
            return Err(ParseError::new(ParseErrorKind::Security(
                SecurityError::MaxSizeExceeded,
            ))
            .with_context(format!(
                "Input size ({} bytes) exceeds maximum allowed ({})",
                size, self.max_size
            )));
        }
        Ok(())
    }

    pub fn validate_attributes(&self, count: usize) -> Result<()> {
        if count > self.max_attributes {
            return Err(ParseError::new(ParseErrorKind::Security(
                SecurityError::MaxAttributesExceeded,
            )));
        }
        Ok(())
    }

    pub fn validate_closed(&self, open_element: Option<&str>) -> Result<()> {
        match open_element {
            Some(name) if self.require_closed_elements => Err(ParseError::new(
                ParseErrorKind::Syntax(SyntaxError::UnclosedDocument(name.to_string())),
            )),
            _ => Ok(()),
        }
    }
}

impl Default for ParsingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ParsingContext {
    pub fn new() -> Self {
        Self { current_depth: 0 }
    }

    pub fn enter_nested(&mut self, config: &ParserConfig) -> Result<()> {
        self.current_depth += 1;
        if self.current_depth > config.max_depth {
            return Err(ParseError::new(ParseErrorKind::Security(
                SecurityError::MaxDepthExceeded,
            )));
        }
        Ok(())
    }

    pub fn exit_nested(&mut self) {
        if self.current_depth > 0 {
            self.current_depth -= 1;
        }
    }
}
