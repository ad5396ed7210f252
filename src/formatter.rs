mod xml;

pub use self::xml::{escape_attribute, XmlFormatter};
use crate::{
    error::{FormatError, ParseError, ParseErrorKind, Result},
    tree::Document,
};

/// Default indentation per nesting level
pub const DEFAULT_INDENT_SPACES: usize = 4;
/// Largest indentation accepted per nesting level
pub const MAX_INDENT_SPACES: usize = 8;

/// Configuration options for formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Number of spaces for indentation
    pub indent_spaces: usize,
}

/// Default configuration for formatting
impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_spaces: DEFAULT_INDENT_SPACES,
        }
    }
}

/// Trait for formatting a Document as a string
pub trait Formatter {
    fn format(&self, document: &Document, config: &FormatConfig) -> Result<String>;
}

/// Common formatting functionality
pub trait CommonFormatter {
    /// Creates the indentation string for a nesting level
    fn create_indentation(level: usize, config: &FormatConfig) -> String {
        " ".repeat(level * config.indent_spaces)
    }

    fn validate_config(config: &FormatConfig) -> Result<()> {
        if config.indent_spaces > MAX_INDENT_SPACES {
            return Err(ParseError::new(ParseErrorKind::Format(
                FormatError::InvalidIndentation(format!(
                    "Indentation of {} spaces exceeds maximum allowed ({})",
                    config.indent_spaces, MAX_INDENT_SPACES
                )),
            ))
            .with_context("Invalid formatting configuration"));
        }
        Ok(())
    }
}
