//! Error handling types for the parser and serializer
//!
//! This module provides custom error types that give detailed information about
//! parsing and serialization failures, including line and column information
//! where available.

use std::{error::Error, fmt};

/// Main error type for parse and serialize operations
#[derive(Debug)]
pub struct ParseError {
    /// The specific kind of error
    kind: ParseErrorKind,
    /// Location where the error occurred
    location: Option<Location>,
    /// Source error that caused this error
    source: Option<Box<dyn Error + Send + Sync>>,
    /// Additional context for the error
    context: Option<String>,
}

/// Represents a location in the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

/// Top-level error categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    IO(IOError),
    Lexical(LexicalError),
    Security(SecurityError),
    Semantic(SemanticError),
    Syntax(SyntaxError),
    Format(FormatError),
}

/// Tokenizer errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    /// A tag was opened while another one was still open
    UnexpectedNesting,
    /// Input ended while a tag was still open
    UnterminatedTag,
}

/// Tag and tree structure errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// Attribute value is not introduced by a quote
    UnexpectedDelimiter(char),
    /// Attribute value is missing its closing quote
    UnterminatedValue(String),
    /// Input ended with an element still open (strict mode)
    UnclosedDocument(String),
}

/// Semantic validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    /// The synthetic root was given attributes
    InvalidRootMutation,
    /// Error parsing a file due to unknown format
    UnknownFormat,
}

/// Security-related errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    /// Exceeded maximum depth of nesting
    MaxDepthExceeded,
    /// Exceeded maximum number of attributes on one tag
    MaxAttributesExceeded,
    /// Exceeded maximum input size
    MaxSizeExceeded,
}

/// Output formatting errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Indentation settings are out of range
    InvalidIndentation(String),
}

/// IO operation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IOError {
    /// File not found
    FileNotFound(String),
    /// Permission denied
    PermissionDenied(String),
    /// Error reading from a file
    ReadError(String),
    /// Error writing to a file
    WriteError(String),
}

impl Location {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn create_error(&self, kind: ParseErrorKind, context: &str) -> ParseError {
        ParseError::new(kind)
            .with_location(self.line, self.column)
            .with_context(context)
    }
}

impl ParseError {
    pub fn new(kind: ParseErrorKind) -> Self {
        Self {
            kind,
            location: None,
            source: None,
            context: None,
        }
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.location = Some(Location { line, column });
        self
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base_error = match &self.kind {
            ParseErrorKind::IO(err) => err.to_string(),
            ParseErrorKind::Lexical(err) => err.to_string(),
            ParseErrorKind::Security(err) => err.to_string(),
            ParseErrorKind::Semantic(err) => err.to_string(),
            ParseErrorKind::Syntax(err) => err.to_string(),
            ParseErrorKind::Format(err) => err.to_string(),
        };

        if let Some(loc) = &self.location {
            write!(
                f,
                "at line {}, column {}: {}",
                loc.line, loc.column, base_error
            )?;
        } else {
            write!(f, "Error: {}", base_error)?;
        }

        if let Some(ctx) = &self.context {
            write!(f, "\nContext: {}", ctx)?;
        }

        if let Some(source) = &self.source {
            write!(f, "\nCaused by: {}", source)?;
        }

        Ok(())
    }
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedNesting => write!(f, "Tag opened while another tag is still open"),
            Self::UnterminatedTag => write!(f, "Unexpected end of input inside a tag"),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedDelimiter(c) => {
                write!(f, "Unexpected attribute value delimiter '{}'", c)
            }
            Self::UnterminatedValue(name) => {
                write!(f, "Unterminated value for attribute '{}'", name)
            }
            Self::UnclosedDocument(name) => write!(f, "Element <{}> is never closed", name),
        }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRootMutation => write!(f, "Document root cannot carry attributes"),
            Self::UnknownFormat => write!(f, "Unknown file format"),
        }
    }
}

impl fmt::Display for SecurityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxDepthExceeded => write!(f, "Maximum nesting depth exceeded"),
            Self::MaxAttributesExceeded => write!(f, "Maximum number of attributes exceeded"),
            Self::MaxSizeExceeded => write!(f, "Maximum input size exceeded"),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndentation(msg) => write!(f, "Invalid indentation: {}", msg),
        }
    }
}

impl fmt::Display for IOError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound(path) => write!(f, "File not found: {}", path),
            Self::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            Self::ReadError(msg) => write!(f, "Read error: {}", msg),
            Self::WriteError(msg) => write!(f, "Write error: {}", msg),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        let source: &(dyn Error + 'static) = self.source.as_deref()?;
        Some(source)
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
