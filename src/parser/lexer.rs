//! Splits comment-free text into raw tag strings.
//!
//! Only tags are kept. Free text between tags is skipped; textual payload is
//! expected inside special `<![...]]>` blocks, which are cut out as one
//! opaque unit.

use tracing::trace;

use super::token::{RawTag, SPECIAL_CLOSE, SPECIAL_OPEN};
use crate::error::{LexicalError, Location, ParseError, ParseErrorKind, Result};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let input: Vec<char> = input.chars().collect();
        let current_char = input.first().copied();
        Self {
            input,
            position: 0,
            current_char,
            line: 1,
            column: 1,
        }
    }

    fn advance(&mut self) {
        if self.current_char == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    fn starts_with(&self, pattern: &str) -> bool {
        pattern
            .chars()
            .enumerate()
            .all(|(offset, c)| self.input.get(self.position + offset) == Some(&c))
    }

    fn skip_text(&mut self) {
        while let Some(c) = self.current_char {
            if c == '<' {
                break;
            }
            self.advance();
        }
    }

    /// Returns the next raw tag, or `None` once the input is exhausted
    pub fn next_tag(&mut self) -> Result<Option<RawTag>> {
        self.skip_text();
        if self.current_char.is_none() {
            return Ok(None);
        }

        let tag = if self.starts_with(SPECIAL_OPEN) {
            self.read_special()?
        } else {
            self.read_tag()?
        };
        trace!(tag = %tag.text, "Read tag");
        Ok(Some(tag))
    }

    fn read_tag(&mut self) -> Result<RawTag> {
        let location = self.location();
        let mut text = String::from('<');
        self.advance(); // consume '<'

        while let Some(c) = self.current_char {
            match c {
                '<' => {
                    return Err(self.location().create_error(
                        ParseErrorKind::Lexical(LexicalError::UnexpectedNesting),
                        &format!("Tag opened while `{}` is still open", text),
                    ));
                }
                '>' => {
                    text.push(c);
                    self.advance();
                    return Ok(RawTag { text, location });
                }
                _ => {
                    text.push(c);
                    self.advance();
                }
            }
        }

        Err(unterminated(location, &text))
    }

    fn read_special(&mut self) -> Result<RawTag> {
        let location = self.location();
        let mut text = String::new();

        while let Some(c) = self.current_char {
            text.push(c);
            self.advance();
            if text.len() > SPECIAL_OPEN.len() && text.ends_with(SPECIAL_CLOSE) {
                return Ok(RawTag { text, location });
            }
        }

        Err(unterminated(location, &text))
    }

    /// Collects every remaining tag
    pub fn tokenize(&mut self) -> Result<Vec<RawTag>> {
        let mut tags = Vec::new();
        while let Some(tag) = self.next_tag()? {
            tags.push(tag);
        }
        Ok(tags)
    }
}

fn unterminated(location: Location, text: &str) -> ParseError {
    let preview: String = text.chars().take(40).collect();
    location.create_error(
        ParseErrorKind::Lexical(LexicalError::UnterminatedTag),
        &format!("Input ended inside `{}`", preview),
    )
}
