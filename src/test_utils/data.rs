use std::fs;

use crate::error::{IOError, ParseError, ParseErrorKind, Result};

pub struct TestData {
    pub small_xml: String,
    pub game_xml: String,
    pub large_xml: String,
}

impl TestData {
    pub fn load() -> Result<Self> {
        Ok(Self {
            small_xml: read_test_file("tests/input/small.xml")?,
            game_xml: read_test_file("tests/input/game.xml")?,
            large_xml: read_test_file("tests/input/large.xml")?,
        })
    }
}

pub fn read_test_file(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        ParseError::new(ParseErrorKind::IO(IOError::ReadError(format!(
            "Failed to read {}: {}",
            path, e
        ))))
    })
}
