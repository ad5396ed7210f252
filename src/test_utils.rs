mod comparison;
mod data;
mod fixtures;
mod helpers;

pub use comparison::{assert_documents_equal, documents_equal};
pub use data::{read_test_file, TestData};
pub use fixtures::{INVALID_XML_SAMPLES, TEST_FILES};
pub use helpers::{tag_name_of, tmp_file_path};

// Re-export common test types/traits
pub use crate::{
    error::{
        FormatError, IOError, LexicalError, Location, ParseError, ParseErrorKind, Result,
        SecurityError, SemanticError, SyntaxError,
    },
    formatter::{escape_attribute, FormatConfig, Formatter, XmlFormatter},
    parse, parse_file,
    parser::{
        comments::strip_comments,
        config::{ParserConfig, DEFAULT_MAX_ATTRIBUTES, DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE},
        xml::XmlParser,
    },
    serialize,
    tree::{AttrValue, Child, Document, Node, NodeId, PLURAL_SENTINEL},
    utils::{format_xml, format_xml_with, parse_xml, read_file, write_file},
};
