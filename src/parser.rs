pub mod builder;
pub mod comments;
pub mod config;
pub mod lexer;
pub mod tag;
pub mod token;
pub mod xml;

pub use config::ParserConfig;
pub use xml::XmlParser;
