use indexmap::IndexMap;

use crate::error::Location;
use crate::tree::AttrValue;

/// Marker that opens a special, opaque tag such as `<![CDATA[`
pub const SPECIAL_OPEN: &str = "<![";
/// Marker that closes a special tag
pub const SPECIAL_CLOSE: &str = "]]>";

/// One tag cut verbatim out of the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub text: String,
    /// Position of the opening `<` in the comment-free text
    pub location: Location,
}

/// Structured form of a single raw tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// Special block kept verbatim, delimiters included
    Raw(String),
    /// `</name>`
    Close(String),
    Open(OpenTag),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTag {
    pub name: String,
    pub attributes: IndexMap<String, AttrValue>,
    /// Source text of values that contained entities, keyed by attribute
    pub sources: IndexMap<String, String>,
    pub self_closing: bool,
    /// Text between the last attribute and `>` when the tag closes itself
    pub closing_decoration: String,
}
