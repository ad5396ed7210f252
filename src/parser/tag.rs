//! Turns one raw tag string into a [`Tag`] descriptor.

use indexmap::IndexMap;

use super::config::ParserConfig;
use super::token::{OpenTag, Tag, SPECIAL_OPEN};
use crate::error::{ParseError, ParseErrorKind, Result, SyntaxError};
use crate::tree::AttrValue;

/// The fixed entity set decoded in attribute values
const ENTITIES: [(&str, char); 5] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&apos;", '\''),
];

struct TagCursor {
    chars: Vec<char>,
    index: usize,
    /// Exclusive end of the tag body, before the closing `>`
    end: usize,
}

impl TagCursor {
    fn new(raw: &str) -> Self {
        let chars: Vec<char> = raw.chars().collect();
        let end = match chars.last() {
            Some('>') => chars.len() - 1,
            _ => chars.len(),
        };
        Self {
            chars,
            index: 0,
            end,
        }
    }

    fn current(&self) -> Option<char> {
        if self.index < self.end {
            self.chars.get(self.index).copied()
        } else {
            None
        }
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.current().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Text from `start` up to the end of the tag body
    fn rest_from(&self, start: usize) -> String {
        self.chars
            .iter()
            .take(self.end)
            .skip(start)
            .collect()
    }

    /// Reads a tag or attribute name: everything up to `=`, whitespace,
    /// `/` or the end of the tag
    fn parse_name(&mut self) -> String {
        self.skip_whitespace();
        let mut name = String::new();
        while let Some(c) = self.current() {
            if c == '=' || c == '/' || c.is_whitespace() {
                break;
            }
            name.push(c);
            self.advance();
        }
        name
    }

    /// Reads `= "value"` after an attribute name. Returns the decoded value
    /// and, when it contained entities, the text as written between quotes.
    fn parse_value(&mut self, name: &str) -> Result<(AttrValue, Option<String>)> {
        let name_end = self.index;
        self.skip_whitespace();
        if self.current() != Some('=') {
            // Whitespace after a bare name belongs to the next gap
            self.index = name_end;
            return Ok((AttrValue::Flag, None));
        }
        self.advance(); // consume '='
        self.skip_whitespace();

        let delimiter = match self.current() {
            Some(c @ ('"' | '\'')) => c,
            Some(c) => {
                return Err(ParseError::new(ParseErrorKind::Syntax(
                    SyntaxError::UnexpectedDelimiter(c),
                ))
                .with_context(format!("Value of attribute `{}` must be quoted", name)))
            }
            None => {
                return Err(ParseError::new(ParseErrorKind::Syntax(
                    SyntaxError::UnexpectedDelimiter('>'),
                ))
                .with_context(format!("Attribute `{}` has no value", name)))
            }
        };
        self.advance();

        let mut value = String::new();
        while let Some(c) = self.current() {
            if c == delimiter {
                self.advance();
                let decoded = decode_entities(&value);
                let source = value.contains('&').then_some(value);
                return Ok((AttrValue::Text(decoded), source));
            }
            value.push(c);
            self.advance();
        }

        Err(ParseError::new(ParseErrorKind::Syntax(
            SyntaxError::UnterminatedValue(name.to_string()),
        )))
    }
}

/// Parses a single raw tag as produced by the lexer
pub fn parse_tag(raw: &str, config: &ParserConfig) -> Result<Tag> {
    if raw.starts_with(SPECIAL_OPEN) {
        return Ok(Tag::Raw(raw.to_string()));
    }

    let mut cursor = TagCursor::new(raw);
    cursor.advance(); // skip '<'

    if cursor.current() == Some('/') {
        cursor.advance();
        return Ok(Tag::Close(cursor.parse_name()));
    }

    let mut name = cursor.parse_name();
    let is_declaration = name.starts_with('?') || name.starts_with('!');
    let mut self_closing = is_declaration;
    let mut closing_decoration = String::new();
    let mut attributes = IndexMap::new();
    let mut sources = IndexMap::new();

    // `<?xml?>` reads the trailing '?' as part of the name
    if name.starts_with('?') && name.len() > 1 && name.ends_with('?') && cursor.current().is_none() {
        name.pop();
        closing_decoration.push('?');
    }

    loop {
        let gap_start = cursor.index;
        cursor.skip_whitespace();

        match cursor.current() {
            None => break,
            Some('/') => {
                self_closing = true;
                closing_decoration = cursor.rest_from(gap_start);
                break;
            }
            Some('?') if name.starts_with('?') && cursor.rest_from(cursor.index) == "?" => {
                closing_decoration = cursor.rest_from(gap_start);
                break;
            }
            Some(_) => {}
        }

        let attribute = cursor.parse_name();
        if attribute.is_empty() {
            break;
        }
        let (value, source) = cursor.parse_value(&attribute)?;
        match source {
            Some(source) => {
                sources.insert(attribute.clone(), source);
            }
            None => {
                sources.shift_remove(&attribute);
            }
        }
        attributes.insert(attribute, value);
        config.validate_attributes(attributes.len())?;
    }

    Ok(Tag::Open(OpenTag {
        name,
        attributes,
        sources,
        self_closing,
        closing_decoration,
    }))
}

/// Decodes the fixed entity set; any other `&` sequence is kept as written
pub fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut output = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(position) = rest.find('&') {
        let (before, tail) = rest.split_at(position);
        output.push_str(before);
        match ENTITIES.iter().find(|(entity, _)| tail.starts_with(entity)) {
            Some((entity, decoded)) => {
                output.push(*decoded);
                rest = tail.get(entity.len()..).unwrap_or_default();
            }
            None => {
                output.push('&');
                rest = tail.get(1..).unwrap_or_default();
            }
        }
    }
    output.push_str(rest);
    output
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::panic_in_result_fn)]
mod tests {
    use super::*;

    fn open(raw: &str) -> OpenTag {
        match parse_tag(raw, &ParserConfig::default()).unwrap() {
            Tag::Open(tag) => tag,
            other => panic!("Expected open tag, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_special_tag() -> Result<()> {
        let tag = parse_tag("<![CDATA[a=\"b\"]]>", &ParserConfig::default())?;
        assert_eq!(tag, Tag::Raw("<![CDATA[a=\"b\"]]>".to_string()));
        Ok(())
    }

    #[test]
    fn test_parse_closing_tag() -> Result<()> {
        let tag = parse_tag("</territory>", &ParserConfig::default())?;
        assert_eq!(tag, Tag::Close("territory".to_string()));
        Ok(())
    }

    #[test]
    fn test_parse_attributes_in_order() {
        let tag = open("<unit name=\"infantry\" attack='1' defense = \"2\">");
        assert_eq!(tag.name, "unit");
        let names: Vec<&str> = tag.attributes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["name", "attack", "defense"]);
        assert_eq!(tag.attributes.get("attack"), Some(&AttrValue::from("1")));
        assert!(!tag.self_closing);
    }

    #[test]
    fn test_parse_boolean_attribute() {
        let tag = open("<option disabled value=\"x\">");
        assert_eq!(tag.attributes.get("disabled"), Some(&AttrValue::Flag));
        assert_eq!(tag.attributes.get("value"), Some(&AttrValue::from("x")));
    }

    #[test]
    fn test_parse_self_closing_decoration() {
        let spaced = open("<unit id=\"1\" />");
        assert!(spaced.self_closing);
        assert_eq!(spaced.closing_decoration, " /");

        let tight = open("<br/>");
        assert!(tight.self_closing);
        assert_eq!(tight.closing_decoration, "/");
        assert!(tight.attributes.is_empty());
    }

    #[test]
    fn test_parse_declarations_are_self_closing() {
        let xml = open("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        assert_eq!(xml.name, "?xml");
        assert!(xml.self_closing);
        assert_eq!(xml.closing_decoration, "?");
        assert_eq!(xml.attributes.len(), 2);

        let bare = open("<?xml?>");
        assert_eq!(bare.name, "?xml");
        assert_eq!(bare.closing_decoration, "?");

        let doctype = open("<!DOCTYPE game SYSTEM \"game.dtd\">");
        assert_eq!(doctype.name, "!DOCTYPE");
        assert!(doctype.self_closing);
        assert_eq!(doctype.closing_decoration, "");
        assert_eq!(doctype.attributes.get("game"), Some(&AttrValue::Flag));
        assert_eq!(doctype.attributes.get("SYSTEM"), Some(&AttrValue::Flag));
    }

    #[test]
    fn test_parse_unquoted_value_is_error() {
        let err = parse_tag("<unit id=1>", &ParserConfig::default()).unwrap_err();
        assert_eq!(
            err.kind(),
            &ParseErrorKind::Syntax(SyntaxError::UnexpectedDelimiter('1'))
        );
    }

    #[test]
    fn test_parse_missing_value_is_error() {
        let err = parse_tag("<unit id=>", &ParserConfig::default()).unwrap_err();
        assert_eq!(
            err.kind(),
            &ParseErrorKind::Syntax(SyntaxError::UnexpectedDelimiter('>'))
        );
    }

    #[test]
    fn test_parse_unterminated_value_is_error() {
        let err = parse_tag("<unit id=\"1>", &ParserConfig::default()).unwrap_err();
        assert_eq!(
            err.kind(),
            &ParseErrorKind::Syntax(SyntaxError::UnterminatedValue("id".to_string()))
        );
    }

    #[test]
    fn test_duplicate_attribute_later_wins() {
        let tag = open("<unit id=\"1\" kind=\"x\" id=\"2\">");
        assert_eq!(tag.attributes.len(), 2);
        assert_eq!(tag.attributes.get_index(0), Some((&"id".to_string(), &AttrValue::from("2"))));
    }

    #[test]
    fn test_whitespace_is_permissive() {
        let tag = open("<unit\n\tid =\n \"1\"\n/>");
        assert_eq!(tag.attributes.get("id"), Some(&AttrValue::from("1")));
        assert!(tag.self_closing);
        assert_eq!(tag.closing_decoration, "\n/");
    }

    #[test]
    fn test_flag_before_spaced_close() {
        let tag = open("<territory name=\"Quebec\" capital />");
        assert_eq!(tag.attributes.get("capital"), Some(&AttrValue::Flag));
        assert_eq!(tag.closing_decoration, " /");
    }

    #[test]
    fn test_entity_values_keep_source_spelling() {
        let tag = open("<a x=\"it&apos;s\" y=\"plain\" z=\"&amp;#65;\">");
        assert_eq!(tag.attributes.get("x"), Some(&AttrValue::from("it's")));
        assert_eq!(tag.sources.get("x").map(String::as_str), Some("it&apos;s"));
        assert_eq!(tag.sources.get("z").map(String::as_str), Some("&amp;#65;"));
        assert!(!tag.sources.contains_key("y"));

        let duplicate = open("<a x=\"&lt;\" x=\"b\">");
        assert!(duplicate.sources.is_empty());
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt; &quot;d&quot; &apos;"), "a & b <c> \"d\" '");
        assert_eq!(decode_entities("&#10; &unknown; &"), "&#10; &unknown; &");
    }

    #[test]
    fn test_attribute_limit() {
        let config = ParserConfig {
            max_attributes: 2,
            ..ParserConfig::default()
        };
        assert!(parse_tag("<a x=\"1\" y=\"2\">", &config).is_ok());
        assert!(parse_tag("<a x=\"1\" y=\"2\" z=\"3\">", &config).is_err());
    }
}
