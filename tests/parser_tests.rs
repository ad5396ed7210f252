#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use std::sync::Arc;

use tagtree::intern::StringInterner;
use tagtree::test_utils::*;

#[test]
fn test_parse_builds_triple_aliases() -> Result<()> {
    let document = parse("<game><unit id=\"1\"/><unit id=\"2\"/><map/></game>")?;
    let game = document.select(&["game"]).unwrap();
    let node = document.node(game).unwrap();

    let children: Vec<NodeId> = node.elements().collect();
    assert_eq!(children.len(), 3);
    assert_eq!(node.single("unit"), Some(children[0]));
    assert_eq!(node.plural("unit"), &[children[0], children[1]]);
    assert_eq!(node.single("map"), Some(children[2]));
    assert_eq!(node.plural("map"), &[children[2]]);
    assert!(node.plurals.contains_key("units"));
    assert!(node.plurals.contains_key("maps"));
    Ok(())
}

#[test]
fn test_reference_counts() -> Result<()> {
    let document = parse("<game><unit id=\"1\"/><unit id=\"2\"/></game>")?;
    let game = document.select(&["game"]).unwrap();
    let units = document.node(game).unwrap().plural("unit").to_vec();

    assert_eq!(document.node(units[0]).unwrap().reference_count(), Some(3));
    assert_eq!(document.node(units[1]).unwrap().reference_count(), Some(2));
    assert_eq!(document.node(game).unwrap().reference_count(), Some(3));
    Ok(())
}

#[test]
fn test_alias_consistency() -> Result<()> {
    let data = TestData::load()?;
    let document = parse(&data.game_xml)?;

    for id in document.descendants(document.root()) {
        let node = document.node(id).unwrap();
        let mut first_seen: Vec<(String, NodeId)> = Vec::new();
        for child in node.elements() {
            let name = tag_name_of(&document, child);
            if !first_seen.iter().any(|(seen, _)| *seen == name) {
                first_seen.push((name, child));
            }
        }
        for (name, first) in first_seen {
            assert_eq!(node.single(&name), Some(first), "singleton of {}", name);
            assert_eq!(node.plural(&name).first(), Some(&first), "plural of {}", name);
        }
    }
    Ok(())
}

#[test]
fn test_attributes_keep_source_order() -> Result<()> {
    let document = parse("<unit zeta=\"1\" alpha=\"2\" mid=\"3\"/>")?;
    let unit = document.select(&["unit"]).unwrap();
    let names: Vec<&str> = document
        .node(unit)
        .unwrap()
        .attributes
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    Ok(())
}

#[test]
fn test_attribute_named_like_tag_is_dropped() -> Result<()> {
    let document = parse("<unit unit=\"x\" id=\"1\"/>")?;
    let unit = document.select(&["unit"]).unwrap();
    let node = document.node(unit).unwrap();
    assert!(node.attribute("unit").is_none());
    assert_eq!(node.attr("id"), Some("1"));
    Ok(())
}

#[test]
fn test_entities_are_decoded() -> Result<()> {
    let document = parse("<a v=\"x &amp; y &lt;z&gt; &quot;q&quot; &#10; &copy;\"/>")?;
    let a = document.select(&["a"]).unwrap();
    assert_eq!(
        document.node(a).unwrap().attr("v"),
        Some("x & y <z> \"q\" &#10; &copy;")
    );
    Ok(())
}

#[test]
fn test_special_block_is_raw_child() -> Result<()> {
    let document = parse("<p><![CDATA[<b>bold</b>]]><q/></p>")?;
    let p = document.select(&["p"]).unwrap();
    let node = document.node(p).unwrap();
    assert_eq!(node.children.len(), 2);
    assert_eq!(
        node.children[0],
        Child::Raw("<![CDATA[<b>bold</b>]]>".to_string())
    );
    assert!(node.single("b").is_none());
    Ok(())
}

#[test]
fn test_comments_are_ignored() -> Result<()> {
    let document = parse("<game><!-- <unit/> --><map/></game>")?;
    let game = document.select(&["game"]).unwrap();
    let node = document.node(game).unwrap();
    assert!(node.single("unit").is_none());
    assert!(node.single("map").is_some());
    Ok(())
}

#[test]
fn test_free_text_is_discarded() -> Result<()> {
    let document = parse("<a>some text > here<b/>more</a>")?;
    let a = document.select(&["a"]).unwrap();
    assert_eq!(document.node(a).unwrap().children.len(), 1);
    Ok(())
}

#[test]
fn test_empty_input_gives_empty_document() -> Result<()> {
    let document = parse("")?;
    assert!(document.is_empty());
    assert_eq!(serialize(&document)?, "");

    let document = parse("<!-- only a comment -->")?;
    assert!(document.is_empty());
    Ok(())
}

#[test]
fn test_mismatched_close_is_tolerated() -> Result<()> {
    let document = parse("<a><b></c></a>")?;
    let b = document.select(&["a", "b"]).unwrap();
    assert_eq!(tag_name_of(&document, b), "b");
    Ok(())
}

#[test]
fn test_stray_close_is_ignored() -> Result<()> {
    let document = parse("</x><a/>")?;
    assert!(document.select(&["a"]).is_some());
    Ok(())
}

#[test]
fn test_unclosed_element_is_closed_leniently() -> Result<()> {
    let document = parse("<a><b/>")?;
    let b = document.select(&["a", "b"]).unwrap();
    assert_eq!(document.node(b).unwrap().reference_count(), Some(3));
    assert_eq!(serialize(&document)?, "<a>\n    <b/>\n</a>\n");
    Ok(())
}

#[test]
fn test_declarations() -> Result<()> {
    let document = parse("<?xml version=\"1.0\"?>\n<!DOCTYPE game>\n<game></game>")?;
    let root = document.root_node().unwrap();
    let names: Vec<String> = root
        .elements()
        .map(|id| tag_name_of(&document, id))
        .collect();
    assert_eq!(names, vec!["?xml", "!DOCTYPE", "game"]);

    let xml = document.node(root.single("?xml").unwrap()).unwrap();
    assert!(xml.is_self_closing());
    assert_eq!(xml.closing_decoration(), "?");
    Ok(())
}

#[test]
fn test_invalid_samples_fail() {
    for (input, description) in INVALID_XML_SAMPLES {
        assert!(parse(input).is_err(), "{} should fail: {}", description, input);
    }
}

#[test]
fn test_error_kinds() {
    let err = parse("<game <map>").unwrap_err();
    assert_eq!(
        err.kind(),
        &ParseErrorKind::Lexical(LexicalError::UnexpectedNesting)
    );

    let err = parse("<game>\n<map").unwrap_err();
    assert_eq!(err.kind(), &ParseErrorKind::Lexical(LexicalError::UnterminatedTag));
    assert_eq!(err.location(), Some(&Location::new(2, 1)));
    assert!(err.context().unwrap().contains("<map"));
    assert!(err.to_string().starts_with("at line 2, column 1"));

    let err = parse("<unit id=1/>").unwrap_err();
    assert_eq!(
        err.kind(),
        &ParseErrorKind::Syntax(SyntaxError::UnexpectedDelimiter('1'))
    );
}

#[test]
fn test_tag_errors_carry_location() {
    let err = parse("<a>\n    <b id=\"1/>\n</a>").unwrap_err();
    assert_eq!(
        err.kind(),
        &ParseErrorKind::Syntax(SyntaxError::UnterminatedValue("id".to_string()))
    );
    assert_eq!(err.location(), Some(&Location::new(2, 5)));
}

#[test]
fn test_shared_interner() -> Result<()> {
    let interner = Arc::new(StringInterner::new());
    XmlParser::new("<game><unit/></game>")?
        .with_interner(Arc::clone(&interner))
        .parse()?;
    let before = interner.len();
    XmlParser::new("<game><unit/><unit/></game>")?
        .with_interner(Arc::clone(&interner))
        .parse()?;
    assert_eq!(interner.len(), before);
    assert_eq!(before, 2);
    Ok(())
}

#[test]
fn test_fixture_files_parse() -> Result<()> {
    for path in TEST_FILES {
        let content = read_test_file(path)?;
        let document = parse(&content)?;
        assert!(!document.is_empty(), "{} produced no nodes", path);
    }
    Ok(())
}
