#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use tagtree::test_utils::*;

#[test]
fn test_parse_file() -> Result<()> {
    let document = parse_file("tests/input/small.xml")?;
    let territory = document.select(&["game", "map", "territory"]).unwrap();
    assert_eq!(document.node(territory).unwrap().attr("name"), Some("Alpha"));
    Ok(())
}

#[test]
fn test_parse_file_unknown_extension() {
    let path = tmp_file_path("document.txt");
    std::fs::write(&path, "<a/>").unwrap();

    let err = parse_file(path.to_str().unwrap()).unwrap_err();
    assert_eq!(
        err.kind(),
        &ParseErrorKind::Semantic(SemanticError::UnknownFormat)
    );
}

#[test]
fn test_missing_file() {
    let err = read_file("tests/input/does_not_exist.xml").unwrap_err();
    assert!(matches!(
        err.kind(),
        ParseErrorKind::IO(IOError::FileNotFound(path)) if path.ends_with("does_not_exist.xml")
    ));
}

#[test]
fn test_write_and_read_back() -> Result<()> {
    let data = TestData::load()?;
    let document = parse_xml(&data.small_xml)?;
    let output = format_xml(&document)?;

    let path = tmp_file_path("small_out.xml");
    let path = path.to_str().unwrap();
    write_file(path, &output)?;

    assert_eq!(read_file(path)?, data.small_xml);
    let reparsed = parse_file(path)?;
    assert_documents_equal(&document, &reparsed, "written file differs");
    Ok(())
}

#[test]
fn test_write_to_missing_directory() {
    let path = tmp_file_path("missing_dir/out.xml");
    let err = write_file(path.to_str().unwrap(), "<a/>").unwrap_err();
    assert!(matches!(
        err.kind(),
        ParseErrorKind::IO(IOError::WriteError(_))
    ));
    assert!(std::error::Error::source(&err).is_some());
}
