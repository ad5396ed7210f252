pub const TEST_FILES: [&str; 3] = [
    "tests/input/small.xml",
    "tests/input/game.xml",
    "tests/input/large.xml",
];

pub const INVALID_XML_SAMPLES: [(&str, &str); 6] = [
    ("<game <map>", "Nested tag opening"),
    ("<game>\n<map", "Unterminated tag"),
    ("<![CDATA[never closed", "Unterminated special block"),
    ("<unit id=1/>", "Unquoted attribute value"),
    ("<unit id=/>", "Missing attribute value"),
    ("<unit id=\"1/>", "Unterminated attribute value"),
];
