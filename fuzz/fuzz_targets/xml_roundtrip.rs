#![no_main]
use libfuzzer_sys::fuzz_target;
use tagtree::{parse, serialize};

// Serialized output must parse again and serialize to the same text
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(document) = parse(s) {
            if let Ok(first) = serialize(&document) {
                let reparsed = parse(&first).unwrap();
                let second = serialize(&reparsed).unwrap();
                assert_eq!(first, second);
            }
        }
    }
});
