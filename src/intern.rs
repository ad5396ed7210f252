//! Tag name interning.
//!
//! Large documents repeat a small set of tag names thousands of times, so
//! every parsed node shares its name through an interner. One interner can be
//! handed to several parsers, including parsers on different threads.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub struct StringInterner {
    strings: RwLock<HashMap<String, Arc<str>>>,
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

impl StringInterner {
    pub fn new() -> Self {
        Self {
            strings: RwLock::new(HashMap::new()),
        }
    }

    pub fn intern(&self, s: &str) -> Arc<str> {
        if let Some(interned) = self.strings.read().get(s) {
            return Arc::clone(interned);
        }

        let mut write_guard = self.strings.write();
        write_guard
            .entry(s.to_string())
            .or_insert_with(|| Arc::from(s))
            .clone()
    }

    /// Number of distinct strings held
    pub fn len(&self) -> usize {
        self.strings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.read().is_empty()
    }
}
