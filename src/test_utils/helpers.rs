use std::{env, fs, path::PathBuf};

use crate::tree::{Document, NodeId};

pub fn tmp_file_path(name: &str) -> PathBuf {
    let mut dir = env::temp_dir();
    dir.push("tagtree_tests");
    let _ = fs::create_dir_all(&dir);
    dir.push(name);
    dir
}

/// Tag name of `id`, empty for unknown handles
pub fn tag_name_of(document: &Document, id: NodeId) -> String {
    document
        .node(id)
        .map(|node| node.tag_name().to_string())
        .unwrap_or_default()
}
