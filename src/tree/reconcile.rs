use std::collections::HashMap;

use tracing::debug;

use super::document::Document;
use super::node::{singular_from_key, Child, NodeId};

/// Keep/drop decision for every node of a document.
///
/// Every alias entry reachable from the root (singleton slots, plural lists
/// and children lists) counts as one visit of the node it points at. A node
/// is kept once its visits reach its reference count, so dropping a parsed
/// node from any one of its aliases drops it from the output.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    visits: Vec<u32>,
    kept: Vec<bool>,
    listed: Vec<bool>,
    name_overrides: HashMap<NodeId, String>,
}

impl Reconciliation {
    pub fn compute(document: &Document) -> Self {
        let len = document.len();
        let mut visits = vec![0u32; len];
        let mut expanded = vec![false; len];
        let mut name_overrides = HashMap::new();

        let root = document.root();
        if let Some(flag) = expanded.get_mut(root.index()) {
            *flag = true;
        }
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            let Some(node) = document.node(id) else {
                continue;
            };

            let singles = node.singles.values().copied();
            let plurals = node.plurals.values().flatten().copied();
            let children = node.children.iter().filter_map(Child::element);

            for target in singles.chain(plurals).chain(children) {
                let Some(count) = visits.get_mut(target.index()) else {
                    continue;
                };
                *count += 1;
                if let Some(flag) = expanded.get_mut(target.index()) {
                    if !*flag {
                        *flag = true;
                        stack.push(target);
                    }
                }
            }

            for (key, list) in &node.plurals {
                for target in list {
                    let unnamed = document
                        .node(*target)
                        .is_some_and(|child| child.tag_name().is_empty());
                    if unnamed {
                        name_overrides
                            .entry(*target)
                            .or_insert_with(|| singular_from_key(key).to_string());
                    }
                }
            }
        }

        let kept: Vec<bool> = (0..len)
            .map(|index| {
                let id = NodeId(index);
                let threshold = document
                    .node(id)
                    .map_or(1, |node| node.effective_reference_count());
                visits.get(index).is_some_and(|count| *count >= threshold)
            })
            .collect();

        // Children lists of written elements place a node before any alias table
        let mut listed = vec![false; len];
        let writers = (0..len)
            .filter(|index| *index == root.index() || kept.get(*index).copied().unwrap_or(false));
        for index in writers {
            let Some(node) = document.node(NodeId(index)) else {
                continue;
            };
            for target in node.children.iter().filter_map(Child::element) {
                if let Some(flag) = listed.get_mut(target.index()) {
                    *flag = true;
                }
            }
        }

        debug!(
            nodes = len,
            kept = kept.iter().filter(|flag| **flag).count(),
            "Reconciled node aliases"
        );

        Self {
            visits,
            kept,
            listed,
            name_overrides,
        }
    }

    /// Whether `id` is written to the output; the root never is
    pub fn is_kept(&self, id: NodeId) -> bool {
        id.index() != 0 && self.kept.get(id.index()).copied().unwrap_or(false)
    }

    /// Whether `id` sits in the children list of the root or of a kept node
    pub fn is_listed(&self, id: NodeId) -> bool {
        self.listed.get(id.index()).copied().unwrap_or(false)
    }

    /// Number of alias entries pointing at `id`
    pub fn visits(&self, id: NodeId) -> u32 {
        self.visits.get(id.index()).copied().unwrap_or(0)
    }

    /// Tag name recovered from a plural key for a node that has none
    pub fn name_override(&self, id: NodeId) -> Option<&str> {
        self.name_overrides.get(&id).map(String::as_str)
    }

    /// Number of nodes that will be written
    pub fn kept_count(&self) -> usize {
        self.kept.iter().skip(1).filter(|flag| **flag).count()
    }
}
