use std::sync::Arc;

use tracing::trace;

use super::node::{Child, Node, NodeId};
use super::reconcile::Reconciliation;

/// Arena holding every node of one parsed document.
///
/// Index 0 is the synthetic root: no tag name, no attributes, never a child.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(Arc::from(""))],
        }
    }

    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn root_node(&self) -> Option<&Node> {
        self.node(self.root())
    }

    pub fn root_node_mut(&mut self) -> Option<&mut Node> {
        self.node_mut(self.root())
    }

    /// Number of nodes in the arena, the root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing but the root exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub(crate) fn insert(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Creates a detached element with no reference count.
    ///
    /// The node is not part of the output until it is added to some
    /// parent's children list or alias table.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.insert(Node::new(Arc::from(tag_name)))
    }

    /// Appends `child` to the children list of `parent` only
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.node(child).is_none() {
            return false;
        }
        match self.node_mut(parent) {
            Some(node) => {
                node.children.push(Child::Element(child));
                true
            }
            None => false,
        }
    }

    /// Installs `child` under every alias of `parent` the way the parser
    /// does: singleton slot if free, plural list, children list.
    ///
    /// Returns the number of aliases installed, 0 if either handle is invalid.
    pub fn register_child(&mut self, parent: NodeId, child: NodeId) -> u8 {
        let Some(tag_name) = self.node(child).map(|node| node.tag_name().to_string()) else {
            return 0;
        };
        let Some(parent_node) = self.node_mut(parent) else {
            return 0;
        };

        let mut count = 0;
        if !parent_node.singles.contains_key(&tag_name) {
            parent_node.singles.insert(tag_name.clone(), child);
            count += 1;
        }

        let key = parent_node.plural_key(&tag_name);
        trace!(tag = %tag_name, key = %key, "Registering plural alias");
        parent_node.plurals.entry(key).or_default().push(child);
        count += 1;

        parent_node.children.push(Child::Element(child));
        count + 1
    }

    /// Removes `child` from the children list of `parent`.
    ///
    /// For a parsed node this alone drops it from the output, since its
    /// remaining aliases no longer reach its reference count.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(node) = self.node_mut(parent) else {
            return false;
        };
        let before = node.children.len();
        node.children.retain(|entry| entry.element() != Some(child));
        node.children.len() != before
    }

    /// Removes `child` from every alias of `parent`.
    ///
    /// The singleton slot moves on to the next element still listed in the
    /// plural alias, so lookups by name keep working.
    pub fn detach_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(tag_name) = self.node(child).map(|node| node.tag_name().to_string()) else {
            return false;
        };
        let Some(node) = self.node_mut(parent) else {
            return false;
        };

        let before = node.children.len();
        node.children.retain(|entry| entry.element() != Some(child));
        let mut removed = node.children.len() != before;

        for list in node.plurals.values_mut() {
            let len = list.len();
            list.retain(|id| *id != child);
            removed |= list.len() != len;
        }

        if node.single(&tag_name) == Some(child) {
            removed = true;
            match node.plural(&tag_name).first().copied() {
                Some(next) => {
                    node.singles.insert(tag_name, next);
                }
                None => {
                    node.singles.shift_remove(&tag_name);
                }
            }
        }
        removed
    }

    /// Follows singleton aliases from the root, one tag name per step
    pub fn select(&self, path: &[&str]) -> Option<NodeId> {
        path.iter()
            .try_fold(self.root(), |id, name| self.node(id)?.single(name))
    }

    /// Every element below `id` reachable through children lists, in
    /// document order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut seen = vec![false; self.nodes.len()];
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children_of(id).rev().collect();

        while let Some(next) = stack.pop() {
            match seen.get_mut(next.0) {
                Some(flag) if !*flag => *flag = true,
                _ => continue,
            }
            result.push(next);
            stack.extend(self.children_of(next).rev());
        }
        result
    }

    fn children_of(&self, id: NodeId) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.node(id)
            .into_iter()
            .flat_map(|node| node.children.iter().filter_map(Child::element))
    }

    /// Keep/drop decision for every node, as the serializer will apply it
    pub fn kept_nodes(&self) -> Reconciliation {
        Reconciliation::compute(self)
    }
}
