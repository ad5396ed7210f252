use crate::tree::{Child, Document, NodeId};

/// Compares the element structure reachable through children lists.
///
/// Tag names, attributes in order, self-closing markup and raw blocks must
/// match. Alias tables and reference counts are not compared.
pub fn documents_equal(left: &Document, right: &Document) -> bool {
    let mut stack = vec![(left.root(), right.root())];

    while let Some((l_id, r_id)) = stack.pop() {
        if !nodes_equal(left, l_id, right, r_id) {
            return false;
        }
        let (Some(l_node), Some(r_node)) = (left.node(l_id), right.node(r_id)) else {
            return false;
        };

        for (l_child, r_child) in l_node.children.iter().zip(&r_node.children) {
            match (l_child, r_child) {
                (Child::Raw(l), Child::Raw(r)) if l == r => {}
                (Child::Element(l), Child::Element(r)) => stack.push((*l, *r)),
                _ => return false,
            }
        }
    }
    true
}

fn nodes_equal(left: &Document, l_id: NodeId, right: &Document, r_id: NodeId) -> bool {
    match (left.node(l_id), right.node(r_id)) {
        (Some(l), Some(r)) => {
            l.tag_name() == r.tag_name()
                && l.is_self_closing() == r.is_self_closing()
                && l.closing_decoration() == r.closing_decoration()
                && l.children.len() == r.children.len()
                && l.attributes.len() == r.attributes.len()
                && l.attributes.iter().zip(&r.attributes).all(|(a, b)| a == b)
        }
        _ => false,
    }
}

/// Asserts that two documents have the same element structure
///
/// # Panics
///
/// Panics if the documents differ
pub fn assert_documents_equal(left: &Document, right: &Document, message: &str) {
    assert!(
        documents_equal(left, right),
        "{}\nLeft: {:?}\nRight: {:?}",
        message,
        left,
        right
    );
}
