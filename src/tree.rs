//! In-memory document tree.
//!
//! Nodes live in a [`Document`] arena and refer to each other through
//! [`NodeId`] handles. Every parent exposes three views of its element
//! children (singleton slots, plural lists and the ordered children list);
//! they may be edited independently between parsing and serializing, and
//! [`Reconciliation`] decides once per node whether it survives.

mod document;
mod node;
mod reconcile;

pub use document::Document;
pub use node::{singular_from_key, AttrValue, Child, Node, NodeId, PLURAL_SENTINEL};
pub use reconcile::Reconciliation;
