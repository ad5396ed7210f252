//! Builds the document tree from the raw tag sequence.
//!
//! Open elements are tracked on an explicit stack instead of native
//! recursion, so nesting depth is bounded only by `ParserConfig::max_depth`.
//! A node is registered under its parent once it is complete, which yields
//! the same order and aliases as a recursive descent would.

use std::sync::Arc;

use tracing::{debug, warn};

use super::config::{ParserConfig, ParsingContext};
use super::tag::parse_tag;
use super::token::{OpenTag, RawTag, Tag};
use crate::error::Result;
use crate::intern::StringInterner;
use crate::tree::{Child, Document, Node, NodeId};

pub struct TreeBuilder<'a> {
    config: &'a ParserConfig,
    context: ParsingContext,
    interner: &'a StringInterner,
    document: Document,
    open: Vec<NodeId>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(config: &'a ParserConfig, interner: &'a StringInterner) -> Self {
        Self {
            config,
            context: ParsingContext::new(),
            interner,
            document: Document::new(),
            open: Vec::new(),
        }
    }

    /// Consumes the whole tag sequence
    pub fn build(mut self, tags: &[RawTag]) -> Result<Document> {
        let mut index = 0;
        while let Some(raw) = tags.get(index) {
            index += 1;
            let tag = parse_tag(&raw.text, self.config)
                .map_err(|e| e.with_location(raw.location.line, raw.location.column))?;

            match tag {
                Tag::Raw(text) => self.push_raw(text),
                Tag::Close(name) => self.close_element(&name),
                Tag::Open(open) => self.open_element(open).map_err(|e| {
                    e.with_location(raw.location.line, raw.location.column)
                })?,
            }
        }

        while let Some(id) = self.open.pop() {
            let name = self.tag_name(id);
            self.config.validate_closed(Some(&name))?;
            warn!(tag = %name, "Element left open at end of input, closing it");
            self.complete(id);
        }

        debug!(nodes = self.document.len(), "Built document tree");
        Ok(self.document)
    }

    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(self.document.root())
    }

    fn tag_name(&self, id: NodeId) -> String {
        self.document
            .node(id)
            .map(|node| node.tag_name().to_string())
            .unwrap_or_default()
    }

    fn push_raw(&mut self, text: String) {
        let parent = self.current();
        if let Some(node) = self.document.node_mut(parent) {
            node.children.push(Child::Raw(text));
        }
    }

    fn open_element(&mut self, tag: OpenTag) -> Result<()> {
        let OpenTag {
            name,
            mut attributes,
            mut sources,
            self_closing,
            closing_decoration,
        } = tag;

        // An attribute named like its own tag cannot be told apart on reparse
        attributes.shift_remove(&name);
        sources.shift_remove(&name);

        let mut node = Node::new(self.intern(&name)).with_closing(self_closing, closing_decoration);
        node.attributes = attributes;
        node.attribute_sources = sources;
        let id = self.document.insert(node);

        if self_closing {
            self.complete(id);
        } else {
            self.context.enter_nested(self.config)?;
            self.open.push(id);
        }
        Ok(())
    }

    fn close_element(&mut self, name: &str) {
        let Some(id) = self.open.pop() else {
            debug!(tag = %name, "Ignoring closing tag with no open element");
            return;
        };

        let open_name = self.tag_name(id);
        if open_name != name {
            debug!(open = %open_name, close = %name, "Closing tag name does not match");
        }
        self.context.exit_nested();
        self.complete(id);
    }

    /// Registers a finished node under the element that is now on top
    fn complete(&mut self, id: NodeId) {
        let parent = self.current();
        let count = self.document.register_child(parent, id);
        if let Some(node) = self.document.node_mut(id) {
            node.reference_count = Some(count);
        }
    }

    fn intern(&self, name: &str) -> Arc<str> {
        self.interner.intern(name)
    }
}
