use std::collections::HashSet;

use super::{CommonFormatter, FormatConfig, Formatter};
use crate::{
    error::{ParseError, ParseErrorKind, Result, SemanticError},
    parser::tag::decode_entities,
    tree::{AttrValue, Child, Document, Node, NodeId, Reconciliation},
};

pub struct XmlFormatter;

impl CommonFormatter for XmlFormatter {}

impl Formatter for XmlFormatter {
    fn format(&self, document: &Document, config: &FormatConfig) -> Result<String> {
        Self::validate_config(config)?;

        if let Some(root) = document.root_node() {
            if !root.attributes.is_empty() {
                let names: Vec<&str> = root.attributes.keys().map(String::as_str).collect();
                return Err(ParseError::new(ParseErrorKind::Semantic(
                    SemanticError::InvalidRootMutation,
                ))
                .with_context(format!("Root attributes: {}", names.join(", "))));
            }
        }

        let reconciliation = document.kept_nodes();
        let mut writer = Writer {
            document,
            reconciliation: &reconciliation,
            config,
            emitted: vec![false; document.len()],
            output: String::new(),
        };
        writer.write_document();
        Ok(writer.output)
    }
}

/// Pending unit of output
enum Step<'a> {
    Raw(&'a str, usize),
    Element(NodeId, usize),
    Close(&'a str, usize),
}

struct Writer<'a> {
    document: &'a Document,
    reconciliation: &'a Reconciliation,
    config: &'a FormatConfig,
    emitted: Vec<bool>,
    output: String,
}

impl<'a> Writer<'a> {
    fn write_document(&mut self) {
        let mut stack = Vec::new();
        self.push_content(&mut stack, self.document.root(), 0);

        while let Some(step) = stack.pop() {
            match step {
                Step::Raw(text, level) => {
                    self.indent(level);
                    self.output.push_str(text);
                    self.output.push('\n');
                }
                Step::Close(name, level) => {
                    self.indent(level);
                    self.write_end_tag(name);
                }
                Step::Element(id, level) => self.write_element(&mut stack, id, level),
            }
        }
    }

    /// Queues the content of `parent` so that it pops in document order
    fn push_content(&self, stack: &mut Vec<Step<'a>>, parent: NodeId, level: usize) {
        let document = self.document;
        let Some(node) = document.node(parent) else {
            return;
        };

        let mut steps: Vec<Step<'a>> = node
            .children
            .iter()
            .map(|child| match child {
                Child::Raw(text) => Step::Raw(text, level),
                Child::Element(id) => Step::Element(*id, level),
            })
            .collect();
        steps.extend(
            self.alias_only(node)
                .into_iter()
                .map(|id| Step::Element(id, level)),
        );
        stack.extend(steps.into_iter().rev());
    }

    /// Kept nodes held by the alias tables of `node` that no written
    /// children list places, in table order
    fn alias_only(&self, node: &Node) -> Vec<NodeId> {
        let listed: HashSet<NodeId> = node.elements().collect();
        let mut result = Vec::new();
        let aliased = node
            .singles
            .values()
            .chain(node.plurals.values().flatten())
            .copied();

        for id in aliased {
            if !listed.contains(&id)
                && !result.contains(&id)
                && self.reconciliation.is_kept(id)
                && !self.reconciliation.is_listed(id)
            {
                result.push(id);
            }
        }
        result
    }

    fn is_pending(&self, id: NodeId) -> bool {
        self.reconciliation.is_kept(id) && !self.emitted.get(id.index()).copied().unwrap_or(true)
    }

    fn has_content(&self, node: &Node) -> bool {
        let listed = node.children.iter().any(|child| match child {
            Child::Raw(_) => true,
            Child::Element(id) => self.is_pending(*id),
        });
        listed || self.alias_only(node).into_iter().any(|id| self.is_pending(id))
    }

    fn write_element(&mut self, stack: &mut Vec<Step<'a>>, id: NodeId, level: usize) {
        if !self.is_pending(id) {
            return;
        }
        let document = self.document;
        let reconciliation = self.reconciliation;
        let Some(node) = document.node(id) else {
            return;
        };
        if let Some(flag) = self.emitted.get_mut(id.index()) {
            *flag = true;
        }

        let name = if node.tag_name().is_empty() {
            reconciliation.name_override(id).unwrap_or_default()
        } else {
            node.tag_name()
        };

        self.indent(level);
        self.write_start_tag(name, node);

        if node.is_self_closing() {
            self.output.push('\n');
        } else if !self.has_content(node) {
            self.write_end_tag(name);
        } else {
            self.output.push('\n');
            stack.push(Step::Close(name, level));
            self.push_content(stack, id, level + 1);
        }
    }

    fn write_start_tag(&mut self, name: &str, node: &Node) {
        self.output.push('<');
        self.output.push_str(name);

        for (key, value) in &node.attributes {
            self.output.push(' ');
            self.output.push_str(key);
            if let AttrValue::Text(text) = value {
                self.output.push_str("=\"");
                match source_spelling(node, key, text) {
                    Some(source) => self.output.push_str(source),
                    None => self.output.push_str(&escape_attribute(text)),
                }
                self.output.push('"');
            }
        }

        if node.is_self_closing() {
            self.output.push_str(node.closing_decoration());
        }
        self.output.push('>');
    }

    fn write_end_tag(&mut self, name: &str) {
        self.output.push_str("</");
        self.output.push_str(name);
        self.output.push_str(">\n");
    }

    fn indent(&mut self, level: usize) {
        self.output
            .push_str(&XmlFormatter::create_indentation(level, self.config));
    }
}

/// Parsed spelling of an attribute value, usable only while it still
/// decodes to the current value and fits between double quotes
fn source_spelling<'n>(node: &'n Node, key: &str, text: &str) -> Option<&'n str> {
    node.attribute_source(key)
        .filter(|source| !source.contains('"') && decode_entities(source) == text)
}

/// Escapes a value for a double-quoted attribute.
///
/// Every `&`, `<`, `>` and `"` is replaced by an entity, so parsing the
/// result yields `value` again.
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
