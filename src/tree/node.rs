use indexmap::IndexMap;
use std::sync::Arc;

/// Prefixed onto a plural alias key until it no longer shadows a scalar field
pub const PLURAL_SENTINEL: char = '_';

/// Handle to a node stored in a [`Document`](super::Document)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Attribute value as written in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Quoted value, entities already decoded
    Text(String),
    /// Bare attribute name with no `=`
    Flag,
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag => None,
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Flag)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Entry of a children list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Element(NodeId),
    /// Verbatim `<![...]]>` block, delimiters included
    Raw(String),
}

impl Child {
    pub fn element(&self) -> Option<NodeId> {
        match self {
            Self::Element(id) => Some(*id),
            Self::Raw(_) => None,
        }
    }
}

/// One XML element together with the alias tables it holds for its children.
///
/// `children` is the document order. `singles` maps a tag name to the first
/// child of that name and `plurals` maps a derived key (see
/// [`Node::plural_key`]) to every child of that name. All three are public and
/// may be edited independently; the serializer reconciles them.
#[derive(Debug, Clone)]
pub struct Node {
    tag_name: Arc<str>,
    pub attributes: IndexMap<String, AttrValue>,
    pub children: Vec<Child>,
    pub singles: IndexMap<String, NodeId>,
    pub plurals: IndexMap<String, Vec<NodeId>>,
    /// Attribute values as spelled in the source, for values with entities
    pub(crate) attribute_sources: IndexMap<String, String>,
    self_closing: bool,
    closing_decoration: String,
    pub(crate) reference_count: Option<u8>,
}

impl Node {
    pub(crate) fn new(tag_name: Arc<str>) -> Self {
        Self {
            tag_name,
            attributes: IndexMap::new(),
            children: Vec::new(),
            singles: IndexMap::new(),
            plurals: IndexMap::new(),
            attribute_sources: IndexMap::new(),
            self_closing: false,
            closing_decoration: String::new(),
            reference_count: None,
        }
    }

    pub(crate) fn with_closing(mut self, self_closing: bool, decoration: String) -> Self {
        self.self_closing = self_closing;
        self.closing_decoration = decoration;
        self
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Text value of an attribute, `None` for missing or boolean attributes
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(AttrValue::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<AttrValue>) {
        self.attribute_sources.shift_remove(name);
        self.attributes.insert(name.to_string(), value.into());
    }

    /// Removes an attribute, keeping the order of the remaining ones
    pub fn remove_attribute(&mut self, name: &str) -> Option<AttrValue> {
        self.attribute_sources.shift_remove(name);
        self.attributes.shift_remove(name)
    }

    /// Value of an attribute as written in the parsed text, if it contained
    /// entities. It may be stale when `attributes` was edited directly.
    pub fn attribute_source(&self, name: &str) -> Option<&str> {
        self.attribute_sources.get(name).map(String::as_str)
    }

    pub fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// Text written between the last attribute and `>` of a self-closing tag
    pub fn closing_decoration(&self) -> &str {
        &self.closing_decoration
    }

    pub fn set_self_closing(&mut self, self_closing: bool) {
        self.self_closing = self_closing;
        if self_closing && self.closing_decoration.is_empty() {
            self.closing_decoration = "/".to_string();
        } else if !self_closing {
            self.closing_decoration.clear();
        }
    }

    /// Number of aliases the parser installed this node under
    pub fn reference_count(&self) -> Option<u8> {
        self.reference_count
    }

    /// Reference count the serializer gates on; fresh nodes count as 1
    pub fn effective_reference_count(&self) -> u32 {
        self.reference_count.map_or(1, u32::from)
    }

    /// Element handles of the children list, in document order
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().filter_map(Child::element)
    }

    /// First child registered under `tag_name`
    pub fn single(&self, tag_name: &str) -> Option<NodeId> {
        self.singles.get(tag_name).copied()
    }

    /// All children registered under `tag_name`, in registration order
    pub fn plural(&self, tag_name: &str) -> &[NodeId] {
        self.plurals
            .get(&self.plural_key(tag_name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn plural_mut(&mut self, tag_name: &str) -> Option<&mut Vec<NodeId>> {
        let key = self.plural_key(tag_name);
        self.plurals.get_mut(&key)
    }

    /// Key of the plural alias for `tag_name`.
    ///
    /// Starts from `tag_name + "s"` and prefixes [`PLURAL_SENTINEL`] while the
    /// key is held by an attribute or a singleton alias and is not already a
    /// plural list.
    pub fn plural_key(&self, tag_name: &str) -> String {
        let mut key = format!("{}s", tag_name);
        while !self.plurals.contains_key(&key) && self.is_scalar_field(&key) {
            key.insert(0, PLURAL_SENTINEL);
        }
        key
    }

    fn is_scalar_field(&self, key: &str) -> bool {
        self.attributes.contains_key(key) || self.singles.contains_key(key)
    }
}

/// Recovers the tag name a plural alias key was derived from
pub fn singular_from_key(key: &str) -> &str {
    let key = key.trim_start_matches(PLURAL_SENTINEL);
    key.strip_suffix('s').unwrap_or(key)
}
