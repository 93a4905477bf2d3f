//! DOM Node
//!
//! Nodes are linked by `NodeId` (arena index) rather than pointers, so a
//! node stays addressable for the lifetime of its tree.

use crate::forms::{ControlState, is_form_control};
use crate::{ClassList, NamedNodeMap, NodeId};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self::with_data(NodeData::Text(content.to_string()))
    }

    /// Create a comment node
    pub fn comment(content: &str) -> Self {
        Self::with_data(NodeData::Comment(content.to_string()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Lowercase tag name
    tag: String,
    /// Attributes, including the serialized `class` attribute
    attrs: NamedNodeMap,
    /// Parsed class list, kept in sync with the `class` attribute
    classes: ClassList,
    /// Live state for input, textarea and select
    control: Option<ControlState>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        let control = is_form_control(&tag).then(ControlState::default);
        Self {
            tag,
            attrs: NamedNodeMap::new(),
            classes: ClassList::new(),
            control,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attrs(&self) -> &NamedNodeMap {
        &self.attrs
    }

    /// Get the `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.attrs.get_attribute("id")
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attribute(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attribute(name)
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if name.eq_ignore_ascii_case("class") {
            self.classes = ClassList::parse(value);
        }
        self.attrs.set_attribute(name, value);
    }

    /// Remove an attribute, returns whether it was present
    pub fn remove_attr(&mut self, name: &str) -> bool {
        if name.eq_ignore_ascii_case("class") {
            self.classes = ClassList::new();
        }
        self.attrs.remove(name).is_some()
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Add a class and re-serialize the `class` attribute
    pub fn add_class(&mut self, class: &str) {
        if self.classes.add(class) {
            self.sync_class_attr();
        }
    }

    /// Remove a class and re-serialize the `class` attribute
    pub fn remove_class(&mut self, class: &str) {
        if self.classes.remove(class) {
            self.sync_class_attr();
        }
    }

    fn sync_class_attr(&mut self) {
        self.attrs.set_attribute("class", &self.classes.value());
    }

    /// Form control state, if this element is a form control
    pub fn control(&self) -> Option<&ControlState> {
        self.control.as_ref()
    }

    pub fn control_mut(&mut self) -> Option<&mut ControlState> {
        self.control.as_mut()
    }

    /// Current control value: the dirty value if the user edited it, then
    /// the content default of a textarea or select, then the `value`
    /// attribute.
    pub fn value(&self) -> Option<&str> {
        let control = self.control.as_ref()?;
        Some(
            control
                .dirty_value()
                .or(control.default_value())
                .or_else(|| self.attrs.get_attribute("value"))
                .unwrap_or(""),
        )
    }
}
