//! Document - High-level document API

use std::rc::Rc;

use crate::events::EventListeners;
use crate::forms::{self, ValidityState};
use crate::{DomError, DomTree, ElementData, Event, EventType, NodeId, Selector};

/// HTML Document
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Registered event listeners
    listeners: EventListeners,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a document with an html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");
        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            listeners: EventListeners::default(),
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            listeners: EventListeners::default(),
            body_element: NodeId::NONE,
        }
    }

    /// Locate <body> after the tree was filled externally (e.g. by a parser)
    pub fn finalize(&mut self) {
        self.body_element = self
            .tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&id| self.tree.element(id).is_some_and(|e| e.tag() == "body"))
            .unwrap_or(NodeId::NONE);
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// <body> element, or the document node when there is none
    pub fn body(&self) -> NodeId {
        if self.body_element.is_valid() {
            self.body_element
        } else {
            self.tree.root()
        }
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    // ------------------------------------------------------------------
    // Building
    // ------------------------------------------------------------------

    /// Create an element with attributes and append it to `parent`
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> Result<NodeId, DomError> {
        self.ensure_node(parent)?;
        let id = self.tree.create_element(tag);
        if let Some(elem) = self.tree.element_mut(id) {
            for (name, value) in attrs {
                elem.set_attr(name, value);
            }
        }
        self.tree.append_child(parent, id);
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Element data, or an error if `id` is missing or not an element
    pub fn element(&self, id: NodeId) -> Result<&ElementData, DomError> {
        let node = self.tree.get(id).ok_or(DomError::NodeNotFound(id))?;
        node.as_element().ok_or(DomError::NotAnElement(id))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        let node = self.tree.get_mut(id).ok_or(DomError::NodeNotFound(id))?;
        node.as_element_mut().ok_or(DomError::NotAnElement(id))
    }

    fn ensure_node(&self, id: NodeId) -> Result<(), DomError> {
        self.tree.get(id).map(|_| ()).ok_or(DomError::NodeNotFound(id))
    }

    /// First element in document order with the given id
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&n| self.tree.element(n).and_then(ElementData::id) == Some(id))
    }

    /// Every element carrying the given id (duplicates are a markup error)
    pub fn elements_with_id(&self, id: &str) -> Vec<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .filter(|&n| self.tree.element(n).and_then(ElementData::id) == Some(id))
            .collect()
    }

    /// First descendant of `root` matching `selector`
    pub fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, DomError> {
        self.ensure_node(root)?;
        Ok(Selector::parse(selector)?.select_first(&self.tree, root))
    }

    /// All descendants of `root` matching `selector`, in document order
    pub fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, DomError> {
        self.ensure_node(root)?;
        Ok(Selector::parse(selector)?.select_all(&self.tree, root))
    }

    /// Query with an already parsed selector
    pub fn select_all(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        selector.select_all(&self.tree, root)
    }

    pub fn select_first(&self, root: NodeId, selector: &Selector) -> Option<NodeId> {
        selector.select_first(&self.tree, root)
    }

    // ------------------------------------------------------------------
    // Attributes, classes, text
    // ------------------------------------------------------------------

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Result<Option<&str>, DomError> {
        Ok(self.element(id)?.get_attr(name))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> Result<bool, DomError> {
        Ok(self.element(id)?.has_attr(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.set_attr(name, value);
        self.tree.refresh_control_defaults(id);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        self.element_mut(id)?.remove_attr(name);
        self.tree.refresh_control_defaults(id);
        Ok(())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> Result<bool, DomError> {
        Ok(self.element(id)?.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        self.element_mut(id)?.add_class(class);
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        self.element_mut(id)?.remove_class(class);
        Ok(())
    }

    pub fn text_content(&self, id: NodeId) -> Result<String, DomError> {
        self.ensure_node(id)?;
        Ok(self.tree.text_content(id))
    }

    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        self.ensure_node(id)?;
        self.tree.set_text_content(id, text);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Form controls and constraint validation
    // ------------------------------------------------------------------

    fn control_element(&self, id: NodeId) -> Result<&ElementData, DomError> {
        let elem = self.element(id)?;
        if elem.control().is_none() {
            return Err(DomError::NotAFormControl(id));
        }
        Ok(elem)
    }

    /// Current value of a form control
    pub fn value(&self, id: NodeId) -> Result<&str, DomError> {
        self.control_element(id)?
            .value()
            .ok_or(DomError::NotAFormControl(id))
    }

    /// Set a control's value without dispatching events
    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?
            .control_mut()
            .ok_or(DomError::NotAFormControl(id))?
            .set_value(value);
        Ok(())
    }

    /// Set a control's custom validity message; empty clears it
    pub fn set_custom_validity(&mut self, id: NodeId, message: &str) -> Result<(), DomError> {
        self.element_mut(id)?
            .control_mut()
            .ok_or(DomError::NotAFormControl(id))?
            .set_custom_validity(message);
        Ok(())
    }

    /// Freshly computed validity state
    pub fn validity(&self, id: NodeId) -> Result<ValidityState, DomError> {
        Ok(forms::compute_validity(self.control_element(id)?))
    }

    /// Check validity (true when every constraint holds)
    pub fn check_validity(&self, id: NodeId) -> Result<bool, DomError> {
        Ok(self.validity(id)?.valid())
    }

    /// Validation message for the current state (empty when valid)
    pub fn validation_message(&self, id: NodeId) -> Result<String, DomError> {
        Ok(self.validity(id)?.validation_message())
    }

    /// Whether the control takes part in constraint validation
    pub fn will_validate(&self, id: NodeId) -> Result<bool, DomError> {
        Ok(forms::will_validate(self.control_element(id)?))
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Register a listener; registering the same closure twice keeps both
    pub fn add_event_listener<F>(
        &mut self,
        node: NodeId,
        event_type: EventType,
        listener: F,
    ) -> Result<(), DomError>
    where
        F: Fn(&mut Document, &mut Event) + 'static,
    {
        self.ensure_node(node)?;
        self.listeners.add(node, event_type, Rc::new(listener));
        Ok(())
    }

    /// Number of listeners registered on a node for an event type
    pub fn listener_count(&self, node: NodeId, event_type: EventType) -> usize {
        self.listeners.count(node, event_type)
    }

    /// Dispatch an event at its target, bubbling to ancestors when enabled.
    ///
    /// Listeners run synchronously in registration order. Returns `false`
    /// if a listener prevented the default action.
    pub fn dispatch_event(&mut self, event: &mut Event) -> Result<bool, DomError> {
        let target = event.target;
        self.ensure_node(target)?;

        let mut path = vec![target];
        if event.bubbles {
            path.extend(self.tree.ancestors(target));
        }

        for node in path {
            event.current_target = Some(node);
            for listener in self.listeners.snapshot(node, event.event_type) {
                listener(&mut *self, &mut *event);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }
        event.current_target = None;

        tracing::trace!(
            "Dispatched {} at {} (prevented: {})",
            event.event_type.name(),
            target,
            event.is_default_prevented()
        );
        Ok(!event.is_default_prevented())
    }

    /// Simulate the user typing `value` into a control: sets the value then
    /// fires `input`.
    pub fn user_input(&mut self, id: NodeId, value: &str) -> Result<(), DomError> {
        self.set_value(id, value)?;
        self.dispatch_event(&mut Event::new(EventType::Input, id))?;
        Ok(())
    }

    /// Request submission of a form. Returns whether the default action
    /// (the actual submission) would proceed.
    pub fn submit(&mut self, form: NodeId) -> Result<bool, DomError> {
        self.element(form)?;
        self.dispatch_event(&mut Event::new(EventType::Submit, form))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("url", &self.url)
            .field("nodes", &self.tree.len())
            .field("listeners", &self.listeners)
            .finish()
    }
}
