//! DOM Events
//!
//! Synchronous event objects and the listener registry backing
//! `Document::add_event_listener` / `Document::dispatch_event`.

use std::collections::HashMap;
use std::rc::Rc;

use crate::{Document, NodeId};

/// Event types the document dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Control value changed by the user
    Input,
    /// Control value committed
    Change,
    /// Form submission requested
    Submit,
    /// Form reset requested
    Reset,
}

impl EventType {
    /// DOM event name
    pub fn name(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Change => "change",
            Self::Submit => "submit",
            Self::Reset => "reset",
        }
    }

    /// Look up by DOM event name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "input" => Some(Self::Input),
            "change" => Some(Self::Change),
            "submit" => Some(Self::Submit),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }

    /// Whether events of this type bubble by default
    pub fn bubbles(self) -> bool {
        true
    }

    /// Whether the default action can be prevented
    pub fn cancelable(self) -> bool {
        matches!(self, Self::Submit | Self::Reset)
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    pub target: NodeId,
    pub current_target: Option<NodeId>,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    /// Create an event with the type's default bubbling and cancelability
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            current_target: None,
            bubbles: event_type.bubbles(),
            cancelable: event_type.cancelable(),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Prevent default action (no-op for non-cancelable events)
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation to further ancestors
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Event listener callback
///
/// Listeners get mutable access to the document so they can update the DOM
/// in the same dispatch turn.
pub type Listener = Rc<dyn Fn(&mut Document, &mut Event)>;

/// Listener registry keyed by (node, event type)
#[derive(Default)]
pub(crate) struct EventListeners {
    map: HashMap<(NodeId, EventType), Vec<Listener>>,
}

impl EventListeners {
    /// Register a listener; duplicates are kept
    pub fn add(&mut self, node: NodeId, event_type: EventType, listener: Listener) {
        self.map.entry((node, event_type)).or_default().push(listener);
    }

    /// Snapshot of the listeners for a node, in registration order
    pub fn snapshot(&self, node: NodeId, event_type: EventType) -> Vec<Listener> {
        self.map
            .get(&(node, event_type))
            .cloned()
            .unwrap_or_default()
    }

    pub fn count(&self, node: NodeId, event_type: EventType) -> usize {
        self.map.get(&(node, event_type)).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventListeners")
            .field("registered", &self.map.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}
