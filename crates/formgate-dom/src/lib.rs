//! formgate DOM - Document Object Model
//!
//! Arena-based DOM tree with the pieces form validation needs:
//! attributes, class lists, selector queries, constraint validation
//! and a synchronous event-listener registry.

mod attributes;
mod classlist;
mod document;
mod error;
mod events;
pub mod forms;
mod node;
mod selector;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use classlist::ClassList;
pub use document::Document;
pub use error::{DomError, SelectorError};
pub use events::{Event, EventType, Listener};
pub use forms::{ControlState, InputType, ValidityState};
pub use node::{ElementData, Node, NodeData};
pub use selector::{Compound, Selector};
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check whether this ID points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
