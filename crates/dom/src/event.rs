//! Raw DOM events as delivered by the embedding framework.

use crate::node::NodeId;

#[derive(Clone, Debug)]
pub enum DomEvent {
    /// Key-down on an element; `key` is the raw key code ("Enter", "a", ..).
    KeyDown { target: NodeId, key: String },
    /// The value of a text control changed; `text` is the full current value.
    Input { target: NodeId, text: String },
    /// Pointer pressed over an element (fires before focus moves).
    PointerDown { target: NodeId },
    /// Pointer moved onto an element (bubbles up from descendants).
    PointerOver { target: NodeId },
    /// Pointer left an element's subtree entirely (fires on that element).
    PointerLeave { target: NodeId },
    /// Click completed on an element.
    Click { target: NodeId },
}

impl DomEvent {
    pub fn target(&self) -> NodeId {
        match self {
            DomEvent::KeyDown { target, .. }
            | DomEvent::Input { target, .. }
            | DomEvent::PointerDown { target }
            | DomEvent::PointerOver { target }
            | DomEvent::PointerLeave { target }
            | DomEvent::Click { target } => *target,
        }
    }
}
