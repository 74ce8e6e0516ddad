//! Modeled DOM for the select widget client.
//!
//! The embedding framework owns the real document; this crate models the one
//! slice of it the widget touches: an attribute tree ([`Node`]), the raw
//! events the tree produces ([`DomEvent`]), and the mutable document state
//! ([`Page`]): element values, styles, focus, synthetic input events, and
//! option-list scroll windows.
//!
//! Every operation addressed at a node that no longer exists (patched away
//! mid-flight) is a no-op, because message delivery and DOM readiness are not
//! atomically ordered.

mod event;
mod node;
mod page;

pub use event::DomEvent;
pub use node::{Node, NodeId};
pub use page::{Page, SyntheticEvent};
