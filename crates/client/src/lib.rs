//! # client
//!
//! Browser-side half of the searchable select widget. The authoritative
//! state (search results, selection, highlighted option) lives in a remote
//! server process; this crate captures user input, forwards intents over the
//! [`bus`], and applies server-pushed updates back onto the [`dom::Page`].
//!
//! The embedding event loop drives a [`Client`] with four calls:
//! [`Client::handle_event`] for raw DOM events, [`Client::tick`] to flush due
//! debounce gates, [`Client::pump_updates`] to drain inbound updates, and the
//! lifecycle methods ([`Client::mount`], [`Client::patched`],
//! [`Client::unmount`], [`Client::connection_restored`]).

mod applier;
mod capture;
mod refs;
mod widget;

use bus::{Bus, ClientIntent, ServerUpdate};
use core_types::{InstanceId, Selection};
use dom::{DomEvent, Node, NodeId, Page};
use refs::WidgetRefs;
use select_core::WidgetConfig;
use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::Instant;
use widget::Widget;

/// Mounting against a root that lacks the required structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountError {
    MissingRoot(NodeId),
    NotAnElement(NodeId),
    MissingTextInput(NodeId),
    NotMounted(InstanceId),
}

/// Instance identity is derived from the widget's root node, so inbound
/// updates and the registry agree on a key without a separate id scheme.
pub fn instance_id(root: NodeId) -> InstanceId {
    root.0 as InstanceId
}

/// Process-wide widget registry plus the client half of the transport.
///
/// Updates are routed by instance id through the registry, so instances never
/// inspect each other's messages and teardown is deterministic: unmount
/// removes the entry and everything it owns.
pub struct Client {
    registry: HashMap<InstanceId, Widget>,
    intent_tx: Sender<ClientIntent>,
    update_rx: Receiver<ServerUpdate>,
}

impl Client {
    pub fn new(bus: Bus) -> Self {
        Self {
            registry: HashMap::new(),
            intent_tx: bus.intent_tx,
            update_rx: bus.update_rx,
        }
    }

    /// Mount a widget on the element `root`: parse configuration from its
    /// attributes, capture element references, apply one-time styling, and
    /// register the instance. Mounting the same root again replaces the
    /// previous registration with a fresh instance.
    pub fn mount(&mut self, page: &mut Page, root: NodeId) -> Result<InstanceId, MountError> {
        let root_node = page.node(root).ok_or(MountError::MissingRoot(root))?;
        let Node::Element { attributes, .. } = root_node else {
            return Err(MountError::NotAnElement(root));
        };
        let cfg = WidgetConfig::from_attributes(attributes);

        let refs = WidgetRefs::capture(page, root, &cfg)?;
        apply_styling(page, &refs);

        let id = instance_id(root);
        self.registry.insert(id, Widget::new(id, cfg, refs));
        log::debug!(target: "select.lifecycle", "mounted widget {id}");
        Ok(id)
    }

    /// The framework patched the widget's subtree, destroying prior wiring:
    /// re-capture references and re-apply styling. Identity, selection, and
    /// in-flight search text are preserved. Idempotent: patching twice never
    /// double-wires, because event handling is registry lookup rather than
    /// accumulated callbacks.
    pub fn patched(&mut self, page: &mut Page, id: InstanceId) -> Result<(), MountError> {
        let widget = self.registry.get_mut(&id).ok_or(MountError::NotMounted(id))?;
        let refs = WidgetRefs::capture(page, widget.refs.root, &widget.cfg)?;
        apply_styling(page, &refs);
        widget.refs = refs;
        Ok(())
    }

    /// Deterministic teardown. Dropping the widget also drops its debounce
    /// gate, so no pending deadline outlives the instance.
    pub fn unmount(&mut self, id: InstanceId) -> bool {
        let removed = self.registry.remove(&id).is_some();
        if removed {
            log::debug!(target: "select.lifecycle", "unmounted widget {id}");
        }
        removed
    }

    pub fn is_mounted(&self, id: InstanceId) -> bool {
        self.registry.contains_key(&id)
    }

    /// The last-known selection the server told this instance about.
    pub fn selection(&self, id: InstanceId) -> Option<&Selection> {
        self.registry.get(&id).map(|w| &w.selection)
    }

    /// Raw text currently in the visible input, as last captured. Untrimmed;
    /// cleared by an inbound reset.
    pub fn search_text(&self, id: InstanceId) -> Option<&str> {
        self.registry.get(&id).map(|w| w.search_text.as_str())
    }

    /// Route a raw DOM event to the widget owning the deepest registered
    /// ancestor of its target. Returns whether the event's default action
    /// must be suppressed. Events outside any widget are ignored.
    pub fn handle_event(&mut self, page: &Page, event: &DomEvent, now: Instant) -> bool {
        let Some(path) = page.path(event.target()) else {
            return false;
        };
        for node in path.iter().rev() {
            if let Some(widget) = self.registry.get_mut(&instance_id(*node)) {
                return capture::handle_event(widget, page, event, now, &self.intent_tx);
            }
        }
        false
    }

    /// Flush every debounce gate whose quiet period has elapsed, emitting the
    /// settled search text (and its relay copy, when a target is configured).
    pub fn tick(&mut self, now: Instant) {
        for widget in self.registry.values_mut() {
            let Some(text) = widget.debounce.fire_due(now) else {
                continue;
            };
            let _ = self.intent_tx.send(ClientIntent::Change {
                id: widget.id,
                field: widget.cfg.field.clone(),
                text: text.clone(),
            });
            if let Some(target) = widget.cfg.relay_target.clone() {
                let _ = self.intent_tx.send(ClientIntent::RelayChange {
                    target,
                    id: widget.id,
                    field: widget.cfg.field.clone(),
                    text,
                });
            }
        }
    }

    /// Drain inbound updates and apply them. Updates addressed to unknown
    /// instances are dropped; the sender may be ahead of (or behind) the DOM.
    pub fn pump_updates(&mut self, page: &mut Page) {
        loop {
            let update = match self.update_rx.try_recv() {
                Ok(update) => update,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            };
            let id = update.instance();
            match self.registry.get_mut(&id) {
                Some(widget) => applier::apply(widget, page, update, &self.intent_tx),
                None => {
                    log::trace!(target: "select.applier", "update for unknown instance {id}");
                }
            }
        }
    }

    /// The transport came back after a disconnect. Selection state is
    /// server-owned and may have been lost server-side; the locally cached
    /// copy is the only bridge, so every instance holding a non-empty
    /// selection re-sends it once.
    pub fn connection_restored(&mut self) {
        for widget in self.registry.values() {
            if widget.selection.is_empty() {
                continue;
            }
            let _ = self.intent_tx.send(ClientIntent::SelectionRecovery {
                id: widget.id,
                selection: widget.selection.clone(),
            });
            log::debug!(target: "select.lifecycle", "recovery sent for widget {}", widget.id);
        }
    }
}

/// One-time styling: pin the clear affordance inside its container. Re-run on
/// every patch because the framework may have replaced the subtree.
fn apply_styling(page: &mut Page, refs: &WidgetRefs) {
    if let Some(clear) = refs.clear_button {
        let _ = page.set_style(clear, "position", "absolute");
        let _ = page.set_style(clear, "top", "0");
        let _ = page.set_style(clear, "right", "5px");
    }
}
