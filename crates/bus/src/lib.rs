//! Message contract between the widget client and the server-side component.
//!
//! Transport is a pair of in-order `mpsc` channels; there is no
//! request/response correlation. Outbound [`ClientIntent`]s describe user
//! actions, inbound [`ServerUpdate`]s carry authoritative state for one
//! instance.

use core_types::{InstanceId, Mode, Selection};
use serde_json::Value;
use std::sync::mpsc::{self, Receiver, Sender};

/// Client -> server. Every intent is re-derivable from current DOM state
/// except `SelectionRecovery`, which is itself the resynchronization path.
#[derive(Clone, Debug, PartialEq)]
pub enum ClientIntent {
    /// Raw key code of a key-down on the text input.
    KeyDown { id: InstanceId, key: String },
    /// Settled (debounced) search text.
    Change {
        id: InstanceId,
        field: String,
        text: String,
    },
    /// Copy of `Change` relayed to a configured external component.
    RelayChange {
        target: String,
        id: InstanceId,
        field: String,
        text: String,
    },
    /// Index of a chosen option row.
    OptionClick { id: InstanceId, idx: usize },
    /// Index of a selection entry to drop (multi-select tags).
    OptionRemove { id: InstanceId, idx: usize },
    /// Search text fell below the minimum length; discard current results.
    OptionsClear { id: InstanceId },
    /// Pointer entered the option list; the server manages highlight state
    /// while the dropdown is hovered.
    ListHover { id: InstanceId },
    /// Pointer left the option list.
    ListLeave { id: InstanceId },
    /// Sent once after reconnection when a non-empty selection is held.
    SelectionRecovery {
        id: InstanceId,
        selection: Selection,
    },
    /// Named event relayed to an external target.
    RelayEvent {
        target: String,
        id: InstanceId,
        event: String,
        payload: Value,
    },
}

/// Server -> client, addressed to one instance by id.
#[derive(Clone, Debug, PartialEq)]
pub enum ServerUpdate {
    /// Canonical state update: new selection plus display/eventing directives.
    Select {
        id: InstanceId,
        selection: Selection,
        mode: Mode,
        /// Text to show in the visible input. `None` means "leave the input
        /// alone" so in-progress typing is never clobbered.
        current_text: Option<String>,
        /// Whether to focus the text input after applying.
        focus: bool,
        /// Whether to dispatch a synthetic bubbling input event on the
        /// cardinality-appropriate hidden field.
        input_event: bool,
        /// Event name to relay to the configured external target, with the
        /// selection as payload.
        parent_event: Option<String>,
    },
    /// Highlight directive: scroll the option row into view.
    Active { id: InstanceId, idx: usize },
    /// Clear text and hidden value(s), always dispatching the input event.
    Reset { id: InstanceId },
    /// Relay an arbitrary named event to the configured external target.
    ParentEvent {
        id: InstanceId,
        event: String,
        payload: Value,
    },
}

impl ServerUpdate {
    /// The instance this update is addressed to.
    pub fn instance(&self) -> InstanceId {
        match self {
            ServerUpdate::Select { id, .. }
            | ServerUpdate::Active { id, .. }
            | ServerUpdate::Reset { id }
            | ServerUpdate::ParentEvent { id, .. } => *id,
        }
    }
}

/// The client's half of the transport.
pub struct Bus {
    pub intent_tx: Sender<ClientIntent>,
    pub update_rx: Receiver<ServerUpdate>,
}

/// The server's half of the transport. `update_tx` is clonable so several
/// server-side workers can push updates.
pub struct ServerEndpoint {
    pub intent_rx: Receiver<ClientIntent>,
    pub update_tx: Sender<ServerUpdate>,
}

/// Build a connected client/server channel pair.
pub fn channel() -> (Bus, ServerEndpoint) {
    let (intent_tx, intent_rx) = mpsc::channel();
    let (update_tx, update_rx) = mpsc::channel();
    (
        Bus {
            intent_tx,
            update_rx,
        },
        ServerEndpoint {
            intent_rx,
            update_tx,
        },
    )
}
