use crate::refs::WidgetRefs;
use core_types::{InstanceId, Selection};
use select_core::{DebounceGate, WidgetConfig};

/// One mounted widget instance.
///
/// Lifecycle policy:
/// - Created on mount with an empty selection.
/// - DOM patches re-capture `refs` but preserve identity, selection, and the
///   in-flight search text.
/// - Destroyed on unmount, which also drops the debounce gate so no pending
///   deadline can fire against a detached widget.
#[derive(Debug)]
pub(crate) struct Widget {
    pub id: InstanceId,
    pub cfg: WidgetConfig,
    pub refs: WidgetRefs,
    /// Last-known selection, as told by the server. The only bridge across a
    /// reconnect; the client never invents entries.
    pub selection: Selection,
    /// Raw text currently in the visible input.
    pub search_text: String,
    pub debounce: DebounceGate,
}

impl Widget {
    pub fn new(id: InstanceId, cfg: WidgetConfig, refs: WidgetRefs) -> Self {
        Self {
            id,
            cfg,
            refs,
            selection: Selection::empty(),
            search_text: String::new(),
            debounce: DebounceGate::new(),
        }
    }
}
