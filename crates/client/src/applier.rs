//! State applier: inbound server updates, applied to the page.
//!
//! The server is the sole trusted sender; payload shapes are well-formed by
//! construction. What can still go wrong is the DOM: any referenced element
//! may have been patched away mid-flight, and every such case is a
//! silently-skipped no-op.

use crate::widget::Widget;
use bus::{ClientIntent, ServerUpdate};
use core_types::{Mode, Selection};
use dom::Page;
use std::sync::mpsc::Sender;

pub(crate) fn apply(
    widget: &mut Widget,
    page: &mut Page,
    update: ServerUpdate,
    intents: &Sender<ClientIntent>,
) {
    match update {
        ServerUpdate::Select {
            selection,
            mode,
            current_text,
            focus,
            input_event,
            parent_event,
            ..
        } => {
            let selection = Selection::for_mode(mode, selection.into_options());
            widget.selection = selection;

            // `None` means the server has nothing to say about the visible
            // text; never clobber in-progress typing. Single-mode servers
            // send the chosen option's label here, which is how a non-empty
            // selection ends up displayed as its first label.
            if let Some(text) = current_text {
                let _ = page.set_value(widget.refs.text_input, text);
            }
            if focus {
                let _ = page.focus(widget.refs.text_input);
            }

            // Single mode binds the value through one hidden field the client
            // owns. Multi-mode `field[]` inputs are materialized by the
            // server's own DOM patches.
            if mode == Mode::Single
                && let Some(hidden) = widget.refs.hidden_field
            {
                let value = widget
                    .selection
                    .first()
                    .map(|o| o.value.to_field_value())
                    .unwrap_or_default();
                let _ = page.set_value(hidden, value);
            }

            if input_event {
                dispatch_selection_event(widget, page, mode);
            }

            if let Some(event) = parent_event {
                relay(widget, intents, event, widget.selection.to_payload());
            }
        }

        ServerUpdate::Active { idx, .. } => {
            if let Some(list) = widget.refs.option_list {
                let _ = page.scroll_into_view(list, idx);
            }
        }

        ServerUpdate::Reset { .. } => {
            // Canonical reset: clear text, clear hidden value(s) to the empty
            // string, and always notify validators of the cleared state.
            widget.selection = Selection::empty();
            widget.search_text.clear();
            widget.debounce.cancel();

            let _ = page.set_value(widget.refs.text_input, "");
            if let Some(hidden) = widget.refs.hidden_field {
                let _ = page.set_value(hidden, "");
            }
            for id in widget.refs.hidden_multi.clone() {
                let _ = page.set_value(id, "");
            }
            dispatch_selection_event(widget, page, widget.cfg.mode);
        }

        ServerUpdate::ParentEvent { event, payload, .. } => {
            relay(widget, intents, event, payload);
        }
    }
}

fn dispatch_selection_event(widget: &Widget, page: &mut Page, mode: Mode) {
    let target = widget
        .refs
        .selection_event_target(mode, widget.selection.is_empty());
    match target {
        Some(id) => {
            let _ = page.dispatch_input(id);
        }
        None => {
            log::trace!(target: "select.applier", "no event target for widget {}", widget.id);
        }
    }
}

fn relay(
    widget: &Widget,
    intents: &Sender<ClientIntent>,
    event: String,
    payload: serde_json::Value,
) {
    let Some(target) = widget.cfg.relay_target.clone() else {
        log::trace!(target: "select.applier", "no relay target configured for widget {}", widget.id);
        return;
    };
    let _ = intents.send(ClientIntent::RelayEvent {
        target,
        id: widget.id,
        event,
        payload,
    });
}
