//! Input capture: raw DOM events in, outbound intents out.
//!
//! No local selection mutation happens here; the server decides what every
//! action means. The returned flag tells the embedding framework whether to
//! suppress the event's default action.

use crate::widget::Widget;
use bus::ClientIntent;
use dom::{DomEvent, NodeId, Page};
use select_core::{SearchAction, classify};
use std::sync::mpsc::Sender;
use std::time::Instant;

const ENTER: &str = "Enter";

pub(crate) fn handle_event(
    widget: &mut Widget,
    page: &Page,
    event: &DomEvent,
    now: Instant,
    intents: &Sender<ClientIntent>,
) -> bool {
    match event {
        DomEvent::KeyDown { target, key } if *target == widget.refs.text_input => {
            // Forward every key; the server decides its meaning (commit the
            // highlighted option, navigate, no-op).
            let _ = intents.send(ClientIntent::KeyDown {
                id: widget.id,
                key: key.clone(),
            });
            // Enter must not submit the surrounding form.
            key == ENTER
        }

        DomEvent::Input { target, text } if *target == widget.refs.text_input => {
            widget.search_text = text.clone();
            match classify(text, widget.cfg.min_len) {
                SearchAction::Schedule(trimmed) => {
                    widget.debounce.schedule(trimmed, now, widget.cfg.debounce);
                }
                SearchAction::Clear => {
                    // Cancel first: a pending search must not fire after the
                    // clear and resurrect stale results.
                    widget.debounce.cancel();
                    let _ = intents.send(ClientIntent::OptionsClear { id: widget.id });
                }
            }
            false
        }

        DomEvent::PointerDown { target } => {
            let Some(list) = widget.refs.option_list else {
                return false;
            };
            if !within(page, list, *target) {
                return false;
            }
            let Some(idx) = closest_index(page, *target, "data-idx") else {
                // Decorative element with no option row above it.
                return false;
            };
            let _ = intents.send(ClientIntent::OptionClick {
                id: widget.id,
                idx,
            });
            // Suppress the default so the text input does not lose focus
            // before the selection is processed.
            true
        }

        DomEvent::PointerOver { target } => {
            // Bubbles from option rows; the server takes over highlight
            // management while the dropdown is hovered.
            if widget
                .refs
                .option_list
                .is_some_and(|list| within(page, list, *target))
            {
                let _ = intents.send(ClientIntent::ListHover { id: widget.id });
            }
            false
        }

        DomEvent::PointerLeave { target } => {
            if widget.refs.option_list == Some(*target) {
                let _ = intents.send(ClientIntent::ListLeave { id: widget.id });
            }
            false
        }

        DomEvent::Click { target } => {
            let Some(idx) = closest_index(page, *target, "data-remove-idx") else {
                return false;
            };
            let _ = intents.send(ClientIntent::OptionRemove {
                id: widget.id,
                idx,
            });
            false
        }

        _ => false,
    }
}

/// Nearest ancestor-or-self index attribute, parsed. Unparsable values are
/// treated as absent.
fn closest_index(page: &Page, from: NodeId, attr: &str) -> Option<usize> {
    let (_, value) = page.closest_with_attr(from, attr)?;
    value.trim().parse().ok()
}

fn within(page: &Page, ancestor: NodeId, id: NodeId) -> bool {
    page.path(id).is_some_and(|path| path.contains(&ancestor))
}
