//! Explicit element references, captured once per mount/patch.
//!
//! Inbound updates and input capture never run selector queries against the
//! tree; they go through references resolved here. A patch invalidates the
//! whole set and the lifecycle controller re-captures it.

use crate::MountError;
use core_types::Mode;
use dom::{Node, NodeId, Page};
use select_core::WidgetConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct WidgetRefs {
    pub root: NodeId,
    /// The visible search input. The only mandatory element.
    pub text_input: NodeId,
    /// The `<ul>` holding option rows.
    pub option_list: Option<NodeId>,
    /// Element carrying `data-clear`; positioned absolutely at mount.
    pub clear_button: Option<NodeId>,
    /// Hidden input named exactly `cfg.field`: the bound value in single
    /// mode, the empty-selection marker in multi mode.
    pub hidden_field: Option<NodeId>,
    /// Hidden inputs named `cfg.field[]` (multi mode, one per selected value,
    /// materialized by the server's DOM patches).
    pub hidden_multi: Vec<NodeId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InputKind {
    Text,
    Hidden,
    Other,
}

fn input_kind(node: &Node) -> InputKind {
    if !node.is_element_named("input") {
        return InputKind::Other;
    }
    match node.attr("type").map(str::trim) {
        // Missing type defaults to text.
        None => InputKind::Text,
        Some(t) if t.eq_ignore_ascii_case("text") => InputKind::Text,
        Some(t) if t.eq_ignore_ascii_case("hidden") => InputKind::Hidden,
        _ => InputKind::Other,
    }
}

impl WidgetRefs {
    /// Resolve all references under `root`. Only the text input is required;
    /// everything else degrades to a no-op when absent.
    pub fn capture(page: &Page, root: NodeId, cfg: &WidgetConfig) -> Result<Self, MountError> {
        let root_node = page.node(root).ok_or(MountError::MissingRoot(root))?;
        if !matches!(root_node, Node::Element { .. }) {
            return Err(MountError::NotAnElement(root));
        }

        let mut text_input = None;
        let mut option_list = None;
        let mut clear_button = None;
        let mut hidden_field = None;
        let mut hidden_multi = Vec::new();
        let multi_field = cfg.multi_field();

        root_node.walk(&mut |node| {
            match input_kind(node) {
                InputKind::Text => {
                    if text_input.is_none() {
                        text_input = Some(node.id());
                    }
                }
                InputKind::Hidden => match node.attr("name") {
                    Some(name) if name == cfg.field => {
                        if hidden_field.is_none() {
                            hidden_field = Some(node.id());
                        }
                    }
                    Some(name) if name == multi_field => hidden_multi.push(node.id()),
                    _ => {}
                },
                InputKind::Other => {}
            }
            if option_list.is_none() && node.is_element_named("ul") {
                option_list = Some(node.id());
            }
            if clear_button.is_none() && node.has_attr("data-clear") {
                clear_button = Some(node.id());
            }
        });

        let text_input = text_input.ok_or(MountError::MissingTextInput(root))?;

        Ok(Self {
            root,
            text_input,
            option_list,
            clear_button,
            hidden_field,
            hidden_multi,
        })
    }

    /// The element that receives the synthetic input event for the current
    /// cardinality. Downstream form frameworks listen on different elements
    /// depending on mode and emptiness; an empty multi selection must still
    /// notify the "nothing selected" field.
    pub fn selection_event_target(&self, mode: Mode, selection_empty: bool) -> Option<NodeId> {
        match (mode, selection_empty) {
            (Mode::Single, _) => self.hidden_field,
            (Mode::Multi, true) => self.hidden_field,
            (Mode::Multi, false) => self.hidden_multi.first().copied(),
        }
    }
}
