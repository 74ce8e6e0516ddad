//! Mutable document state around one [`Node`] tree.

use crate::node::{Node, NodeId};
use std::collections::HashMap;

/// Rows shown at once in an option list before it scrolls.
const DEFAULT_VIEWPORT_ROWS: usize = 5;

/// A synthetic bubbling event dispatched on an element, observable by
/// downstream form frameworks (validators, change listeners).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyntheticEvent {
    pub target: NodeId,
    pub bubbles: bool,
}

#[derive(Clone, Copy, Debug)]
struct ListScroll {
    first: usize,
    rows: usize,
}

impl Default for ListScroll {
    fn default() -> Self {
        Self {
            first: 0,
            rows: DEFAULT_VIEWPORT_ROWS,
        }
    }
}

/// One document: the element tree plus everything mutable around it.
///
/// Current control values live here rather than in the tree (the `value`
/// attribute only seeds the initial value), mirroring how a browser separates
/// attributes from live input state.
#[derive(Debug, Default)]
pub struct Page {
    root: Option<Node>,
    values: HashMap<NodeId, String>,
    styles: HashMap<NodeId, Vec<(String, String)>>,
    focused: Option<NodeId>,
    events: Vec<SyntheticEvent>,
    scrolls: HashMap<NodeId, ListScroll>,
}

impl Page {
    pub fn new(root: Node) -> Self {
        Self {
            root: Some(root),
            ..Self::default()
        }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.root.as_ref().and_then(|r| r.find(id))
    }

    /// Node ids from the document root down to `id`, inclusive.
    pub fn path(&self, id: NodeId) -> Option<Vec<NodeId>> {
        self.root.as_ref().and_then(|r| r.path_to(id))
    }

    /// Nearest ancestor of `from` (or `from` itself) carrying a value for
    /// `attr`. Returns the owning node and the attribute value.
    pub fn closest_with_attr(&self, from: NodeId, attr: &str) -> Option<(NodeId, String)> {
        let path = self.path(from)?;
        for id in path.into_iter().rev() {
            let node = self.node(id)?;
            if let Some(v) = node.attr(attr) {
                return Some((id, v.to_string()));
            }
        }
        None
    }

    /// Current value of a control: live value if one was set, else the
    /// `value` attribute, else empty. `None` for detached or non-element ids.
    pub fn value(&self, id: NodeId) -> Option<&str> {
        let node = self.node(id)?;
        if !matches!(node, Node::Element { .. }) {
            return None;
        }
        Some(
            self.values
                .get(&id)
                .map(String::as_str)
                .or_else(|| node.attr("value"))
                .unwrap_or(""),
        )
    }

    /// Overwrite a control's value. No-op on detached nodes.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> bool {
        if self.node(id).is_none() {
            log::trace!(target: "dom.page", "set_value on detached node {id:?}");
            return false;
        }
        self.values.insert(id, value.into());
        true
    }

    /// Dispatch a synthetic bubbling input event on an element.
    /// No-op on detached nodes.
    pub fn dispatch_input(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            log::trace!(target: "dom.page", "dispatch_input on detached node {id:?}");
            return false;
        }
        self.events.push(SyntheticEvent {
            target: id,
            bubbles: true,
        });
        true
    }

    pub fn events(&self) -> &[SyntheticEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<SyntheticEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn focus(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        self.focused = Some(id);
        true
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn set_style(&mut self, id: NodeId, key: &str, value: &str) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        let entries = self.styles.entry(id).or_default();
        if let Some(entry) = entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_string();
        } else {
            entries.push((key.to_string(), value.to_string()));
        }
        true
    }

    pub fn style(&self, id: NodeId, key: &str) -> Option<&str> {
        self.styles
            .get(&id)?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of rows an option list shows before scrolling.
    pub fn set_viewport_rows(&mut self, list: NodeId, rows: usize) {
        self.scrolls.entry(list).or_default().rows = rows.max(1);
    }

    /// Index of the first visible row of an option list.
    pub fn first_visible(&self, list: NodeId) -> usize {
        self.scrolls.get(&list).map(|s| s.first).unwrap_or(0)
    }

    /// Scroll `idx` into the nearest visible position of the list's window.
    /// Rows already in view cause no scroll of the window at all.
    pub fn scroll_into_view(&mut self, list: NodeId, idx: usize) -> bool {
        if self.node(list).is_none() {
            log::trace!(target: "dom.page", "scroll_into_view on detached list {list:?}");
            return false;
        }
        let scroll = self.scrolls.entry(list).or_default();
        if idx < scroll.first {
            scroll.first = idx;
        } else if idx >= scroll.first + scroll.rows {
            scroll.first = idx + 1 - scroll.rows;
        }
        true
    }

    /// Framework-driven patch: replace an element's children with a fresh
    /// subtree. State belonging to replaced nodes (values, styles, scroll
    /// windows, focus) is dropped; everything outside the subtree survives.
    pub fn replace_children(&mut self, parent: NodeId, children: Vec<Node>) -> bool {
        let Some(root) = self.root.as_mut() else {
            return false;
        };
        let Some(node) = find_mut(root, parent) else {
            log::trace!(target: "dom.page", "replace_children on detached node {parent:?}");
            return false;
        };
        let Node::Element { children: slot, .. } = node else {
            return false;
        };

        let mut removed = Vec::new();
        for old in slot.iter() {
            old.walk(&mut |n| removed.push(n.id()));
        }
        *slot = children;

        for id in removed {
            self.values.remove(&id);
            self.styles.remove(&id);
            self.scrolls.remove(&id);
            if self.focused == Some(id) {
                self.focused = None;
            }
        }
        true
    }
}

fn find_mut(node: &mut Node, id: NodeId) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    match node {
        Node::Element { children, .. } => children.iter_mut().find_map(|c| find_mut(c, id)),
        Node::Text { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elem(id: u32, name: &str, children: Vec<Node>) -> Node {
        Node::element(NodeId(id), name, Vec::new(), children)
    }

    fn input(id: u32, value: Option<&str>) -> Node {
        let attributes = match value {
            Some(v) => vec![("value".to_string(), Some(v.to_string()))],
            None => Vec::new(),
        };
        Node::element(NodeId(id), "input", attributes, Vec::new())
    }

    #[test]
    fn value_falls_back_to_the_value_attribute() {
        let page = Page::new(elem(1, "div", vec![input(2, Some("seed"))]));
        assert_eq!(page.value(NodeId(2)), Some("seed"));
        assert_eq!(page.value(NodeId(9)), None);
    }

    #[test]
    fn set_value_overrides_the_attribute() {
        let mut page = Page::new(elem(1, "div", vec![input(2, Some("seed"))]));
        assert!(page.set_value(NodeId(2), "typed"));
        assert_eq!(page.value(NodeId(2)), Some("typed"));
    }

    #[test]
    fn operations_on_detached_nodes_are_noops() {
        let mut page = Page::new(elem(1, "div", Vec::new()));
        assert!(!page.set_value(NodeId(42), "x"));
        assert!(!page.dispatch_input(NodeId(42)));
        assert!(!page.focus(NodeId(42)));
        assert!(!page.scroll_into_view(NodeId(42), 0));
        assert!(page.events().is_empty());
    }

    #[test]
    fn dispatch_input_records_a_bubbling_event() {
        let mut page = Page::new(elem(1, "div", vec![input(2, None)]));
        assert!(page.dispatch_input(NodeId(2)));
        assert_eq!(
            page.take_events(),
            vec![SyntheticEvent {
                target: NodeId(2),
                bubbles: true
            }]
        );
        assert!(page.events().is_empty());
    }

    #[test]
    fn scroll_moves_only_when_the_row_leaves_the_window() {
        let mut page = Page::new(elem(1, "ul", Vec::new()));
        let list = NodeId(1);
        page.set_viewport_rows(list, 3);

        // Rows 0..3 are visible: no scroll.
        page.scroll_into_view(list, 1);
        assert_eq!(page.first_visible(list), 0);

        // Row below the window: scroll just far enough.
        page.scroll_into_view(list, 5);
        assert_eq!(page.first_visible(list), 3);

        // Row inside the new window: no change.
        page.scroll_into_view(list, 4);
        assert_eq!(page.first_visible(list), 3);

        // Row above the window: it becomes the first visible.
        page.scroll_into_view(list, 1);
        assert_eq!(page.first_visible(list), 1);
    }

    #[test]
    fn replace_children_drops_state_of_removed_nodes() {
        let mut page = Page::new(elem(1, "div", vec![input(2, None)]));
        page.set_value(NodeId(2), "typed");
        page.focus(NodeId(2));

        assert!(page.replace_children(NodeId(1), vec![input(3, None)]));

        assert_eq!(page.value(NodeId(2)), None);
        assert_eq!(page.focused(), None);
        assert_eq!(page.value(NodeId(3)), Some(""));
    }

    #[test]
    fn replace_children_keeps_state_outside_the_subtree() {
        let mut page = Page::new(elem(
            1,
            "div",
            vec![input(2, None), elem(3, "div", vec![input(4, None)])],
        ));
        page.set_value(NodeId(2), "keep");
        page.set_value(NodeId(4), "drop");

        assert!(page.replace_children(NodeId(3), vec![input(5, None)]));

        assert_eq!(page.value(NodeId(2)), Some("keep"));
        assert_eq!(page.value(NodeId(4)), None);
    }
}
