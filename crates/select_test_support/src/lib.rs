//! Test fixtures for the select widget: canonical widget subtrees and a
//! scripted server endpoint.

use bus::{ClientIntent, ServerEndpoint, ServerUpdate};
use core_types::Mode;
use dom::{Node, NodeId, Page};

/// A built widget page with every interesting node id exposed.
pub struct PageFixture {
    pub page: Page,
    pub root: NodeId,
    pub text_input: NodeId,
    pub clear_button: NodeId,
    /// Hidden input named after the field: the value holder in single mode,
    /// the empty-selection marker in multi mode.
    pub hidden_field: NodeId,
    /// Per-value hidden inputs (`field[]`), multi mode only.
    pub hidden_multi: Vec<NodeId>,
    /// Remove buttons on selected tags (multi mode), by selection index.
    pub remove_buttons: Vec<NodeId>,
    /// Icon spans inside the remove buttons, for ancestor-resolution tests.
    pub remove_icons: Vec<NodeId>,
    pub list: NodeId,
    /// Option rows carrying `data-idx`, in index order.
    pub rows: Vec<NodeId>,
    /// Decorative label spans inside the rows, same order.
    pub row_labels: Vec<NodeId>,
    /// Trailing row without any `data-idx` ("no results" filler).
    pub filler_row: NodeId,
}

pub struct FixtureBuilder {
    mode: Mode,
    field: String,
    debounce_ms: u64,
    min_len: usize,
    relay_target: Option<String>,
    labels: Vec<String>,
    selected: usize,
}

impl Default for FixtureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureBuilder {
    pub fn new() -> Self {
        Self {
            mode: Mode::Single,
            field: "city".to_string(),
            debounce_ms: 100,
            min_len: 3,
            relay_target: None,
            labels: vec!["Berlin".into(), "Bern".into(), "Bergen".into()],
            selected: 0,
        }
    }

    pub fn multi(mut self) -> Self {
        self.mode = Mode::Multi;
        self
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn min_len(mut self, len: usize) -> Self {
        self.min_len = len;
        self
    }

    pub fn relay_target(mut self, target: impl Into<String>) -> Self {
        self.relay_target = Some(target.into());
        self
    }

    pub fn labels(mut self, labels: &[&str]) -> Self {
        self.labels = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    /// Number of already-selected tags (multi mode): renders one `field[]`
    /// hidden input and one removable tag per entry.
    pub fn selected(mut self, count: usize) -> Self {
        self.selected = count;
        self
    }

    pub fn build(self) -> PageFixture {
        let mut ids = IdAlloc::default();

        let root = ids.next();
        let text_input = ids.next();
        let clear_button = ids.next();
        let hidden_field = ids.next();

        let mut children = vec![
            Node::element(text_input, "input", Vec::new(), Vec::new()),
            Node::element(
                clear_button,
                "button",
                vec![attr_flag("data-clear")],
                Vec::new(),
            ),
            Node::element(
                hidden_field,
                "input",
                vec![
                    attr("type", "hidden"),
                    attr("name", &self.field),
                ],
                Vec::new(),
            ),
        ];

        let mut hidden_multi = Vec::new();
        let mut remove_buttons = Vec::new();
        let mut remove_icons = Vec::new();
        if self.mode == Mode::Multi {
            for i in 0..self.selected {
                let hidden = ids.next();
                hidden_multi.push(hidden);
                children.push(Node::element(
                    hidden,
                    "input",
                    vec![
                        attr("type", "hidden"),
                        attr("name", &format!("{}[]", self.field)),
                        attr("value", &format!("value-{i}")),
                    ],
                    Vec::new(),
                ));

                let tag = ids.next();
                let button = ids.next();
                let icon = ids.next();
                remove_buttons.push(button);
                remove_icons.push(icon);
                children.push(Node::element(
                    tag,
                    "span",
                    Vec::new(),
                    vec![Node::element(
                        button,
                        "button",
                        vec![attr("data-remove-idx", &i.to_string())],
                        vec![Node::element(icon, "span", Vec::new(), Vec::new())],
                    )],
                ));
            }
        }

        let list = ids.next();
        let mut rows = Vec::new();
        let mut row_labels = Vec::new();
        let mut row_nodes = Vec::new();
        for (i, label) in self.labels.iter().enumerate() {
            let row = ids.next();
            let span = ids.next();
            let text = ids.next();
            rows.push(row);
            row_labels.push(span);
            row_nodes.push(Node::element(
                row,
                "li",
                vec![attr("data-idx", &i.to_string())],
                vec![Node::element(
                    span,
                    "span",
                    Vec::new(),
                    vec![Node::text(text, label.clone())],
                )],
            ));
        }
        let filler_row = ids.next();
        let filler_text = ids.next();
        row_nodes.push(Node::element(
            filler_row,
            "li",
            Vec::new(),
            vec![Node::text(filler_text, "no results")],
        ));
        children.push(Node::element(list, "ul", Vec::new(), row_nodes));

        let mut root_attrs = vec![
            attr("data-field", &self.field),
            attr("data-debounce", &self.debounce_ms.to_string()),
            attr("data-update-min-len", &self.min_len.to_string()),
            attr(
                "data-mode",
                match self.mode {
                    Mode::Single => "single",
                    Mode::Multi => "multi",
                },
            ),
        ];
        if let Some(target) = &self.relay_target {
            root_attrs.push(attr("data-phx-target", target));
        }

        let page = Page::new(Node::element(root, "div", root_attrs, children));

        PageFixture {
            page,
            root,
            text_input,
            clear_button,
            hidden_field,
            hidden_multi,
            remove_buttons,
            remove_icons,
            list,
            rows,
            row_labels,
            filler_row,
        }
    }
}

impl PageFixture {
    /// Rebuild the widget subtree with fresh node ids, as a framework patch
    /// would, and return the replacement fixture (same root, new children).
    /// Call at most once per fixture; fresh ids are offset by a fixed 1000.
    pub fn repatch(&mut self, builder: FixtureBuilder) -> PageFixture {
        let mut fresh = builder.build();
        let children: Vec<Node> = match fresh.page.root() {
            Some(root) => root.children().to_vec(),
            None => Vec::new(),
        };
        // Offset fresh ids so they cannot collide with the live tree.
        let offset = 1000;
        let children: Vec<Node> = children.into_iter().map(|c| offset_ids(c, offset)).collect();
        self.page.replace_children(self.root, children);

        fresh.root = self.root;
        fresh.text_input = NodeId(fresh.text_input.0 + offset);
        fresh.clear_button = NodeId(fresh.clear_button.0 + offset);
        fresh.hidden_field = NodeId(fresh.hidden_field.0 + offset);
        fresh.hidden_multi = fresh
            .hidden_multi
            .iter()
            .map(|n| NodeId(n.0 + offset))
            .collect();
        fresh.remove_buttons = fresh
            .remove_buttons
            .iter()
            .map(|n| NodeId(n.0 + offset))
            .collect();
        fresh.remove_icons = fresh
            .remove_icons
            .iter()
            .map(|n| NodeId(n.0 + offset))
            .collect();
        fresh.list = NodeId(fresh.list.0 + offset);
        fresh.rows = fresh.rows.iter().map(|n| NodeId(n.0 + offset)).collect();
        fresh.row_labels = fresh
            .row_labels
            .iter()
            .map(|n| NodeId(n.0 + offset))
            .collect();
        fresh.filler_row = NodeId(fresh.filler_row.0 + offset);
        fresh
    }
}

fn offset_ids(node: Node, offset: u32) -> Node {
    match node {
        Node::Element {
            id,
            name,
            attributes,
            children,
        } => Node::Element {
            id: NodeId(id.0 + offset),
            name,
            attributes,
            children: children.into_iter().map(|c| offset_ids(c, offset)).collect(),
        },
        Node::Text { id, text } => Node::Text {
            id: NodeId(id.0 + offset),
            text,
        },
    }
}

#[derive(Default)]
struct IdAlloc {
    next: u32,
}

impl IdAlloc {
    fn next(&mut self) -> NodeId {
        self.next += 1;
        NodeId(self.next)
    }
}

fn attr(name: &str, value: &str) -> (String, Option<String>) {
    (name.to_string(), Some(value.to_string()))
}

fn attr_flag(name: &str) -> (String, Option<String>) {
    (name.to_string(), None)
}

/// The server's half of the bus, driven by a test script.
pub struct ScriptedServer {
    endpoint: ServerEndpoint,
}

impl ScriptedServer {
    pub fn new(endpoint: ServerEndpoint) -> Self {
        Self { endpoint }
    }

    /// Every intent received so far, in arrival order.
    pub fn drain(&self) -> Vec<ClientIntent> {
        let mut intents = Vec::new();
        while let Ok(intent) = self.endpoint.intent_rx.try_recv() {
            intents.push(intent);
        }
        intents
    }

    pub fn push(&self, update: ServerUpdate) {
        let _ = self.endpoint.update_tx.send(update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_fixture_has_expected_shape() {
        let f = FixtureBuilder::new().build();
        let root = f.page.root().unwrap();

        assert_eq!(root.attr("data-field"), Some("city"));
        assert_eq!(root.attr("data-mode"), Some("single"));
        assert!(f.page.node(f.text_input).is_some());
        assert_eq!(f.rows.len(), 3);
        assert!(f.page.node(f.filler_row).is_some_and(|n| !n.has_attr("data-idx")));
        assert!(f.hidden_multi.is_empty());
    }

    #[test]
    fn multi_fixture_renders_tags_and_value_inputs() {
        let f = FixtureBuilder::new().multi().selected(2).build();

        assert_eq!(f.hidden_multi.len(), 2);
        assert_eq!(f.remove_buttons.len(), 2);
        let button = f.page.node(f.remove_buttons[1]).unwrap();
        assert_eq!(button.attr("data-remove-idx"), Some("1"));
        assert_eq!(f.page.value(f.hidden_multi[0]), Some("value-0"));
    }

    #[test]
    fn repatch_replaces_children_with_fresh_ids() {
        let mut f = FixtureBuilder::new().build();
        let old_input = f.text_input;

        let patched = f.repatch(FixtureBuilder::new());

        assert_eq!(patched.root, f.root);
        assert_ne!(patched.text_input, old_input);
        assert!(f.page.node(old_input).is_none());
        assert!(f.page.node(patched.text_input).is_some());
    }
}
