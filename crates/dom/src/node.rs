//! Element tree with HTML-style attributes.

/// Identifier of a node within one [`Page`](crate::Page) tree.
///
/// Assigned by whoever builds the tree (the embedding framework, or test
/// fixtures); fresh subtrees from a patch carry fresh ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

#[derive(Clone, Debug)]
pub enum Node {
    Element {
        id: NodeId,
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    },
    Text {
        id: NodeId,
        text: String,
    },
}

impl Node {
    pub fn element(
        id: NodeId,
        name: impl Into<String>,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    ) -> Self {
        Node::Element {
            id,
            name: name.into(),
            attributes,
            children,
        }
    }

    pub fn text(id: NodeId, text: impl Into<String>) -> Self {
        Node::Text {
            id,
            text: text.into(),
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Node::Element { id, .. } | Node::Text { id, .. } => *id,
        }
    }

    pub fn is_element_named(&self, name: &str) -> bool {
        match self {
            Node::Element { name: n, .. } => n.eq_ignore_ascii_case(name),
            Node::Text { .. } => false,
        }
    }

    /// Attribute value by case-insensitive name. Valueless attributes
    /// (`<input checked>`) yield `None` here; use [`Node::has_attr`] for
    /// presence checks.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .and_then(|(_, v)| v.as_deref()),
            Node::Text { .. } => None,
        }
    }

    pub fn has_attr(&self, name: &str) -> bool {
        match self {
            Node::Element { attributes, .. } => {
                attributes.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
            }
            Node::Text { .. } => false,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text { .. } => &[],
        }
    }

    pub fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id() == id {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(id))
    }

    /// Node ids from this node down to `id`, inclusive, or `None` if `id` is
    /// not in this subtree.
    pub fn path_to(&self, id: NodeId) -> Option<Vec<NodeId>> {
        if self.id() == id {
            return Some(vec![id]);
        }
        for child in self.children() {
            if let Some(mut path) = child.path_to(id) {
                path.insert(0, self.id());
                return Some(path);
            }
        }
        None
    }

    /// Depth-first walk over this subtree.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Node {
        Node::element(
            NodeId(1),
            "div",
            vec![("data-field".to_string(), Some("city".to_string()))],
            vec![
                Node::element(NodeId(2), "input", Vec::new(), Vec::new()),
                Node::element(
                    NodeId(3),
                    "ul",
                    Vec::new(),
                    vec![Node::element(
                        NodeId(4),
                        "li",
                        vec![("data-idx".to_string(), Some("0".to_string()))],
                        vec![Node::text(NodeId(5), "Berlin")],
                    )],
                ),
            ],
        )
    }

    #[test]
    fn attr_lookup_is_case_insensitive() {
        let root = tree();
        assert_eq!(root.attr("DATA-FIELD"), Some("city"));
        assert_eq!(root.attr("data-missing"), None);
    }

    #[test]
    fn find_reaches_nested_nodes() {
        let root = tree();
        assert!(root.find(NodeId(5)).is_some());
        assert!(root.find(NodeId(99)).is_none());
    }

    #[test]
    fn path_runs_root_to_target_inclusive() {
        let root = tree();
        assert_eq!(
            root.path_to(NodeId(5)),
            Some(vec![NodeId(1), NodeId(3), NodeId(4), NodeId(5)])
        );
        assert_eq!(root.path_to(NodeId(99)), None);
    }
}
