//! Formula syntax tree as handed over by the upstream parser.

/// One node of a parsed formula.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// A bare literal (number, text, operator symbol, reference string).
    Leaf(String),
    /// An operator application: `tag` selects the rendering rule.
    Tagged { tag: String, args: Vec<Node> },
    /// An untagged run of sibling nodes.
    Sequence(Vec<Node>),
}

impl Node {
    pub fn leaf(value: impl Into<String>) -> Node {
        Node::Leaf(value.into())
    }

    pub fn tagged(tag: impl Into<String>, args: Vec<Node>) -> Node {
        Node::Tagged {
            tag: tag.into(),
            args,
        }
    }

    /// Shorthand for a tagged node whose arguments are all leaves,
    /// e.g. `Node::atom("cell", ["A1"])`.
    pub fn atom<I, S>(tag: impl Into<String>, values: I) -> Node
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Node::tagged(tag, values.into_iter().map(Node::leaf).collect())
    }

    /// The literal text of a leaf.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Node::Leaf(value) => Some(value),
            _ => None,
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::leaf(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Leaf(value)
    }
}
