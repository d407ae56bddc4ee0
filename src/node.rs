/// The kind of a parsed Markdown node, block or inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    // Blocks
    Document,
    Heading {
        level: u8,
    },
    Paragraph,
    BulletList {
        marker: char,
    },
    OrderedList {
        start: u64,
        delimiter: char,
    },
    ListItem,
    BlockQuote,
    FencedCodeBlock {
        info: String,
        literal: String,
    },
    IndentedCodeBlock {
        literal: String,
    },
    ThematicBreak,
    Image {
        destination: String,
    },

    // Inlines
    Text(String),
    Emphasis,
    StrongEmphasis,
    Code(String),
    HardLineBreak,
    Link {
        destination: String,
    },
}

/// A node in the document tree. Children are owned in document order.
///
/// There is no stored parent pointer: renderers pass the parent down
/// while walking, which is the only way the tree is ever queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    pub fn document(children: Vec<Node>) -> Self {
        Self::with_children(NodeKind::Document, children)
    }

    pub fn text(literal: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(literal.into()))
    }

    pub fn is_document(&self) -> bool {
        matches!(self.kind, NodeKind::Document)
    }

    pub fn is_list(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::BulletList { .. } | NodeKind::OrderedList { .. }
        )
    }

    /// The single child of this node, if it has exactly one.
    pub fn only_child(&self) -> Option<&Node> {
        match self.children.as_slice() {
            [child] => Some(child),
            _ => None,
        }
    }
}
