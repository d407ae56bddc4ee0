use tracing::debug;

use crate::layout::{LayoutNode, Padding, Spacing};
use crate::node::{Node, NodeKind};

/// Item marker state for one list. Each list call owns its own value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Bullet(char),
    Ordered { number: u64, delimiter: char },
}

impl ListMarker {
    pub fn for_list(kind: &NodeKind) -> Option<ListMarker> {
        match *kind {
            NodeKind::BulletList { marker } => Some(ListMarker::Bullet(marker)),
            NodeKind::OrderedList { start, delimiter } => Some(ListMarker::Ordered {
                number: start,
                delimiter,
            }),
            _ => None,
        }
    }

    /// The prefix for the current item, and the marker for the next one.
    pub fn advance(self) -> (String, ListMarker) {
        match self {
            ListMarker::Bullet(marker) => (format!("{marker} "), self),
            ListMarker::Ordered { number, delimiter } => (
                format!("{number}{delimiter} "),
                ListMarker::Ordered {
                    number: number.saturating_add(1),
                    delimiter,
                },
            ),
        }
    }
}

/// Render the items of `list`, whose parent is `parent`.
///
/// Every non-list child of every item becomes one line through
/// `render_item(prefix, child)`. A list nested in an item is rendered
/// recursively with its own marker state, indented.
pub fn render_list<F>(list: &Node, parent: &Node, spacing: &Spacing, render_item: &F) -> LayoutNode
where
    F: Fn(&str, &Node) -> LayoutNode,
{
    let Some(mut marker) = ListMarker::for_list(&list.kind) else {
        debug!(kind = ?list.kind, "not a list");
        return LayoutNode::Column(Vec::new());
    };

    let mut lines = Vec::new();
    for item in &list.children {
        for child in &item.children {
            if child.is_list() {
                lines.push(render_list(child, item, spacing, render_item));
            } else {
                let (prefix, next) = marker.advance();
                marker = next;
                lines.push(render_item(&prefix, child));
            }
        }
    }

    let padding = if parent.is_document() {
        Padding::bottom(spacing.block_bottom)
    } else {
        Padding {
            start: spacing.list_indent,
            ..Padding::default()
        }
    };
    LayoutNode::padded(padding, LayoutNode::Column(lines))
}
