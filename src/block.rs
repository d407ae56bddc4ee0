use tracing::{debug, warn};

use crate::inline::append_inline;
use crate::layout::{ImageBlock, LayoutNode, Padding, Spacing, VerticalRule};
use crate::list::render_list;
use crate::node::{Node, NodeKind};
use crate::styled::{SpanStyle, StyledText, StyledTextBuilder};
use crate::theme::{ColorRole, TextRole};

/// Render a parsed document with the default spacing.
pub fn render_document(root: &Node) -> LayoutNode {
    render_document_with(root, &Spacing::default())
}

/// Render a parsed document with configured spacing.
pub fn render_document_with(root: &Node, spacing: &Spacing) -> LayoutNode {
    render_block_children(root, spacing)
}

/// Render each block child of `parent` in document order.
pub fn render_block_children(parent: &Node, spacing: &Spacing) -> LayoutNode {
    BlockRenderer { spacing }.children(parent)
}

/// The source shown as-is, with no markdown interpretation.
pub fn render_raw_text(source: &str) -> LayoutNode {
    LayoutNode::text(StyledText::plain(source), TextRole::Body1)
}

struct BlockRenderer<'a> {
    spacing: &'a Spacing,
}

impl BlockRenderer<'_> {
    fn children(&self, parent: &Node) -> LayoutNode {
        LayoutNode::Column(
            parent
                .children
                .iter()
                .filter_map(|child| self.block(child, parent))
                .collect(),
        )
    }

    fn block(&self, node: &Node, parent: &Node) -> Option<LayoutNode> {
        match &node.kind {
            NodeKind::Heading { level } => Some(self.heading(node, *level, parent)),
            NodeKind::Paragraph => Some(self.paragraph(node, parent)),
            NodeKind::BulletList { .. } | NodeKind::OrderedList { .. } => {
                Some(render_list(node, parent, self.spacing, &|prefix: &str, child: &Node| {
                    self.list_line(prefix, child)
                }))
            }
            NodeKind::BlockQuote => Some(self.block_quote(node)),
            NodeKind::FencedCodeBlock { literal, .. } => {
                let padding = Padding {
                    start: self.spacing.code_start,
                    ..self.bottom_padding(parent)
                };
                Some(LayoutNode::padded(
                    padding,
                    LayoutNode::text(StyledText::plain(literal.as_str()), TextRole::Code),
                ))
            }
            NodeKind::IndentedCodeBlock { .. } | NodeKind::ThematicBreak => {
                debug!(kind = ?node.kind, "block is not displayed");
                None
            }
            NodeKind::Image { destination } => Some(image(destination)),
            NodeKind::Document
            | NodeKind::ListItem
            | NodeKind::Text(_)
            | NodeKind::Emphasis
            | NodeKind::StrongEmphasis
            | NodeKind::Code(_)
            | NodeKind::HardLineBreak
            | NodeKind::Link { .. } => {
                debug!(kind = ?node.kind, "skipping node in block context");
                None
            }
        }
    }

    /// Top-level blocks get a bottom gap; nested ones sit flush.
    fn bottom_padding(&self, parent: &Node) -> Padding {
        if parent.is_document() {
            Padding::bottom(self.spacing.block_bottom)
        } else {
            Padding::default()
        }
    }

    fn heading(&self, node: &Node, level: u8, parent: &Node) -> LayoutNode {
        let Some(role) = TextRole::heading(level) else {
            warn!(level, "invalid heading level, rendering children as blocks");
            return self.children(node);
        };
        let mut builder = StyledTextBuilder::new();
        append_inline(node, &mut builder);
        LayoutNode::padded(
            self.bottom_padding(parent),
            LayoutNode::text(builder.finish(), role),
        )
    }

    fn paragraph(&self, node: &Node, parent: &Node) -> LayoutNode {
        if let Some(Node {
            kind: NodeKind::Image { destination },
            ..
        }) = node.only_child()
        {
            return image(destination);
        }
        let mut builder = StyledTextBuilder::new();
        append_inline(node, &mut builder);
        LayoutNode::padded(
            self.bottom_padding(parent),
            LayoutNode::text(builder.finish(), TextRole::Body1),
        )
    }

    fn list_line(&self, prefix: &str, child: &Node) -> LayoutNode {
        let mut builder = StyledTextBuilder::new();
        builder.append(prefix);
        append_inline(child, &mut builder);
        LayoutNode::text(builder.finish(), TextRole::Body1)
    }

    /// Paragraph runs become one italic text block. Any other block child
    /// is rendered as a nested block of the quote.
    fn block_quote(&self, node: &Node) -> LayoutNode {
        let mut parts = Vec::new();
        let mut prose: Option<StyledTextBuilder> = None;

        for child in &node.children {
            if matches!(child.kind, NodeKind::Paragraph) {
                let builder = prose.get_or_insert_with(StyledTextBuilder::new);
                let mut italic = builder.push_style(SpanStyle::italic());
                append_inline(child, &mut italic);
                continue;
            }
            if let Some(builder) = prose.take() {
                parts.push(LayoutNode::text(builder.finish(), TextRole::Body1));
            }
            parts.extend(self.block(child, node));
        }
        if let Some(builder) = prose.take() {
            parts.push(LayoutNode::text(builder.finish(), TextRole::Body1));
        }

        let child = if parts.len() == 1 {
            parts.remove(0)
        } else {
            LayoutNode::Column(parts)
        };
        LayoutNode::Quote {
            rule: VerticalRule {
                offset: self.spacing.quote_rule_offset,
                width: self.spacing.quote_rule_width,
                color: ColorRole::OnBackground,
            },
            padding: Padding {
                start: self.spacing.quote_start,
                top: self.spacing.quote_vertical,
                bottom: self.spacing.quote_vertical,
            },
            child: Box::new(child),
        }
    }
}

fn image(destination: &str) -> LayoutNode {
    LayoutNode::Image(ImageBlock {
        destination: destination.to_string(),
    })
}
