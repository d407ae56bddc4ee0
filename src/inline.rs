use tracing::debug;

use crate::node::{Node, NodeKind};
use crate::styled::{AnnotationKind, SpanStyle, StyledTextBuilder};

/// Stand-in character for an inline image; the presenter swaps in the image.
pub const IMAGE_PLACEHOLDER: char = '\u{FFFC}';

/// Append the inline content of `parent`'s children to `builder`.
///
/// Nested paragraphs are walked through without separators. Block kinds
/// that have no inline meaning are skipped.
pub fn append_inline(parent: &Node, builder: &mut StyledTextBuilder) {
    for child in &parent.children {
        match &child.kind {
            NodeKind::Paragraph => append_inline(child, builder),
            NodeKind::Text(literal) => builder.append(literal),
            NodeKind::Image { destination } => {
                let mut image = builder.push_annotation(AnnotationKind::InlineImage, destination);
                let mut marker = [0; 4];
                image.append(IMAGE_PLACEHOLDER.encode_utf8(&mut marker));
            }
            NodeKind::Emphasis => {
                let mut italic = builder.push_style(SpanStyle::italic());
                append_inline(child, &mut italic);
            }
            NodeKind::StrongEmphasis => {
                let mut bold = builder.push_style(SpanStyle::bold());
                append_inline(child, &mut bold);
            }
            NodeKind::Code(literal) => {
                let mut code = builder.push_style(SpanStyle::monospace());
                code.append(literal);
            }
            // Monospace on the break matches the code span styling.
            NodeKind::HardLineBreak => {
                let mut code = builder.push_style(SpanStyle::monospace());
                code.append("\n");
            }
            NodeKind::Link { destination } => {
                let mut styled = builder.push_style(SpanStyle::link());
                let mut link = styled.push_annotation(AnnotationKind::Url, destination);
                append_inline(child, &mut link);
            }
            NodeKind::Document
            | NodeKind::Heading { .. }
            | NodeKind::BulletList { .. }
            | NodeKind::OrderedList { .. }
            | NodeKind::ListItem
            | NodeKind::BlockQuote
            | NodeKind::FencedCodeBlock { .. }
            | NodeKind::IndentedCodeBlock { .. }
            | NodeKind::ThematicBreak => {
                debug!(kind = ?child.kind, "skipping block node in inline context")
            }
        }
    }
}
