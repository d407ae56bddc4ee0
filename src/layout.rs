use std::fmt;

use serde::Deserialize;

use crate::styled::StyledText;
use crate::theme::{ColorRole, TextRole};

/// Layout distances, in density-independent units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Spacing {
    /// Bottom gap after top-level headings, paragraphs, lists and code.
    pub block_bottom: f32,
    /// Start indent of a nested list.
    pub list_indent: f32,
    pub quote_start: f32,
    /// Top and bottom padding of a block quote.
    pub quote_vertical: f32,
    pub quote_rule_width: f32,
    /// Horizontal position of the quote rule inside the quote's padding.
    pub quote_rule_offset: f32,
    pub code_start: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            block_bottom: 8.0,
            list_indent: 8.0,
            quote_start: 16.0,
            quote_vertical: 4.0,
            quote_rule_width: 2.0,
            quote_rule_offset: 12.0,
            code_start: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Padding {
    pub start: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub fn bottom(bottom: f32) -> Self {
        Self {
            bottom,
            ..Self::default()
        }
    }
}

/// A full-height vertical line drawn behind a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalRule {
    pub offset: f32,
    pub width: f32,
    pub color: ColorRole,
}

/// A block of styled text. `role` is the base style under the spans.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: StyledText,
    pub role: TextRole,
}

/// A standalone image, centered and filling the available width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlock {
    pub destination: String,
}

/// Toolkit-neutral visual tree produced by the block renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode {
    /// Children stacked top to bottom.
    Column(Vec<LayoutNode>),
    Padded {
        padding: Padding,
        child: Box<LayoutNode>,
    },
    Quote {
        rule: VerticalRule,
        padding: Padding,
        child: Box<LayoutNode>,
    },
    Text(TextBlock),
    Image(ImageBlock),
}

impl LayoutNode {
    pub fn padded(padding: Padding, child: LayoutNode) -> Self {
        LayoutNode::Padded {
            padding,
            child: Box::new(child),
        }
    }

    pub fn text(text: StyledText, role: TextRole) -> Self {
        LayoutNode::Text(TextBlock { text, role })
    }

    /// Every text block in the tree, in document order.
    pub fn text_blocks(&self) -> Vec<&TextBlock> {
        let mut blocks = Vec::new();
        self.collect_text_blocks(&mut blocks);
        blocks
    }

    fn collect_text_blocks<'a>(&'a self, out: &mut Vec<&'a TextBlock>) {
        match self {
            LayoutNode::Column(children) => {
                for child in children {
                    child.collect_text_blocks(out);
                }
            }
            LayoutNode::Padded { child, .. } | LayoutNode::Quote { child, .. } => {
                child.collect_text_blocks(out)
            }
            LayoutNode::Text(block) => out.push(block),
            LayoutNode::Image(_) => {}
        }
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            LayoutNode::Column(children) => {
                writeln!(f, "{indent}column")?;
                for child in children {
                    child.write_outline(f, depth + 1)?;
                }
                Ok(())
            }
            LayoutNode::Padded { padding, child } => {
                writeln!(f, "{indent}pad {}", format_padding(padding))?;
                child.write_outline(f, depth + 1)
            }
            LayoutNode::Quote {
                rule,
                padding,
                child,
            } => {
                writeln!(
                    f,
                    "{indent}quote rule@{}x{} {}",
                    rule.offset,
                    rule.width,
                    format_padding(padding)
                )?;
                child.write_outline(f, depth + 1)
            }
            LayoutNode::Text(block) => {
                writeln!(f, "{indent}{:?} {:?}", block.role, block.text.text())
            }
            LayoutNode::Image(image) => writeln!(f, "{indent}image {}", image.destination),
        }
    }
}

fn format_padding(padding: &Padding) -> String {
    format!(
        "start={} top={} bottom={}",
        padding.start, padding.top, padding.bottom
    )
}

/// Indented outline of the tree, one node per line.
impl fmt::Display for LayoutNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}
