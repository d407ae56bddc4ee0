//! Render a parsed Markdown tree into toolkit-neutral styled layout.
//!
//! [`parse`] builds a [`Node`] tree, [`render_document`] turns it into a
//! [`LayoutNode`] tree of padded containers, quotes, images and
//! [`StyledText`] blocks, and [`present`] resolves taps on those blocks.

mod block;
mod config;
mod error;
mod inline;
mod layout;
mod list;
mod node;
mod parser;
pub mod present;
mod sample;
mod styled;
mod theme;
mod view;

pub use block::{render_block_children, render_document, render_document_with, render_raw_text};
pub use config::Config;
pub use error::{Error, Result};
pub use inline::{IMAGE_PLACEHOLDER, append_inline};
pub use layout::{ImageBlock, LayoutNode, Padding, Spacing, TextBlock, VerticalRule};
pub use list::{ListMarker, render_list};
pub use node::{Node, NodeKind};
pub use sample::SAMPLE;
pub use styled::{
    Annotation, AnnotationKind, AnnotationScope, SpanStyle, StyleScope, StyledRun, StyledText,
    StyledTextBuilder,
};
pub use theme::{
    Color, ColorRole, Colors, FontFamily, FontWeight, TextRole, TextStyle, Theme, ThemeProvider,
    Typography,
};
pub use view::{MarkdownView, ViewMode};

/// Parse markdown text into a Document node.
pub fn parse(markdown: &str) -> Node {
    parser::parse(markdown)
}
