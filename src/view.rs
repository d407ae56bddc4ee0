use tracing::debug;

use crate::block::{render_document_with, render_raw_text};
use crate::layout::{LayoutNode, Spacing};
use crate::node::Node;
use crate::parser::parse;

/// Whether a document view shows the rendered markdown or its source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Rendered,
    RawText,
}

impl ViewMode {
    pub fn toggled(self) -> ViewMode {
        match self {
            ViewMode::Rendered => ViewMode::RawText,
            ViewMode::RawText => ViewMode::Rendered,
        }
    }
}

/// A document surface: the source, its parsed tree and the view mode.
/// A double tap anywhere flips between rendered and raw text.
#[derive(Debug, Clone)]
pub struct MarkdownView {
    source: String,
    root: Node,
    spacing: Spacing,
    mode: ViewMode,
}

impl MarkdownView {
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_spacing(source, Spacing::default())
    }

    pub fn with_spacing(source: impl Into<String>, spacing: Spacing) -> Self {
        let source = source.into();
        let root = parse(&source);
        Self {
            source,
            root,
            spacing,
            mode: ViewMode::default(),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn on_double_tap(&mut self) {
        self.mode = self.mode.toggled();
        debug!(mode = ?self.mode, "view mode toggled");
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.root = parse(&self.source);
    }

    pub fn render(&self) -> LayoutNode {
        match self.mode {
            ViewMode::Rendered => render_document_with(&self.root, &self.spacing),
            ViewMode::RawText => render_raw_text(&self.source),
        }
    }
}
