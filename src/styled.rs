//! Flattened text with style runs and point-addressable annotations.
//!
//! Offsets are byte offsets into the flattened UTF-8 text. Styles and
//! annotations are pushed through scope guards that pop on drop, so a
//! recursive walk can never leak a style into the next sibling.

use std::ops::{Deref, DerefMut, Range};

use crate::theme::ColorRole;

/// Visual attributes layered on top of a text block's base style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
    pub underline: bool,
    pub color: Option<ColorRole>,
}

impl SpanStyle {
    pub const fn italic() -> Self {
        Self {
            bold: false,
            italic: true,
            monospace: false,
            underline: false,
            color: None,
        }
    }

    pub const fn bold() -> Self {
        Self {
            bold: true,
            italic: false,
            monospace: false,
            underline: false,
            color: None,
        }
    }

    pub const fn monospace() -> Self {
        Self {
            bold: false,
            italic: false,
            monospace: true,
            underline: false,
            color: None,
        }
    }

    /// Underlined, in the theme's primary color.
    pub const fn link() -> Self {
        Self {
            bold: false,
            italic: false,
            monospace: false,
            underline: true,
            color: Some(ColorRole::Primary),
        }
    }

    /// Layer `top` over `self`. Flags accumulate; a color in `top` wins.
    pub fn merge(self, top: SpanStyle) -> SpanStyle {
        SpanStyle {
            bold: self.bold || top.bold,
            italic: self.italic || top.italic,
            monospace: self.monospace || top.monospace,
            underline: self.underline || top.underline,
            color: top.color.or(self.color),
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == SpanStyle::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub range: Range<usize>,
    pub style: SpanStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Url,
    InlineImage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub value: String,
    pub range: Range<usize>,
}

impl Annotation {
    pub fn covers(&self, offset: usize) -> bool {
        self.range.start <= offset && offset < self.range.end
    }
}

/// Immutable result of a [`StyledTextBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    text: String,
    runs: Vec<StyledRun>,
    annotations: Vec<Annotation>,
}

impl StyledText {
    /// Unstyled text with no annotations.
    pub fn plain(text: impl Into<String>) -> Self {
        let mut builder = StyledTextBuilder::new();
        builder.append(&text.into());
        builder.finish()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    /// All annotations, ordered by start offset. Annotations that start
    /// together are listed outermost first.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Every annotation whose range covers `offset`, outermost first.
    pub fn annotations_at(&self, offset: usize) -> impl Iterator<Item = &Annotation> {
        self.annotations
            .iter()
            .take_while(move |a| a.range.start <= offset)
            .filter(move |a| a.covers(offset))
    }

    pub fn style_at(&self, offset: usize) -> Option<SpanStyle> {
        self.runs
            .iter()
            .find(|run| run.range.contains(&offset))
            .map(|run| run.style)
    }

    /// The text covered by each run carrying exactly `style`.
    pub fn segments_with(&self, style: SpanStyle) -> Vec<&str> {
        self.runs
            .iter()
            .filter(|run| run.style == style)
            .map(|run| &self.text[run.range.clone()])
            .collect()
    }
}

/// Accumulates text under a stack of active styles and annotations.
#[derive(Default)]
pub struct StyledTextBuilder {
    text: String,
    runs: Vec<StyledRun>,
    styles: Vec<SpanStyle>,
    // Slots in push order; open ones have their end filled on close
    annotations: Vec<Annotation>,
    open: Vec<usize>,
}

impl StyledTextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of styles currently pushed.
    pub fn style_depth(&self) -> usize {
        self.styles.len()
    }

    pub fn annotation_depth(&self) -> usize {
        self.open.len()
    }

    /// The merge of every style on the stack.
    pub fn current_style(&self) -> SpanStyle {
        self.styles
            .iter()
            .fold(SpanStyle::default(), |acc, style| acc.merge(*style))
    }

    pub fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let style = self.current_style();
        let start = self.text.len();
        self.text.push_str(text);
        let end = self.text.len();

        match self.runs.last_mut() {
            Some(last) if last.style == style && last.range.end == start => last.range.end = end,
            _ => self.runs.push(StyledRun {
                range: start..end,
                style,
            }),
        }
    }

    pub fn push_style(&mut self, style: SpanStyle) -> StyleScope<'_> {
        let depth = self.styles.len();
        self.styles.push(style);
        StyleScope {
            builder: self,
            depth,
        }
    }

    /// Open an annotation that closes over everything appended until the
    /// returned scope is dropped.
    pub fn push_annotation(
        &mut self,
        kind: AnnotationKind,
        value: impl Into<String>,
    ) -> AnnotationScope<'_> {
        let depth = self.open.len();
        let start = self.text.len();
        self.open.push(self.annotations.len());
        self.annotations.push(Annotation {
            kind,
            value: value.into(),
            range: start..start,
        });
        AnnotationScope {
            builder: self,
            depth,
        }
    }

    fn close_annotations_to(&mut self, depth: usize) {
        while self.open.len() > depth {
            let Some(slot) = self.open.pop() else {
                break;
            };
            let end = self.text.len();
            if let Some(annotation) = self.annotations.get_mut(slot) {
                annotation.range.end = end;
            }
        }
    }

    pub fn finish(mut self) -> StyledText {
        self.close_annotations_to(0);
        // Stable, so annotations sharing a start stay outermost first.
        self.annotations.sort_by_key(|a| a.range.start);
        StyledText {
            text: self.text,
            runs: self.runs,
            annotations: self.annotations,
        }
    }
}

/// A pushed style. Pops exactly what it pushed when dropped.
pub struct StyleScope<'b> {
    builder: &'b mut StyledTextBuilder,
    depth: usize,
}

impl Deref for StyleScope<'_> {
    type Target = StyledTextBuilder;

    fn deref(&self) -> &StyledTextBuilder {
        self.builder
    }
}

impl DerefMut for StyleScope<'_> {
    fn deref_mut(&mut self) -> &mut StyledTextBuilder {
        self.builder
    }
}

impl Drop for StyleScope<'_> {
    fn drop(&mut self) {
        self.builder.styles.truncate(self.depth);
    }
}

/// An open annotation. Records its range when dropped.
pub struct AnnotationScope<'b> {
    builder: &'b mut StyledTextBuilder,
    depth: usize,
}

impl Deref for AnnotationScope<'_> {
    type Target = StyledTextBuilder;

    fn deref(&self) -> &StyledTextBuilder {
        self.builder
    }
}

impl DerefMut for AnnotationScope<'_> {
    fn deref_mut(&mut self) -> &mut StyledTextBuilder {
        self.builder
    }
}

impl Drop for AnnotationScope<'_> {
    fn drop(&mut self) {
        self.builder.close_annotations_to(self.depth);
    }
}
