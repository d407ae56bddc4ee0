//! Tap handling and inline image placement for rendered text blocks.
//!
//! The host toolkit measures and draws the text. After each layout pass it
//! hands back a [`TextLayout`] so taps can be mapped to text offsets and
//! resolved against the block's annotations.

use std::ops::Range;

use tracing::trace;

use crate::layout::{LayoutNode, TextBlock};
use crate::styled::{AnnotationKind, StyledText};
use crate::theme::{TextStyle, ThemeProvider};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A realized text layout, mapping positions back to text offsets.
pub trait TextLayout {
    fn offset_for_position(&self, point: Point) -> usize;
}

/// Opens link targets. Fire and forget.
pub trait LinkOpener {
    fn open(&self, url: &str);
}

/// Loads image content for a destination. The handle reports pending or
/// ready state to the host; loading and its failures belong to the loader.
pub trait ImageLoader {
    type Image;

    fn load(&self, url: &str) -> Self::Image;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderAlign {
    Bottom,
}

/// Space reserved in the text flow for an inline image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placeholder {
    pub width: f32,
    pub height: f32,
    pub align: PlaceholderAlign,
}

#[derive(Debug)]
pub struct InlineImage<I> {
    pub range: Range<usize>,
    pub destination: String,
    pub placeholder: Placeholder,
    pub image: I,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    OpenedLink(String),
    Ignored,
}

/// One styled text block on screen.
pub struct PresentedText {
    text: StyledText,
    style: TextStyle,
    layout: Option<Box<dyn TextLayout>>,
}

impl PresentedText {
    pub fn new(text: StyledText, style: TextStyle) -> Self {
        Self {
            text,
            style,
            layout: None,
        }
    }

    /// Resolve a rendered block's text role through the theme.
    pub fn from_block(block: &TextBlock, theme: &impl ThemeProvider) -> Self {
        Self::new(block.text.clone(), theme.text_style(block.role))
    }

    pub fn text(&self) -> &StyledText {
        &self.text
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// Inline images are square. Each side follows the block's font size,
    /// not the font's ascent.
    pub fn placeholder(&self) -> Placeholder {
        Placeholder {
            width: self.style.size,
            height: self.style.size,
            align: PlaceholderAlign::Bottom,
        }
    }

    /// Record the layout from the latest layout pass.
    pub fn on_text_layout(&mut self, layout: impl TextLayout + 'static) {
        self.layout = Some(Box::new(layout));
    }

    /// Ask the loader for every inline image, paired with its placeholder.
    pub fn inline_images<L: ImageLoader>(&self, loader: &L) -> Vec<InlineImage<L::Image>> {
        self.text
            .annotations()
            .iter()
            .filter(|a| a.kind == AnnotationKind::InlineImage)
            .map(|a| InlineImage {
                range: a.range.clone(),
                destination: a.value.clone(),
                placeholder: self.placeholder(),
                image: loader.load(&a.value),
            })
            .collect()
    }

    /// Resolve a tap. Only link annotations react; anything else is a no-op.
    pub fn tap(&self, point: Point, opener: &dyn LinkOpener) -> TapOutcome {
        let Some(layout) = self.layout.as_ref() else {
            trace!("tap before first layout");
            return TapOutcome::Ignored;
        };
        let offset = layout.offset_for_position(point);
        let Some(annotation) = self.text.annotations_at(offset).next() else {
            trace!(offset, "no annotation under tap");
            return TapOutcome::Ignored;
        };
        match annotation.kind {
            AnnotationKind::Url => {
                trace!(offset, url = %annotation.value, "opening link");
                opener.open(&annotation.value);
                TapOutcome::OpenedLink(annotation.value.clone())
            }
            AnnotationKind::InlineImage => TapOutcome::Ignored,
        }
    }
}

/// Present every text block of a rendered document, in document order.
pub fn present_document(root: &LayoutNode, theme: &impl ThemeProvider) -> Vec<PresentedText> {
    root.text_blocks()
        .into_iter()
        .map(|block| PresentedText::from_block(block, theme))
        .collect()
}

struct GridLine {
    // Byte offset of each cell's character
    starts: Vec<usize>,
    // Offset reported for positions past the last cell
    end: usize,
}

/// Fixed-cell layout for monospace surfaces such as terminals. Lines break
/// at newlines and wrap after `columns` characters.
pub struct GridLayout {
    lines: Vec<GridLine>,
    cell_width: f32,
    cell_height: f32,
}

impl GridLayout {
    pub fn new(text: &str, columns: usize, cell_width: f32, cell_height: f32) -> Self {
        let columns = columns.max(1);
        let mut lines = Vec::new();
        let mut starts = Vec::new();

        for (offset, ch) in text.char_indices() {
            if ch == '\n' {
                lines.push(GridLine {
                    starts: std::mem::take(&mut starts),
                    end: offset,
                });
                continue;
            }
            if starts.len() == columns {
                lines.push(GridLine {
                    starts: std::mem::take(&mut starts),
                    end: offset,
                });
            }
            starts.push(offset);
        }
        lines.push(GridLine {
            starts,
            end: text.len(),
        });

        Self {
            lines,
            cell_width,
            cell_height,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl TextLayout for GridLayout {
    fn offset_for_position(&self, point: Point) -> usize {
        let cell = |value: f32, size: f32| {
            if size <= 0.0 || value <= 0.0 {
                0
            } else {
                (value / size) as usize
            }
        };
        let row = cell(point.y, self.cell_height).min(self.lines.len().saturating_sub(1));
        let col = cell(point.x, self.cell_width);
        match self.lines.get(row) {
            Some(line) => line.starts.get(col).copied().unwrap_or(line.end),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::block::render_document;
    use crate::config::Config;
    use crate::parser::parse;
    use crate::theme::{TextRole, Theme};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct RecordingOpener {
        opened: RefCell<Vec<String>>,
    }

    impl LinkOpener for RecordingOpener {
        fn open(&self, url: &str) {
            self.opened.borrow_mut().push(url.to_string());
        }
    }

    struct EchoLoader;

    impl ImageLoader for EchoLoader {
        type Image = String;

        fn load(&self, url: &str) -> String {
            format!("loaded:{url}")
        }
    }

    fn presented(markdown: &str) -> PresentedText {
        let theme = Theme::default();
        let mut texts = present_document(&render_document(&parse(markdown)), &theme);
        texts.remove(0)
    }

    fn with_grid(mut text: PresentedText) -> PresentedText {
        let layout = GridLayout::new(text.text().text(), 80, 1.0, 1.0);
        text.on_text_layout(layout);
        text
    }

    #[test]
    fn tap_inside_link_opens_it() {
        let text = with_grid(presented("go [Link](http://example.com) now"));
        let opener = RecordingOpener::default();

        for x in [3.0, 4.5, 6.9] {
            assert_eq!(
                text.tap(Point::new(x, 0.0), &opener),
                TapOutcome::OpenedLink("http://example.com".to_string())
            );
        }
        assert_eq!(opener.opened.borrow().len(), 3);
    }

    #[test]
    fn tap_outside_link_is_a_no_op() {
        let text = with_grid(presented("go [Link](http://example.com) now"));
        let opener = RecordingOpener::default();

        assert_eq!(text.tap(Point::new(0.0, 0.0), &opener), TapOutcome::Ignored);
        assert_eq!(text.tap(Point::new(7.0, 0.0), &opener), TapOutcome::Ignored);
        assert_eq!(text.tap(Point::new(50.0, 3.0), &opener), TapOutcome::Ignored);
        assert!(opener.opened.borrow().is_empty());
    }

    #[test]
    fn tap_before_layout_is_ignored() {
        let text = presented("[Link](http://example.com)");
        let opener = RecordingOpener::default();
        assert_eq!(text.tap(Point::new(0.0, 0.0), &opener), TapOutcome::Ignored);
    }

    #[test]
    fn inline_images_are_not_tap_targets() {
        let text = with_grid(presented("an ![pic](pic.png) image"));
        let opener = RecordingOpener::default();
        assert_eq!(text.tap(Point::new(3.0, 0.0), &opener), TapOutcome::Ignored);
    }

    #[test]
    fn tap_on_linked_image_opens_the_link() {
        let text = with_grid(presented("see [![badge](b.png)](http://x.com) now"));
        let opener = RecordingOpener::default();

        assert_eq!(
            text.tap(Point::new(4.5, 0.0), &opener),
            TapOutcome::OpenedLink("http://x.com".to_string())
        );
        assert_eq!(*opener.opened.borrow(), vec!["http://x.com".to_string()]);
        assert_eq!(text.inline_images(&EchoLoader)[0].destination, "b.png");
    }

    #[test]
    fn inline_images_get_font_sized_placeholders() {
        let text = presented("an ![pic](pic.png) image");
        let images = text.inline_images(&EchoLoader);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].destination, "pic.png");
        assert_eq!(images[0].image, "loaded:pic.png");
        assert_eq!(images[0].range, 3..6);
        assert_eq!(
            images[0].placeholder,
            Placeholder {
                width: 16.0,
                height: 16.0,
                align: PlaceholderAlign::Bottom
            }
        );
    }

    #[test]
    fn blocks_resolve_styles_through_theme() {
        let theme = Theme::default();
        let texts = present_document(&render_document(&parse("# Big\n\nbody")), &theme);
        assert_eq!(texts[0].style(), theme.typography.h1);
        assert_eq!(texts[1].style(), theme.typography.body1);
        assert_eq!(theme.text_style(TextRole::Body1), texts[1].style());
    }

    #[test]
    fn configured_body_size_reaches_presented_text() {
        let config: Config = toml::from_str("[typography]\nbody1 = { size = 22.0 }")
            .expect("valid config");
        let layout = render_document(&parse("an ![pic](pic.png) image"));
        let texts = present_document(&layout, &config.theme());

        assert_eq!(texts[0].style().size, 22.0);
        assert_eq!(texts[0].placeholder().width, 22.0);
        assert_eq!(texts[0].placeholder().height, 22.0);
        assert_eq!(texts[0].inline_images(&EchoLoader)[0].placeholder.width, 22.0);
    }

    #[test]
    fn grid_wraps_and_breaks() {
        let layout = GridLayout::new("abcdef\nxy", 4, 10.0, 20.0);
        assert_eq!(layout.line_count(), 3);
        assert_eq!(layout.offset_for_position(Point::new(15.0, 5.0)), 1);
        assert_eq!(layout.offset_for_position(Point::new(5.0, 25.0)), 4);
        // Past the end of a short line
        assert_eq!(layout.offset_for_position(Point::new(35.0, 25.0)), 6);
        assert_eq!(layout.offset_for_position(Point::new(5.0, 45.0)), 7);
        // Below the last line clamps to it
        assert_eq!(layout.offset_for_position(Point::new(15.0, 500.0)), 8);
        assert_eq!(layout.offset_for_position(Point::new(-5.0, -5.0)), 0);
    }

    #[test]
    fn grid_handles_multibyte_text() {
        let layout = GridLayout::new("é\u{FFFC}x", 10, 1.0, 1.0);
        assert_eq!(layout.offset_for_position(Point::new(1.0, 0.0)), 2);
        assert_eq!(layout.offset_for_position(Point::new(2.0, 0.0)), 5);
    }
}
