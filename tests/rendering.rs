use std::cell::RefCell;

use mdcompose::present::{GridLayout, LinkOpener, Point, TapOutcome, present_document};
use mdcompose::{
    LayoutNode, MarkdownView, Node, NodeKind, Padding, SAMPLE, SpanStyle, StyledTextBuilder,
    TextRole, Theme, ViewMode, append_inline, parse, render_document, render_raw_text,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn lines(layout: &LayoutNode) -> Vec<String> {
    layout
        .text_blocks()
        .iter()
        .map(|block| block.text.text().to_string())
        .collect()
}

fn ordered_list(start: u64, delimiter: char, items: usize) -> Node {
    let items = (0..items)
        .map(|i| {
            Node::with_children(
                NodeKind::ListItem,
                vec![Node::with_children(
                    NodeKind::Paragraph,
                    vec![Node::text(format!("item {i}"))],
                )],
            )
        })
        .collect();
    Node::with_children(NodeKind::OrderedList { start, delimiter }, items)
}

#[derive(Default)]
struct RecordingOpener {
    opened: RefCell<Vec<String>>,
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &str) {
        self.opened.borrow_mut().push(url.to_string());
    }
}

#[test]
fn sample_renders_every_block_kind() {
    let rendered = lines(&render_document(&parse(SAMPLE)));

    assert_eq!(rendered[0], "Markdown Header");
    assert!(rendered.contains(&"+ Bullet".to_string()));
    assert!(rendered.contains(&"4. Fourth is clickable".to_string()));
    assert!(rendered.contains(&"1. And".to_string()));
    assert!(rendered.contains(&"2. Sublists".to_string()));
    assert!(rendered.contains(&"5. Mixed".to_string()));
    assert!(rendered.contains(&"100) Lists".to_string()));
    assert!(rendered.contains(&"105) Numbers".to_string()));
    assert!(rendered.contains(&"- Sublist".to_string()));
    assert!(rendered.contains(&"A blockquote is useful for quotes!".to_string()));
    assert!(rendered.contains(&"function codeBlock() {\n    return true;\n}\n".to_string()));
}

#[test]
fn sample_standalone_image_is_not_text() {
    let LayoutNode::Column(blocks) = render_document(&parse(SAMPLE)) else {
        panic!("expected column");
    };
    assert!(matches!(&blocks[2], LayoutNode::Image(image)
        if image.destination == "file:///android_asset/serios.jpg"));
}

#[test]
fn link_taps_open_only_inside_the_link() {
    let layout = render_document(&parse("[Link](http://example.com) after"));
    let mut texts = present_document(&layout, &Theme::default());
    let mut text = texts.remove(0);
    let grid = GridLayout::new(text.text().text(), 40, 8.0, 16.0);
    text.on_text_layout(grid);

    let opener = RecordingOpener::default();
    assert_eq!(
        text.tap(Point::new(12.0, 4.0), &opener),
        TapOutcome::OpenedLink("http://example.com".to_string())
    );
    assert_eq!(text.tap(Point::new(44.0, 4.0), &opener), TapOutcome::Ignored);
    assert_eq!(*opener.opened.borrow(), vec!["http://example.com".to_string()]);
}

#[test]
fn top_level_and_quoted_heading_padding() {
    let LayoutNode::Column(blocks) = render_document(&parse("## Same\n\n> ## Same")) else {
        panic!("expected column");
    };
    let LayoutNode::Padded { padding, .. } = &blocks[0] else {
        panic!("expected padded heading");
    };
    assert_eq!(padding.bottom, 8.0);

    let LayoutNode::Quote { child, .. } = &blocks[1] else {
        panic!("expected quote");
    };
    let LayoutNode::Padded { padding, child } = child.as_ref() else {
        panic!("expected padded heading in quote");
    };
    assert_eq!(*padding, Padding::default());
    assert!(matches!(child.as_ref(), LayoutNode::Text(block) if block.role == TextRole::H2));
}

fn inline_tree() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        "[a-z ]{0,6}".prop_map(Node::text),
        "[a-z]{1,4}".prop_map(|code| Node::new(NodeKind::Code(code))),
        Just(Node::new(NodeKind::HardLineBreak)),
        "[a-z]{1,4}".prop_map(|dest| Node::new(NodeKind::Image { destination: dest })),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        let children = prop::collection::vec(inner, 0..4);
        prop_oneof![
            children.clone().prop_map(|c| Node::with_children(NodeKind::Emphasis, c)),
            children.clone().prop_map(|c| Node::with_children(NodeKind::StrongEmphasis, c)),
            children.clone().prop_map(|c| Node::with_children(NodeKind::Paragraph, c)),
            ("[a-z]{1,6}", children).prop_map(|(destination, c)| {
                Node::with_children(NodeKind::Link { destination }, c)
            }),
        ]
    })
}

proptest! {
    #[test]
    fn ordered_prefixes_count_from_start(
        start in 0u64..10_000,
        delimiter in prop::sample::select(vec!['.', ')']),
        count in 1usize..8,
        sibling_start in 0u64..50,
    ) {
        let doc = Node::document(vec![
            ordered_list(sibling_start, '.', 3),
            ordered_list(start, delimiter, count),
        ]);
        let LayoutNode::Column(blocks) = render_document(&doc) else {
            panic!("expected column");
        };
        let expected: Vec<String> = (0..count as u64)
            .map(|i| format!("{}{delimiter} item {i}", start + i))
            .collect();
        prop_assert_eq!(lines(&blocks[1]), expected);
    }

    #[test]
    fn inline_styles_never_leak(tree in inline_tree()) {
        let mut builder = StyledTextBuilder::new();
        {
            let mut bold = builder.push_style(SpanStyle::bold());
            append_inline(&Node::with_children(NodeKind::Paragraph, vec![tree]), &mut bold);
            prop_assert_eq!(bold.style_depth(), 1);
            prop_assert_eq!(bold.annotation_depth(), 0);
            prop_assert_eq!(bold.current_style(), SpanStyle::bold());
        }
        builder.append("after");
        let text = builder.finish();
        prop_assert_eq!(text.style_at(text.len() - 1), Some(SpanStyle::default()));
        for annotation in text.annotations() {
            prop_assert!(annotation.range.start <= annotation.range.end);
            prop_assert!(annotation.range.end <= text.len() - "after".len());
        }
    }

    #[test]
    fn rendering_is_idempotent(source in "[a-z*_`#> \\-\\n1.\\[\\]()!]{0,80}") {
        let root = parse(&source);
        prop_assert_eq!(render_document(&root), render_document(&root));
    }

    #[test]
    fn raw_text_round_trips(source in "\\PC{0,120}", toggles in 0usize..6) {
        let mut view = MarkdownView::new(source.clone());
        for _ in 0..toggles {
            view.on_double_tap();
        }
        if view.mode() == ViewMode::Rendered {
            view.on_double_tap();
        }
        prop_assert_eq!(view.render(), render_raw_text(&source));
        prop_assert_eq!(lines(&view.render()), vec![source]);
    }
}
