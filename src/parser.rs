use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use tracing::trace;

use crate::node::{Node, NodeKind};

/// Parse markdown text into a Document node.
pub fn parse(markdown: &str) -> Node {
    let mut state = ParseState::new(markdown);

    for (event, range) in Parser::new_ext(markdown, Options::empty()).into_offset_iter() {
        state.process_event(event, range);
    }

    state.finish()
}

/// An open container. `node` is None for tags we don't model; their
/// children are spliced into the parent when the tag closes.
struct Frame {
    node: Option<Node>,
    children: Vec<Node>,
}

struct CodeBuffer {
    // None for indented blocks
    info: Option<String>,
    literal: String,
}

struct ParseState<'s> {
    source: &'s str,
    stack: Vec<Frame>,
    code: Option<CodeBuffer>,
}

impl<'s> ParseState<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            stack: vec![Frame {
                node: Some(Node::new(NodeKind::Document)),
                children: Vec::new(),
            }],
            code: None,
        }
    }

    fn process_event(&mut self, event: Event, range: Range<usize>) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => Some(info.into_string()),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some(CodeBuffer {
                    info,
                    literal: String::new(),
                });
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(CodeBuffer { info, literal }) = self.code.take() {
                    let kind = match info {
                        Some(info) => NodeKind::FencedCodeBlock { info, literal },
                        None => NodeKind::IndentedCodeBlock { literal },
                    };
                    self.push_leaf(kind);
                }
            }
            Event::Text(text) => match self.code.as_mut() {
                Some(code) => code.literal.push_str(&text),
                None => self.push_leaf(NodeKind::Text(text.into_string())),
            },

            Event::Start(tag) => {
                let node = self.open_kind(tag, &range).map(Node::new);
                self.stack.push(Frame {
                    node,
                    children: Vec::new(),
                });
            }
            Event::End(_) => self.close(),

            Event::Code(code) => self.push_leaf(NodeKind::Code(code.into_string())),
            Event::SoftBreak => self.push_leaf(NodeKind::Text(" ".to_string())),
            Event::HardBreak => self.push_leaf(NodeKind::HardLineBreak),
            Event::Rule => self.push_leaf(NodeKind::ThematicBreak),

            other => trace!(?other, "dropping unsupported markdown event"),
        }
    }

    fn open_kind(&self, tag: Tag, range: &Range<usize>) -> Option<NodeKind> {
        let kind = match tag {
            Tag::Paragraph => NodeKind::Paragraph,
            Tag::Heading { level, .. } => NodeKind::Heading {
                level: heading_level_to_u8(level),
            },
            Tag::BlockQuote(_) => NodeKind::BlockQuote,
            Tag::List(Some(start)) => NodeKind::OrderedList {
                start,
                delimiter: ordered_delimiter(&self.source[range.clone()]),
            },
            Tag::List(None) => NodeKind::BulletList {
                marker: bullet_marker(&self.source[range.clone()]),
            },
            Tag::Item => NodeKind::ListItem,
            Tag::Emphasis => NodeKind::Emphasis,
            Tag::Strong => NodeKind::StrongEmphasis,
            Tag::Link { dest_url, .. } => NodeKind::Link {
                destination: dest_url.into_string(),
            },
            Tag::Image { dest_url, .. } => NodeKind::Image {
                destination: dest_url.into_string(),
            },
            other => {
                trace!(?other, "treating unsupported tag as transparent");
                return None;
            }
        };
        Some(kind)
    }

    fn push_leaf(&mut self, kind: NodeKind) {
        if let Some(frame) = self.stack.last_mut() {
            frame.children.push(Node::new(kind));
        }
    }

    fn close(&mut self) {
        // The document frame is never closed by an event.
        if self.stack.len() < 2 {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let Some(parent) = self.stack.last_mut() else {
            return;
        };
        match frame.node {
            Some(mut node) if node.kind == NodeKind::ListItem => {
                node.children = wrap_tight_inlines(frame.children);
                parent.children.push(node);
            }
            Some(mut node) => {
                node.children = frame.children;
                parent.children.push(node);
            }
            None => parent.children.extend(frame.children),
        }
    }

    fn finish(mut self) -> Node {
        while self.stack.len() > 1 {
            self.close();
        }
        match self.stack.pop() {
            Some(Frame {
                node: Some(mut document),
                children,
            }) => {
                document.children = children;
                document
            }
            _ => Node::new(NodeKind::Document),
        }
    }
}

/// Tight list items carry their inline content directly. Group each run of
/// inlines into a Paragraph so every item has block children.
fn wrap_tight_inlines(children: Vec<Node>) -> Vec<Node> {
    let mut blocks = Vec::new();
    let mut run = Vec::new();
    for child in children {
        if is_inline(&child.kind) {
            run.push(child);
            continue;
        }
        if !run.is_empty() {
            blocks.push(Node::with_children(NodeKind::Paragraph, std::mem::take(&mut run)));
        }
        blocks.push(child);
    }
    if !run.is_empty() {
        blocks.push(Node::with_children(NodeKind::Paragraph, run));
    }
    blocks
}

fn is_inline(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Text(_)
            | NodeKind::Emphasis
            | NodeKind::StrongEmphasis
            | NodeKind::Code(_)
            | NodeKind::HardLineBreak
            | NodeKind::Link { .. }
            | NodeKind::Image { .. }
    )
}

/// Skip indentation and quote markers that may precede a list marker.
fn list_source(source: &str) -> &str {
    source.trim_start_matches(|c: char| c.is_whitespace() || c == '>')
}

fn bullet_marker(source: &str) -> char {
    match list_source(source).chars().next() {
        Some(c @ ('-' | '+' | '*')) => c,
        _ => '-',
    }
}

fn ordered_delimiter(source: &str) -> char {
    match list_source(source)
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .chars()
        .next()
    {
        Some(c @ ('.' | ')')) => c,
        _ => '.',
    }
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
