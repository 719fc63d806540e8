//! Markdown parsing
//!
//! pulldown-cmark events are folded into the `termdown-core` AST with a stack
//! of open containers. Every `End` event closes the innermost container and
//! hands the finished node to its parent.
//!
//! Containers nested deeper than [`MAX_NESTING`] are flattened into their
//! parent, so the tree handed to the serializer stays shallow whatever the
//! input.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};
use termdown_core::{Block, Inline, ListItem};

use crate::links::LinkResolver;

/// Parser settings derived from the render options
#[derive(Debug, Clone, Default)]
pub(crate) struct ParseOptions {
    /// Turn soft breaks into hard breaks
    pub preserve_newlines: bool,
    pub links: LinkResolver,
}

/// Parse `markdown` into a [`Block::Document`]
pub(crate) fn parse(markdown: &str, options: &ParseOptions) -> Block {
    let mut builder = TreeBuilder::new(options);
    for event in Parser::new_ext(markdown, markdown_options()) {
        builder.handle_event(event);
    }
    builder.finish()
}

/// Deepest nesting of quotes, lists and inline spans kept in the tree
pub(crate) const MAX_NESTING: usize = 64;

fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// An open container
enum Frame {
    Document(Vec<Block>),
    BlockQuote(Vec<Block>),
    Paragraph(Vec<Inline>),
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    List {
        ordered: bool,
        start: u64,
        items: Vec<ListItem>,
    },
    /// Tight list items carry inlines without a paragraph
    Item {
        task: Option<bool>,
        blocks: Vec<Block>,
        inlines: Vec<Inline>,
    },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    HtmlBlock(String),
    Table {
        headers: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
    TableHead(Vec<Vec<Inline>>),
    TableRow(Vec<Vec<Inline>>),
    TableCell(Vec<Inline>),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link {
        url: String,
        title: Option<String>,
        content: Vec<Inline>,
    },
    Image {
        url: String,
        alt: String,
    },
    /// Containers without a node of their own, e.g. footnote definitions
    Group {
        blocks: Vec<Block>,
        inlines: Vec<Inline>,
    },
}

impl Frame {
    /// Containers that can hold themselves
    fn nests(&self) -> bool {
        matches!(
            self,
            Frame::BlockQuote(_)
                | Frame::List { .. }
                | Frame::Item { .. }
                | Frame::Strong(_)
                | Frame::Emphasis(_)
                | Frame::Strikethrough(_)
                | Frame::Link { .. }
        )
    }
}

struct TreeBuilder<'o> {
    options: &'o ParseOptions,
    stack: Vec<Frame>,
    /// Open frames that count against [`MAX_NESTING`]
    nesting: usize,
}

impl<'o> TreeBuilder<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            stack: vec![Frame::Document(Vec::new())],
            nesting: 0,
        }
    }

    fn handle_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.push_inline(Inline::Code(code.to_string())),
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                self.push_inline(Inline::Code(math.to_string()))
            }
            Event::Html(html) => match self.stack.last_mut() {
                Some(Frame::HtmlBlock(buffer)) => buffer.push_str(&html),
                _ => self.push_block(Block::HtmlBlock(html.to_string())),
            },
            Event::InlineHtml(html) => self.push_inline(Inline::Html(html.to_string())),
            Event::FootnoteReference(label) => {
                self.push_inline(Inline::Text(format!("[^{label}]")))
            }
            Event::SoftBreak => {
                if self.options.preserve_newlines {
                    self.push_inline(Inline::LineBreak)
                } else {
                    self.push_inline(Inline::SoftBreak)
                }
            }
            Event::HardBreak => self.push_inline(Inline::LineBreak),
            Event::Rule => self.push_block(Block::ThematicBreak),
            Event::TaskListMarker(checked) => {
                let item = self.stack.iter_mut().rev().find_map(|frame| match frame {
                    Frame::Item { task, .. } => Some(task),
                    _ => None,
                });
                if let Some(task) = item {
                    *task = Some(checked);
                }
            }
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph(Vec::new()),
            Tag::Heading { level, .. } => Frame::Heading {
                level: heading_level(level),
                content: Vec::new(),
            },
            Tag::BlockQuote(_) => Frame::BlockQuote(Vec::new()),
            Tag::CodeBlock(kind) => Frame::CodeBlock {
                language: match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                },
                code: String::new(),
            },
            Tag::HtmlBlock => Frame::HtmlBlock(String::new()),
            Tag::List(start) => Frame::List {
                ordered: start.is_some(),
                start: start.unwrap_or(1),
                items: Vec::new(),
            },
            Tag::Item => Frame::Item {
                task: None,
                blocks: Vec::new(),
                inlines: Vec::new(),
            },
            Tag::Table(_) => Frame::Table {
                headers: Vec::new(),
                rows: Vec::new(),
            },
            Tag::TableHead => Frame::TableHead(Vec::new()),
            Tag::TableRow => Frame::TableRow(Vec::new()),
            Tag::TableCell => Frame::TableCell(Vec::new()),
            Tag::Emphasis => Frame::Emphasis(Vec::new()),
            Tag::Strong => Frame::Strong(Vec::new()),
            Tag::Strikethrough => Frame::Strikethrough(Vec::new()),
            Tag::Link {
                dest_url, title, ..
            } => Frame::Link {
                url: self.options.links.resolve(&dest_url),
                title: (!title.is_empty()).then(|| title.to_string()),
                content: Vec::new(),
            },
            Tag::Image { dest_url, .. } => Frame::Image {
                url: self.options.links.resolve(&dest_url),
                alt: String::new(),
            },
            _ => Frame::Group {
                blocks: Vec::new(),
                inlines: Vec::new(),
            },
        };

        let frame = if frame.nests() && self.nesting >= MAX_NESTING {
            Frame::Group {
                blocks: Vec::new(),
                inlines: Vec::new(),
            }
        } else {
            frame
        };
        if frame.nests() {
            self.nesting += 1;
        }
        self.stack.push(frame);
    }

    fn end(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        if let Some(frame) = self.pop() {
            self.close(frame);
        }
    }

    fn pop(&mut self) -> Option<Frame> {
        let frame = self.stack.pop()?;
        if frame.nests() {
            self.nesting -= 1;
        }
        Some(frame)
    }

    fn close(&mut self, frame: Frame) {
        match frame {
            Frame::Document(blocks) => blocks.into_iter().for_each(|b| self.push_block(b)),
            Frame::BlockQuote(blocks) => self.push_block(Block::BlockQuote(blocks)),
            Frame::Paragraph(inlines) => self.push_block(Block::Paragraph(inlines)),
            Frame::Heading { level, content } => self.push_block(Block::Heading { level, content }),
            Frame::List {
                ordered,
                start,
                items,
            } => self.push_block(Block::List {
                ordered,
                start,
                items,
            }),
            Frame::Item {
                task,
                mut blocks,
                inlines,
            } => {
                flush_inlines(&mut blocks, inlines);
                let item = ListItem {
                    task,
                    content: blocks,
                };
                match self.stack.last_mut() {
                    Some(Frame::List { items, .. }) => items.push(item),
                    _ => item.content.into_iter().for_each(|b| self.push_block(b)),
                }
            }
            Frame::CodeBlock { language, code } => {
                self.push_block(Block::CodeBlock { language, code })
            }
            Frame::HtmlBlock(html) => self.push_block(Block::HtmlBlock(html)),
            Frame::Table { headers, rows } => self.push_block(Block::Table { headers, rows }),
            Frame::TableHead(cells) => {
                if let Some(Frame::Table { headers, .. }) = self.stack.last_mut() {
                    *headers = cells;
                }
            }
            Frame::TableRow(cells) => {
                if let Some(Frame::Table { rows, .. }) = self.stack.last_mut() {
                    rows.push(cells);
                }
            }
            Frame::TableCell(inlines) => match self.stack.last_mut() {
                Some(Frame::TableHead(cells)) | Some(Frame::TableRow(cells)) => {
                    cells.push(inlines)
                }
                _ => self.push_block(Block::Paragraph(inlines)),
            },
            Frame::Strong(content) => self.push_inline(Inline::Strong(content)),
            Frame::Emphasis(content) => self.push_inline(Inline::Emphasis(content)),
            Frame::Strikethrough(content) => self.push_inline(Inline::Strikethrough(content)),
            Frame::Link {
                url,
                title,
                content,
            } => self.push_inline(Inline::Link {
                content,
                url,
                title,
            }),
            Frame::Image { url, alt } => self.push_inline(Inline::Image { alt, url }),
            Frame::Group { blocks, inlines } => {
                if blocks.is_empty() {
                    inlines.into_iter().for_each(|i| self.push_inline(i));
                } else {
                    let mut blocks = blocks;
                    flush_inlines(&mut blocks, inlines);
                    blocks.into_iter().for_each(|b| self.push_block(b));
                }
            }
        }
    }

    fn text(&mut self, text: &str) {
        match self.stack.last_mut() {
            Some(Frame::CodeBlock { code, .. }) => code.push_str(text),
            Some(Frame::HtmlBlock(html)) => html.push_str(text),
            _ => self.push_inline(Inline::Text(text.to_string())),
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };

        match frame {
            Frame::Paragraph(content)
            | Frame::Heading { content, .. }
            | Frame::TableCell(content)
            | Frame::Strong(content)
            | Frame::Emphasis(content)
            | Frame::Strikethrough(content)
            | Frame::Link { content, .. }
            | Frame::Item {
                inlines: content, ..
            }
            | Frame::Group {
                inlines: content, ..
            } => append_inline(content, inline),
            Frame::Image { alt, .. } => alt.push_str(&inline.plain_text()),
            Frame::CodeBlock { code, .. } => code.push_str(&inline.plain_text()),
            Frame::HtmlBlock(html) => html.push_str(&inline.plain_text()),
            Frame::Document(_)
            | Frame::BlockQuote(_)
            | Frame::List { .. }
            | Frame::Table { .. }
            | Frame::TableHead(_)
            | Frame::TableRow(_) => self.push_block(Block::Paragraph(vec![inline])),
        }
    }

    /// Add a finished block to the innermost container that holds blocks
    fn push_block(&mut self, block: Block) {
        for frame in self.stack.iter_mut().rev() {
            match frame {
                Frame::Document(blocks) | Frame::BlockQuote(blocks) => {
                    blocks.push(block);
                    return;
                }
                Frame::Item {
                    blocks, inlines, ..
                }
                | Frame::Group { blocks, inlines } => {
                    flush_inlines(blocks, std::mem::take(inlines));
                    blocks.push(block);
                    return;
                }
                Frame::List { items, .. } => {
                    items.push(ListItem::new(vec![block]));
                    return;
                }
                _ => continue,
            }
        }
    }

    fn finish(mut self) -> Block {
        while self.stack.len() > 1 {
            if let Some(frame) = self.pop() {
                self.close(frame);
            }
        }

        match self.stack.pop() {
            Some(Frame::Document(blocks)) => Block::Document(blocks),
            _ => Block::Document(Vec::new()),
        }
    }
}

/// Append an inline, joining neighbouring text nodes
fn append_inline(content: &mut Vec<Inline>, inline: Inline) {
    if let (Some(Inline::Text(last)), Inline::Text(text)) = (content.last_mut(), &inline) {
        last.push_str(text);
        return;
    }
    content.push(inline);
}

/// Wrap loose inlines into a paragraph
fn flush_inlines(blocks: &mut Vec<Block>, inlines: Vec<Inline>) {
    if !inlines.is_empty() {
        blocks.push(Block::Paragraph(inlines));
    }
}
