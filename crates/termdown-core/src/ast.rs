//! Markdown Abstract Syntax Tree
//!
//! This module defines the AST nodes the parser produces and the terminal
//! serializer consumes.

/// A block-level Markdown node
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Root document container
    Document(Vec<Block>),

    /// Heading with level (1-6) and inline content
    Heading { level: u8, content: Vec<Inline> },

    /// Paragraph containing inline content
    Paragraph(Vec<Inline>),

    /// Block quote containing nested blocks
    BlockQuote(Vec<Block>),

    /// List (ordered or unordered)
    List {
        ordered: bool,
        start: u64,
        items: Vec<ListItem>,
    },

    /// Fenced or indented code block
    CodeBlock {
        language: Option<String>,
        code: String,
    },

    /// Thematic break (horizontal rule)
    ThematicBreak,

    /// Table with headers and rows
    Table {
        headers: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },

    /// Raw HTML block, printed as text
    HtmlBlock(String),
}

/// A list item containing blocks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItem {
    /// `Some(checked)` for task list items
    pub task: Option<bool>,
    pub content: Vec<Block>,
}

impl ListItem {
    pub fn new(content: Vec<Block>) -> Self {
        Self {
            task: None,
            content,
        }
    }

    pub fn from_inlines(inlines: Vec<Inline>) -> Self {
        Self::new(vec![Block::Paragraph(inlines)])
    }

    /// Mark this item as a task with the given state
    pub fn with_task(mut self, checked: bool) -> Self {
        self.task = Some(checked);
        self
    }
}

/// An inline Markdown node
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// Plain text
    Text(String),

    /// Strong emphasis (bold)
    Strong(Vec<Inline>),

    /// Emphasis (italic)
    Emphasis(Vec<Inline>),

    /// Strikethrough (GFM)
    Strikethrough(Vec<Inline>),

    /// Inline code
    Code(String),

    /// Link with text, URL, and optional title
    Link {
        content: Vec<Inline>,
        url: String,
        title: Option<String>,
    },

    /// Image with alt text and URL
    Image { alt: String, url: String },

    /// Soft line break, reflowed into a space
    SoftBreak,

    /// Hard line break
    LineBreak,

    /// Raw inline HTML, printed as text
    Html(String),
}

impl Block {
    /// Check if this block is empty/blank
    pub fn is_blank(&self) -> bool {
        match self {
            Block::Document(blocks) => blocks.iter().all(|b| b.is_blank()),
            Block::Paragraph(inlines) => inlines.iter().all(|i| i.is_blank()),
            Block::Heading { content, .. } => content.iter().all(|i| i.is_blank()),
            Block::BlockQuote(blocks) => blocks.iter().all(|b| b.is_blank()),
            Block::List { items, .. } => items.iter().all(|i| i.is_blank()),
            Block::CodeBlock { code, .. } => code.trim().is_empty(),
            Block::Table { headers, rows } => {
                headers.iter().all(|h| h.iter().all(|i| i.is_blank()))
                    && rows
                        .iter()
                        .all(|r| r.iter().all(|c| c.iter().all(|i| i.is_blank())))
            }
            Block::ThematicBreak => false,
            Block::HtmlBlock(html) => html.trim().is_empty(),
        }
    }
}

impl ListItem {
    pub fn is_blank(&self) -> bool {
        self.task.is_none() && self.content.iter().all(|b| b.is_blank())
    }
}

impl Inline {
    /// Check if this inline is empty/blank
    pub fn is_blank(&self) -> bool {
        match self {
            Inline::Text(text) => text.trim().is_empty(),
            Inline::Strong(inlines)
            | Inline::Emphasis(inlines)
            | Inline::Strikethrough(inlines) => inlines.iter().all(|i| i.is_blank()),
            Inline::Code(code) => code.is_empty(),
            Inline::Link { content, url, .. } => {
                url.is_empty() && content.iter().all(|i| i.is_blank())
            }
            Inline::Image { .. } => false,
            Inline::SoftBreak => true,
            Inline::LineBreak => false,
            Inline::Html(html) => html.trim().is_empty(),
        }
    }

    /// Plain text content, without any markup
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text(text) | Inline::Code(text) | Inline::Html(text) => text.clone(),
            Inline::Strong(inlines)
            | Inline::Emphasis(inlines)
            | Inline::Strikethrough(inlines)
            | Inline::Link {
                content: inlines, ..
            } => inlines_plain_text(inlines),
            Inline::Image { alt, .. } => alt.clone(),
            Inline::SoftBreak => " ".to_string(),
            Inline::LineBreak => "\n".to_string(),
        }
    }
}

/// Helper to collect the plain text of an inline vec
pub fn inlines_plain_text(inlines: &[Inline]) -> String {
    inlines.iter().map(|i| i.plain_text()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_document() {
        let doc = Block::Document(vec![Block::Paragraph(vec![Inline::Text("  ".into())])]);
        assert!(doc.is_blank());
        assert!(!Block::ThematicBreak.is_blank());
    }

    #[test]
    fn test_task_item_is_not_blank() {
        let item = ListItem::new(vec![]).with_task(false);
        assert!(!item.is_blank());
        assert!(ListItem::new(vec![]).is_blank());
    }

    #[test]
    fn test_plain_text() {
        let inlines = vec![
            Inline::Text("Hello ".into()),
            Inline::Strong(vec![Inline::Text("big".into())]),
            Inline::SoftBreak,
            Inline::Link {
                content: vec![Inline::Text("world".into())],
                url: "https://example.com".into(),
                title: None,
            },
        ];
        assert_eq!(inlines_plain_text(&inlines), "Hello big world");
    }
}
