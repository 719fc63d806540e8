//! Style documents
//!
//! A style document is a JSON object keyed by element name (`document`,
//! `heading`, `h1`, `code_block`, ...). Every element carries a
//! [`StylePrimitive`]; block elements add margins and indentation. Unknown
//! keys are ignored so documents written for richer renderers still load.

use serde::Deserialize;

use crate::color::Color;
use crate::Result;

/// Text attributes and decorations of a single element
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StylePrimitive {
    /// Printed before the element's block
    pub block_prefix: Option<String>,
    /// Printed after the element's block
    pub block_suffix: Option<String>,
    /// Printed before the element's text, in the element's style
    pub prefix: Option<String>,
    /// Printed after the element's text, in the element's style
    pub suffix: Option<String>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub underline: Option<bool>,
    pub bold: Option<bool>,
    pub upper: Option<bool>,
    pub lower: Option<bool>,
    pub title: Option<bool>,
    pub italic: Option<bool>,
    pub crossed_out: Option<bool>,
    pub faint: Option<bool>,
    pub conceal: Option<bool>,
    pub inverse: Option<bool>,
    pub blink: Option<bool>,
    /// Template with a `{{.text}}` placeholder
    pub format: Option<String>,
}

impl StylePrimitive {
    /// Whether `upper`, `lower` or `title` changes the text
    pub fn transforms_text(&self) -> bool {
        self.upper == Some(true) || self.lower == Some(true) || self.title == Some(true)
    }

    /// Inherit the visual attributes of `self` into `child`.
    ///
    /// Only colors and text attributes flow down; prefixes, suffixes and
    /// formats belong to the element that declares them.
    pub fn cascade(&self, child: &StylePrimitive) -> StylePrimitive {
        StylePrimitive {
            block_prefix: None,
            block_suffix: None,
            prefix: None,
            suffix: None,
            format: None,
            color: child.color.clone().or_else(|| self.color.clone()),
            background_color: child
                .background_color
                .clone()
                .or_else(|| self.background_color.clone()),
            underline: child.underline.or(self.underline),
            bold: child.bold.or(self.bold),
            upper: child.upper.or(self.upper),
            lower: child.lower.or(self.lower),
            title: child.title.or(self.title),
            italic: child.italic.or(self.italic),
            crossed_out: child.crossed_out.or(self.crossed_out),
            faint: child.faint.or(self.faint),
            conceal: child.conceal.or(self.conceal),
            inverse: child.inverse.or(self.inverse),
            blink: child.blink.or(self.blink),
        }
    }

    /// Overlay every field `over` sets onto `self`.
    pub fn merge(&self, over: &StylePrimitive) -> StylePrimitive {
        StylePrimitive {
            block_prefix: over.block_prefix.clone().or_else(|| self.block_prefix.clone()),
            block_suffix: over.block_suffix.clone().or_else(|| self.block_suffix.clone()),
            prefix: over.prefix.clone().or_else(|| self.prefix.clone()),
            suffix: over.suffix.clone().or_else(|| self.suffix.clone()),
            format: over.format.clone().or_else(|| self.format.clone()),
            ..self.cascade(over)
        }
    }

    /// Apply `format` to `text`, if the element has one
    pub fn format_text(&self, text: &str) -> String {
        match &self.format {
            Some(format) => format.replace("{{.text}}", text),
            None => text.to_string(),
        }
    }

    fn colors(&self) -> impl Iterator<Item = &String> {
        self.color.iter().chain(self.background_color.iter())
    }
}

/// Style of a block element
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleBlock {
    #[serde(flatten)]
    pub primitive: StylePrimitive,
    /// Number of indent tokens before every line
    pub indent: Option<usize>,
    /// Token repeated `indent` times, a space by default
    pub indent_token: Option<String>,
    /// Blank columns on both sides of the block
    pub margin: Option<usize>,
}

impl StyleBlock {
    pub fn merge(&self, over: &StyleBlock) -> StyleBlock {
        StyleBlock {
            primitive: self.primitive.merge(&over.primitive),
            indent: over.indent.or(self.indent),
            indent_token: over.indent_token.clone().or_else(|| self.indent_token.clone()),
            margin: over.margin.or(self.margin),
        }
    }
}

/// Style of lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleList {
    #[serde(flatten)]
    pub block: StyleBlock,
    /// Columns each nesting level is shifted by
    pub level_indent: Option<usize>,
}

/// Style of task list markers
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleTask {
    #[serde(flatten)]
    pub primitive: StylePrimitive,
    pub ticked: Option<String>,
    pub unticked: Option<String>,
}

/// Style of tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleTable {
    #[serde(flatten)]
    pub block: StyleBlock,
    pub center_separator: Option<String>,
    pub column_separator: Option<String>,
    pub row_separator: Option<String>,
}

/// A complete style document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub document: StyleBlock,
    pub block_quote: StyleBlock,
    pub paragraph: StyleBlock,
    pub list: StyleList,
    pub heading: StyleBlock,
    pub h1: StyleBlock,
    pub h2: StyleBlock,
    pub h3: StyleBlock,
    pub h4: StyleBlock,
    pub h5: StyleBlock,
    pub h6: StyleBlock,
    pub text: StylePrimitive,
    pub strikethrough: StylePrimitive,
    pub emph: StylePrimitive,
    pub strong: StylePrimitive,
    pub hr: StylePrimitive,
    pub item: StylePrimitive,
    pub enumeration: StylePrimitive,
    pub task: StyleTask,
    pub link: StylePrimitive,
    pub link_text: StylePrimitive,
    pub image: StylePrimitive,
    pub image_text: StylePrimitive,
    pub code: StyleBlock,
    pub code_block: StyleBlock,
    pub table: StyleTable,
    pub html_block: StyleBlock,
    pub html_span: StyleBlock,
}

impl StyleConfig {
    /// Parse and validate a JSON style document
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let config: StyleConfig = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate an already decoded JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let config: StyleConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Style of a heading of the given level, `heading` overlaid with `hN`
    pub fn heading_style(&self, level: u8) -> StyleBlock {
        let specific = match level {
            1 => &self.h1,
            2 => &self.h2,
            3 => &self.h3,
            4 => &self.h4,
            5 => &self.h5,
            _ => &self.h6,
        };
        self.heading.merge(specific)
    }

    /// Check that every color in the document parses
    pub fn validate(&self) -> Result<()> {
        for color in self.primitives().flat_map(StylePrimitive::colors) {
            color.parse::<Color>()?;
        }
        Ok(())
    }

    fn primitives(&self) -> impl Iterator<Item = &StylePrimitive> {
        [
            &self.document.primitive,
            &self.block_quote.primitive,
            &self.paragraph.primitive,
            &self.list.block.primitive,
            &self.heading.primitive,
            &self.h1.primitive,
            &self.h2.primitive,
            &self.h3.primitive,
            &self.h4.primitive,
            &self.h5.primitive,
            &self.h6.primitive,
            &self.text,
            &self.strikethrough,
            &self.emph,
            &self.strong,
            &self.hr,
            &self.item,
            &self.enumeration,
            &self.task.primitive,
            &self.link,
            &self.link_text,
            &self.image,
            &self.image_text,
            &self.code.primitive,
            &self.code_block.primitive,
            &self.table.block.primitive,
            &self.html_block.primitive,
            &self.html_span.primitive,
        ]
        .into_iter()
    }
}
