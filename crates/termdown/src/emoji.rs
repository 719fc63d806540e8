//! `:shortcode:` emoji replacement

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use termdown_core::{Block, Inline, ListItem};

static SHORTCODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([a-z0-9_+\-]+):").expect("shortcode pattern is valid"));

/// Emoji for a shortcode name, without the colons
pub fn lookup(name: &str) -> Option<&'static str> {
    emojis::get_by_shortcode(name).map(|emoji| emoji.as_str())
}

/// Replace known `:shortcode:`s in `text`. Unknown ones are left as typed.
pub fn replace_shortcodes(text: &str) -> Cow<'_, str> {
    if !text.contains(':') {
        return Cow::Borrowed(text);
    }

    SHORTCODE.replace_all(text, |caps: &Captures| match lookup(&caps[1]) {
        Some(emoji) => emoji.to_string(),
        None => caps[0].to_string(),
    })
}

/// Replace shortcodes in every text node of `block`. Code is left alone.
pub(crate) fn emojify(block: &mut Block) {
    match block {
        Block::Document(blocks) | Block::BlockQuote(blocks) => blocks.iter_mut().for_each(emojify),
        Block::Heading { content, .. } | Block::Paragraph(content) => emojify_inlines(content),
        Block::List { items, .. } => items.iter_mut().for_each(emojify_item),
        Block::Table { headers, rows } => {
            headers.iter_mut().for_each(|cell| emojify_inlines(cell));
            rows.iter_mut()
                .flatten()
                .for_each(|cell| emojify_inlines(cell));
        }
        Block::CodeBlock { .. } | Block::ThematicBreak | Block::HtmlBlock(_) => {}
    }
}

fn emojify_item(item: &mut ListItem) {
    item.content.iter_mut().for_each(emojify);
}

fn emojify_inlines(inlines: &mut [Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => {
                if let Cow::Owned(replaced) = replace_shortcodes(text) {
                    *text = replaced;
                }
            }
            Inline::Strong(content)
            | Inline::Emphasis(content)
            | Inline::Strikethrough(content)
            | Inline::Link { content, .. } => emojify_inlines(content),
            Inline::Image { alt, .. } => {
                if let Cow::Owned(replaced) = replace_shortcodes(alt) {
                    *alt = replaced;
                }
            }
            Inline::Code(_) | Inline::SoftBreak | Inline::LineBreak | Inline::Html(_) => {}
        }
    }
}
