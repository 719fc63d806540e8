//! termdown-core - Markdown AST, styles and terminal serialization
//!
//! This crate provides the data structures the `termdown` renderer works on:
//! the Markdown AST, the JSON style document model, color profiles and the
//! serializer that turns a styled tree into ANSI text.
//!
//! # Architecture
//!
//! ```text
//!                      ┌──────────────┐
//! Markdown ──parse───▶ │ Markdown AST │ ──serialize──▶ ANSI String
//!                      └──────────────┘        ▲
//!                                              │
//!                    Style JSON ──▶ StyleConfig + ColorProfile
//! ```
//!
//! # Example
//!
//! ```rust
//! use termdown_core::{serialize, Block, ColorProfile, Inline, RenderContext, StyleConfig};
//!
//! let ast = Block::Document(vec![
//!     Block::Heading {
//!         level: 1,
//!         content: vec![Inline::Text("Hello World".to_string())],
//!     },
//!     Block::Paragraph(vec![
//!         Inline::Text("This is ".to_string()),
//!         Inline::Strong(vec![Inline::Text("bold".to_string())]),
//!         Inline::Text(" text.".to_string()),
//!     ]),
//! ]);
//!
//! let styles = StyleConfig::from_json(br#"{"strong": {"bold": true}}"#).unwrap();
//! let ctx = RenderContext {
//!     styles: &styles,
//!     profile: ColorProfile::TrueColor,
//!     width: 80,
//! };
//! let output = serialize(&ast, &ctx);
//! assert!(output.contains("\x1b[1mbold\x1b[0m"));
//! ```

mod ansi;
mod ast;
mod color;
mod serialize;
mod sheet;
mod style;
mod wrap;

pub use ansi::{paint, strip_ansi};
pub use ast::{inlines_plain_text, Block, Inline, ListItem};
pub use color::{Color, ColorProfile, Layer};
pub use serialize::{serialize, RenderContext};
pub use sheet::StyleSheet;
pub use style::{StyleBlock, StyleConfig, StyleList, StylePrimitive, StyleTable, StyleTask};
pub use wrap::{display_width, wrap, Fragment, Line};

/// Error type for style documents
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("Invalid style JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, StyleError>;
