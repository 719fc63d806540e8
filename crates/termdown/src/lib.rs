//! # termdown
//!
//! Render Markdown to styled terminal text.
//!
//! Markdown is parsed with pulldown-cmark into the `termdown-core` AST, then
//! serialized with a style document into ANSI text for a given color profile
//! and wrap width.
//!
//! ## Styles
//!
//! A style is referenced by name (`dark`, `light`, `notty`, `ascii`,
//! `dracula`, `pink`, `tokyo-night`), by `auto`, or by the path of a JSON
//! style document. Documents can also be passed inline as JSON.
//!
//! ## Example
//!
//! ```rust
//! use termdown::{ColorProfile, TermRenderer};
//!
//! let renderer = TermRenderer::builder()
//!     .with_style_path("notty")
//!     .with_word_wrap(40)
//!     .with_color_profile(ColorProfile::Ascii)
//!     .build()
//!     .unwrap();
//!
//! let output = renderer.render("# Hello\n\nSome *emphasis*.").unwrap();
//! assert!(output.contains("Hello"));
//! ```
//!
//! ## One-shot rendering
//!
//! ```rust
//! let output = termdown::render("**bold**", "dark").unwrap();
//! assert!(output.contains("bold"));
//! ```

#[cfg(feature = "emoji")]
mod emoji;
mod links;
mod options;
mod parse;
mod renderer;
pub mod styles;

use std::path::PathBuf;

pub use options::{RenderOptions, StyleSource};
pub use renderer::{TermRenderer, TermRendererBuilder};
pub use termdown_core::{ColorProfile, StyleConfig, StyleError, StyleSheet};

/// Version of this crate, when built by cargo
pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Default wrap width in columns
pub const DEFAULT_WORD_WRAP: usize = 80;

/// Error type for termdown operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read style file {}: {source}", .path.display())]
    StyleRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid style: {0}")]
    InvalidStyle(#[from] StyleError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Render `markdown` with the style named or pointed to by `style`, using
/// the default options otherwise.
pub fn render(markdown: &str, style: &str) -> Result<String> {
    TermRenderer::builder()
        .with_style_path(style)
        .build()?
        .render(markdown)
}
