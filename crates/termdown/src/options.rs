//! Render configuration

use termdown_core::{ColorProfile, StyleConfig};

/// Where the style document comes from
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StyleSource {
    /// `dark` on a terminal, `notty` otherwise
    #[default]
    Auto,
    /// Built-in style name or path of a JSON style document
    Reference(String),
    /// JSON style document given inline
    Json(String),
    /// Already parsed style document
    Config(StyleConfig),
}

impl StyleSource {
    /// Read a style reference. `auto` selects [`StyleSource::Auto`].
    pub fn reference(reference: impl Into<String>) -> Self {
        let reference = reference.into();
        if reference == "auto" {
            StyleSource::Auto
        } else {
            StyleSource::Reference(reference)
        }
    }
}

/// Options for [`TermRenderer`](crate::TermRenderer)
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Style document to render with
    pub style: StyleSource,

    /// Wrap width in columns, 0 selects the default of 80
    pub word_wrap: usize,

    /// Replace `:shortcode:` with emoji
    pub emoji: bool,

    /// Keep single newlines instead of reflowing paragraphs
    pub preserve_newlines: bool,

    /// Base URL relative links are resolved against
    pub base_url: Option<String>,

    /// Color profile, `None` renders in true color
    pub color_profile: Option<ColorProfile>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            style: StyleSource::Auto,
            word_wrap: crate::DEFAULT_WORD_WRAP,
            emoji: false,
            preserve_newlines: false,
            base_url: None,
            color_profile: None,
        }
    }
}

impl RenderOptions {
    /// Wrap width with 0 mapped to the default
    pub fn effective_word_wrap(&self) -> usize {
        if self.word_wrap == 0 {
            crate::DEFAULT_WORD_WRAP
        } else {
            self.word_wrap
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.style, StyleSource::Auto);
        assert_eq!(options.word_wrap, 80);
        assert!(!options.emoji);
        assert!(!options.preserve_newlines);
        assert_eq!(options.base_url, None);
        assert_eq!(options.color_profile, None);
    }

    #[test]
    fn test_zero_width_uses_default() {
        let options = RenderOptions {
            word_wrap: 0,
            ..Default::default()
        };
        assert_eq!(options.effective_word_wrap(), 80);

        let options = RenderOptions {
            word_wrap: 30,
            ..Default::default()
        };
        assert_eq!(options.effective_word_wrap(), 30);
    }

    #[test]
    fn test_auto_reference() {
        assert_eq!(StyleSource::reference("auto"), StyleSource::Auto);
        assert_eq!(
            StyleSource::reference("dark"),
            StyleSource::Reference("dark".into())
        );
    }
}
