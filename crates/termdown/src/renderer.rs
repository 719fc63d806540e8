//! TermRenderer - the main entry point for Markdown to terminal rendering.

use termdown_core::{serialize, ColorProfile, RenderContext, StyleConfig};

use crate::links::LinkResolver;
use crate::options::{RenderOptions, StyleSource};
use crate::parse::{parse, ParseOptions};
use crate::{styles, Result};

/// Renders Markdown with a resolved style.
///
/// A renderer is built once and can render any number of documents.
#[derive(Debug, Clone)]
pub struct TermRenderer {
    styles: StyleConfig,
    profile: ColorProfile,
    word_wrap: usize,
    emoji: bool,
    parse_options: ParseOptions,
}

impl TermRenderer {
    /// Create a renderer from options, resolving the style
    pub fn new(options: RenderOptions) -> Result<Self> {
        let styles = styles::resolve(&options.style)?;
        let profile = options.color_profile.unwrap_or_default();
        let word_wrap = options.effective_word_wrap();

        tracing::debug!(
            ?profile,
            word_wrap,
            emoji = options.emoji,
            preserve_newlines = options.preserve_newlines,
            "created renderer"
        );

        Ok(Self {
            styles,
            profile,
            word_wrap,
            emoji: options.emoji,
            parse_options: ParseOptions {
                preserve_newlines: options.preserve_newlines,
                links: LinkResolver::new(options.base_url.as_deref()),
            },
        })
    }

    pub fn builder() -> TermRendererBuilder {
        TermRendererBuilder::default()
    }

    /// Render Markdown to styled terminal text
    pub fn render(&self, markdown: &str) -> Result<String> {
        #[cfg_attr(not(feature = "emoji"), allow(unused_mut))]
        let mut document = parse(markdown, &self.parse_options);

        #[cfg(feature = "emoji")]
        {
            if self.emoji {
                crate::emoji::emojify(&mut document);
            }
        }

        let ctx = RenderContext {
            styles: &self.styles,
            profile: self.profile,
            width: self.word_wrap,
        };
        Ok(serialize(&document, &ctx))
    }

    /// Render Markdown read as bytes. Invalid UTF-8 is replaced.
    pub fn render_bytes(&self, markdown: &[u8]) -> Result<String> {
        self.render(&String::from_utf8_lossy(markdown))
    }

    pub fn styles(&self) -> &StyleConfig {
        &self.styles
    }

    pub fn color_profile(&self) -> ColorProfile {
        self.profile
    }

    pub fn word_wrap(&self) -> usize {
        self.word_wrap
    }

    pub fn emoji(&self) -> bool {
        self.emoji
    }

    pub fn preserve_newlines(&self) -> bool {
        self.parse_options.preserve_newlines
    }
}

/// Fluent construction of a [`TermRenderer`]
#[derive(Debug, Clone, Default)]
pub struct TermRendererBuilder {
    options: RenderOptions,
}

impl TermRendererBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in style name, `auto`, or path of a JSON style document
    #[must_use]
    pub fn with_style_path(mut self, reference: impl Into<String>) -> Self {
        self.options.style = StyleSource::reference(reference);
        self
    }

    #[must_use]
    pub fn with_auto_style(mut self) -> Self {
        self.options.style = StyleSource::Auto;
        self
    }

    /// Style document given as JSON text
    #[must_use]
    pub fn with_styles_from_json(mut self, json: impl Into<String>) -> Self {
        self.options.style = StyleSource::Json(json.into());
        self
    }

    #[must_use]
    pub fn with_styles(mut self, styles: StyleConfig) -> Self {
        self.options.style = StyleSource::Config(styles);
        self
    }

    /// Wrap width in columns, 0 selects the default
    #[must_use]
    pub fn with_word_wrap(mut self, width: usize) -> Self {
        self.options.word_wrap = width;
        self
    }

    #[must_use]
    pub fn with_emoji(mut self) -> Self {
        self.options.emoji = true;
        self
    }

    #[must_use]
    pub fn with_preserved_newlines(mut self) -> Self {
        self.options.preserve_newlines = true;
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.options.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_color_profile(mut self, profile: ColorProfile) -> Self {
        self.options.color_profile = Some(profile);
        self
    }

    /// Use the profile detected from the environment
    #[must_use]
    pub fn with_detected_color_profile(self) -> Self {
        self.with_color_profile(ColorProfile::detect())
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn build(self) -> Result<TermRenderer> {
        TermRenderer::new(self.options)
    }
}
