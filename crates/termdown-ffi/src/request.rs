//! Render requests assembled from C arguments

use std::ffi::{c_char, c_int, CStr};

use termdown::{ColorProfile, RenderOptions, StyleSource};

/// Style used when a caller passes an empty style to the simple entry points
pub const DEFAULT_STYLE: &str = "dark";

/// Read a C string argument. Null reads as empty; invalid UTF-8 is replaced.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// and unmodified for the duration of the call.
pub unsafe fn read_c_str(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// Like [`read_c_str`], but null and empty read as `None`.
///
/// # Safety
///
/// Same contract as [`read_c_str`].
pub unsafe fn read_optional_c_str(ptr: *const c_char) -> Option<String> {
    Some(read_c_str(ptr)).filter(|s| !s.is_empty())
}

/// Color profile argument: 0 = detect, 1 = true color, 2 = 256 colors,
/// 3 = basic ANSI, 4 = no colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorProfileArg {
    Auto,
    TrueColor,
    Ansi256,
    Ansi,
    Ascii,
}

impl ColorProfileArg {
    /// Any other value selects nothing, leaving the renderer default.
    pub fn from_raw(value: c_int) -> Option<Self> {
        match value {
            0 => Some(ColorProfileArg::Auto),
            1 => Some(ColorProfileArg::TrueColor),
            2 => Some(ColorProfileArg::Ansi256),
            3 => Some(ColorProfileArg::Ansi),
            4 => Some(ColorProfileArg::Ascii),
            _ => None,
        }
    }

    pub fn resolve(self) -> ColorProfile {
        match self {
            ColorProfileArg::Auto => ColorProfile::detect(),
            ColorProfileArg::TrueColor => ColorProfile::TrueColor,
            ColorProfileArg::Ansi256 => ColorProfile::Ansi256,
            ColorProfileArg::Ansi => ColorProfile::Ansi,
            ColorProfileArg::Ascii => ColorProfile::Ascii,
        }
    }
}

/// Style argument of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleArg {
    /// Detect from the output stream
    Auto,
    /// Built-in name or file path
    Reference(String),
    /// Inline JSON style document
    Json(String),
}

/// Everything one render call needs, owned by the call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub markdown: String,
    pub style: StyleArg,
    /// `None` keeps the renderer default
    pub word_wrap: Option<usize>,
    pub emoji: bool,
    pub preserve_newlines: bool,
    pub base_url: Option<String>,
    pub color_profile: Option<ColorProfileArg>,
}

impl RenderRequest {
    fn new(markdown: &str, style: StyleArg) -> Self {
        Self {
            markdown: markdown.to_string(),
            style,
            word_wrap: None,
            emoji: false,
            preserve_newlines: false,
            base_url: None,
            color_profile: None,
        }
    }

    /// Markdown with a style reference; empty selects [`DEFAULT_STYLE`]
    pub fn basic(markdown: &str, style: &str) -> Self {
        let style = if style.is_empty() { DEFAULT_STYLE } else { style };
        Self::new(markdown, StyleArg::Reference(style.to_string()))
    }

    /// Like [`RenderRequest::basic`] with a fixed width. The width is passed
    /// on as given; negative values read as 0, the renderer default.
    pub fn with_width(markdown: &str, style: &str, width: c_int) -> Self {
        Self {
            word_wrap: Some(usize::try_from(width).unwrap_or(0)),
            ..Self::basic(markdown, style)
        }
    }

    /// Request with every option. Only set arguments are applied: a
    /// positive width, nonzero flags, a non-empty base URL and a known color
    /// profile. An empty style selects automatic detection.
    #[allow(clippy::too_many_arguments)]
    pub fn with_options(
        markdown: &str,
        style: &str,
        width: c_int,
        emoji: c_int,
        preserve_newlines: c_int,
        base_url: Option<String>,
        color_profile: c_int,
    ) -> Self {
        let style = if style.is_empty() {
            StyleArg::Auto
        } else {
            StyleArg::Reference(style.to_string())
        };

        Self {
            word_wrap: positive_width(width),
            emoji: emoji != 0,
            preserve_newlines: preserve_newlines != 0,
            base_url: base_url.filter(|url| !url.is_empty()),
            color_profile: ColorProfileArg::from_raw(color_profile),
            ..Self::new(markdown, style)
        }
    }

    /// Request styled by an inline JSON document; width applies if positive
    pub fn with_json_style(markdown: &str, json: &str, width: c_int) -> Self {
        Self {
            word_wrap: positive_width(width),
            ..Self::new(markdown, StyleArg::Json(json.to_string()))
        }
    }
}

fn positive_width(width: c_int) -> Option<usize> {
    usize::try_from(width).ok().filter(|w| *w > 0)
}

impl From<&RenderRequest> for RenderOptions {
    fn from(request: &RenderRequest) -> Self {
        let mut options = RenderOptions {
            style: match &request.style {
                StyleArg::Auto => StyleSource::Auto,
                StyleArg::Reference(reference) => StyleSource::reference(reference.as_str()),
                StyleArg::Json(json) => StyleSource::Json(json.clone()),
            },
            emoji: request.emoji,
            preserve_newlines: request.preserve_newlines,
            base_url: request.base_url.clone(),
            color_profile: request.color_profile.map(ColorProfileArg::resolve),
            ..RenderOptions::default()
        };

        if let Some(width) = request.word_wrap {
            options.word_wrap = width;
        }

        options
    }
}
