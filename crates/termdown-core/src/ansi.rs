//! ANSI escape sequence emission

use once_cell::sync::Lazy;
use regex::Regex;

use crate::color::{Color, ColorProfile, Layer};
use crate::style::StylePrimitive;

/// Matches SGR and other CSI sequences
static CSI_SEQUENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("CSI pattern is valid"));

const RESET: &str = "\x1b[0m";

/// Paint `text` with the attributes of `style` for the given profile.
///
/// Text transforms (`upper`, `lower`, `title`) are applied first. Text without
/// any active attribute is returned unchanged, without escape sequences.
pub fn paint(text: &str, style: &StylePrimitive, profile: ColorProfile) -> String {
    let text = transform_text(text, style);
    if text.is_empty() {
        return text;
    }

    let params = sgr_params(style, profile);
    if params.is_empty() {
        return text;
    }

    format!("\x1b[{}m{}{}", params.join(";"), text, RESET)
}

/// Remove escape sequences, leaving the visible text
pub fn strip_ansi(text: &str) -> String {
    CSI_SEQUENCE.replace_all(text, "").into_owned()
}

/// Apply the `upper`, `lower` or `title` transform of `style`
pub(crate) fn transform_text(text: &str, style: &StylePrimitive) -> String {
    if style.upper == Some(true) {
        text.to_uppercase()
    } else if style.lower == Some(true) {
        text.to_lowercase()
    } else if style.title == Some(true) {
        title_case(text)
    } else {
        text.to_string()
    }
}

fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        if at_word_start && c.is_alphabetic() {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        at_word_start = c.is_whitespace();
    }

    result
}

fn sgr_params(style: &StylePrimitive, profile: ColorProfile) -> Vec<String> {
    let mut params = Vec::new();

    let attributes = [
        (style.bold, "1"),
        (style.faint, "2"),
        (style.italic, "3"),
        (style.underline, "4"),
        (style.blink, "5"),
        (style.inverse, "7"),
        (style.conceal, "8"),
        (style.crossed_out, "9"),
    ];
    for (enabled, code) in attributes {
        if enabled == Some(true) {
            params.push(code.to_string());
        }
    }

    // Colors were validated when the style document was loaded.
    let color = |value: &Option<String>, layer| {
        value
            .as_deref()
            .and_then(|v| v.parse::<Color>().ok())
            .and_then(|c| c.sgr(profile, layer))
    };
    params.extend(color(&style.color, Layer::Foreground));
    params.extend(color(&style.background_color, Layer::Background));

    params
}
