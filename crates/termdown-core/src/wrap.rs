//! Word wrapping of styled text
//!
//! Wrapping works on [`Fragment`]s before any escape sequence is emitted, so
//! widths are measured on visible text only.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ansi::transform_text;
use crate::style::StylePrimitive;

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub style: StylePrimitive,
}

impl Fragment {
    /// Text transforms of `style` are applied here and dropped from the
    /// fragment's style, so widths are measured on the text that is shown.
    pub fn new(text: impl Into<String>, style: &StylePrimitive) -> Self {
        let text = text.into();
        if !style.transforms_text() {
            return Self {
                text,
                style: style.clone(),
            };
        }

        Self {
            text: transform_text(&text, style),
            style: StylePrimitive {
                upper: None,
                lower: None,
                title: None,
                ..style.clone()
            },
        }
    }
}

/// One output line
pub type Line = Vec<Fragment>;

/// Display width of `text` in terminal columns
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Display width of a line
pub fn line_width(line: &[Fragment]) -> usize {
    line.iter().map(|f| display_width(&f.text)).sum()
}

enum Token {
    Word(Vec<Fragment>),
    Space(Fragment),
    Newline,
}

fn is_break_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Split fragments into words, spaces and newlines. A word may span several
/// fragments, e.g. `**bold**,` is one word in two styles.
fn tokenize(fragments: &[Fragment]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word: Vec<Fragment> = Vec::new();

    for fragment in fragments {
        let mut rest = fragment.text.as_str();

        while let Some(c) = rest.chars().next() {
            let len = if c == '\n' {
                1
            } else if is_break_space(c) {
                rest.find(|c: char| !is_break_space(c)).unwrap_or(rest.len())
            } else {
                rest.find(|c: char| c == '\n' || is_break_space(c))
                    .unwrap_or(rest.len())
            };
            let (piece, tail) = rest.split_at(len);
            rest = tail;

            if c == '\n' {
                if !word.is_empty() {
                    tokens.push(Token::Word(std::mem::take(&mut word)));
                }
                tokens.push(Token::Newline);
            } else if is_break_space(c) {
                if !word.is_empty() {
                    tokens.push(Token::Word(std::mem::take(&mut word)));
                }
                tokens.push(Token::Space(Fragment::new(
                    piece.replace('\t', "    "),
                    &fragment.style,
                )));
            } else {
                word.push(Fragment::new(piece, &fragment.style));
            }
        }
    }

    if !word.is_empty() {
        tokens.push(Token::Word(word));
    }

    tokens
}

/// Greedily wrap fragments into lines no wider than `width` columns.
///
/// A `width` of zero disables wrapping; lines then only break at `\n`.
/// Words wider than `width` are broken at character boundaries. Spaces at a
/// wrap point or before a newline are dropped; leading spaces and spaces
/// ending the text are kept.
pub fn wrap(fragments: &[Fragment], width: usize) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    let mut current: Line = Vec::new();
    let mut current_width = 0;
    let mut pending_space: Option<Fragment> = None;

    for token in tokenize(fragments) {
        match token {
            Token::Newline => {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
                pending_space = None;
            }
            Token::Space(space) => {
                if current_width > 0 {
                    match pending_space.as_mut() {
                        Some(pending) => pending.text.push_str(&space.text),
                        None => pending_space = Some(space),
                    }
                } else {
                    current_width += display_width(&space.text);
                    current.push(space);
                }
            }
            Token::Word(word) => {
                let word_width = line_width(&word);
                let space_width = pending_space
                    .as_ref()
                    .map(|s| display_width(&s.text))
                    .unwrap_or(0);

                if width > 0
                    && current_width > 0
                    && current_width + space_width + word_width > width
                {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                    pending_space = None;
                } else if let Some(space) = pending_space.take() {
                    current_width += display_width(&space.text);
                    current.push(space);
                }

                if width > 0 && word_width > width {
                    for fragment in word {
                        for c in fragment.text.chars() {
                            let char_width = c.width().unwrap_or(0);
                            if current_width > 0 && current_width + char_width > width {
                                lines.push(std::mem::take(&mut current));
                                current_width = 0;
                            }
                            push_char(&mut current, c, &fragment.style);
                            current_width += char_width;
                        }
                    }
                } else {
                    current_width += word_width;
                    current.extend(word);
                }
            }
        }
    }

    if let Some(space) = pending_space {
        current.push(space);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines.into_iter().map(merge_fragments).collect()
}

fn push_char(line: &mut Line, c: char, style: &StylePrimitive) {
    match line.last_mut() {
        Some(last) if &last.style == style => last.text.push(c),
        _ => line.push(Fragment::new(c.to_string(), style)),
    }
}

/// Join neighbouring fragments that share a style
pub fn merge_fragments(line: Line) -> Line {
    let mut merged: Line = Vec::with_capacity(line.len());

    for fragment in line {
        match merged.last_mut() {
            Some(last) if last.style == fragment.style => last.text.push_str(&fragment.text),
            _ => merged.push(fragment),
        }
    }

    merged
}
