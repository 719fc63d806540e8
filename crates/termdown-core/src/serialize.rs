//! Terminal serialization
//!
//! Converts Markdown AST nodes into styled terminal text.

use crate::ansi::paint;
use crate::ast::{inlines_plain_text, Block, Inline, ListItem};
use crate::color::ColorProfile;
use crate::style::{StyleBlock, StyleConfig, StylePrimitive};
use crate::wrap::{display_width, line_width, merge_fragments, wrap, Fragment, Line};

const DEFAULT_ITEM_PREFIX: &str = "• ";
const DEFAULT_ENUMERATION_SUFFIX: &str = ". ";
const DEFAULT_TICKED: &str = "[✓] ";
const DEFAULT_UNTICKED: &str = "[ ] ";
const DEFAULT_HR: &str = "--------";
const DEFAULT_LEVEL_INDENT: usize = 2;
const DEFAULT_COLUMN_SEPARATOR: &str = "│";
const DEFAULT_ROW_SEPARATOR: &str = "─";
const DEFAULT_CENTER_SEPARATOR: &str = "┼";

/// Everything the serializer needs besides the tree itself
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub styles: &'a StyleConfig,
    pub profile: ColorProfile,
    /// Wrap width in columns, 0 disables wrapping
    pub width: usize,
}

/// Serialize a block to styled terminal text
pub fn serialize(block: &Block, ctx: &RenderContext<'_>) -> String {
    if block.is_blank() {
        return String::new();
    }

    let writer = Writer { ctx };
    let document = &ctx.styles.document;
    let base = StylePrimitive::default().cascade(&document.primitive);
    let width = narrow(ctx.width, block_overhead(document));

    let lines = match block {
        Block::Document(blocks) => writer.blocks(blocks, &base, width),
        other => writer.block(other, &base, width),
    };

    writer.decorate(lines, document, &base).join("\n")
}

/// Columns a block's margins and indentation take
fn block_overhead(block: &StyleBlock) -> usize {
    let token = block.indent_token.as_deref().unwrap_or(" ");
    block.margin.unwrap_or(0) * 2 + block.indent.unwrap_or(0) * display_width(token)
}

/// Shrink a wrap width, keeping zero as "no wrapping"
fn narrow(width: usize, by: usize) -> usize {
    if width == 0 {
        0
    } else {
        width.saturating_sub(by).max(1)
    }
}

struct Writer<'a> {
    ctx: &'a RenderContext<'a>,
}

impl Writer<'_> {
    fn styles(&self) -> &StyleConfig {
        self.ctx.styles
    }

    fn paint_line(&self, line: Line) -> String {
        merge_fragments(line)
            .iter()
            .map(|f| paint(&f.text, &f.style, self.ctx.profile))
            .collect()
    }

    fn paint_lines(&self, lines: Vec<Line>) -> Vec<String> {
        lines.into_iter().map(|l| self.paint_line(l)).collect()
    }

    /// Render sibling blocks separated by blank lines
    fn blocks(&self, blocks: &[Block], base: &StylePrimitive, width: usize) -> Vec<String> {
        let mut out = Vec::new();

        for block in blocks.iter().filter(|b| !b.is_blank()) {
            if !out.is_empty() {
                out.push(String::new());
            }
            out.extend(self.block(block, base, width));
        }

        out
    }

    fn block(&self, block: &Block, base: &StylePrimitive, width: usize) -> Vec<String> {
        match block {
            Block::Document(blocks) => self.blocks(blocks, base, width),

            Block::Heading { level, content } => self.heading(*level, content, base, width),

            Block::Paragraph(inlines) => {
                let style = &self.styles().paragraph;
                let paragraph_base = base.cascade(&style.primitive);
                let text_base = paragraph_base.cascade(&self.styles().text);

                let mut fragments = Vec::new();
                self.inlines(inlines, &text_base, &mut fragments);
                let lines = wrap(&fragments, narrow(width, block_overhead(style)));
                self.decorate(self.paint_lines(lines), style, &paragraph_base)
            }

            Block::BlockQuote(blocks) => {
                let style = &self.styles().block_quote;
                let quote_base = base.cascade(&style.primitive);
                let width = narrow(width, block_overhead(style));
                let lines = self.blocks(blocks, &quote_base, width);
                self.decorate(lines, style, &quote_base)
            }

            Block::List {
                ordered,
                start,
                items,
            } => self.list(*ordered, *start, items, base, width),

            Block::CodeBlock { code, .. } => {
                let style = &self.styles().code_block;
                let code_base = base.cascade(&style.primitive);
                let lines = code
                    .trim_end_matches('\n')
                    .lines()
                    .map(|line| paint(line, &code_base, self.ctx.profile))
                    .collect();
                self.decorate(lines, style, &code_base)
            }

            Block::ThematicBreak => {
                let hr = &self.styles().hr;
                let hr_base = base.cascade(hr);
                let text = hr.format.as_deref().unwrap_or(DEFAULT_HR);
                text.split('\n')
                    .map(|line| paint(line, &hr_base, self.ctx.profile))
                    .collect()
            }

            Block::Table { headers, rows } => self.table(headers, rows, base, width),

            Block::HtmlBlock(html) => {
                let style = &self.styles().html_block;
                let html_base = base.cascade(&style.primitive);
                let lines = html
                    .trim_end_matches('\n')
                    .lines()
                    .map(|line| paint(line, &html_base, self.ctx.profile))
                    .collect();
                self.decorate(lines, style, &html_base)
            }
        }
    }

    fn heading(
        &self,
        level: u8,
        content: &[Inline],
        base: &StylePrimitive,
        width: usize,
    ) -> Vec<String> {
        let style = self.styles().heading_style(level);
        let heading_base = base.cascade(&style.primitive);

        let mut fragments = Vec::new();
        if let Some(prefix) = &style.primitive.prefix {
            fragments.push(Fragment::new(prefix.as_str(), &heading_base));
        }
        self.inlines(content, &heading_base, &mut fragments);
        if let Some(suffix) = &style.primitive.suffix {
            fragments.push(Fragment::new(suffix.as_str(), &heading_base));
        }

        let lines = wrap(&fragments, narrow(width, block_overhead(&style)));
        self.decorate(self.paint_lines(lines), &style, &heading_base)
    }

    fn list(
        &self,
        ordered: bool,
        start: u64,
        items: &[ListItem],
        base: &StylePrimitive,
        width: usize,
    ) -> Vec<String> {
        let styles = self.styles();
        let style = &styles.list.block;
        let list_base = base.cascade(&style.primitive);
        let level_indent = styles.list.level_indent.unwrap_or(DEFAULT_LEVEL_INDENT);
        let width = narrow(width, block_overhead(style));

        let mut out = Vec::new();
        for (i, item) in items.iter().enumerate() {
            let (marker, marker_style) = match item.task {
                Some(checked) => {
                    let task = &styles.task;
                    let marker = if checked {
                        task.ticked.as_deref().unwrap_or(DEFAULT_TICKED)
                    } else {
                        task.unticked.as_deref().unwrap_or(DEFAULT_UNTICKED)
                    };
                    (marker.to_string(), &task.primitive)
                }
                None if ordered => {
                    let suffix = styles
                        .enumeration
                        .block_prefix
                        .as_deref()
                        .unwrap_or(DEFAULT_ENUMERATION_SUFFIX);
                    (format!("{}{}", start + i as u64, suffix), &styles.enumeration)
                }
                None => (
                    styles
                        .item
                        .block_prefix
                        .as_deref()
                        .unwrap_or(DEFAULT_ITEM_PREFIX)
                        .to_string(),
                    &styles.item,
                ),
            };

            let marker_width = display_width(&marker);
            let marker_base = list_base.cascade(marker_style);
            let painted_marker = paint(&marker, &marker_base, self.ctx.profile);
            let item_lines = self.list_item(item, &list_base, width, marker_width, level_indent);

            let mut item_lines = item_lines.into_iter();
            match item_lines.next() {
                Some(first) => out.push(format!("{painted_marker}{first}")),
                None => out.push(painted_marker),
            }
            out.extend(item_lines);
        }

        self.decorate(out, style, &list_base)
    }

    /// Lines of an item's content. The first line is left bare for the
    /// marker; paragraphs continue under the marker, nested lists shift by
    /// `level_indent`.
    fn list_item(
        &self,
        item: &ListItem,
        base: &StylePrimitive,
        width: usize,
        marker_width: usize,
        level_indent: usize,
    ) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();

        for block in item.content.iter().filter(|b| !b.is_blank()) {
            let indent = match block {
                Block::List { .. } => level_indent,
                _ => marker_width,
            };
            let lines = self.block(block, base, narrow(width, indent));
            let pad = " ".repeat(indent);

            if !out.is_empty() && !matches!(block, Block::List { .. }) {
                out.push(String::new());
            }
            for line in lines {
                if out.is_empty() && !matches!(block, Block::List { .. }) {
                    out.push(line);
                } else if out.is_empty() {
                    out.push(String::new());
                    out.push(format!("{pad}{line}"));
                } else if line.is_empty() {
                    out.push(line);
                } else {
                    out.push(format!("{pad}{line}"));
                }
            }
        }

        out
    }

    fn table(
        &self,
        headers: &[Vec<Inline>],
        rows: &[Vec<Vec<Inline>>],
        base: &StylePrimitive,
        width: usize,
    ) -> Vec<String> {
        let style = &self.styles().table;
        let table_base = base.cascade(&style.block.primitive);
        let text_base = table_base.cascade(&self.styles().text);
        let column_separator = style
            .column_separator
            .as_deref()
            .unwrap_or(DEFAULT_COLUMN_SEPARATOR);
        let row_separator = style
            .row_separator
            .as_deref()
            .unwrap_or(DEFAULT_ROW_SEPARATOR);
        let center_separator = style
            .center_separator
            .as_deref()
            .unwrap_or(DEFAULT_CENTER_SEPARATOR);

        let cell = |inlines: &[Inline]| -> Line {
            let mut fragments = Vec::new();
            self.inlines(inlines, &text_base, &mut fragments);
            // Line breaks inside a cell read as spaces.
            for fragment in &mut fragments {
                fragment.text = fragment.text.replace('\n', " ");
            }
            fragments
        };

        let header_cells: Vec<Line> = headers.iter().map(|h| cell(h)).collect();
        let body: Vec<Vec<Line>> = rows
            .iter()
            .map(|row| row.iter().map(|c| cell(c)).collect())
            .collect();

        let columns = header_cells
            .len()
            .max(body.iter().map(Vec::len).max().unwrap_or(0));
        let mut widths = vec![0; columns];
        for row in std::iter::once(&header_cells).chain(body.iter()) {
            for (i, c) in row.iter().enumerate() {
                widths[i] = widths[i].max(line_width(c));
            }
        }

        let separator_width = display_width(column_separator);
        let chrome = columns * 2 + columns.saturating_sub(1) * separator_width;
        let available = narrow(width, block_overhead(&style.block));
        if available > 0 {
            fit_columns(&mut widths, available.saturating_sub(chrome));
        }

        let painted_separator = paint(column_separator, &table_base, self.ctx.profile);
        let render_row = |row: &[Line]| -> Vec<String> {
            let cells: Vec<Vec<Line>> = (0..columns)
                .map(|i| {
                    let content = row.get(i).cloned().unwrap_or_default();
                    let wrap_width = if available > 0 { widths[i] } else { 0 };
                    wrap(&content, wrap_width)
                })
                .collect();
            let height = cells.iter().map(Vec::len).max().unwrap_or(1);

            (0..height)
                .map(|n| {
                    let parts: Vec<String> = cells
                        .iter()
                        .enumerate()
                        .map(|(i, lines)| {
                            let line = lines.get(n).cloned().unwrap_or_default();
                            let padding = widths[i].saturating_sub(line_width(&line));
                            format!(" {}{} ", self.paint_line(line), " ".repeat(padding))
                        })
                        .collect();
                    parts.join(&painted_separator)
                })
                .collect()
        };

        let mut out = Vec::with_capacity(rows.len() + 2);
        out.extend(render_row(&header_cells));

        let rule: Vec<String> = widths
            .iter()
            .map(|w| row_separator.repeat(w + 2))
            .collect();
        out.push(paint(&rule.join(center_separator), &table_base, self.ctx.profile));

        for row in &body {
            out.extend(render_row(row));
        }

        self.decorate(out, &style.block, &table_base)
    }

    fn inlines(&self, inlines: &[Inline], base: &StylePrimitive, out: &mut Vec<Fragment>) {
        for inline in inlines {
            self.inline(inline, base, out);
        }
    }

    fn inline(&self, inline: &Inline, base: &StylePrimitive, out: &mut Vec<Fragment>) {
        let styles = self.styles();

        match inline {
            Inline::Text(text) => out.push(Fragment::new(text.as_str(), base)),

            Inline::Strong(content) => self.span(content, &styles.strong, base, out),

            Inline::Emphasis(content) => self.span(content, &styles.emph, base, out),

            Inline::Strikethrough(content) => {
                self.span(content, &styles.strikethrough, base, out)
            }

            Inline::Code(code) => {
                let primitive = &styles.code.primitive;
                let text = format!(
                    "{}{}{}",
                    primitive.prefix.as_deref().unwrap_or(""),
                    primitive.format_text(code),
                    primitive.suffix.as_deref().unwrap_or("")
                );
                out.push(Fragment::new(text, &base.cascade(primitive)));
            }

            Inline::Link { content, url, .. } => {
                let has_text = !content.iter().all(Inline::is_blank);
                if has_text {
                    self.span(content, &styles.link_text, base, out);
                }

                // Autolinks already show their URL as text.
                let text = inlines_plain_text(content);
                if !url.is_empty() && text.trim() != url.as_str() {
                    if has_text {
                        out.push(Fragment::new(" ", base));
                    }
                    let link_base = base.cascade(&styles.link);
                    out.push(Fragment::new(styles.link.format_text(url), &link_base));
                }
            }

            Inline::Image { alt, url } => {
                if !alt.is_empty() {
                    let image_text = &styles.image_text;
                    let text_base = base.cascade(image_text);
                    out.push(Fragment::new(image_text.format_text(alt), &text_base));
                    out.push(Fragment::new(" ", base));
                }
                let image_base = base.cascade(&styles.image);
                out.push(Fragment::new(styles.image.format_text(url), &image_base));
            }

            Inline::SoftBreak => out.push(Fragment::new(" ", base)),

            Inline::LineBreak => out.push(Fragment::new("\n", base)),

            Inline::Html(html) => {
                let style = base.cascade(&styles.html_span.primitive);
                out.push(Fragment::new(html.as_str(), &style));
            }
        }
    }

    /// Inline span with the element's own prefix/suffix around its content
    fn span(
        &self,
        content: &[Inline],
        primitive: &StylePrimitive,
        base: &StylePrimitive,
        out: &mut Vec<Fragment>,
    ) {
        let span_base = base.cascade(primitive);

        if let Some(prefix) = &primitive.prefix {
            out.push(Fragment::new(prefix.as_str(), &span_base));
        }
        self.inlines(content, &span_base, out);
        if let Some(suffix) = &primitive.suffix {
            out.push(Fragment::new(suffix.as_str(), &span_base));
        }
    }

    /// Apply a block style's indentation, margins and block prefix/suffix
    fn decorate(
        &self,
        lines: Vec<String>,
        block: &StyleBlock,
        base: &StylePrimitive,
    ) -> Vec<String> {
        let margin = " ".repeat(block.margin.unwrap_or(0));
        let token = block.indent_token.as_deref().unwrap_or(" ");
        let indent = paint(&token.repeat(block.indent.unwrap_or(0)), base, self.ctx.profile);

        let mut out: Vec<String> = Vec::with_capacity(lines.len() + 2);

        if let Some(prefix) = &block.primitive.block_prefix {
            push_decoration(&mut out, prefix, &margin, base, self.ctx.profile);
        }
        for line in lines {
            if line.is_empty() && token.trim().is_empty() {
                out.push(line);
            } else {
                out.push(format!("{margin}{indent}{line}"));
            }
        }
        if let Some(suffix) = &block.primitive.block_suffix {
            push_decoration(&mut out, suffix, &margin, base, self.ctx.profile);
        }

        out
    }
}

/// Shrink the widest columns until all of them fit in `budget` columns.
/// Every column keeps at least one column of room.
fn fit_columns(widths: &mut [usize], budget: usize) {
    let budget = budget.max(widths.len());
    while widths.iter().sum::<usize>() > budget {
        match widths.iter_mut().max() {
            Some(widest) if *widest > 1 => *widest -= 1,
            _ => break,
        }
    }
}

/// Add a block prefix/suffix. Each `\n` in it opens a new line; visible text
/// is painted and aligned with the block margin.
fn push_decoration(
    out: &mut Vec<String>,
    decoration: &str,
    margin: &str,
    base: &StylePrimitive,
    profile: ColorProfile,
) {
    let parts: Vec<&str> = decoration.split('\n').collect();
    let last = parts.len() - 1;

    for (i, part) in parts.into_iter().enumerate() {
        if part.is_empty() {
            if i < last {
                out.push(String::new());
            }
        } else {
            out.push(format!("{margin}{}", paint(part, base, profile)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::strip_ansi;
    use pretty_assertions::assert_eq;

    fn plain_config() -> StyleConfig {
        StyleConfig::default()
    }

    fn render(block: &Block, styles: &StyleConfig, width: usize) -> String {
        let ctx = RenderContext {
            styles,
            profile: ColorProfile::TrueColor,
            width,
        };
        serialize(block, &ctx)
    }

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render(&Block::Document(vec![]), &plain_config(), 80), "");
    }

    #[test]
    fn test_paragraph() {
        let block = Block::Paragraph(vec![text("Hello World")]);
        assert_eq!(render(&block, &plain_config(), 80), "Hello World");
    }

    #[test]
    fn test_blocks_are_separated_by_blank_lines() {
        let block = Block::Document(vec![
            Block::Heading {
                level: 1,
                content: vec![text("Title")],
            },
            Block::Paragraph(vec![text("Body text.")]),
        ]);
        assert_eq!(render(&block, &plain_config(), 80), "Title\n\nBody text.");
    }

    #[test]
    fn test_heading_prefix_and_style() {
        let styles = StyleConfig::from_json(
            br###"{"heading": {"bold": true}, "h2": {"prefix": "## "}}"###,
        )
        .unwrap();
        let block = Block::Heading {
            level: 2,
            content: vec![text("Section")],
        };
        assert_eq!(render(&block, &styles, 80), "\x1b[1m## Section\x1b[0m");
    }

    #[test]
    fn test_document_margin_and_prefix() {
        let styles = StyleConfig::from_json(
            br#"{"document": {"margin": 2, "block_prefix": "\n", "block_suffix": "\n"}}"#,
        )
        .unwrap();
        let block = Block::Document(vec![Block::Paragraph(vec![text("Hi")])]);
        assert_eq!(render(&block, &styles, 80), "\n  Hi\n");
    }

    #[test]
    fn test_wrap_respects_margins() {
        let styles = StyleConfig::from_json(br#"{"document": {"margin": 2}}"#).unwrap();
        let block = Block::Paragraph(vec![text(
            "This is a very long paragraph that has to wrap several times",
        )]);
        let out = render(&block, &styles, 20);
        assert!(out.lines().count() > 1);
        for line in out.lines() {
            assert!(display_width(&strip_ansi(line)) <= 20, "line too wide: {line:?}");
        }
    }

    #[test]
    fn test_soft_and_hard_breaks() {
        let soft = Block::Paragraph(vec![text("one"), Inline::SoftBreak, text("two")]);
        assert_eq!(render(&soft, &plain_config(), 80), "one two");

        let hard = Block::Paragraph(vec![text("one"), Inline::LineBreak, text("two")]);
        assert_eq!(render(&hard, &plain_config(), 80), "one\ntwo");
    }

    #[test]
    fn test_unordered_list() {
        let block = Block::List {
            ordered: false,
            start: 1,
            items: vec![
                ListItem::from_inlines(vec![text("One")]),
                ListItem::from_inlines(vec![text("Two")]),
            ],
        };
        assert_eq!(render(&block, &plain_config(), 80), "• One\n• Two");
    }

    #[test]
    fn test_ordered_list_with_start() {
        let block = Block::List {
            ordered: true,
            start: 3,
            items: vec![
                ListItem::from_inlines(vec![text("Three")]),
                ListItem::from_inlines(vec![text("Four")]),
            ],
        };
        assert_eq!(render(&block, &plain_config(), 80), "3. Three\n4. Four");
    }

    #[test]
    fn test_task_list() {
        let block = Block::List {
            ordered: false,
            start: 1,
            items: vec![
                ListItem::from_inlines(vec![text("done")]).with_task(true),
                ListItem::from_inlines(vec![text("todo")]).with_task(false),
            ],
        };
        assert_eq!(render(&block, &plain_config(), 80), "[✓] done\n[ ] todo");
    }

    #[test]
    fn test_nested_list_uses_level_indent() {
        let nested = Block::List {
            ordered: false,
            start: 1,
            items: vec![ListItem::from_inlines(vec![text("inner")])],
        };
        let block = Block::List {
            ordered: false,
            start: 1,
            items: vec![ListItem::new(vec![
                Block::Paragraph(vec![text("outer")]),
                nested,
            ])],
        };
        assert_eq!(render(&block, &plain_config(), 80), "• outer\n  • inner");
    }

    #[test]
    fn test_block_quote_indent_token() {
        let styles =
            StyleConfig::from_json(r#"{"block_quote": {"indent": 1, "indent_token": "│ "}}"#.as_bytes())
                .unwrap();
        let block = Block::BlockQuote(vec![Block::Paragraph(vec![text("Quote")])]);
        assert_eq!(render(&block, &styles, 80), "│ Quote");
    }

    #[test]
    fn test_code_block_is_not_wrapped() {
        let styles = StyleConfig::from_json(br#"{"code_block": {"margin": 2}}"#).unwrap();
        let block = Block::CodeBlock {
            language: Some("rust".into()),
            code: "let answer = compute_something_really_long();\n".into(),
        };
        assert_eq!(
            render(&block, &styles, 10),
            "  let answer = compute_something_really_long();"
        );
    }

    #[test]
    fn test_thematic_break_format() {
        let styles = StyleConfig::from_json(br#"{"hr": {"format": "\n--------\n"}}"#).unwrap();
        assert_eq!(render(&Block::ThematicBreak, &styles, 80), "\n--------\n");
        assert_eq!(render(&Block::ThematicBreak, &plain_config(), 80), "--------");
    }

    #[test]
    fn test_inline_code_prefix() {
        let styles =
            StyleConfig::from_json(br#"{"code": {"prefix": "`", "suffix": "`"}}"#).unwrap();
        let block = Block::Paragraph(vec![text("run "), Inline::Code("cargo".into())]);
        assert_eq!(render(&block, &styles, 80), "run `cargo`");
    }

    #[test]
    fn test_link_prints_text_and_url() {
        let block = Block::Paragraph(vec![Inline::Link {
            content: vec![text("Example")],
            url: "https://example.com".into(),
            title: None,
        }]);
        assert_eq!(render(&block, &plain_config(), 80), "Example https://example.com");
    }

    #[test]
    fn test_autolink_prints_url_once() {
        let block = Block::Paragraph(vec![Inline::Link {
            content: vec![text("https://example.com")],
            url: "https://example.com".into(),
            title: None,
        }]);
        assert_eq!(render(&block, &plain_config(), 80), "https://example.com");
    }

    #[test]
    fn test_image_uses_image_text_format() {
        let styles =
            StyleConfig::from_json(r#"{"image_text": {"format": "Image: {{.text}} →"}}"#.as_bytes())
                .unwrap();
        let block = Block::Paragraph(vec![Inline::Image {
            alt: "logo".into(),
            url: "logo.png".into(),
        }]);
        assert_eq!(render(&block, &styles, 80), "Image: logo → logo.png");
    }

    #[test]
    fn test_table() {
        let block = Block::Table {
            headers: vec![vec![text("A")], vec![text("Bee")]],
            rows: vec![vec![vec![text("1")], vec![text("2")]]],
        };
        assert_eq!(
            render(&block, &plain_config(), 80),
            " A │ Bee \n───┼─────\n 1 │ 2   "
        );
    }

    #[test]
    fn test_table_fits_width() {
        let block = Block::Table {
            headers: vec![vec![text("Name")], vec![text("Description")]],
            rows: vec![vec![
                vec![text("alpha")],
                vec![text("a fairly long description of the first entry")],
            ]],
        };
        let output = render(&block, &plain_config(), 30);
        assert_eq!(
            output.lines().collect::<Vec<_>>(),
            vec![
                " Name  │ Description          ",
                "───────┼──────────────────────",
                " alpha │ a fairly long        ",
                "       │ description of the   ",
                "       │ first entry          ",
            ]
        );
        for line in output.lines() {
            assert!(display_width(line) <= 30, "line too wide: {line:?}");
        }
    }

    #[test]
    fn test_narrow_table_keeps_every_column() {
        let block = Block::Table {
            headers: vec![vec![text("one")], vec![text("two")], vec![text("three")]],
            rows: vec![],
        };
        let output = render(&block, &plain_config(), 4);
        assert_eq!(output.lines().next(), Some(" o │ t │ t "));
    }

    #[test]
    fn test_case_transform_is_measured_when_wrapping() {
        let styles = StyleConfig::from_json(br#"{"text": {"upper": true}}"#).unwrap();
        let block = Block::Paragraph(vec![text("straße straße")]);
        assert_eq!(render(&block, &styles, 13), "STRASSE\nSTRASSE");
    }

    #[test]
    fn test_ascii_profile_has_no_colors() {
        let styles = StyleConfig::from_json(br#"{"text": {"color": "212"}}"#).unwrap();
        let ctx = RenderContext {
            styles: &styles,
            profile: ColorProfile::Ascii,
            width: 80,
        };
        let block = Block::Paragraph(vec![text("plain")]);
        assert_eq!(serialize(&block, &ctx), "plain");
    }
}
