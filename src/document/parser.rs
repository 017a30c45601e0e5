//! Markdown layout with comrak.
//!
//! Walks the comrak AST and lays blocks out as styled, width-wrapped lines.

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::types::{Document, InlineSpan, InlineStyle, LineType, RenderedLine};
use crate::highlight::highlight_code;

/// Parse markdown source into a Document laid out for an 80-column pane.
///
/// # Example
///
/// ```
/// use markpad::document::parse;
///
/// let doc = parse("# Hello\n\nWorld");
/// assert_eq!(doc.line_count(), 3); // heading + empty + paragraph
/// ```
pub fn parse(source: &str) -> Document {
    parse_with_layout(source, 80)
}

/// Parse markdown source into a Document wrapped to `width` columns.
pub fn parse_with_layout(source: &str, width: u16) -> Document {
    let arena = Arena::new();
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    let root = parse_document(&arena, source, &options);

    let mut layout = Layout::new(usize::from(width.max(1)));
    layout.block(root, 0);
    while layout
        .lines
        .last()
        .is_some_and(|line| *line.line_type() == LineType::Empty)
    {
        layout.lines.pop();
    }

    Document::new(source.to_string(), width, layout.lines)
}

/// Accumulates rendered lines while walking the AST.
struct Layout {
    width: usize,
    lines: Vec<RenderedLine>,
}

impl Layout {
    const fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
        }
    }

    fn block<'a>(&mut self, node: &'a AstNode<'a>, depth: usize) {
        match &node.data.borrow().value {
            NodeValue::Heading(heading) => {
                if !self.lines.is_empty() {
                    self.ensure_trailing_empty_lines(2);
                }
                let prefix = format!("{} ", "#".repeat(usize::from(heading.level)));
                let spans = collect_inline_spans(node);
                self.push_wrapped(&spans, LineType::Heading(heading.level), &prefix, "");
                self.lines.push(RenderedLine::empty());
            }

            NodeValue::Paragraph => {
                let images = collect_paragraph_images(node);
                if images.is_empty() {
                    let spans = collect_inline_spans(node);
                    self.push_wrapped(&spans, LineType::Paragraph, "", "");
                } else {
                    for (alt, src) in images {
                        self.push_image(&alt, &src);
                    }
                }
                self.lines.push(RenderedLine::empty());
            }

            NodeValue::CodeBlock(code_block) => {
                self.code_block(&code_block.info, &code_block.literal);
                self.lines.push(RenderedLine::empty());
            }

            NodeValue::List(list) => {
                let list_depth = depth + 1;
                let number_width = (list.start + node.children().count().saturating_sub(1))
                    .to_string()
                    .len();
                let delimiter = match list.delimiter {
                    ListDelimType::Paren => ')',
                    ListDelimType::Period => '.',
                };

                for (index, child) in node.children().enumerate() {
                    let marker = match (&child.data.borrow().value, list.list_type) {
                        (NodeValue::TaskItem(Some(_)), _) => "✓ ".to_string(),
                        (NodeValue::TaskItem(None), _) => "□ ".to_string(),
                        (_, ListType::Bullet) => "• ".to_string(),
                        (_, ListType::Ordered) => {
                            format!("{:>number_width$}{delimiter} ", list.start + index)
                        }
                    };
                    self.item(child, list_depth, &marker);
                }
                if depth == 0 {
                    self.lines.push(RenderedLine::empty());
                }
            }

            NodeValue::BlockQuote => {
                self.blockquote(node, 1);
                self.lines.push(RenderedLine::empty());
            }

            NodeValue::ThematicBreak => {
                self.lines.push(RenderedLine::new(
                    "─".repeat(self.width),
                    LineType::HorizontalRule,
                ));
                self.lines.push(RenderedLine::empty());
            }

            NodeValue::Table(_) => {
                for line in render_table(node, self.width) {
                    self.lines.push(RenderedLine::new(line, LineType::Table));
                }
                self.lines.push(RenderedLine::empty());
            }

            NodeValue::FootnoteDefinition(def) => {
                let label = format!("[^{}]: ", def.name);
                let continuation = " ".repeat(label.chars().count());
                let spans = collect_inline_spans(node);
                self.push_wrapped(&spans, LineType::Paragraph, &label, &continuation);
                self.lines.push(RenderedLine::empty());
            }

            NodeValue::HtmlBlock(html) => {
                for raw in html.literal.lines() {
                    self.push_wrapped(&[InlineSpan::plain(raw)], LineType::Paragraph, "", "");
                }
                self.lines.push(RenderedLine::empty());
            }

            _ => {
                for child in node.children() {
                    self.block(child, depth);
                }
            }
        }
    }

    fn item<'a>(&mut self, node: &'a AstNode<'a>, depth: usize, marker: &str) {
        let indent = "  ".repeat(depth.saturating_sub(1));
        let prefix_first = format!("{indent}{marker}");
        let prefix_next = format!("{indent}{}", " ".repeat(marker.chars().count()));
        let mut rendered_any = false;

        for child in node.children() {
            let is_paragraph = matches!(child.data.borrow().value, NodeValue::Paragraph);
            if is_paragraph {
                if rendered_any {
                    self.lines
                        .push(RenderedLine::new(String::new(), LineType::ListItem(depth)));
                }
                let spans = collect_inline_spans(child);
                let prefix = if rendered_any {
                    &prefix_next
                } else {
                    &prefix_first
                };
                self.push_wrapped(&spans, LineType::ListItem(depth), prefix, &prefix_next);
                rendered_any = true;
            } else {
                self.block(child, depth);
            }
        }

        if !rendered_any {
            self.lines.push(RenderedLine::from_spans(
                LineType::ListItem(depth),
                vec![InlineSpan::plain(prefix_first)],
            ));
        }
    }

    fn blockquote<'a>(&mut self, node: &'a AstNode<'a>, quote_depth: usize) {
        let prefix = quote_prefix(quote_depth);

        for child in node.children() {
            let value = child.data.borrow().value.clone();
            match value {
                NodeValue::Paragraph => {
                        let spans = collect_inline_spans(child);
                    self.push_wrapped(&spans, LineType::BlockQuote, &prefix, &prefix);
                }
                NodeValue::BlockQuote => self.blockquote(child, quote_depth + 1),
                _ => {
                    for raw in extract_text(child).lines() {
                        self.push_wrapped(&[InlineSpan::plain(raw)], LineType::BlockQuote, &prefix, &prefix);
                    }
                }
            }
        }
    }

    fn code_block(&mut self, info: &str, literal: &str) {
        let language = info.split_whitespace().next().filter(|s| !s.is_empty());
        let content_width = literal
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0)
            .min(self.width.saturating_sub(4).max(1));
        let frame_inner_width = content_width + 2;

        let label = truncate_text(&format!(" {} ", language.unwrap_or("code")), frame_inner_width);
        self.lines.push(RenderedLine::new(
            format!(
                "┌{label}{}┐",
                "─".repeat(frame_inner_width.saturating_sub(display_width(&label)))
            ),
            LineType::CodeBlock,
        ));

        for spans in highlight_code(language, literal) {
            let trimmed = truncate_spans(&spans, content_width);
            let padding = content_width.saturating_sub(spans_width(&trimmed));
            let mut line_spans = Vec::with_capacity(trimmed.len() + 2);
            line_spans.push(InlineSpan::plain("│ "));
            line_spans.extend(trimmed);
            line_spans.push(InlineSpan::plain(format!("{} │", " ".repeat(padding))));
            self.lines
                .push(RenderedLine::from_spans(LineType::CodeBlock, line_spans));
        }

        self.lines.push(RenderedLine::new(
            format!("└{}┘", "─".repeat(frame_inner_width)),
            LineType::CodeBlock,
        ));
    }

    fn push_image(&mut self, alt: &str, src: &str) {
        let label = if alt.is_empty() { src } else { alt };
        self.lines.push(RenderedLine::new(
            truncate_text(&format!("[Image: {label}]"), self.width),
            LineType::Image,
        ));
    }

    fn push_wrapped(
        &mut self,
        spans: &[InlineSpan],
        line_type: LineType,
        prefix_first: &str,
        prefix_next: &str,
    ) {
        for line_spans in wrap_spans(spans, self.width, prefix_first, prefix_next) {
            self.lines
                .push(RenderedLine::from_spans(line_type, line_spans));
        }
    }

    fn ensure_trailing_empty_lines(&mut self, count: usize) {
        let existing = self
            .lines
            .iter()
            .rev()
            .take_while(|line| *line.line_type() == LineType::Empty)
            .count();
        for _ in existing..count {
            self.lines.push(RenderedLine::empty());
        }
    }
}

fn quote_prefix(depth: usize) -> String {
    let mut prefix = String::from("  ");
    for _ in 0..depth {
        prefix.push_str("│ ");
    }
    prefix
}

fn render_table<'a>(table_node: &'a AstNode<'a>, wrap_width: usize) -> Vec<String> {
    let (alignments, mut rows, has_header) = collect_table_rows(table_node);
    let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if num_cols == 0 {
        return Vec::new();
    }

    for row in &mut rows {
        row.resize(num_cols, String::new());
    }

    let mut col_widths = vec![1_usize; num_cols];
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            col_widths[idx] = col_widths[idx].max(display_width(cell));
        }
    }

    // Row width is 1 + sum(col_width + 3); shrink the widest column until it fits.
    let max_table_width = wrap_width.max(4);
    while 1 + col_widths.iter().sum::<usize>() + 3 * num_cols > max_table_width {
        let Some((widest, &w)) = col_widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
            break;
        };
        if w <= 1 {
            break;
        }
        col_widths[widest] -= 1;
    }

    let mut lines = vec![render_table_border(&col_widths, '┌', '┬', '┐')];
    for (idx, row) in rows.iter().enumerate() {
        lines.push(render_table_row(row, &col_widths, &alignments));
        if has_header && idx == 0 {
            lines.push(render_table_border(&col_widths, '├', '┼', '┤'));
        }
    }
    lines.push(render_table_border(&col_widths, '└', '┴', '┘'));
    lines
}

fn collect_table_rows<'a>(
    table_node: &'a AstNode<'a>,
) -> (Vec<TableAlignment>, Vec<Vec<String>>, bool) {
    let alignments = match &table_node.data.borrow().value {
        NodeValue::Table(table) => table.alignments.clone(),
        _ => Vec::new(),
    };

    let mut rows = Vec::new();
    let mut has_header = false;
    for row_node in table_node.children() {
        let NodeValue::TableRow(header) = row_node.data.borrow().value else {
            continue;
        };
        has_header |= header;
        let cells = row_node
            .children()
            .filter(|cell| matches!(cell.data.borrow().value, NodeValue::TableCell))
            .map(|cell| {
                extract_text(cell)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        rows.push(cells);
    }

    (alignments, rows, has_header)
}

fn render_table_border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}", segments.join(&middle.to_string()))
}

fn render_table_row(cells: &[String], widths: &[usize], alignments: &[TableAlignment]) -> String {
    let mut out = String::from("│");
    for (idx, &width) in widths.iter().enumerate() {
        let content = truncate_text(cells.get(idx).map_or("", String::as_str), width);
        let padding = width.saturating_sub(display_width(&content));
        let (left, right) = match alignments.get(idx).copied().unwrap_or(TableAlignment::None) {
            TableAlignment::Right => (padding, 0),
            TableAlignment::Center => (padding / 2, padding - padding / 2),
            TableAlignment::Left | TableAlignment::None => (0, padding),
        };
        out.push(' ');
        out.push_str(&" ".repeat(left));
        out.push_str(&content);
        out.push_str(&" ".repeat(right));
        out.push_str(" │");
    }
    out
}

fn truncate_text(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn spans_width(spans: &[InlineSpan]) -> usize {
    spans.iter().map(|s| display_width(s.text())).sum()
}

fn truncate_spans(spans: &[InlineSpan], max_width: usize) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut remaining = max_width;
    for span in spans {
        if remaining == 0 {
            break;
        }
        let taken = truncate_text(span.text(), remaining);
        if !taken.is_empty() {
            remaining -= display_width(&taken);
            out.push(InlineSpan::new(taken, span.style()));
        }
    }
    out
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(c) => {
            text.push('`');
            text.push_str(&c.literal);
            text.push('`');
        }
        NodeValue::FootnoteReference(reference) => {
            text.push_str(&format!("[^{}]", reference.name));
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push('\n'),
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}

fn collect_inline_spans<'a>(node: &'a AstNode<'a>) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    collect_inline_spans_recursive(node, InlineStyle::default(), &mut spans);
    spans
}

fn collect_inline_spans_recursive<'a>(
    node: &'a AstNode<'a>,
    style: InlineStyle,
    spans: &mut Vec<InlineSpan>,
) {
    let mut next = style;
    match &node.data.borrow().value {
        NodeValue::List(_) | NodeValue::Item(_) => return,
        NodeValue::Text(t) => {
            spans.push(InlineSpan::new(t.clone(), style));
            return;
        }
        NodeValue::Code(code) => {
            let code_style = InlineStyle {
                code: true,
                link: style.link,
                ..InlineStyle::default()
            };
            spans.push(InlineSpan::new(code.literal.clone(), code_style));
            return;
        }
        NodeValue::HtmlInline(html) => {
            spans.push(InlineSpan::new(html.clone(), style));
            return;
        }
        NodeValue::Image(image) => {
            let alt = extract_text(node);
            let label = if alt.is_empty() { image.url.clone() } else { alt };
            next.link = true;
            spans.push(InlineSpan::new(format!("[Image: {label}]"), next));
            return;
        }
        NodeValue::FootnoteReference(reference) => {
            spans.push(InlineSpan::new(format!("[^{}]", reference.name), style));
            return;
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            spans.push(InlineSpan::new(" ".to_string(), style));
            return;
        }
        NodeValue::Emph => next.emphasis = true,
        NodeValue::Strong => next.strong = true,
        NodeValue::Strikethrough => next.strikethrough = true,
        NodeValue::Link(_) => next.link = true,
        _ => {}
    }
    for child in node.children() {
        collect_inline_spans_recursive(child, next, spans);
    }
}

/// Images of a paragraph that holds nothing but images and whitespace.
fn collect_paragraph_images<'a>(node: &'a AstNode<'a>) -> Vec<(String, String)> {
    let mut images = Vec::new();
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Image(image) => images.push((extract_text(child), image.url.clone())),
            NodeValue::SoftBreak | NodeValue::LineBreak => {}
            NodeValue::Text(t) if t.trim().is_empty() => {}
            _ => return Vec::new(),
        }
    }
    images
}

/// Greedy word wrap that keeps each span's style.
///
/// Leading whitespace is dropped at wrapped line starts. A word wider than
/// the line is kept whole and clipped at draw time.
fn wrap_spans(
    spans: &[InlineSpan],
    width: usize,
    prefix_first: &str,
    prefix_next: &str,
) -> Vec<Vec<InlineSpan>> {
    let tokens = spans.iter().flat_map(split_inline_tokens);

    let mut lines: Vec<Vec<InlineSpan>> = Vec::new();
    let mut current = start_line(prefix_first);
    let mut current_len = display_width(prefix_first);
    let mut has_word = false;

    for token in tokens {
        let token_len = display_width(token.text());
        let token_is_ws = token.text().chars().all(char::is_whitespace);

        if current_len + token_len > width && has_word {
            let full = std::mem::replace(&mut current, start_line(prefix_next));
            lines.push(trim_trailing_whitespace(full));
            current_len = display_width(prefix_next);
            has_word = false;
        }

        if token_is_ws && !has_word {
            continue;
        }

        current_len += token_len;
        current.push(token);
        has_word = true;
    }

    lines.push(trim_trailing_whitespace(current));
    lines
}

fn trim_trailing_whitespace(mut line: Vec<InlineSpan>) -> Vec<InlineSpan> {
    while line.len() > 1
        && line
            .last()
            .is_some_and(|span| span.text().chars().all(char::is_whitespace))
    {
        line.pop();
    }
    line
}

fn start_line(prefix: &str) -> Vec<InlineSpan> {
    if prefix.is_empty() {
        Vec::new()
    } else {
        vec![InlineSpan::plain(prefix)]
    }
}

fn split_inline_tokens(span: &InlineSpan) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut ws_state: Option<bool> = None;

    for ch in span.text().chars() {
        let is_ws = ch.is_whitespace();
        if ws_state.is_some_and(|state| state != is_ws) {
            out.push(InlineSpan::new(std::mem::take(&mut buf), span.style()));
        }
        buf.push(ch);
        ws_state = Some(is_ws);
    }

    if !buf.is_empty() {
        out.push(InlineSpan::new(buf, span.style()));
    }

    out
}
