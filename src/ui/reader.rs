use crate::app::{App, MAX_SCROLL};
use crate::theme::StyleMap;
use crate::util::display_width;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the article reader view
pub fn render(f: &mut Frame, app: &mut App<'_>, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    // Area height minus 2 for borders
    app.reader_visible_lines = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(2) as usize;

    let Some(reader) = app.reader.as_ref() else {
        let paragraph = Paragraph::new("No article selected")
            .block(Block::default().borders(Borders::ALL).title("Reader"));
        f.render_widget(paragraph, area);
        return;
    };
    let article = reader.article;

    let meta = app.style("reader_metadata");
    let mut lines: Vec<Line<'static>> = vec![
        Line::from(Span::styled(article.title.clone(), app.style("reader_heading"))),
        Line::from(Span::styled(
            format!(
                "{} • {} • {}",
                article.author,
                article.publish_date.format("%Y-%m-%d"),
                article.read_time
            ),
            meta,
        )),
    ];
    if !article.tags.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Tags: {}", article.tags.join(", ")),
            meta,
        )));
    }
    lines.push(Line::from(""));

    lines.extend(render_markdown(&article.content, &app.theme));

    if !reader.related.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Related articles",
            app.style("reader_strong"),
        )));
        for (i, related) in reader.related.iter().enumerate() {
            let (marker, style) = if i == reader.related_cursor {
                ("> ", app.style("item_selected"))
            } else {
                ("  ", app.style("reader_link"))
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(related.title.clone(), style),
                Span::styled(format!("  {}", related.read_time), meta),
            ]));
        }
    }

    app.reader_content_lines = wrapped_height(&lines, inner_width);
    // Clamp before rendering so a resize never shows an out-of-range frame
    app.clamp_scroll();

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border"))
                .title("Article"),
        )
        .style(app.style("reader_body"))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset.min(MAX_SCROLL) as u16, 0));

    f.render_widget(paragraph, area);
}

/// Rows the lines occupy once word-wrapped to `width` columns.
fn wrapped_height(lines: &[Line<'_>], width: usize) -> usize {
    if width == 0 {
        return lines.len();
    }
    lines
        .iter()
        .map(|line| {
            let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
            wrapped_rows(&text, width)
        })
        .sum()
}

/// Greedy word wrap: a word that does not fit starts a new row, whitespace
/// at a break is dropped, and words wider than a row are split.
fn wrapped_rows(text: &str, width: usize) -> usize {
    let mut rows = 1;
    let mut col = 0;
    let mut rest = text;

    while let Some(first) = rest.chars().next() {
        let is_space = first.is_whitespace();
        let end = rest
            .find(|c: char| c.is_whitespace() != is_space)
            .unwrap_or(rest.len());
        let (segment, tail) = rest.split_at(end);
        rest = tail;
        let w = display_width(segment);

        if col + w <= width {
            col += w;
        } else if is_space {
            rows += 1;
            col = 0;
        } else if w <= width {
            rows += 1;
            col = w;
        } else {
            if col > 0 {
                rows += 1;
            }
            rows += (w - 1) / width;
            col = match w % width {
                0 => width,
                r => r,
            };
        }
    }
    rows
}

/// Convert markdown to styled ratatui Lines.
pub fn render_markdown(md: &str, theme: &StyleMap) -> Vec<Line<'static>> {
    let parser = Parser::new(md);
    let mut lines: Vec<Line<'static>> = Vec::with_capacity(md.lines().count());
    let mut current_spans: Vec<Span<'static>> = Vec::with_capacity(4);
    let mut in_code_block = false;
    let mut in_heading = false;
    let mut in_emphasis = false;
    let mut in_strong = false;
    let mut in_link = false;
    // One entry per open list: Some(n) for ordered lists
    let mut list_stack: Vec<Option<u64>> = Vec::new();

    let flush = |lines: &mut Vec<Line<'static>>, spans: &mut Vec<Span<'static>>| {
        if !spans.is_empty() {
            lines.push(Line::from(std::mem::take(spans)));
        }
    };

    for event in parser {
        match event {
            Event::Start(Tag::Heading { .. }) => in_heading = true,
            Event::End(TagEnd::Heading(_)) => {
                flush(&mut lines, &mut current_spans);
                lines.push(Line::from(""));
                in_heading = false;
            }
            Event::Start(Tag::Paragraph) => {}
            Event::End(TagEnd::Paragraph) => {
                flush(&mut lines, &mut current_spans);
                // List items are kept tight
                if list_stack.is_empty() {
                    lines.push(Line::from(""));
                }
            }
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                lines.push(Line::from(""));
            }
            Event::Start(Tag::List(start)) => list_stack.push(start),
            Event::End(TagEnd::List(_)) => {
                list_stack.pop();
                if list_stack.is_empty() {
                    lines.push(Line::from(""));
                }
            }
            Event::Start(Tag::Item) => {
                flush(&mut lines, &mut current_spans);
                let indent = "  ".repeat(list_stack.len().saturating_sub(1));
                let bullet = match list_stack.last_mut() {
                    Some(Some(n)) => {
                        let label = format!("{}{}. ", indent, n);
                        *n += 1;
                        label
                    }
                    _ => format!("{}• ", indent),
                };
                current_spans.push(Span::styled(bullet, theme.resolve("reader_metadata")));
            }
            Event::End(TagEnd::Item) => flush(&mut lines, &mut current_spans),
            Event::Start(Tag::Emphasis) => in_emphasis = true,
            Event::End(TagEnd::Emphasis) => in_emphasis = false,
            Event::Start(Tag::Strong) => in_strong = true,
            Event::End(TagEnd::Strong) => in_strong = false,
            Event::Start(Tag::Link { .. }) => in_link = true,
            Event::End(TagEnd::Link) => in_link = false,
            Event::Start(Tag::Image { dest_url, .. }) => {
                current_spans.push(Span::styled(
                    format!("[Image: {}]", dest_url),
                    theme.resolve("reader_link"),
                ));
            }
            Event::Text(text) if in_code_block => {
                let style = theme.resolve("reader_code_block");
                for line in text.lines() {
                    lines.push(Line::from(Span::styled(format!("  {}", line), style)));
                }
            }
            Event::Text(text) => {
                let style = if in_heading {
                    theme.resolve("reader_heading")
                } else if in_link {
                    theme.resolve("reader_link")
                } else if in_strong {
                    theme.resolve("reader_strong")
                } else if in_emphasis {
                    theme.resolve("reader_emphasis")
                } else {
                    theme.resolve("reader_body")
                };
                current_spans.push(Span::styled(text.into_string(), style));
            }
            Event::Code(code) => {
                current_spans.push(Span::styled(
                    format!("`{}`", code),
                    theme.resolve("reader_inline_code"),
                ));
            }
            Event::SoftBreak => current_spans.push(Span::raw(" ")),
            Event::HardBreak => flush(&mut lines, &mut current_spans),
            _ => {}
        }
    }

    flush(&mut lines, &mut current_spans);

    // No trailing blank line
    while lines.last().is_some_and(|l| l.width() == 0) {
        lines.pop();
    }

    lines
}
