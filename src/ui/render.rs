use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, ExchangeStatus};
use crate::config::{ColorConfig, Config};
use crate::message::{Message, MessageKind, Role};

use super::gradient::{gradient_block_with_status, gradient_color};
use super::text::{sanitize, wrap_text, wrap_text_with_first};

const BG_PRIMARY: Color = Color::Rgb(20, 20, 25);
const BG_INPUT: Color = Color::Rgb(30, 30, 35);

/// Columns reserved inside the chat border for the scrollbar and padding.
const CHAT_GUTTER: u16 = 2;

/// Main UI rendering function.
pub fn ui(f: &mut Frame, app: &mut App, config: &Config) {
    let colors = &config.colors;
    let (chat_start, chat_end) = colors.chat_gradient();
    let (input_start, input_end) = colors.input_gradient();

    let background = Block::default().style(Style::default().bg(Color::Black));
    f.render_widget(background, f.size());

    // Thick outer border: 2 columns on the sides, 1 row top and bottom
    let inner_area = f.size().inner(&Margin {
        horizontal: 2,
        vertical: 1,
    });
    f.render_widget(
        Block::default().style(Style::default().bg(BG_PRIMARY)),
        inner_area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Chat messages
            Constraint::Length(3), // Input box
        ])
        .split(inner_area);

    // Wrap everything, then show the window selected by the scroll offset
    let text_width = chunks[0].width.saturating_sub(2 + CHAT_GUTTER) as usize;
    let viewport = chunks[0].height.saturating_sub(2) as usize;
    let lines = message_lines(&app.chat.messages, text_width, config);
    app.scroll.update(lines.len(), viewport);

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(app.scroll.offset)
        .take(viewport)
        .collect();

    let (status_text, status_color) = status_label(app, colors);
    let chat = Paragraph::new(visible).block(gradient_block_with_status(
        " NLPAssist ",
        &status_text,
        status_color,
        chat_start,
        chat_end,
    ));
    f.render_widget(chat, chunks[0]);

    let scroll_position = if app.scroll.max_scroll() > 0 {
        app.scroll.offset as f32 / app.scroll.max_scroll() as f32
    } else {
        1.0
    };
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("▲"))
        .end_symbol(Some("▼"))
        .track_symbol(Some("░"))
        .thumb_symbol("█")
        .style(Style::default().fg(gradient_color(chat_start, chat_end, scroll_position)));
    f.render_stateful_widget(
        scrollbar,
        chunks[0].inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app.scroll.scrollbar,
    );

    render_input(f, app, chunks[1], colors, input_start, input_end);
}

/// Status label and color for the chat border.
fn status_label(app: &App, colors: &ColorConfig) -> (String, Color) {
    match app.status {
        ExchangeStatus::Waiting { .. } => (
            format!("{} Waiting…", app.spinner().unwrap_or("●")),
            Color::Rgb(100, 200, 255),
        ),
        ExchangeStatus::Rendered { failed: true } => {
            ("● Error".to_string(), ColorConfig::to_color(&colors.error))
        }
        ExchangeStatus::Idle | ExchangeStatus::Rendered { failed: false } => {
            ("● Ready".to_string(), ColorConfig::to_color(&colors.bot))
        }
    }
}

/// Render the single-line input box and place the terminal cursor in it.
fn render_input(
    f: &mut Frame,
    app: &App,
    area: Rect,
    colors: &ColorConfig,
    start: (u8, u8, u8),
    end: (u8, u8, u8),
) {
    let input_block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(gradient_color(start, end, 0.5)))
        .style(Style::default().bg(BG_INPUT));

    let text_area = input_block.inner(area);
    let width = text_area.width.saturating_sub(1) as usize;

    // Scroll horizontally so the cursor stays visible
    let (before, _) = app.chat.split_at_cursor();
    let mut skip = 0;
    let mut column = before.width();
    for c in before.chars() {
        if column <= width {
            break;
        }
        column -= c.width().unwrap_or(0);
        skip += 1;
    }

    let line = if app.chat.input.is_empty() && app.is_waiting() {
        Line::from(Span::styled(
            "waiting for the answer…",
            Style::default()
                .fg(ColorConfig::to_color(&colors.dim))
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(app.chat.input.chars().skip(skip).collect::<String>())
    };

    let input = Paragraph::new(line)
        .style(Style::default().fg(Color::White))
        .block(input_block);
    f.render_widget(input, area);

    if text_area.width > 0 && text_area.height > 0 {
        f.set_cursor(text_area.x + column as u16, text_area.y);
    }
}

/// Build the styled, wrapped lines for the whole history.
///
/// The first line of a message carries the role prefix; continuation lines
/// are indented to line up with it. Messages are separated by a blank line.
pub fn message_lines(messages: &[Message], width: usize, config: &Config) -> Vec<Line<'static>> {
    let colors = &config.colors;
    let dim = Style::default().fg(ColorConfig::to_color(&colors.dim));
    let mut lines = Vec::new();

    for msg in messages {
        let content = sanitize(&msg.content);

        if msg.kind == MessageKind::Notice {
            for line in wrap_text(&content, width) {
                lines.push(Line::from(Span::styled(line, dim)));
            }
            lines.push(Line::from(""));
            continue;
        }

        let style = match (msg.role, msg.kind) {
            (_, MessageKind::Error) => Style::default().fg(ColorConfig::to_color(&colors.error)),
            (Role::User, _) => Style::default().fg(ColorConfig::to_color(&colors.user)),
            (Role::Bot, _) => Style::default().fg(ColorConfig::to_color(&colors.bot)),
        };

        let prefix = msg.role.prefix();
        let indent = " ".repeat(prefix.width());
        let body_width = width.saturating_sub(indent.len());
        let time_label = format!("  {}", msg.time_label());
        let wrapped = wrap_text_with_first(
            &content,
            body_width.saturating_sub(time_label.width()),
            body_width,
        );

        for (i, line) in wrapped.into_iter().enumerate() {
            if i == 0 {
                lines.push(Line::from(vec![
                    Span::styled(prefix, style.add_modifier(Modifier::BOLD)),
                    Span::styled(line, style),
                    Span::styled(time_label.clone(), dim),
                ]));
            } else {
                lines.push(Line::from(vec![
                    Span::raw(indent.clone()),
                    Span::styled(line, style),
                ]));
            }
        }

        if config.behavior.show_meta {
            if let Some(meta) = &msg.meta {
                let summary = sanitize(&meta.summary());
                for line in wrap_text(&summary, body_width) {
                    lines.push(Line::from(vec![
                        Span::raw(indent.clone()),
                        Span::styled(line, dim.add_modifier(Modifier::ITALIC)),
                    ]));
                }
            }
        }

        lines.push(Line::from(""));
    }

    lines
}
