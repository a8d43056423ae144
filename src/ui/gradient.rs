use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders},
};

/// Create a gradient color between two RGB values.
///
/// # Arguments
/// * `start` - Starting RGB color
/// * `end` - Ending RGB color
/// * `position` - Position in gradient (0.0 to 1.0)
pub fn gradient_color(start: (u8, u8, u8), end: (u8, u8, u8), position: f32) -> Color {
    let position = position.clamp(0.0, 1.0);
    let r = (start.0 as f32 + (end.0 as f32 - start.0 as f32) * position) as u8;
    let g = (start.1 as f32 + (end.1 as f32 - start.1 as f32) * position) as u8;
    let b = (start.2 as f32 + (end.2 as f32 - start.2 as f32) * position) as u8;
    Color::Rgb(r, g, b)
}

/// Title rendered one character at a time across the gradient.
fn gradient_title(title: &str, start: (u8, u8, u8), end: (u8, u8, u8)) -> Vec<Span<'static>> {
    let total = title.chars().count().max(2) - 1;
    title
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            Span::styled(
                ch.to_string(),
                Style::default()
                    .fg(gradient_color(start, end, i as f32 / total as f32))
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect()
}

/// Bordered block whose border and title follow a gradient, with a status
/// label right-aligned in the top border.
pub fn gradient_block_with_status(
    title: &str,
    status: &str,
    status_color: Color,
    start: (u8, u8, u8),
    end: (u8, u8, u8),
) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(gradient_color(start, end, 0.5)))
        .title(Line::from(gradient_title(title, start, end)))
        .title(
            Title::from(Line::from(Span::styled(
                format!(" {status} "),
                Style::default().fg(status_color),
            )))
            .alignment(Alignment::Right),
        )
}
