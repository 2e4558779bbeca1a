use super::widgets::styling;
use super::Frame;
use crate::state::State;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the thank-you view shown once the application is accepted, with
/// any remaining confetti falling behind the message.
///
pub fn confirmation(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_text_style(theme).fg(theme.success.to_color()));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    if let Some(celebration) = state.celebration() {
        let buffer = frame.buffer_mut();
        for particle in celebration.visible() {
            let x = inner.x + (particle.x * inner.width as f32) as u16;
            let y = inner.y + (particle.y * inner.height as f32) as u16;
            if x < inner.right() && y < inner.bottom() {
                buffer
                    .get_mut(x, y)
                    .set_char(particle.glyph)
                    .set_fg(theme.confetti_color(particle.color));
            }
        }
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(inner);

    let text = vec![
        Line::from(Span::styled("Thank You!", styling::banner_style(theme))),
        Line::from(""),
        Line::from(Span::styled(
            "Your application has been submitted. We'll be in touch soon.",
            styling::normal_text_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press q, Esc or Enter to exit",
            styling::muted_text_style(theme),
        )),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), rows[1]);
}
