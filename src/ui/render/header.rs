use super::widgets::{spinner, styling};
use super::Frame;
use crate::application::Field;
use crate::state::{State, SubmitStatus};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const TITLE: &str = "CSI Recruitment";

/// Render the title bar with the submission status or error banner.
///
pub fn header(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let shown = Field::ALL
        .iter()
        .filter(|field| state.field_error(**field).is_some())
        .count();
    let (status, border) = match state.status() {
        SubmitStatus::Idle if shown > 0 => (
            Span::styled(
                format!("{} field(s) need attention", shown),
                styling::error_text_style(theme),
            ),
            styling::normal_block_border_style(theme),
        ),
        SubmitStatus::Idle => (
            Span::styled(
                "Fill in every field, then submit.",
                styling::muted_text_style(theme),
            ),
            styling::normal_block_border_style(theme),
        ),
        SubmitStatus::Submitting => (
            Span::styled(
                format!("{} Submitting...", spinner::frame(state.spinner_index())),
                styling::normal_text_style(theme).fg(theme.warning.to_color()),
            ),
            styling::normal_block_border_style(theme),
        ),
        SubmitStatus::Success => (
            Span::styled(
                "Application received",
                styling::normal_text_style(theme).fg(theme.success.to_color()),
            ),
            styling::normal_block_border_style(theme),
        ),
        SubmitStatus::Error(message) => (
            Span::styled(
                format!("{} (Esc to dismiss)", message),
                styling::error_text_style(theme).add_modifier(Modifier::BOLD),
            ),
            styling::error_block_border_style(theme),
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(TITLE, styling::banner_style(theme)));
    let paragraph = Paragraph::new(Line::from(status))
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, size);
}
