use super::Frame;
use crate::application::Field;
use crate::state::{Focus, State, SubmitStatus};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Return the key hints for the focused control.
///
fn hints(state: &State) -> &'static str {
    match (state.status(), state.current_focus()) {
        (SubmitStatus::Success, _) => " q/Esc/Enter: exit",
        (SubmitStatus::Submitting, _) => " Submitting, please wait for the result...",
        (SubmitStatus::Error(_), _) => " Esc: dismiss error, Tab/Shift+Tab: navigate, Ctrl+S: retry",
        (_, Focus::Field(Field::Residency)) => {
            " ←/→: choose, Space/Enter: select, Tab/Shift+Tab: navigate, Ctrl+S: submit"
        }
        (_, Focus::Field(Field::Teams)) => {
            " ←/→: choose, Space/Enter: toggle, Tab/Shift+Tab: navigate, Ctrl+S: submit"
        }
        (_, Focus::Submit) => " Enter: submit, Tab/Shift+Tab: navigate, Ctrl+C: quit",
        (_, Focus::Field(_)) => " Type to edit, Tab/Shift+Tab: navigate, Ctrl+S: submit, Ctrl+C: quit",
    }
}

/// Render footer with mode indicator and key hints.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let (mode, color) = match state.status() {
        SubmitStatus::Idle | SubmitStatus::Error(_) => (" EDIT ", theme.footer_edit.to_color()),
        SubmitStatus::Submitting => (" SENDING ", theme.warning.to_color()),
        SubmitStatus::Success => (" DONE ", theme.footer_submit.to_color()),
    };
    let line = Line::from(vec![
        Span::styled(
            mode,
            Style::default()
                .fg(theme.highlight_fg.to_color())
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(hints(state), Style::default().fg(theme.text_muted.to_color())),
    ]);
    frame.render_widget(Paragraph::new(line), size);
}
