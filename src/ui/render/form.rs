use super::widgets::{spinner, styling};
use super::Frame;
use crate::application::{Field, Residency, Team};
use crate::state::{Focus, State, SubmitStatus};
use crate::ui::Theme;
use crate::validation::{MAX_TEAMS, WHY_MAX_CHARS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, Borders, Paragraph, Wrap,
    },
};

const CURSOR: &str = "█";

/// Render the registration form, scrolled so that the focused control is
/// always visible.
///
pub fn form(frame: &mut Frame, size: Rect, state: &State) {
    let order = Focus::order(state.show_portfolio_field());
    let heights: Vec<u16> = order.iter().map(|focus| height_of(*focus)).collect();
    let current = order
        .iter()
        .position(|focus| *focus == state.current_focus())
        .unwrap_or(0);
    let (start, end) = visible_window(&heights, current, size.height);

    let constraints: Vec<Constraint> = heights[start..end]
        .iter()
        .map(|height| Constraint::Length(*height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    for (chunk, focus) in chunks.iter().zip(order[start..end].iter()) {
        match focus {
            Focus::Field(Field::Residency) => residency(frame, *chunk, state),
            Focus::Field(Field::Teams) => teams(frame, *chunk, state),
            Focus::Field(Field::Why) => why(frame, *chunk, state),
            Focus::Field(field) => text_field(frame, *chunk, state, *field),
            Focus::Submit => submit_button(frame, *chunk, state),
        }
    }
}

fn height_of(focus: Focus) -> u16 {
    match focus {
        Focus::Field(Field::Why) => 6,
        Focus::Field(Field::Teams) => 4,
        _ => 3,
    }
}

/// Return the half-open range of controls that fit in `available` rows while
/// keeping `current` on screen.
///
fn visible_window(heights: &[u16], current: usize, available: u16) -> (usize, usize) {
    if heights.is_empty() {
        return (0, 0);
    }
    let current = current.min(heights.len() - 1);

    // Walk back from the focused control, then fill forward.
    let mut start = current;
    let mut used = heights[current];
    while start > 0 && used + heights[start - 1] <= available {
        start -= 1;
        used += heights[start];
    }
    let mut used: u16 = 0;
    let mut end = start;
    while end < heights.len() && used + heights[end] <= available {
        used += heights[end];
        end += 1;
    }
    if end <= current {
        end = current + 1;
    }
    (start, end)
}

/// Build a bordered block for a control, with its error beneath it.
///
fn field_block<'a>(theme: &Theme, label: &'a str, focused: bool, error: Option<&'a str>) -> Block<'a> {
    let title_style = if focused {
        styling::active_block_title_style().fg(theme.primary.to_color())
    } else {
        styling::normal_text_style(theme)
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::field_border_style(theme, focused, error.is_some()))
        .title(Span::styled(label, title_style));
    if let Some(message) = error {
        block = block.title(
            Title::from(Span::styled(message, styling::error_text_style(theme)))
                .position(Position::Bottom),
        );
    }
    block
}

fn value_line<'a>(theme: &Theme, value: &'a str, focused: bool, editable: bool) -> Line<'a> {
    let mut spans = vec![Span::styled(value, styling::normal_text_style(theme))];
    if focused && editable {
        spans.push(Span::styled(CURSOR, Style::default().fg(theme.primary.to_color())));
    } else if value.is_empty() {
        spans.push(Span::styled("Empty", styling::muted_text_style(theme)));
    }
    Line::from(spans)
}

fn text_field(frame: &mut Frame, size: Rect, state: &State, field: Field) {
    let theme = state.theme();
    let focused = state.current_focus() == Focus::Field(field);
    let value = state.draft().text(field).unwrap_or_default();
    let block = field_block(theme, field.label(), focused, state.field_error(field));
    let paragraph = Paragraph::new(value_line(theme, value, focused, state.is_editable())).block(block);
    frame.render_widget(paragraph, size);
}

fn why(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let focused = state.current_focus() == Focus::Field(Field::Why);
    let value = state.draft().why.as_str();
    let count = value.chars().count();
    let counter_style = if count > WHY_MAX_CHARS {
        styling::error_text_style(theme)
    } else {
        styling::muted_text_style(theme)
    };
    let block = field_block(theme, Field::Why.label(), focused, state.field_error(Field::Why))
        .title(
            Title::from(Span::styled(
                format!("{}/{}", count, WHY_MAX_CHARS),
                counter_style,
            ))
            .alignment(Alignment::Right),
        );

    // Keep the end of long answers in view.
    let inner_width = size.width.saturating_sub(2).max(1) as usize;
    let inner_height = size.height.saturating_sub(2) as usize;
    let lines = (count + 1) / inner_width + 1;
    let scroll = lines.saturating_sub(inner_height) as u16;

    let paragraph = Paragraph::new(value_line(theme, value, focused, state.is_editable()))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, size);
}

/// Style an option of a picker by cursor position and selection.
///
fn option_style(theme: &Theme, under_cursor: bool, selected: bool) -> Style {
    if under_cursor {
        styling::cursor_item_style(theme)
    } else if selected {
        styling::selected_item_style(theme)
    } else {
        styling::normal_text_style(theme)
    }
}

fn residency(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let focused = state.current_focus() == Focus::Field(Field::Residency);
    let chosen = state.draft().residency;

    let mut spans = Vec::new();
    for (i, option) in Residency::ALL.iter().enumerate() {
        let selected = chosen == Some(*option);
        let marker = if selected { "(•)" } else { "( )" };
        spans.push(Span::styled(
            format!("{} {}", marker, option),
            option_style(theme, focused && i == state.residency_cursor(), selected),
        ));
        spans.push(Span::raw("   "));
    }

    let block = field_block(
        theme,
        Field::Residency.label(),
        focused,
        state.field_error(Field::Residency),
    );
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), size);
}

fn teams(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let focused = state.current_focus() == Focus::Field(Field::Teams);
    let chosen = &state.draft().teams;

    let mut spans = Vec::new();
    for (i, team) in Team::ALL.iter().enumerate() {
        let selected = chosen.contains(team);
        let marker = if selected { "[x]" } else { "[ ]" };
        let suffix = if team.requires_portfolio() { "*" } else { "" };
        spans.push(Span::styled(
            format!("{} {}{}", marker, team, suffix),
            option_style(theme, focused && i == state.team_cursor(), selected),
        ));
        spans.push(Span::raw("  "));
    }

    let label = format!("{} {}/{}", Field::Teams.label(), chosen.len(), MAX_TEAMS);
    let block = field_block(theme, &label, focused, state.field_error(Field::Teams)).title(
        Title::from(Span::styled(
            "* needs portfolio",
            styling::accent_text_style(theme),
        ))
        .alignment(Alignment::Right),
    );
    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, size);
}

fn submit_button(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let focused = state.current_focus() == Focus::Submit;
    let label = match state.status() {
        SubmitStatus::Submitting => {
            format!("{} Submitting...", spinner::frame(state.spinner_index()))
        }
        _ => "Submit Application".to_string(),
    };
    let style = if focused {
        styling::cursor_item_style(theme)
    } else {
        styling::normal_text_style(theme)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::field_border_style(theme, focused, false));
    let paragraph = Paragraph::new(Span::styled(format!(" {} ", label), style))
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, size);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_starts_at_top_when_everything_fits() {
        assert_eq!(visible_window(&[3, 3, 3], 2, 20), (0, 3));
    }

    #[test]
    fn test_window_scrolls_to_focus() {
        let heights = [3, 3, 3, 3, 3];
        let (start, end) = visible_window(&heights, 4, 9);
        assert_eq!((start, end), (2, 5));

        let (start, end) = visible_window(&heights, 0, 9);
        assert_eq!((start, end), (0, 3));
    }

    #[test]
    fn test_window_always_shows_focus() {
        assert_eq!(visible_window(&[3, 6, 3], 1, 2), (1, 2));
        assert_eq!(visible_window(&[], 0, 10), (0, 0));
    }
}
