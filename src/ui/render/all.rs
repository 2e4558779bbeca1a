use super::{confirmation, footer, form, header, log, Frame};
use crate::state::{State, SubmitStatus};
use ratatui::layout::{Constraint, Direction, Layout};

/// Render all widgets according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    state.set_terminal_size(size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Form or confirmation
            Constraint::Length(8), // Log
            Constraint::Length(1), // Footer
        ])
        .split(size);

    header(frame, rows[0], state);
    if *state.status() == SubmitStatus::Success {
        confirmation(frame, rows[1], state);
    } else {
        form(frame, rows[1], state);
    }
    log(frame, rows[2], state);
    footer(frame, rows[3], state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{Field, Residency, Team};
    use crate::relay::Outcome;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(state: &mut State) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| all(frame, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_form_labels() {
        let mut state = State::default();
        let screen = rendered(&mut state);
        assert!(screen.contains("Name"));
        assert!(screen.contains("Phone Number"));
        assert!(!screen.contains("Portfolio Link"));
        assert_eq!(state.terminal_size().width, 100);
    }

    #[test]
    fn test_renders_touched_error() {
        let mut state = State::default();
        state.set_text(Field::Name, "G");
        let screen = rendered(&mut state);
        assert!(screen.contains("Name must be at least 2 characters."));
    }

    fn fill(state: &mut State) {
        state.set_text(Field::Name, "Goutam");
        state.set_text(Field::Enrollment, "E23BU1234");
        state.set_text(Field::Course, "B.Tech CSE");
        state.set_text(Field::Phone, "9876543210");
        state.select_residency(Residency::Hosteller);
        state.toggle_team(Team::Research);
        state.set_text(Field::Why, "I love technology and want to learn.");
    }

    #[test]
    fn test_renders_error_banner() {
        let mut state = State::default();
        fill(&mut state);
        assert!(state.submit().is_err());
        let screen = rendered(&mut state);
        assert!(screen.contains("Something went wrong. Please try again."));
    }

    #[test]
    fn test_renders_confirmation() {
        let mut state = State::default();
        fill(&mut state);
        state.begin_submission().unwrap();
        state.resolve_submission(Outcome::Success).unwrap();
        let screen = rendered(&mut state);
        assert!(screen.contains("Thank You!"));
        assert!(!screen.contains("Phone Number"));
    }

    #[test]
    fn test_submitting_offers_no_quit_hint() {
        let mut state = State::default();
        fill(&mut state);
        state.begin_submission().unwrap();
        let screen = rendered(&mut state);
        assert!(screen.contains("Submitting, please wait for the result..."));
        assert!(!screen.contains("Ctrl+C"));
    }

    #[test]
    fn test_portfolio_legend_uses_accent_colour() {
        let mut state = State::default();
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| all(frame, &mut state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let width = buffer.area.width as usize;

        let (y, x) = buffer
            .content()
            .chunks(width)
            .enumerate()
            .find_map(|(y, row)| {
                let line: String = row.iter().map(|cell| cell.symbol()).collect();
                line.find("* needs portfolio")
                    .map(|byte| (y, line[..byte].chars().count()))
            })
            .unwrap();
        let cell = &buffer.content()[y * width + x];
        assert_eq!(cell.fg, state.theme().accent.to_color());
    }
}
