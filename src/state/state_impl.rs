use crate::app::NetworkEventSender;
use crate::application::{Application, Field, Residency, Team};
use crate::events::network::Event as NetworkEvent;
use crate::relay::{Outcome, GENERIC_FAILURE};
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use crate::validation::{requires_portfolio, FieldErrors, Schema};
use log::*;
use ratatui::layout::Rect;
use std::collections::HashSet;

use super::celebration::{Celebration, PIECES};
use super::error::StateError;
use super::form::{Focus, SubmitStatus};

const MAX_LOG_ENTRIES: usize = 200;

/// Houses the form state controller: current field values, validity, focus
/// and the submit lifecycle.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    schema: Schema,
    draft: Application,
    focus: Focus,
    residency_cursor: usize,
    team_cursor: usize,
    touched: HashSet<Field>, // Fields whose errors are shown live
    errors: FieldErrors,     // Result of the latest validation pass
    status: SubmitStatus,
    celebration: Option<Celebration>,
    spinner_index: usize,
    log_entries: Vec<String>,
    terminal_size: Rect,
    theme: Theme,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State::new(None, Schema::default(), Theme::default())
    }
}

impl State {
    /// Return a new empty form wired to the network thread.
    ///
    pub fn new(net_sender: Option<NetworkEventSender>, schema: Schema, theme: Theme) -> State {
        let mut state = State {
            net_sender,
            schema,
            draft: Application::default(),
            focus: Focus::Field(Field::Name),
            residency_cursor: 0,
            team_cursor: 0,
            touched: HashSet::new(),
            errors: FieldErrors::default(),
            status: SubmitStatus::Idle,
            celebration: None,
            spinner_index: 0,
            log_entries: vec![],
            terminal_size: Rect::default(),
            theme,
        };
        state.revalidate();
        state
    }

    pub fn draft(&self) -> &Application {
        &self.draft
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn is_editable(&self) -> bool {
        self.status.is_editable()
    }

    pub fn current_focus(&self) -> Focus {
        self.focus
    }

    pub fn residency_cursor(&self) -> usize {
        self.residency_cursor
    }

    pub fn team_cursor(&self) -> usize {
        self.team_cursor
    }

    /// Whether the portfolio field should be displayed.
    ///
    pub fn show_portfolio_field(&self) -> bool {
        requires_portfolio(&self.draft.teams)
    }

    /// Return the error to display for the field, if it has been touched.
    ///
    pub fn field_error(&self, field: Field) -> Option<&str> {
        if self.touched.contains(&field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    /// Return every current validation error, touched or not.
    ///
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn celebration(&self) -> Option<&Celebration> {
        self.celebration.as_ref()
    }

    pub fn spinner_index(&self) -> usize {
        self.spinner_index
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn terminal_size(&self) -> Rect {
        self.terminal_size
    }

    pub fn set_terminal_size(&mut self, size: Rect) {
        self.terminal_size = size;
    }

    pub fn log_entries(&self) -> &[String] {
        &self.log_entries
    }

    /// Append a formatted log line, dropping the oldest beyond the cap.
    ///
    pub fn add_log_entry(&mut self, entry: String) {
        self.log_entries.push(entry);
        if self.log_entries.len() > MAX_LOG_ENTRIES {
            let overflow = self.log_entries.len() - MAX_LOG_ENTRIES;
            self.log_entries.drain(..overflow);
        }
    }

    /// Move focus to the next visible control.
    ///
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next(self.show_portfolio_field());
    }

    /// Move focus to the previous visible control.
    ///
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev(self.show_portfolio_field());
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    /// Type a character into the focused control. Space toggles the choice
    /// under the cursor on residency and team pickers.
    ///
    pub fn add_char(&mut self, c: char) {
        let Focus::Field(field) = self.focus else {
            return;
        };
        if field.is_text() {
            if !self.is_editable() {
                return;
            }
            if let Some(value) = self.draft.text_mut(field) {
                value.push(c);
            }
            self.field_changed(field);
        } else if c == ' ' {
            self.toggle_choice();
        }
    }

    /// Delete the last character of the focused text field.
    ///
    pub fn remove_char(&mut self) {
        let Focus::Field(field) = self.focus else {
            return;
        };
        if !self.is_editable() {
            return;
        }
        if let Some(value) = self.draft.text_mut(field) {
            if value.pop().is_some() {
                self.field_changed(field);
            }
        }
    }

    /// Replace the whole value of a text field.
    ///
    pub fn set_text(&mut self, field: Field, text: &str) {
        if !self.is_editable() {
            debug!("Ignoring edit of '{}' while form is locked.", field.key());
            return;
        }
        if let Some(value) = self.draft.text_mut(field) {
            *value = text.to_string();
            self.field_changed(field);
        }
    }

    /// Move the choice cursor right on the focused picker.
    ///
    pub fn choice_next(&mut self) {
        match self.focus {
            Focus::Field(Field::Residency) => {
                self.residency_cursor = (self.residency_cursor + 1) % Residency::ALL.len();
            }
            Focus::Field(Field::Teams) => {
                self.team_cursor = (self.team_cursor + 1) % Team::ALL.len();
            }
            _ => {}
        }
    }

    /// Move the choice cursor left on the focused picker.
    ///
    pub fn choice_prev(&mut self) {
        match self.focus {
            Focus::Field(Field::Residency) => {
                self.residency_cursor =
                    (self.residency_cursor + Residency::ALL.len() - 1) % Residency::ALL.len();
            }
            Focus::Field(Field::Teams) => {
                self.team_cursor = (self.team_cursor + Team::ALL.len() - 1) % Team::ALL.len();
            }
            _ => {}
        }
    }

    /// Select the residency or toggle the team under the cursor.
    ///
    pub fn toggle_choice(&mut self) {
        match self.focus {
            Focus::Field(Field::Residency) => {
                self.select_residency(Residency::ALL[self.residency_cursor]);
            }
            Focus::Field(Field::Teams) => {
                self.toggle_team(Team::ALL[self.team_cursor]);
            }
            _ => {}
        }
    }

    pub fn select_residency(&mut self, residency: Residency) {
        if !self.is_editable() {
            return;
        }
        self.draft.residency = Some(residency);
        self.field_changed(Field::Residency);
    }

    /// Add the team to the selection, or remove it if already selected.
    ///
    pub fn toggle_team(&mut self, team: Team) {
        if !self.is_editable() {
            return;
        }
        if !self.draft.teams.remove(&team) {
            self.draft.teams.insert(team);
        }
        self.field_changed(Field::Teams);
    }

    fn field_changed(&mut self, field: Field) {
        self.touched.insert(field);
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.errors = self.schema.validate(&self.draft).err().unwrap_or_default();
    }

    /// Capture a snapshot of the current values and, if it validates, enter
    /// the submitting state and hand the snapshot back for relaying.
    ///
    pub fn begin_submission(&mut self) -> Result<Application, StateError> {
        match self.status {
            SubmitStatus::Submitting => return Err(StateError::SubmissionInFlight),
            SubmitStatus::Success => return Err(StateError::FormSubmitted),
            SubmitStatus::Idle | SubmitStatus::Error(_) => {}
        }

        let snapshot = self.draft.clone();
        if let Err(errors) = self.schema.validate(&snapshot) {
            debug!("Submission blocked by {} invalid field(s).", errors.len());
            self.touched.extend(Field::ALL);
            if let Some(first) = errors.fields().first() {
                self.focus = Focus::Field(*first);
            }
            self.errors = errors.clone();
            self.status = SubmitStatus::Idle;
            return Err(StateError::Invalid(errors));
        }

        info!("Submitting application for '{}'...", snapshot.name);
        self.status = SubmitStatus::Submitting;
        Ok(snapshot)
    }

    /// Begin a submission and dispatch the snapshot to the network thread.
    ///
    pub fn submit(&mut self) -> Result<(), StateError> {
        let application = self.begin_submission()?;
        let sent = match &self.net_sender {
            Some(sender) => sender.send(NetworkEvent::Submit(application)).is_ok(),
            None => false,
        };
        if !sent {
            error!("Network thread unavailable; submission not sent.");
            self.status = SubmitStatus::Error(GENERIC_FAILURE.to_string());
            return Err(StateError::NetworkChannelClosed);
        }
        Ok(())
    }

    /// Apply the relay outcome of the in-flight submission.
    ///
    pub fn resolve_submission(&mut self, outcome: Outcome) -> Result<(), StateError> {
        if self.status != SubmitStatus::Submitting {
            warn!("Discarding outcome with no submission in flight.");
            return Err(StateError::NoSubmissionInFlight);
        }
        match outcome {
            Outcome::Success => {
                info!("Application submitted successfully!");
                self.status = SubmitStatus::Success;
                self.celebration = Some(Celebration::burst(PIECES));
            }
            Outcome::Failure { message, .. } => {
                self.status = SubmitStatus::Error(message);
            }
        }
        Ok(())
    }

    /// Clear a displayed submission error.
    ///
    pub fn dismiss_error(&mut self) {
        if let SubmitStatus::Error(_) = self.status {
            self.status = SubmitStatus::Idle;
        }
    }

    /// Advance spinner and celebration animations by one frame.
    ///
    pub fn advance_tick(&mut self) {
        self.spinner_index = (self.spinner_index + 1) % SPINNER_FRAME_COUNT;
        let finished = match self.celebration.as_mut() {
            Some(celebration) => {
                celebration.tick();
                celebration.is_finished()
            }
            None => false,
        };
        if finished {
            debug!("Celebration finished.");
            self.celebration = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::FailureKind;
    use crate::validation::{PORTFOLIO_REQUIRED, TEAMS_EMPTY};
    use std::sync::mpsc;

    fn fill(state: &mut State, teams: &[Team], portfolio: &str) {
        state.set_text(Field::Name, "Goutam");
        state.set_text(Field::Enrollment, "E23BU1234");
        state.set_text(Field::Course, "B.Tech CSE");
        state.set_text(Field::Phone, "9876543210");
        state.select_residency(Residency::Hosteller);
        for team in teams {
            state.toggle_team(*team);
        }
        state.set_text(Field::Portfolio, portfolio);
        state.set_text(Field::Why, "I love technology and want to learn.");
    }

    fn failure(message: &str) -> Outcome {
        Outcome::Failure {
            kind: FailureKind::Rejected,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_new_state_is_idle_and_hides_errors() {
        let state = State::default();
        assert_eq!(state.status(), &SubmitStatus::Idle);
        assert_eq!(state.current_focus(), Focus::Field(Field::Name));
        assert!(!state.errors().is_empty());
        assert!(Field::ALL.iter().all(|f| state.field_error(*f).is_none()));
    }

    #[test]
    fn test_typing_validates_live() {
        let mut state = State::default();
        state.add_char('G');
        assert_eq!(state.draft().name, "G");
        assert!(state.field_error(Field::Name).is_some());
        state.add_char('o');
        assert!(state.field_error(Field::Name).is_none());
        state.remove_char();
        assert_eq!(state.draft().name, "G");
        assert!(state.field_error(Field::Name).is_some());
        assert!(state.field_error(Field::Phone).is_none());
    }

    #[test]
    fn test_pickers_toggle_with_space() {
        let mut state = State::default();
        state.set_focus(Focus::Field(Field::Residency));
        state.choice_next();
        state.add_char(' ');
        assert_eq!(state.draft().residency, Some(Residency::DayScholar));

        state.set_focus(Focus::Field(Field::Teams));
        state.choice_prev();
        state.add_char(' ');
        assert!(state.draft().teams.contains(&Team::Design));
        state.toggle_choice();
        assert!(state.draft().teams.is_empty());
        assert_eq!(state.field_error(Field::Teams), Some(TEAMS_EMPTY));
    }

    #[test]
    fn test_portfolio_visibility_follows_teams() {
        let mut state = State::default();
        assert!(!state.show_portfolio_field());
        state.toggle_team(Team::Research);
        assert!(!state.show_portfolio_field());
        state.toggle_team(Team::Multimedia);
        assert!(state.show_portfolio_field());

        state.set_focus(Focus::Field(Field::Teams));
        state.focus_next();
        assert_eq!(state.current_focus(), Focus::Field(Field::Portfolio));

        state.toggle_team(Team::Multimedia);
        state.set_focus(Focus::Field(Field::Teams));
        state.focus_next();
        assert_eq!(state.current_focus(), Focus::Field(Field::Why));
    }

    #[test]
    fn test_submit_dispatches_snapshot() {
        let (tx, rx) = mpsc::channel();
        let mut state = State::new(Some(tx), Schema::default(), Theme::default());
        fill(&mut state, &[Team::Tech], "https://github.com/x");

        state.submit().unwrap();
        assert_eq!(state.status(), &SubmitStatus::Submitting);
        match rx.try_recv().unwrap() {
            NetworkEvent::Submit(application) => {
                assert_eq!(&application, state.draft());
                assert_eq!(application.teams_joined(), "Tech");
            }
        }
    }

    #[test]
    fn test_invalid_submit_never_dispatches() {
        let (tx, rx) = mpsc::channel();
        let mut state = State::new(Some(tx), Schema::default(), Theme::default());
        fill(&mut state, &[Team::Tech, Team::Design], "");

        match state.submit() {
            Err(StateError::Invalid(errors)) => {
                assert_eq!(errors.fields(), vec![Field::Portfolio]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(rx.try_recv().is_err());
        assert_eq!(state.status(), &SubmitStatus::Idle);
        assert_eq!(state.field_error(Field::Portfolio), Some(PORTFOLIO_REQUIRED));
        assert_eq!(state.current_focus(), Focus::Field(Field::Portfolio));
    }

    #[test]
    fn test_submit_is_disabled_while_in_flight() {
        let mut state = State::default();
        fill(&mut state, &[Team::Research], "");
        state.begin_submission().unwrap();

        assert!(matches!(
            state.begin_submission(),
            Err(StateError::SubmissionInFlight)
        ));
        state.set_text(Field::Name, "Someone Else");
        state.toggle_team(Team::Pr);
        state.set_focus(Focus::Field(Field::Name));
        state.add_char('x');
        assert_eq!(state.draft().name, "Goutam");
        assert_eq!(state.draft().teams.len(), 1);
    }

    #[test]
    fn test_success_locks_form_and_celebrates_once() {
        let mut state = State::default();
        fill(&mut state, &[Team::Tech], "https://github.com/x");
        state.begin_submission().unwrap();
        state.resolve_submission(Outcome::Success).unwrap();

        assert_eq!(state.status(), &SubmitStatus::Success);
        assert!(state.celebration().is_some());
        assert!(matches!(
            state.begin_submission(),
            Err(StateError::FormSubmitted)
        ));
        assert!(matches!(
            state.resolve_submission(Outcome::Success),
            Err(StateError::NoSubmissionInFlight)
        ));

        for _ in 0..1000 {
            state.advance_tick();
        }
        assert!(state.celebration().is_none());
        assert_eq!(state.status(), &SubmitStatus::Success);
    }

    #[test]
    fn test_failure_keeps_values_and_reenables_submit() {
        let mut state = State::default();
        fill(&mut state, &[Team::Tech], "https://github.com/x");
        let before = state.draft().clone();
        state.begin_submission().unwrap();
        state.resolve_submission(failure("quota exceeded")).unwrap();

        assert_eq!(
            state.status(),
            &SubmitStatus::Error("quota exceeded".to_string())
        );
        assert!(state.is_editable());
        assert!(state.celebration().is_none());
        assert_eq!(state.draft(), &before);

        state.set_text(Field::Course, "B.Tech ECE");
        assert_eq!(state.draft().course, "B.Tech ECE");
        assert!(state.begin_submission().is_ok());
    }

    #[test]
    fn test_dismiss_error() {
        let mut state = State::default();
        fill(&mut state, &[Team::Research], "");
        state.begin_submission().unwrap();
        state.resolve_submission(failure("quota exceeded")).unwrap();
        state.dismiss_error();
        assert_eq!(state.status(), &SubmitStatus::Idle);
    }

    #[test]
    fn test_outcome_without_submission_is_rejected() {
        let mut state = State::default();
        assert!(matches!(
            state.resolve_submission(failure("late")),
            Err(StateError::NoSubmissionInFlight)
        ));
        assert_eq!(state.status(), &SubmitStatus::Idle);
    }

    #[test]
    fn test_submit_without_network_thread() {
        let mut state = State::default();
        fill(&mut state, &[Team::Research], "");
        assert!(matches!(
            state.submit(),
            Err(StateError::NetworkChannelClosed)
        ));
        assert_eq!(
            state.status(),
            &SubmitStatus::Error(GENERIC_FAILURE.to_string())
        );
    }

    #[test]
    fn test_log_entries_are_capped() {
        let mut state = State::default();
        for i in 0..(MAX_LOG_ENTRIES + 5) {
            state.add_log_entry(format!("entry {}", i));
        }
        assert_eq!(state.log_entries().len(), MAX_LOG_ENTRIES);
        assert_eq!(state.log_entries()[0], "entry 5");
    }
}
