use crate::application::Field;
use crate::state::{Focus, State, StateError, SubmitStatus};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => {
                    if let Ok(CrosstermEvent::Key(key)) = event::read() {
                        if key.kind == KeyEventKind::Press && tx_clone.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    error!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => Ok(handle_key(key, state)),
            Event::Tick => {
                state.advance_tick();
                Ok(true)
            }
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

/// Apply one key press to the form. Returns false if exit was requested.
///
pub fn handle_key(key: KeyEvent, state: &mut State) -> bool {
    // An in-flight submission cannot be cancelled; wait for its outcome.
    if *state.status() == SubmitStatus::Submitting {
        debug!("Ignoring key '{:?}' while submitting.", key.code);
        return true;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }

    if *state.status() == SubmitStatus::Success {
        return !matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter);
    }

    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
        request_submit(state);
        return true;
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => state.focus_next(),
        KeyCode::BackTab | KeyCode::Up => state.focus_prev(),
        KeyCode::Left => state.choice_prev(),
        KeyCode::Right => state.choice_next(),
        KeyCode::Backspace => state.remove_char(),
        KeyCode::Esc => state.dismiss_error(),
        KeyCode::Enter => match state.current_focus() {
            Focus::Submit => request_submit(state),
            Focus::Field(Field::Residency) | Focus::Field(Field::Teams) => state.toggle_choice(),
            Focus::Field(_) => state.focus_next(),
        },
        KeyCode::Char(c)
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            state.add_char(c)
        }
        _ => {}
    }
    true
}

fn request_submit(state: &mut State) {
    match state.submit() {
        Ok(()) => {}
        Err(StateError::Invalid(errors)) => {
            warn!("Please fix {} field(s) before submitting.", errors.len())
        }
        Err(StateError::SubmissionInFlight) => debug!("Ignoring submit while in flight."),
        Err(e) => error!("Failed to submit: {}", e),
    }
}
