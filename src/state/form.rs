//! Form navigation and submission lifecycle types.

use crate::application::Field;

/// Specifying which control has keyboard focus.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Focus {
    Field(Field),
    Submit,
}

impl Focus {
    /// Return the focus order of the form given whether the portfolio field
    /// is currently shown.
    ///
    pub fn order(show_portfolio: bool) -> Vec<Focus> {
        Field::ALL
            .iter()
            .filter(|f| show_portfolio || **f != Field::Portfolio)
            .map(|f| Focus::Field(*f))
            .chain(std::iter::once(Focus::Submit))
            .collect()
    }

    /// Return the focus after this one, wrapping around.
    ///
    pub fn next(self, show_portfolio: bool) -> Focus {
        let order = Focus::order(show_portfolio);
        match order.iter().position(|f| *f == self) {
            Some(i) => order[(i + 1) % order.len()],
            None => Focus::Field(Field::Why),
        }
    }

    /// Return the focus before this one, wrapping around.
    ///
    pub fn prev(self, show_portfolio: bool) -> Focus {
        let order = Focus::order(show_portfolio);
        match order.iter().position(|f| *f == self) {
            Some(i) => order[(i + order.len() - 1) % order.len()],
            None => Focus::Field(Field::Teams),
        }
    }
}

/// Specifying where the form is in its submit lifecycle.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SubmitStatus {
    Idle,
    Submitting,
    Success,
    Error(String),
}

impl SubmitStatus {
    /// Whether the applicant may edit fields and submit.
    ///
    pub fn is_editable(&self) -> bool {
        matches!(self, SubmitStatus::Idle | SubmitStatus::Error(_))
    }
}
