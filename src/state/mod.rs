//! Application state management module.
//!
//! This module contains the form state controller, including:
//! - Main `State` struct holding field values, validity and the submit lifecycle
//! - Focus and lifecycle types
//! - The one-shot confirmation celebration
//! - State error handling

mod celebration;
mod error;
mod form;
mod state_impl;

pub use celebration::{Celebration, PIECES};
pub use error::StateError;
pub use form::{Focus, SubmitStatus};
pub use state_impl::State;
