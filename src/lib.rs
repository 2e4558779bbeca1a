//! Terminal registration form for the CSI Junior Core recruitment drive.
//!
//! Applicants fill in a validated form; valid submissions are relayed to a
//! spreadsheet-backed storage endpoint which appends one row per application.

pub mod app;
pub mod application;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod relay;
pub mod state;
pub mod storage;
pub mod submit;
pub mod ui;
pub mod validation;
