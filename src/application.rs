//! Applicant data model.
//!
//! An [`Application`] is one user's form submission record. It is built from
//! form input, validated, relayed once and then dropped.

use crate::validation::{
    at_most_three_teams, indian_mobile, portfolio_when_required, under_why_limit, PhoneRule,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use validator::Validate;

/// Defines where the applicant lives during the semester.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Residency {
    Hosteller,
    #[serde(rename = "Day Scholar")]
    DayScholar,
}

impl Residency {
    pub const ALL: [Residency; 2] = [Residency::Hosteller, Residency::DayScholar];

    pub fn as_str(&self) -> &'static str {
        match self {
            Residency::Hosteller => "Hosteller",
            Residency::DayScholar => "Day Scholar",
        }
    }
}

impl fmt::Display for Residency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defines the teams an applicant may ask to join.
///
/// Declaration order is the canonical order used when team choices are
/// flattened for storage.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    Tech,
    Multimedia,
    Research,
    Management,
    #[serde(rename = "PR")]
    Pr,
    Sponsorship,
    Design,
}

impl Team {
    pub const ALL: [Team; 7] = [
        Team::Tech,
        Team::Multimedia,
        Team::Research,
        Team::Management,
        Team::Pr,
        Team::Sponsorship,
        Team::Design,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Tech => "Tech",
            Team::Multimedia => "Multimedia",
            Team::Research => "Research",
            Team::Management => "Management",
            Team::Pr => "PR",
            Team::Sponsorship => "Sponsorship",
            Team::Design => "Design",
        }
    }

    /// Selecting any of these teams makes a portfolio link mandatory.
    ///
    pub fn requires_portfolio(&self) -> bool {
        matches!(self, Team::Tech | Team::Multimedia | Team::Design)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a single form field.
///
/// Declaration order matches the order fields appear in the form.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Enrollment,
    Course,
    Phone,
    Residency,
    Teams,
    Portfolio,
    Why,
    Experience,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::Enrollment,
        Field::Course,
        Field::Phone,
        Field::Residency,
        Field::Teams,
        Field::Portfolio,
        Field::Why,
        Field::Experience,
    ];

    /// Return the field name used on the wire.
    ///
    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Enrollment => "enrollment",
            Field::Course => "course",
            Field::Phone => "phone",
            Field::Residency => "residency",
            Field::Teams => "teams",
            Field::Portfolio => "portfolio",
            Field::Why => "why",
            Field::Experience => "experience",
        }
    }

    /// Return the label shown next to the field in the form.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Enrollment => "Enrollment No. / Year",
            Field::Course => "Course",
            Field::Phone => "Phone Number",
            Field::Residency => "Residency",
            Field::Teams => "Team Choices (up to 3)",
            Field::Portfolio => "Portfolio Link",
            Field::Why => "Why do you want to join CSI?",
            Field::Experience => "Past Experience (Optional)",
        }
    }

    /// Whether the field holds free text typed by the applicant.
    ///
    pub fn is_text(&self) -> bool {
        !matches!(self, Field::Residency | Field::Teams)
    }
}

/// Defines one applicant's submission record.
///
/// Missing JSON fields deserialize to empty values so that they are reported
/// by validation rather than rejected by the parser. Rules are checked with
/// the phone rule in effect as context.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(context = PhoneRule)]
#[validate(schema(
    function = "portfolio_when_required",
    skip_on_field_errors = false
))]
pub struct Application {
    #[validate(length(min = 2, message = "Name must be at least 2 characters."))]
    pub name: String,
    #[validate(length(min = 4, message = "Please enter a valid Enrollment No. or Year."))]
    pub enrollment: String,
    #[validate(length(min = 2, message = "Please enter your course."))]
    pub course: String,
    #[validate(custom(function = "indian_mobile", use_context))]
    pub phone: String,
    #[validate(required(message = "Please select your residency type."))]
    pub residency: Option<Residency>,
    #[validate(
        length(min = 1, message = "Please select at least one team."),
        custom(function = "at_most_three_teams")
    )]
    pub teams: BTreeSet<Team>,
    #[validate(
        length(min = 20, message = "Please tell us a bit more (min. 20 characters)."),
        custom(function = "under_why_limit")
    )]
    pub why: String,
    pub portfolio: String,
    pub experience: String,
}

impl Application {
    /// Return the text value of a free-text field.
    ///
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Enrollment => Some(&self.enrollment),
            Field::Course => Some(&self.course),
            Field::Phone => Some(&self.phone),
            Field::Portfolio => Some(&self.portfolio),
            Field::Why => Some(&self.why),
            Field::Experience => Some(&self.experience),
            Field::Residency | Field::Teams => None,
        }
    }

    /// Return a mutable handle to the text value of a free-text field.
    ///
    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Enrollment => Some(&mut self.enrollment),
            Field::Course => Some(&mut self.course),
            Field::Phone => Some(&mut self.phone),
            Field::Portfolio => Some(&mut self.portfolio),
            Field::Why => Some(&mut self.why),
            Field::Experience => Some(&mut self.experience),
            Field::Residency | Field::Teams => None,
        }
    }

    /// Return team choices joined into a single string, e.g. "Tech, Design".
    ///
    pub fn teams_joined(&self) -> String {
        self.teams
            .iter()
            .map(Team::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
