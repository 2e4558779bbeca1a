//! Validation rules for applications.
//!
//! The rules are declared on [`Application`] with `validator` and run in a
//! single pass that reports every failing field at once. The portfolio rule
//! is cross-field: whether a link is required depends on the team selection
//! observed in the same pass.

mod phone;

pub use phone::{PhoneRule, PhoneRuleError};

use crate::application::{Application, Field, Team};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use validator::{ValidateArgs, ValidateUrl, ValidationError, ValidationErrors};

pub const WHY_MAX_CHARS: usize = 500;
pub const MAX_TEAMS: usize = 3;

pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters.";
pub const ENROLLMENT_TOO_SHORT: &str = "Please enter a valid Enrollment No. or Year.";
pub const COURSE_TOO_SHORT: &str = "Please enter your course.";
pub const PHONE_INVALID: &str = "Please enter a valid 10-digit Indian phone number.";
pub const RESIDENCY_MISSING: &str = "Please select your residency type.";
pub const TEAMS_EMPTY: &str = "Please select at least one team.";
pub const TEAMS_TOO_MANY: &str = "You can select up to 3 teams.";
pub const WHY_TOO_SHORT: &str = "Please tell us a bit more (min. 20 characters).";
pub const WHY_TOO_LONG: &str = "Response must be under 500 characters.";
pub const PORTFOLIO_REQUIRED: &str = "A valid portfolio URL is required for this team.";

/// Whether the team selection makes a portfolio link mandatory.
///
/// Shared by validation and by the form, which only shows the portfolio
/// field when this holds.
///
pub fn requires_portfolio(teams: &BTreeSet<Team>) -> bool {
    teams.iter().any(Team::requires_portfolio)
}

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn indian_mobile(phone: &str, rule: &PhoneRule) -> Result<(), ValidationError> {
    if rule.matches(phone) {
        Ok(())
    } else {
        Err(failure("phone", PHONE_INVALID))
    }
}

pub fn at_most_three_teams(teams: &BTreeSet<Team>) -> Result<(), ValidationError> {
    if teams.len() > MAX_TEAMS {
        return Err(failure("teams", TEAMS_TOO_MANY));
    }
    Ok(())
}

pub fn under_why_limit(why: &str) -> Result<(), ValidationError> {
    if why.chars().count() > WHY_MAX_CHARS {
        return Err(failure("why", WHY_TOO_LONG));
    }
    Ok(())
}

/// Require a parseable portfolio URL when a portfolio team is selected.
///
pub fn portfolio_when_required(application: &Application) -> Result<(), ValidationError> {
    let link = &application.portfolio;
    if requires_portfolio(&application.teams) && (link.trim().is_empty() || !link.validate_url()) {
        return Err(failure("portfolio", PORTFOLIO_REQUIRED));
    }
    Ok(())
}

/// Aggregate mapping from field to human-readable error message.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, Cow<'static, str>>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(|message| message.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over errors in form order.
    ///
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.0
            .iter()
            .map(|(field, message)| (*field, message.as_ref()))
    }

    pub fn fields(&self) -> Vec<Field> {
        self.0.keys().copied().collect()
    }
}

/// Keep the first failure of each field, keyed by form field. Struct-level
/// failures are attributed through their error code.
///
impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        for (key, list) in errors.field_errors() {
            for error in list.iter() {
                let name: &str = if &*key == "__all__" {
                    error.code.as_ref()
                } else {
                    &*key
                };
                let Some(field) = Field::ALL.iter().find(|f| f.key() == name) else {
                    continue;
                };
                let message = error.message.clone().unwrap_or_else(|| error.code.clone());
                fields.entry(*field).or_insert(message);
            }
        }
        FieldErrors(fields)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (field, message)) in self.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", field.key(), message)?;
        }
        Ok(())
    }
}

/// Declarative rule set describing a valid application.
///
#[derive(Clone, Debug, Default)]
pub struct Schema {
    phone: PhoneRule,
}

impl Schema {
    pub fn new(phone: PhoneRule) -> Self {
        Schema { phone }
    }

    /// Validate every field of the application in one pass, returning all
    /// failures together.
    ///
    pub fn validate(&self, application: &Application) -> Result<(), FieldErrors> {
        application
            .validate_with_args(&self.phone)
            .map_err(FieldErrors::from)
    }
}
