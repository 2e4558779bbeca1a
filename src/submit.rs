//! Non-interactive submission of an application read from a JSON file.

use crate::application::Application;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::relay::Relay;
use crate::validation::Schema;
use log::*;
use std::io::{self, Write};
use std::path::Path;

/// Validate and relay the application stored at `path`, printing the result
/// to stdout. Returns the process exit code.
///
pub async fn run(config: &Config, path: &Path) -> AppResult<i32> {
    debug!("Reading application from {}...", path.display());
    let input = std::fs::read_to_string(path)?;
    let schema = Schema::new(config.phone_rule()?);
    let relay = Relay::new(config.destination()?)?;
    let mut stdout = io::stdout();
    run_with(&schema, &relay, &input, &mut stdout).await
}

/// Validate and relay a JSON application, writing field errors or the relay
/// outcome to `out`. Returns 0 on success and 1 otherwise.
///
pub async fn run_with<W: Write>(
    schema: &Schema,
    relay: &Relay,
    input: &str,
    out: &mut W,
) -> AppResult<i32> {
    let application: Application =
        serde_json::from_str(input).map_err(|e| AppError::Input(e.to_string()))?;

    if let Err(errors) = schema.validate(&application) {
        warn!("Application has {} invalid field(s).", errors.len());
        writeln!(out, "{}", errors)?;
        return Ok(1);
    }

    let outcome = relay.submit(&application).await;
    writeln!(out, "{}", outcome.to_json())?;
    Ok(if outcome.is_success() { 0 } else { 1 })
}
