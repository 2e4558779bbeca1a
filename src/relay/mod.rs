//! Submission relay.
//!
//! Forwards one validated application to the storage collaborator and
//! translates whatever comes back into a typed [`Outcome`]. Response parsing
//! fails closed: anything not recognisably a success is a failure. Outcome
//! messages never mention where the collaborator lives.

mod client;
mod error;

pub use error::RelayError;

use crate::application::Application;
use crate::storage::{Sheet, StoragePayload, StorageResponse};
use client::Client;
use log::*;
use std::fmt;
use std::path::PathBuf;

/// Shown when no better explanation is available.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Shown when the collaborator reports an error without a message.
pub const COLLABORATOR_FAILURE: &str = "The storage service reported an error.";

/// Where accepted applications are appended.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    /// Remote storage collaborator reached over HTTP.
    Remote { endpoint: String },
    /// Local CSV sheet.
    Sheet { path: PathBuf },
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Remote { .. } => write!(f, "remote storage endpoint"),
            Destination::Sheet { path } => write!(f, "sheet {}", path.display()),
        }
    }
}

/// Coarse category of a failed submission.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// No response was received.
    Transport,
    /// The collaborator answered with a non-success HTTP status.
    Status(u16),
    /// The collaborator answered but reported an application-level error.
    Rejected,
    /// The response could not be understood.
    Malformed,
}

/// Result of a single submission attempt.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure { kind: FailureKind, message: String },
}

impl Outcome {
    fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Outcome::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// Return the response shape handed back to the form: `status` plus an
    /// optional `message`.
    ///
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Outcome::Success => serde_json::json!({ "status": "success" }),
            Outcome::Failure { message, .. } => {
                serde_json::json!({ "status": "error", "message": message })
            }
        }
    }
}

impl From<StorageResponse> for Outcome {
    fn from(response: StorageResponse) -> Self {
        match response.status.as_str() {
            "success" => Outcome::Success,
            "error" => Outcome::failure(
                FailureKind::Rejected,
                response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| COLLABORATOR_FAILURE.to_string()),
            ),
            other => {
                warn!("Unrecognised storage status '{}'.", other);
                Outcome::failure(FailureKind::Malformed, GENERIC_FAILURE)
            }
        }
    }
}

/// Interpret a raw collaborator response.
///
pub fn parse_response(status: u16, body: &[u8]) -> Outcome {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        return Outcome::failure(FailureKind::Status(status), message);
    }

    match serde_json::from_slice::<StorageResponse>(body) {
        Ok(response) => response.into(),
        Err(e) => {
            warn!("Failed to parse storage response: {}", e);
            Outcome::failure(FailureKind::Malformed, GENERIC_FAILURE)
        }
    }
}

enum Target {
    Remote(Client),
    Sheet(Sheet),
}

/// Forwards validated applications to the configured destination.
///
pub struct Relay {
    target: Target,
}

impl Relay {
    /// Returns a new relay bound to the given destination.
    ///
    pub fn new(destination: Destination) -> Result<Relay, RelayError> {
        debug!("Initializing relay for {}...", destination);
        let target = match destination {
            Destination::Remote { endpoint } => Target::Remote(Client::new(&endpoint)?),
            Destination::Sheet { path } => Target::Sheet(Sheet::new(path)),
        };
        Ok(Relay { target })
    }

    /// Make exactly one attempt to store the application.
    ///
    pub async fn submit(&self, application: &Application) -> Outcome {
        let payload = StoragePayload::from(application);
        let outcome = match &self.target {
            Target::Remote(client) => match client.post(&payload).await {
                Ok((status, body)) => parse_response(status.as_u16(), &body),
                Err(e) => {
                    error!("Storage request failed: {}", e.without_url());
                    Outcome::failure(FailureKind::Transport, GENERIC_FAILURE)
                }
            },
            Target::Sheet(sheet) => {
                let sheet = sheet.clone();
                match tokio::task::spawn_blocking(move || sheet.append(&payload)).await {
                    Ok(response) => response.into(),
                    Err(e) => {
                        error!("Sheet append task failed: {}", e);
                        Outcome::failure(FailureKind::Transport, GENERIC_FAILURE)
                    }
                }
            }
        };
        match &outcome {
            Outcome::Success => info!("Application for '{}' stored.", application.name),
            Outcome::Failure { kind, message } => {
                warn!("Application not stored ({:?}): {}", kind, message)
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{Residency, Team};
    use httpmock::MockServer;
    use serde_json::json;
    use tempfile::tempdir;

    fn application(teams: &[Team]) -> Application {
        Application {
            name: "Goutam".to_string(),
            enrollment: "E23BU1234".to_string(),
            course: "B.Tech CSE".to_string(),
            phone: "9876543210".to_string(),
            residency: Some(Residency::Hosteller),
            teams: teams.iter().copied().collect(),
            why: "I love technology and want to learn.".to_string(),
            portfolio: "https://github.com/x".to_string(),
            experience: String::new(),
        }
    }

    fn remote(server: &MockServer) -> Relay {
        Relay::new(Destination::Remote {
            endpoint: server.url("/exec"),
        })
        .unwrap()
    }

    #[test]
    fn test_parse_response_success() {
        assert_eq!(
            parse_response(200, br#"{"status":"success","data":"{}"}"#),
            Outcome::Success
        );
    }

    #[test]
    fn test_parse_response_collaborator_error() {
        assert_eq!(
            parse_response(200, br#"{"status":"error","message":"quota exceeded"}"#),
            Outcome::Failure {
                kind: FailureKind::Rejected,
                message: "quota exceeded".to_string()
            }
        );
        assert_eq!(
            parse_response(200, br#"{"status":"error"}"#),
            Outcome::Failure {
                kind: FailureKind::Rejected,
                message: COLLABORATOR_FAILURE.to_string()
            }
        );
    }

    #[test]
    fn test_parse_response_fails_closed() {
        let bodies: [&[u8]; 5] = [
            b"<html>Moved Temporarily</html>",
            br#"{"ok":true}"#,
            br#"{"status":"pending"}"#,
            br#"{"status":true}"#,
            b"",
        ];
        for body in bodies {
            assert_eq!(
                parse_response(200, body),
                Outcome::Failure {
                    kind: FailureKind::Malformed,
                    message: GENERIC_FAILURE.to_string()
                }
            );
        }
    }

    #[test]
    fn test_parse_response_http_status() {
        assert_eq!(
            parse_response(500, br#"{"success":false,"message":"Script error"}"#),
            Outcome::Failure {
                kind: FailureKind::Status(500),
                message: "Script error".to_string()
            }
        );
        assert_eq!(
            parse_response(404, b"Not Found"),
            Outcome::Failure {
                kind: FailureKind::Status(404),
                message: GENERIC_FAILURE.to_string()
            }
        );
    }

    #[test]
    fn test_outcome_to_json() {
        assert_eq!(Outcome::Success.to_json(), json!({ "status": "success" }));
        assert_eq!(
            Outcome::failure(FailureKind::Rejected, "quota exceeded").to_json(),
            json!({ "status": "error", "message": "quota exceeded" })
        );
    }

    #[tokio::test]
    async fn submit_success() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/exec")
                    .json_body(json!({
                        "name": "Goutam",
                        "enrollment": "E23BU1234",
                        "course": "B.Tech CSE",
                        "phone": "9876543210",
                        "residency": "Hosteller",
                        "teams": "Tech, Design",
                        "why": "I love technology and want to learn.",
                        "portfolio": "https://github.com/x",
                        "experience": ""
                    }));
                then.status(200)
                    .json_body(json!({ "status": "success", "data": "{}" }));
            })
            .await;

        let outcome = remote(&server)
            .submit(&application(&[Team::Design, Team::Tech]))
            .await;
        assert_eq!(outcome, Outcome::Success);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn submit_collaborator_error() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/exec");
                then.status(200)
                    .json_body(json!({ "status": "error", "message": "quota exceeded" }));
            })
            .await;

        let outcome = remote(&server).submit(&application(&[Team::Tech])).await;
        assert_eq!(
            outcome,
            Outcome::Failure {
                kind: FailureKind::Rejected,
                message: "quota exceeded".to_string()
            }
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn submit_server_error_does_not_leak_endpoint() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/exec");
                then.status(502).body("Bad Gateway");
            })
            .await;

        let outcome = remote(&server).submit(&application(&[Team::Pr])).await;
        match outcome {
            Outcome::Failure { kind, message } => {
                assert_eq!(kind, FailureKind::Status(502));
                assert_eq!(message, GENERIC_FAILURE);
                assert!(!message.contains(&server.base_url()));
            }
            Outcome::Success => panic!("expected failure"),
        }
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn submit_transport_error() {
        // Nothing listens on the discard port.
        let relay = Relay::new(Destination::Remote {
            endpoint: "http://127.0.0.1:9/exec".to_string(),
        })
        .unwrap();
        assert_eq!(
            relay.submit(&application(&[Team::Tech])).await,
            Outcome::Failure {
                kind: FailureKind::Transport,
                message: GENERIC_FAILURE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn submit_to_sheet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("applications.csv");
        let relay = Relay::new(Destination::Sheet { path: path.clone() }).unwrap();

        let outcome = relay.submit(&application(&[Team::Research])).await;
        assert_eq!(outcome, Outcome::Success);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Timestamp,Name,Enrollment"));
        assert!(contents.contains("Goutam,E23BU1234,B.Tech CSE,9876543210,Hosteller,Research"));
    }

    #[tokio::test]
    async fn submit_to_unwritable_sheet() {
        let dir = tempdir().unwrap();
        let relay = Relay::new(Destination::Sheet {
            path: dir.path().to_path_buf(),
        })
        .unwrap();

        match relay.submit(&application(&[Team::Research])).await {
            Outcome::Failure { kind, message } => {
                assert_eq!(kind, FailureKind::Rejected);
                assert!(message.contains("Failed to write sheet"));
            }
            Outcome::Success => panic!("expected failure"),
        }
    }

    #[test]
    fn test_destination_display_hides_endpoint() {
        let destination = Destination::Remote {
            endpoint: "https://script.google.com/macros/s/secret/exec".to_string(),
        };
        assert!(!destination.to_string().contains("secret"));
    }
}
