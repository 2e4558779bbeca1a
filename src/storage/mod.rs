//! Storage collaborator boundary.
//!
//! The storage collaborator exposes a single `append(record)` operation that
//! stores one row per submission and acknowledges with a status. This module
//! defines the wire shapes of that exchange and a CSV-backed sheet which
//! fulfils the same contract locally.

mod error;

pub use error::StorageError;

use crate::application::Application;
use chrono::{DateTime, Local};
use log::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

/// Column headers of the persisted sheet, in storage order.
pub const COLUMNS: [&str; 10] = [
    "Timestamp",
    "Name",
    "Enrollment",
    "Course",
    "Phone",
    "Residency",
    "Team Choices",
    "Why",
    "Portfolio",
    "Experience",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Record sent to the storage collaborator.
///
/// Same shape as an application except that team choices are flattened into
/// a single comma-joined string.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoragePayload {
    pub name: String,
    pub enrollment: String,
    pub course: String,
    pub phone: String,
    pub residency: String,
    pub teams: String,
    pub why: String,
    pub portfolio: String,
    pub experience: String,
}

impl From<&Application> for StoragePayload {
    fn from(application: &Application) -> Self {
        StoragePayload {
            name: application.name.clone(),
            enrollment: application.enrollment.clone(),
            course: application.course.clone(),
            phone: application.phone.clone(),
            residency: application
                .residency
                .map(|r| r.as_str().to_string())
                .unwrap_or_default(),
            teams: application.teams_joined(),
            why: application.why.clone(),
            portfolio: application.portfolio.clone(),
            experience: application.experience.clone(),
        }
    }
}

/// Acknowledgment returned by the storage collaborator.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StorageResponse {
    pub fn success(data: Option<serde_json::Value>) -> Self {
        StorageResponse {
            status: String::from("success"),
            data,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        StorageResponse {
            status: String::from("error"),
            data: None,
            message: Some(message.into()),
        }
    }
}

/// One persisted row: the payload stamped with the moment of append.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetRow {
    pub timestamp: String,
    pub payload: StoragePayload,
}

impl SheetRow {
    pub fn new(payload: StoragePayload, appended_at: DateTime<Local>) -> Self {
        SheetRow {
            timestamp: appended_at.format(TIMESTAMP_FORMAT).to_string(),
            payload,
        }
    }

    /// Return cell values in column order.
    ///
    pub fn cells(&self) -> [&str; 10] {
        let p = &self.payload;
        [
            &self.timestamp,
            &p.name,
            &p.enrollment,
            &p.course,
            &p.phone,
            &p.residency,
            &p.teams,
            &p.why,
            &p.portfolio,
            &p.experience,
        ]
    }
}

/// Local CSV sheet standing in for the remote spreadsheet.
///
#[derive(Clone, Debug)]
pub struct Sheet {
    path: PathBuf,
}

impl Sheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Sheet { path: path.into() }
    }

    /// Append one row and acknowledge it the way the remote collaborator
    /// does. Failures are reported in the response, never raised.
    ///
    pub fn append(&self, payload: &StoragePayload) -> StorageResponse {
        debug!("Appending row to sheet {}...", self.path.display());
        match self.try_append(payload.clone()) {
            Ok(row) => {
                info!("Appended row for '{}' at {}.", row.payload.name, row.timestamp);
                StorageResponse::success(serde_json::to_value(&row.payload).ok())
            }
            Err(e) => {
                error!("Failed to append row: {}", e);
                StorageResponse::error(e.to_string())
            }
        }
    }

    fn try_append(&self, payload: StoragePayload) -> Result<SheetRow, StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let is_new = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            writer.write_record(COLUMNS)?;
        }

        let row = SheetRow::new(payload, Local::now());
        writer.write_record(row.cells())?;
        writer.flush()?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{Residency, Team};
    use chrono::TimeZone;
    use std::path::Path;
    use tempfile::tempdir;

    fn application() -> Application {
        Application {
            name: "Goutam".to_string(),
            enrollment: "E23BU1234".to_string(),
            course: "B.Tech CSE".to_string(),
            phone: "9876543210".to_string(),
            residency: Some(Residency::Hosteller),
            teams: [Team::Design, Team::Tech].into_iter().collect(),
            why: "I love technology and want to learn.".to_string(),
            portfolio: "https://github.com/x".to_string(),
            experience: String::new(),
        }
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_payload_flattens_teams() {
        let payload = StoragePayload::from(&application());
        assert_eq!(payload.teams, "Tech, Design");
        assert_eq!(payload.residency, "Hosteller");
    }

    #[test]
    fn test_sheet_row_column_order() {
        let appended_at = Local.with_ymd_and_hms(2025, 8, 1, 9, 30, 0).unwrap();
        let row = SheetRow::new(StoragePayload::from(&application()), appended_at);
        assert_eq!(
            row.cells(),
            [
                "2025-08-01 09:30:00",
                "Goutam",
                "E23BU1234",
                "B.Tech CSE",
                "9876543210",
                "Hosteller",
                "Tech, Design",
                "I love technology and want to learn.",
                "https://github.com/x",
                "",
            ]
        );
    }

    #[test]
    fn test_storage_response_shapes() {
        let response: StorageResponse =
            serde_json::from_str(r#"{"status":"error","message":"quota exceeded"}"#).unwrap();
        assert_eq!(response, StorageResponse::error("quota exceeded"));
        assert!(serde_json::from_str::<StorageResponse>(r#"{"message":"x"}"#).is_err());
    }

    #[test]
    fn test_sheet_append_writes_header_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sheets").join("applications.csv");
        let sheet = Sheet::new(&path);
        let payload = StoragePayload::from(&application());

        assert_eq!(sheet.append(&payload).status, "success");
        assert_eq!(sheet.append(&payload).status, "success");

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], COLUMNS.to_vec());
        assert_eq!(rows[1][1], "Goutam");
        assert_eq!(rows[1][6], "Tech, Design");
        assert!(!rows[1][0].is_empty());
        assert_eq!(rows[2][1..], rows[1][1..]);
    }

    #[test]
    fn test_sheet_append_quotes_free_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("applications.csv");
        let mut application = application();
        application.why = "Curious, driven, and \"hands-on\"\nover two lines".to_string();

        Sheet::new(&path).append(&StoragePayload::from(&application));

        let rows = read_rows(&path);
        assert_eq!(rows[1][7], application.why);
    }

    #[test]
    fn test_sheet_append_reports_failure() {
        let dir = tempdir().unwrap();
        let sheet = Sheet::new(dir.path());
        let response = sheet.append(&StoragePayload::from(&application()));
        assert_eq!(response.status, "error");
        assert!(response.message.unwrap().contains("Failed to write sheet"));
    }
}
