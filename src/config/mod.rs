//! Configuration management module.
//!
//! This module handles loading and saving the configuration file, which holds
//! the storage destination, the phone rule and the theme preference.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use crate::relay::Destination;
use crate::validation::PhoneRule;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/registration-tui";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub endpoint: Option<String>,
    pub sheet_path: Option<PathBuf>,
    pub phone_leading_digits: String,
    pub theme_name: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_path: Option<PathBuf>,
    #[serde(default = "default_phone_leading_digits")]
    pub phone_leading_digits: String,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
}

fn default_phone_leading_digits() -> String {
    "6-9".to_string()
}

fn default_theme_name() -> String {
    "tokyo-night".to_string()
}

/// Command-line values that take precedence over the file.
///
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    pub endpoint: Option<&'a str>,
    pub sheet: Option<&'a str>,
    pub phone_digits: Option<&'a str>,
}

impl Config {
    /// Return a new instance with default values.
    ///
    pub fn new() -> Config {
        Config {
            endpoint: None,
            sheet_path: None,
            phone_leading_digits: default_phone_leading_digits(),
            theme_name: default_theme_name(),
            file_path: None,
        }
    }

    /// Load the configuration file from the custom directory if provided or
    /// the default one otherwise. A missing file is created with defaults so
    /// it can be edited.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if file_path.exists() {
            let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.endpoint = data.endpoint.filter(|e| !e.trim().is_empty());
            self.sheet_path = data.sheet_path;
            self.phone_leading_digits = data.phone_leading_digits;
            self.theme_name = data.theme_name;
        } else {
            self.save()?;
        }

        Ok(())
    }

    /// Attempt to serialize the configuration data and write it to the disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            endpoint: self.endpoint.clone(),
            sheet_path: self.sheet_path.clone(),
            phone_leading_digits: self.phone_leading_digits.clone(),
            theme_name: self.theme_name.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Apply command-line overrides. An explicit sheet replaces a configured
    /// endpoint unless an endpoint is passed as well.
    ///
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(sheet) = overrides.sheet {
            self.sheet_path = Some(PathBuf::from(sheet));
            if overrides.endpoint.is_none() {
                self.endpoint = None;
            }
        }
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = Some(endpoint.to_string());
        }
        if let Some(digits) = overrides.phone_digits {
            self.phone_leading_digits = digits.to_string();
        }
    }

    /// Resolve where submissions go. The endpoint wins over the sheet.
    ///
    pub fn destination(&self) -> Result<Destination, ConfigError> {
        match (&self.endpoint, &self.sheet_path) {
            (Some(endpoint), _) => Ok(Destination::Remote {
                endpoint: endpoint.clone(),
            }),
            (None, Some(path)) => Ok(Destination::Sheet { path: path.clone() }),
            (None, None) => Err(ConfigError::DestinationNotSet),
        }
    }

    pub fn phone_rule(&self) -> Result<PhoneRule, ConfigError> {
        Ok(self.phone_leading_digits.parse()?)
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
