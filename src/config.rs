use serde::{Deserialize, Serialize};
use std::{fs, io, path::PathBuf};
use validator::Validate;

use crate::writer::Format;

pub const DEFAULT_STACK_NAME: &str = "hashi-kerberos-test";
pub const DEFAULT_REGION: &str = "ap-northeast-1";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("File {0} not found")]
    FileNotFound(String),

    #[error("Parsing error: {0}")]
    ParsingError(String),

    #[error("Validation errors: {0}")]
    ValidationError(String),

    #[error("Unknown error occurred: {0}")]
    Unknown(String),
}

/// Optional on-disk settings. Every field falls back to the CLI default when absent.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_name: Option<String>,

    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,

    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

/// Which stack to describe and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackQuery {
    pub stack_name: String,
    pub region: String,
    pub endpoint_url: Option<String>,
}

impl Default for StackQuery {
    fn default() -> Self {
        Self {
            stack_name: DEFAULT_STACK_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
        }
    }
}

/// Values given on the command line. `None` means "not passed".
#[derive(Debug, Default)]
pub struct Overrides {
    pub stack_name: Option<String>,
    pub region: Option<String>,
    pub format: Option<Format>,
    pub endpoint_url: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct Settings {
    pub query: StackQuery,
    pub format: Format,
}

impl Settings {
    /// Command line wins over the config file, the config file wins over defaults.
    pub fn resolve(overrides: Overrides, file: Option<ConfigFile>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = StackQuery::default();

        let query = StackQuery {
            stack_name: overrides
                .stack_name
                .or(file.stack_name)
                .unwrap_or(defaults.stack_name),
            region: overrides.region.or(file.region).unwrap_or(defaults.region),
            endpoint_url: overrides.endpoint_url.or(file.endpoint_url),
        };
        let format = overrides.format.or(file.format).unwrap_or_default();

        return Self { query, format };
    }
}

pub fn parse(path: &PathBuf) -> Result<ConfigFile, Error> {
    let contents = match fs::read_to_string(path) {
        Ok(raw_contents) => Ok(raw_contents),
        Err(error) => match error.kind() {
            io::ErrorKind::NotFound => Err(Error::FileNotFound(path.display().to_string())),
            _ => Err(Error::Unknown(error.to_string())),
        },
    }?;

    let config: ConfigFile = match serde_yaml::from_str(&contents) {
        Ok(data) => Ok(data),
        Err(error) => Err(Error::ParsingError(error.to_string())),
    }?;

    match config.validate() {
        Ok(_) => (),
        Err(error) => return Err(Error::ValidationError(error.to_string())),
    }

    return Ok(config);
}
