use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alb::AlbInfo;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unable to serialize the document: {0}")]
    Serialization(String),

    #[error("Unable to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

/// Serializes the document, always ending with a single newline.
pub fn render(info: &AlbInfo, format: Format) -> Result<String, Error> {
    let contents = match format {
        Format::Json => serde_json::to_string_pretty(info)
            .map_err(|error| Error::Serialization(error.to_string()))?,
        Format::Yaml => serde_yaml::to_string(info)
            .map_err(|error| Error::Serialization(error.to_string()))?,
    };

    return Ok(format!("{}\n", contents.trim_end()));
}

/// Writes to `path` when given, stdout otherwise.
pub fn write(info: &AlbInfo, format: Format, path: Option<&Path>) -> Result<(), Error> {
    let contents = render(info, format)?;

    match path {
        Some(path) => fs::write(path, contents).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(contents.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|source| Error::Io {
                    path: String::from("<stdout>"),
                    source,
                })
        }
    }
}
