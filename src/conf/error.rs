use std::path::PathBuf;

use thiserror::Error;

/// Error type for `.conf` file operations.
#[derive(Debug, Error)]
pub enum ConfError {
    /// The file could not be opened, read or written.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text is not a well-formed `.conf` document.
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// No `CONF_<name>` region was found.
    #[error("no CONF_{0} region found")]
    MissingRegion(String),

    /// An entry value is neither an integer nor a float.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    /// A key is used both as a group and as a value.
    #[error("conflicting entry for {key}")]
    Conflict { key: String },

    /// A record field has a type the format cannot express.
    #[error("unsupported value type for {key}")]
    Unsupported { key: String },

    /// The entries could not be mapped onto the record.
    #[error("failed to decode record: {0}")]
    Decode(#[from] toml::de::Error),

    /// The record could not be turned into entries.
    #[error("failed to encode record: {0}")]
    Encode(#[from] toml::ser::Error),
}
