//! Reading and writing records in the `.conf` region format.
//!
//! ```text
//! CONF_abc = {
//! 	abc.a = 100;
//! 	abc.xyz.mnp.m = 4444;
//! };
//! ```

pub mod codec;
pub mod document;
pub mod error;

use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use tracing::info;

pub use document::{ConfDocument, Entry, Region};
pub use error::ConfError;

/// Parses `text` and decodes region `CONF_<name>` into a `T`.
pub fn from_str<T: DeserializeOwned>(text: &str, name: &str) -> Result<T, ConfError> {
    let doc = ConfDocument::parse(text)?;
    let region = doc
        .region(name)
        .ok_or_else(|| ConfError::MissingRegion(name.to_string()))?;
    codec::decode(region, name)
}

/// Renders `value` as a document holding the single region `CONF_<name>`.
pub fn to_string<T: Serialize>(value: &T, name: &str) -> Result<String, ConfError> {
    let mut doc = ConfDocument::default();
    doc.upsert_region(codec::encode(value, name)?);
    Ok(doc.render())
}

pub fn load<T: DeserializeOwned>(path: &Path, name: &str) -> Result<T, ConfError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = from_str(&text, name)?;
    info!("Loaded CONF_{} from {}", name, path.display());
    Ok(value)
}

/// Writes `value` to `path`, replacing any existing file.
///
/// The parent directory must already exist.
pub fn save<T: Serialize>(path: &Path, name: &str, value: &T) -> Result<(), ConfError> {
    let content = to_string(value, name)?;
    std::fs::write(path, content).map_err(|source| ConfError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Saved CONF_{} to {}", name, path.display());
    Ok(())
}
