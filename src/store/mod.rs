//! JSON-backed settings shared by the main form and the settings windows.

pub mod label_size;
pub mod materials;

use std::fs;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};

pub use label_size::LabelSizeStore;
pub use materials::MaterialStore;

/// Reads `path`, writing `default` there first if the file does not exist yet.
fn read_or_create<T: Serialize + DeserializeOwned>(path: &Path, default: impl FnOnce() -> T) -> Result<T> {
    if !path.exists() {
        write_json(path, &default())?;
        log::info!("created {}", path.display());
    }

    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| Error::Json {
        path: path.to_owned(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|source| Error::Json {
        path: path.to_owned(),
        source,
    })?;
    fs::write(path, json)?;
    Ok(())
}
