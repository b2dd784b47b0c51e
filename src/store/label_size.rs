use std::path::{Path, PathBuf};

use super::{read_or_create, write_json};
use crate::error::Result;
use crate::label::LabelSize;

pub const FILE_NAME: &str = "config_etiqueta.json";

#[derive(Debug, Clone)]
pub struct LabelSizeStore {
    path: PathBuf,
}

impl LabelSizeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current size, creating the file with 76 x 51 mm on first use.
    pub fn get(&self) -> Result<LabelSize> {
        read_or_create(&self.path, LabelSize::default)
    }

    pub fn set(&self, size: LabelSize) -> Result<()> {
        size.validate()?;
        write_json(&self.path, &size)?;
        log::info!("label size set to {size}");
        Ok(())
    }
}
