use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{read_or_create, write_json};
use crate::error::{Error, Result};

pub const FILE_NAME: &str = "materiales.json";

pub const DEFAULT_MATERIALS: [&str; 7] = [
    "Carton Nacional",
    "Carton (Celanes)",
    "Empaque",
    "Playo",
    "Bolsa de Plastico",
    "Lamina Negra",
    "Bolsa de Carton",
];

#[derive(Debug, Serialize, Deserialize)]
struct MaterialFile {
    #[serde(rename = "materiales", default)]
    materials: Vec<String>,
}

impl Default for MaterialFile {
    fn default() -> Self {
        Self {
            materials: DEFAULT_MATERIALS.iter().map(|m| (*m).to_owned()).collect(),
        }
    }
}

/// Ordered list of material descriptions offered on the print form.
///
/// Every mutation re-reads the file, so edits from another window are never overwritten with a
/// stale copy.
#[derive(Debug, Clone)]
pub struct MaterialStore {
    path: PathBuf,
}

/// Trimmed material name, or `EmptyMaterial` when nothing is left.
pub fn normalize(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::EmptyMaterial);
    }
    Ok(name.to_owned())
}

impl MaterialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> Result<Vec<String>> {
        read_or_create(&self.path, MaterialFile::default).map(|file| file.materials)
    }

    pub fn add(&self, name: &str) -> Result<()> {
        let name = normalize(name)?;
        let mut materials = self.list()?;
        if materials.contains(&name) {
            return Err(Error::DuplicateMaterial(name));
        }

        materials.push(name);
        self.save(materials)
    }

    pub fn rename(&self, old: &str, new: &str) -> Result<()> {
        let new = normalize(new)?;
        let mut materials = self.list()?;
        let index = materials
            .iter()
            .position(|m| m == old)
            .ok_or_else(|| Error::MissingMaterial(old.to_owned()))?;

        if materials[index] == new {
            return Ok(());
        }
        if materials.contains(&new) {
            return Err(Error::DuplicateMaterial(new));
        }

        materials[index] = new;
        self.save(materials)
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        let mut materials = self.list()?;
        let index = materials
            .iter()
            .position(|m| m == name)
            .ok_or_else(|| Error::MissingMaterial(name.to_owned()))?;

        materials.remove(index);
        self.save(materials)
    }

    fn save(&self, materials: Vec<String>) -> Result<()> {
        write_json(&self.path, &MaterialFile { materials })
    }
}
