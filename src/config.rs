use std::env;
use std::path::PathBuf;

use chrono_tz::Tz;

use crate::error::{Error, Result};

pub const DIR_VAR: &str = "LABEL_PRINTER_DIR";
pub const TIMEZONE_VAR: &str = "LABEL_PRINTER_TZ";
pub const PRINTER_VAR: &str = "LABEL_PRINTER_NAME";

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Mexico_City;
#[cfg(not(windows))]
const APP_DIR_NAME: &str = "label-printer";
#[cfg(windows)]
const WINDOWS_DIR_NAME: &str = "EpsonDriver";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where the label size and material files live.
    pub data_dir: PathBuf,
    pub timezone: Tz,
    /// `None` prints to the system default printer.
    pub printer: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let lookup = |key: &str| env::var(key).ok().filter(|value| !value.trim().is_empty());
        Self::from_lookup(lookup)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = match lookup(DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir(&lookup)?,
        };

        let timezone = match lookup(TIMEZONE_VAR) {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|e| Error::Config(format!("{TIMEZONE_VAR}={name}: {e}")))?,
            None => DEFAULT_TIMEZONE,
        };

        Ok(Self {
            data_dir,
            timezone,
            printer: lookup(PRINTER_VAR).map(|name| name.trim().to_owned()),
        })
    }
}

#[cfg(windows)]
fn default_data_dir(lookup: &impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
    lookup("APPDATA")
        .map(|appdata| PathBuf::from(appdata).join(WINDOWS_DIR_NAME))
        .ok_or_else(|| Error::Config("APPDATA is not set".to_owned()))
}

#[cfg(not(windows))]
fn default_data_dir(lookup: &impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
    if let Some(xdg) = lookup("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join(APP_DIR_NAME));
    }

    lookup("HOME")
        .map(|home| PathBuf::from(home).join(".config").join(APP_DIR_NAME))
        .ok_or_else(|| Error::Config(format!("neither {DIR_VAR} nor HOME is set")))
}
