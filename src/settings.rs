use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Table configuration, loaded from a JSON file. Missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rows: usize,
    pub columns: usize,
    pub column_headers: Vec<String>,
    /// Decimal places shown and kept on edit. `None` keeps full precision.
    pub precision: Option<usize>,
    /// Publish an HTML table next to the text on copy. Blank cells in such a
    /// table do not paste back, so this is off by default.
    pub copy_html: bool,
    pub log_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: 20,
            columns: 2,
            column_headers: vec!["Period (s)".to_string(), "Sa (g)".to_string()],
            precision: None,
            copy_html: false,
            log_path: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
