use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::caption::model::{CaptionText, StyleConfig};
use crate::foundation::error::{MemeError, MemeResult};

/// JSON-facing caption configuration: the text to draw and how to draw it.
///
/// Every field is optional and falls back to the editor defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionConfig {
    pub caption: CaptionText,
    pub style: StyleConfig,
}

impl CaptionConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> MemeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| MemeError::config(format!("parse caption config JSON: {e}")))
    }

    pub fn from_json_str(s: &str) -> MemeResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| MemeError::config(format!("parse caption config JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> MemeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MemeError::config(format!("open caption config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> MemeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MemeError::config(format!("serialize caption config: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/caption/config.rs"]
mod tests;
