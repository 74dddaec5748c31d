//! Run and palette options with TOML preset support.
//!
//! Everything a UI shell lets the user tweak (algorithm, speed, array size,
//! height range, colors) lives here. Options serialize to/from TOML so
//! presets can be saved and reloaded.

mod colors;
mod run;

use std::path::Path;

pub use colors::ColorOptions;
pub use run::{validate_len, RunOptions, MAX_LEN};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SortError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[run]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Algorithm, speed and array parameters.
    pub run: RunOptions,
    /// Color palette options.
    #[schemars(skip)]
    pub colors: ColorOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, SortError> {
        let content = std::fs::read_to_string(path).map_err(SortError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| SortError::OptionsParse(e.to_string()))?;
        options.run.validate()?;
        log::debug!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SortError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SortError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SortError::Io)?;
        }
        std::fs::write(path, content).map_err(SortError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Load the preset called `name` from `dir`.
    ///
    /// Only names reported by [`list_presets`](Self::list_presets) resolve,
    /// so `name` cannot reach outside `dir`.
    pub fn load_preset(dir: &Path, name: &str) -> Result<Self, SortError> {
        let available = Self::list_presets(dir);
        if !available.iter().any(|p| p == name) {
            return Err(SortError::UnknownPreset {
                name: name.to_owned(),
                available,
            });
        }
        Self::load(&dir.join(format!("{name}.toml")))
    }
}
