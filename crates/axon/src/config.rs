//! Configuration file loading for axon.
//!
//! Reads `axon.config.json` from the current working directory. A
//! malformed or unreadable config produces a warning and defaults, never
//! a hard failure.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level axon configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AxonConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Tree dumping configuration.
    #[serde(default)]
    pub dump: DumpConfig,
}

/// Configuration for tree building and output.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpConfig {
    /// Pretty-print JSON output even without `--pretty`.
    #[serde(default)]
    pub pretty_default: bool,

    /// Attribute names captured onto nodes in addition to the standard
    /// allow-list.
    #[serde(default)]
    pub extra_attributes: Vec<String>,
}

/// Load `axon.config.json` from the given directory (or CWD if None).
pub fn load_config(dir: Option<&Path>) -> AxonConfig {
    let base = dir
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let config_path = base.join("axon.config.json");

    if !config_path.exists() {
        return AxonConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "\x1b[33mWarning:\x1b[0m Failed to parse {}: {}",
                    config_path.display(),
                    e
                );
                AxonConfig::default()
            }
        },
        Err(e) => {
            eprintln!(
                "\x1b[33mWarning:\x1b[0m Failed to read {}: {}",
                config_path.display(),
                e
            );
            AxonConfig::default()
        }
    }
}
