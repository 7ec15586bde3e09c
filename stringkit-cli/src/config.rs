//! Optional TOML configuration file.
//!
//! ```toml
//! [strings]
//! separator = "."
//! ```

use std::{fs, path::Path};

use serde::Deserialize;
use stringkit::ParserOptions;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Options handed to the `.strings` parser.
    pub strings: ParserOptions,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Invalid config: {}", e))
    }
}

/// Load the config file at `path`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config '{}': {}", path.display(), e))?;
    Config::from_toml(&content)
}
