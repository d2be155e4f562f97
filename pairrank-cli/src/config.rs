/// Config file loading and creation for pairrank CLI.
///
/// Config lives at ~/.config/pairrank/config.toml.
/// All fields are optional. CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default, Debug, PartialEq)]
pub struct PairrankConfig {
    pub catalog: Option<String>,
    pub owner: Option<String>,
    /// Preset label, a number, or "all".
    pub pool_size: Option<String>,
    pub include_covers: Option<bool>,
    pub shuffle: Option<bool>,
    pub merge_side_projects: Option<bool>,
    pub allow_skip: Option<bool>,
    pub require_owner_name: Option<bool>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# pairrank configuration
# All values here can be overridden by CLI flags.

# Catalog JSON file: {\"songs\": [{\"name\", \"artist\", \"category\", \"times_played\"}]}
# catalog = \"/path/to/goose_songs.json\"

# Name attached to share codes
# owner = \"Alice\"

# How many of the most played items to rank: 25, 50, 100, 150 or \"all\"
# pool_size = \"50\"

# Include cover songs in the pool
# include_covers = true

# Offer the pool in random order instead of most played first
# shuffle = false

# Count side projects as originals in the category breakdown
# merge_side_projects = false

# Allow sending the current item to the back of the queue
# allow_skip = true

# Refuse to print a share code without an owner name
# require_owner_name = false
";

/// Returns the default config path: ~/.config/pairrank/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("pairrank").join("config.toml")
}

pub fn parse_config(content: &str) -> Result<PairrankConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> PairrankConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            PairrankConfig::default()
        }
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}
