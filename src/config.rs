use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::errors::{OutlineError, Result};
use crate::types::Dialect;

/// Name of the per-project configuration file.
pub const CONFIG_FILENAME: &str = ".codeoutline.json";

/// Default ceiling on source size, in characters.
pub const DEFAULT_MAX_FILE_CHARS: usize = 1_000_000;

/// Configuration for outlining.
///
/// Controls the size ceiling and which files a directory scan picks up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Schema version of the configuration.
    pub version: u32,
    /// Sources longer than this many characters are rejected before parsing.
    pub max_file_chars: usize,
    /// Glob patterns for files to skip during directory scans.
    pub exclude: Vec<String>,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            version: 1,
            max_file_chars: DEFAULT_MAX_FILE_CHARS,
            exclude: vec![
                "**/node_modules/**".to_string(),
                "**/.git/**".to_string(),
                "**/dist/**".to_string(),
                "**/build/**".to_string(),
                "**/*.min.js".to_string(),
                "**/__pycache__/**".to_string(),
                "**/.venv/**".to_string(),
            ],
        }
    }
}

/// Returns the path of the configuration file for a project root.
pub fn get_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILENAME)
}

/// Loads the configuration stored in a project root.
///
/// Falls back to the default configuration when no file exists.
pub fn load_config(project_root: &Path) -> Result<OutlineConfig> {
    load_config_file(&get_config_path(project_root))
}

/// Loads a configuration file, returning defaults if it does not exist.
pub fn load_config_file(config_path: &Path) -> Result<OutlineConfig> {
    if !config_path.exists() {
        return Ok(OutlineConfig::default());
    }

    let contents = fs::read_to_string(config_path).map_err(|e| OutlineError::Config {
        message: format!(
            "failed to read config file '{}': {}",
            config_path.display(),
            e
        ),
    })?;

    serde_json::from_str(&contents).map_err(|e| OutlineError::Config {
        message: format!(
            "failed to parse config file '{}': {}",
            config_path.display(),
            e
        ),
    })
}

/// Saves the configuration into a project root using an atomic write.
pub fn save_config(project_root: &Path, config: &OutlineConfig) -> Result<()> {
    let config_path = get_config_path(project_root);
    let tmp_path = config_path.with_extension("json.tmp");

    let json = serde_json::to_string_pretty(config).map_err(|e| OutlineError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| OutlineError::Config {
        message: format!(
            "failed to write temporary config file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, &config_path).map_err(|e| OutlineError::Config {
        message: format!(
            "failed to rename temporary config file '{}' to '{}': {}",
            tmp_path.display(),
            config_path.display(),
            e
        ),
    })?;

    Ok(())
}

/// Determines whether a directory scan should pick up a file.
///
/// The file must have a supported extension and match no exclude pattern.
pub fn should_include_file(file_path: &str, config: &OutlineConfig) -> bool {
    if Dialect::from_path(Path::new(file_path)).is_none() {
        return false;
    }

    let match_opts = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    !config.exclude.iter().any(|pattern_str| {
        Pattern::new(pattern_str)
            .map(|pattern| pattern.matches_with(file_path, match_opts))
            .unwrap_or(false)
    })
}
