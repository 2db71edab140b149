pub mod types;

pub use types::{SubTrackConfig, default_file_extensions};

use crate::error::AppError;
use crate::tracks::is_valid_code;
use std::path::{Path, PathBuf};
use tracing::info;
use types::RawLegacyConfig;

/// Name of the per-directory configuration file
pub const CONFIG_FILE_NAME: &str = "dual_sub_conf.toml";

/// Fixed-track configuration for legacy mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyConfig {
    /// Rendered on the first line of each merged cue
    pub first_line_sub: SubTrackConfig,
    pub second_line_sub: SubTrackConfig,
    /// Lower-cased, without leading dot
    pub file_extensions: Vec<String>,
}

impl LegacyConfig {
    /// Get the configuration file path for a target directory
    pub fn config_path(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE_NAME)
    }

    /// Load the configuration of a directory; a missing file is an error
    pub fn load(dir: &Path) -> Result<Self, AppError> {
        let path = Self::config_path(dir);
        if !path.is_file() {
            return Err(AppError::Config(format!(
                "config file {} not found",
                path.display()
            )));
        }
        let config = Self::load_from_file(&path)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Like `load`, but a missing file yields `None`
    pub fn load_optional(dir: &Path) -> Result<Option<Self>, AppError> {
        if Self::config_path(dir).is_file() {
            Self::load(dir).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, AppError> {
        let raw: RawLegacyConfig = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Malformed config: {}", e)))?;
        Self::validate(raw)
    }

    fn validate(raw: RawLegacyConfig) -> Result<Self, AppError> {
        let first_line_sub = raw
            .first_line_sub
            .ok_or_else(|| AppError::Config("missing required key 'first_line_sub'".to_string()))?;
        let second_line_sub = raw
            .second_line_sub
            .ok_or_else(|| AppError::Config("missing required key 'second_line_sub'".to_string()))?;

        for sub in [&first_line_sub, &second_line_sub] {
            if !is_valid_code(&sub.lang_code) {
                return Err(AppError::Config(format!(
                    "invalid lang_code '{}': use letters, digits and '-' only",
                    sub.lang_code
                )));
            }
        }

        let file_extensions: Vec<String> = raw
            .file_extensions
            .unwrap_or_else(default_file_extensions)
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        if file_extensions.is_empty() {
            return Err(AppError::Config(
                "file_extensions must list at least one extension".to_string(),
            ));
        }

        Ok(Self {
            first_line_sub,
            second_line_sub,
            file_extensions,
        })
    }

    /// Whether a file's extension is in the allow-list
    pub fn accepts(&self, path: &Path) -> bool {
        extension_allowed(path, &self.file_extensions)
    }
}

/// Case-insensitive extension check against a normalized allow-list
pub fn extension_allowed(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}
