// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::OutlineError;

mod filter;

pub use filter::PathFilter;

/// How consecutive `include` calls are recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncludePolicy {
    /// Adjacent includes share one Includes block, like every other
    /// mergeable statement kind.
    #[default]
    MergeAdjacent,
    /// Every include call opens its own Includes block.
    AlwaysNew,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnorePaths {
    /// Regular expressions matched against the start of each path.
    pub begin_with: Vec<String>,
    /// Plain substrings; any path containing one is skipped.
    pub contains: Vec<String>,
}

/// Settings for outlining and manifest discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    pub include_policy: IncludePolicy,
    /// Record `class { 'name': }` declarations as includes rather than resources.
    pub class_declarations_as_includes: bool,
    pub ignore_paths: IgnorePaths,
    pub extension: String,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            include_policy: IncludePolicy::default(),
            class_declarations_as_includes: false,
            ignore_paths: IgnorePaths::default(),
            extension: "pp".to_string(),
        }
    }
}

impl OutlineConfig {
    /// Parse a JSON config. Missing keys keep their defaults.
    ///
    /// # Examples
    /// ```
    /// use manifest_outline::config::{IncludePolicy, OutlineConfig};
    ///
    /// let config = OutlineConfig::from_str(r#"{ "include_policy": "always_new" }"#).unwrap();
    /// assert_eq!(config.include_policy, IncludePolicy::AlwaysNew);
    /// assert_eq!(config.extension, "pp");
    /// ```
    pub fn from_str(content: &str) -> Result<Self, OutlineError> {
        let config: Self = serde_json::from_str(content).map_err(|e| OutlineError::ConfigError {
            message: format!("Invalid config: {}", e),
            hint: Some("The config file must be a JSON object".into()),
            code: Some(310),
        })?;
        config.path_filter()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OutlineError> {
        let content = fs::read_to_string(&path).map_err(|e| OutlineError::FileError {
            message: format!("Failed to read file: {}", e),
            path: path.as_ref().to_string_lossy().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;
        debug!(path = %path.as_ref().display(), "loaded config");
        Self::from_str(&content)
    }

    /// Load from the primary path, falling back to `fallback` when the
    /// primary file cannot be read. Invalid content is never retried.
    pub fn from_file_with_fallback<P: AsRef<Path>>(primary: P, fallback: P) -> Result<Self, OutlineError> {
        match Self::from_file(&primary) {
            Ok(config) => Ok(config),
            Err(OutlineError::FileError { .. }) => {
                Self::from_file(&fallback).map_err(|e| match e {
                    OutlineError::FileError { message, .. } => OutlineError::FileError {
                        message: format!(
                            "Failed to load config from primary path '{}' or fallback path '{}': {}",
                            primary.as_ref().display(),
                            fallback.as_ref().display(),
                            message
                        ),
                        path: format!(
                            "{} (fallback: {})",
                            primary.as_ref().display(),
                            fallback.as_ref().display()
                        ),
                        hint: Some("Check that at least one of the config files exists".into()),
                        code: Some(302),
                    },
                    other => other,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// `<config dir>/manifest-outline/config.json`, when the platform has a
    /// config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("manifest-outline").join("config.json"))
    }

    /// Load the user's config file if there is one, defaults otherwise.
    pub fn load_default() -> Result<Self, OutlineError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(path),
            _ => {
                debug!("no config file found; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Compile the ignore rules.
    pub fn path_filter(&self) -> Result<PathFilter, OutlineError> {
        PathFilter::new(&self.ignore_paths)
    }
}
