//! Configuration structures for flyer analysis.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{MatchitError, Result};

/// Main configuration for the matchit pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchitConfig {
    /// Vision API client configuration.
    pub client: ClientConfig,

    /// Product extraction configuration.
    pub extraction: ExtractionConfig,

    /// Product search configuration.
    pub search: SearchConfig,

    /// Output configuration.
    pub export: ExportConfig,
}

/// Vision API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the generative language API.
    pub endpoint: String,

    /// Model used for flyer analysis.
    pub model: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: 30,
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

/// Product extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum trimmed length of a structured product name.
    pub min_name_len: usize,

    /// Minimum length of a product name recovered by the line scan.
    pub fallback_min_name_len: usize,

    /// Scan the whole text line by line when no product section matched.
    pub line_fallback: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_name_len: 2,
            fallback_min_name_len: 3,
            line_fallback: true,
        }
    }
}

/// Product search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of product names listed as a search hint.
    pub hint_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { hint_limit: 12 }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory for flyer JSON and table CSV files.
    pub output_dir: PathBuf,

    /// Pretty-print saved flyer JSON.
    pub pretty_json: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("matchit-output"),
            pretty_json: true,
        }
    }
}

impl MatchitConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| MatchitError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
