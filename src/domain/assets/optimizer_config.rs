// ============================================================
// OPTIMIZER CONFIGURATION
// ============================================================
// Threshold and gating values for the optimization policy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.tinify.com/shrink";

/// Configuration for one optimization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Upload endpoint of the compression provider
    pub endpoint: String,

    /// Basic-auth user name; the API key is the password
    pub api_user: String,

    /// Files smaller than this are left alone without a request (0 = always request)
    pub min_size_bytes: u64,

    /// Reject compressions that remove more than this share of the file (None = no bound)
    pub max_reduction_percent: Option<f64>,

    /// Lowercase extensions, with leading dot
    pub allowed_extensions: Vec<String>,

    /// Exact file names never sent to the provider
    pub excluded_files: Vec<String>,

    /// Deadline for each upload and download call
    pub request_timeout_secs: u64,

    /// Pause between consecutive files
    pub inter_file_delay_ms: u64,

    /// Ask the operator before overwriting each file
    pub confirm_before_write: bool,

    /// Directory scanned in bulk mode
    pub assets_dir: PathBuf,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_user: "api".to_string(),
            min_size_bytes: 0,
            max_reduction_percent: None,
            allowed_extensions: [".png", ".jpg", ".jpeg", ".webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            excluded_files: ["desktop.ini", "sample_tile1.png", "sample_tile2.png"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            request_timeout_secs: 30,
            inter_file_delay_ms: 500,
            confirm_before_write: false,
            assets_dir: PathBuf::from("project_tiles"),
        }
    }
}

impl OptimizerConfig {
    /// Overwrite every successful compression, whatever the size
    pub fn bulk() -> Self {
        Self::default()
    }

    /// Only touch files of 200 KiB or more, and keep at least 70% of their bytes
    pub fn conservative() -> Self {
        Self {
            min_size_bytes: 200 * 1024,
            max_reduction_percent: Some(30.0),
            ..Default::default()
        }
    }

    /// Single-file run gated on operator confirmation
    pub fn single() -> Self {
        Self {
            confirm_before_write: true,
            ..Default::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn inter_file_delay(&self) -> Duration {
        Duration::from_millis(self.inter_file_delay_ms)
    }

    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.excluded_files.iter().any(|f| f == file_name)
    }

    pub fn is_allowed_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension() else {
            return false;
        };
        let ext = format!(".{}", ext.to_string_lossy().to_ascii_lowercase());
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.to_ascii_lowercase() == ext)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be > 0".to_string());
        }
        if let Some(max) = self.max_reduction_percent {
            if !(0.0..=100.0).contains(&max) {
                return Err("max_reduction_percent must be between 0 and 100".to_string());
            }
        }
        if self.allowed_extensions.is_empty() {
            return Err("allowed_extensions must not be empty".to_string());
        }
        if let Some(bad) = self
            .allowed_extensions
            .iter()
            .find(|ext| !ext.starts_with('.'))
        {
            return Err(format!("extension '{}' must start with '.'", bad));
        }
        Ok(())
    }
}
