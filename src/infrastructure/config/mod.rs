use crate::domain::assets::OptimizerConfig;
use crate::domain::error::{AppError, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::path::Path;

pub const API_KEY_ENV: &str = "TINIFY_API_KEY";
pub const ENV_PREFIX: &str = "FOLIO_OPTIMIZER_";

/// Layers optimizer settings: preset, then TOML file, then environment
pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    pub fn new(preset: OptimizerConfig) -> Self {
        Self {
            figment: Figment::from(Serialized::defaults(preset)),
        }
    }

    pub fn with_file(mut self, path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(AppError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        self.figment = self.figment.merge(Toml::file(path));
        Ok(self)
    }

    pub fn with_env(mut self) -> Self {
        self.figment = self.figment.merge(Env::prefixed(ENV_PREFIX));
        self
    }

    pub fn load(&self) -> Result<OptimizerConfig> {
        let config: OptimizerConfig = self
            .figment
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;
        config
            .validate()
            .map_err(|e| AppError::ConfigError(format!("Invalid optimizer config: {}", e)))?;
        Ok(config)
    }

    pub fn api_key() -> Result<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                AppError::ConfigError(format!("{} is not set", API_KEY_ENV))
            })
    }
}

/// Show only the first eight characters of a secret
pub fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(8).collect();
    format!("{}...", visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_preset_passes_through() {
        let config = ConfigService::new(OptimizerConfig::conservative())
            .load()
            .unwrap();
        assert_eq!(config, OptimizerConfig::conservative());
    }

    #[test]
    fn test_toml_overrides_preset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_size_bytes = 1024").unwrap();
        writeln!(file, "max_reduction_percent = 25.0").unwrap();
        writeln!(file, "excluded_files = [\"hero.png\"]").unwrap();

        let config = ConfigService::new(OptimizerConfig::conservative())
            .with_file(file.path())
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.min_size_bytes, 1024);
        assert_eq!(config.max_reduction_percent, Some(25.0));
        assert_eq!(config.excluded_files, vec!["hero.png".to_string()]);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_env_overrides_file_and_preset() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("optimizer.toml", "min_size_bytes = 1024\ninter_file_delay_ms = 0")?;
            jail.set_env("FOLIO_OPTIMIZER_MIN_SIZE_BYTES", "4096");

            let config = ConfigService::new(OptimizerConfig::conservative())
                .with_file(Path::new("optimizer.toml"))
                .and_then(|service| service.with_env().load())
                .map_err(|e| e.to_string())?;

            assert_eq!(config.min_size_bytes, 4096);
            assert_eq!(config.inter_file_delay_ms, 0);
            assert_eq!(config.max_reduction_percent, Some(30.0));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_reduction_percent = 250.0").unwrap();

        let err = ConfigService::new(OptimizerConfig::bulk())
            .with_file(file.path())
            .unwrap()
            .load()
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigService::new(OptimizerConfig::bulk())
            .with_file(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("xVnmF65CsgT69df5"), "xVnmF65C...");
        assert_eq!(mask_key("abc"), "abc...");
    }
}
