use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AceError;
use crate::Result;

/// Library configuration, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Per-analyzer wall-clock budget in milliseconds.
    pub analyzer_timeout_ms: u64,
    /// Version history cap; oldest versions are evicted first.
    pub max_history: usize,
    pub patch: PatchOptions,
}

/// Toggles for the matcher's normalization stages. Exact matching always
/// runs first and cannot be disabled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchOptions {
    pub normalize_quotes: bool,
    pub normalize_whitespace: bool,
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self {
            normalize_quotes: true,
            normalize_whitespace: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analyzer_timeout_ms: 5_000,
            max_history: 50,
            patch: PatchOptions::default(),
        }
    }
}

impl Config {
    pub fn analyzer_timeout(&self) -> Duration {
        Duration::from_millis(self.analyzer_timeout_ms)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(raw).map_err(|e| AceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    fn validate(&self) -> Result<()> {
        if self.analyzer_timeout_ms == 0 {
            return Err(AceError::Config(
                "analyzer timeout must be positive".to_string(),
            ));
        }
        if self.max_history == 0 {
            return Err(AceError::Config(
                "max_history must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_match_expected() {
        let cfg = Config::default();
        assert_eq!(cfg.analyzer_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.max_history, 50);
        assert!(cfg.patch.normalize_quotes);
        assert!(cfg.patch.normalize_whitespace);
    }

    #[test]
    fn parses_overrides_from_toml() {
        let cfg = Config::from_toml_str(
            r#"
            analyzer_timeout_ms = 250
            max_history = 10

            [patch]
            normalize_whitespace = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.analyzer_timeout(), Duration::from_millis(250));
        assert_eq!(cfg.max_history, 10);
        assert!(cfg.patch.normalize_quotes);
        assert!(!cfg.patch.normalize_whitespace);
    }

    #[test]
    fn rejects_zero_timeout_and_empty_history() {
        assert!(Config::from_toml_str("analyzer_timeout_ms = 0").is_err());
        assert!(Config::from_toml_str("max_history = 0").is_err());
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Config::from_toml_str("no_such_field = 1").is_err());
    }

    #[test]
    fn loads_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_history = 3").unwrap();
        let cfg = Config::load(file.path()).unwrap();
        assert_eq!(cfg.max_history, 3);
    }
}
