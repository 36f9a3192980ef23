use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::types::WeekStart;

/// Top-level configuration for the Vitals assistant.
///
/// Loaded from `~/.vitals/config.toml` by default. Missing sections fall
/// back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VitalsConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl VitalsConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: VitalsConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Calendar policy for week and month boundaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// First day of the week: "monday" (ISO-8601) or "sunday".
    pub week_start: WeekStart,
}

/// Health data store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file of recorded health samples.
    pub fixture_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            fixture_path: "~/.vitals/health.json".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VitalsError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = VitalsConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.calendar.week_start, WeekStart::Monday);
        assert_eq!(config.store.fixture_path, "~/.vitals/health.json");
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"

[calendar]
week_start = "sunday"

[store]
fixture_path = "/tmp/health.json"
"#;
        let file = create_temp_config(content);
        let config = VitalsConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.calendar.week_start, WeekStart::Sunday);
        assert_eq!(config.store.fixture_path, "/tmp/health.json");
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[calendar]
week_start = "sunday"
"#;
        let file = create_temp_config(content);
        let config = VitalsConfig::load(file.path()).unwrap();
        assert_eq!(config.calendar.week_start, WeekStart::Sunday);
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.store.fixture_path, "~/.vitals/health.json");
    }

    #[test]
    fn test_config_empty_toml_uses_all_defaults() {
        let file = create_temp_config("");
        let config = VitalsConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.calendar.week_start, WeekStart::Monday);
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let file = create_temp_config("this is {{ not valid TOML");
        let result = VitalsConfig::load(file.path());
        assert!(matches!(result, Err(VitalsError::Config(_))));
    }

    #[test]
    fn test_config_load_unknown_week_start_fails() {
        let file = create_temp_config("[calendar]\nweek_start = \"friday\"\n");
        assert!(VitalsConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = VitalsConfig::load_or_default(Path::new("/nonexistent/vitals/config.toml"));
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("dir").join("config.toml");

        let mut config = VitalsConfig::default();
        config.calendar.week_start = WeekStart::Sunday;
        config.general.log_level = "warn".to_string();
        config.save(&path).unwrap();

        assert!(path.exists());
        let reloaded = VitalsConfig::load(&path).unwrap();
        assert_eq!(reloaded.calendar.week_start, WeekStart::Sunday);
        assert_eq!(reloaded.general.log_level, "warn");
    }
}
