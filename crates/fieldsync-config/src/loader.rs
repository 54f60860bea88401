//! Settings loader with layered sources.

use crate::Settings;
use config::{Config, ConfigError, Environment, File, Map};
use fieldsync_core::{FieldSyncError, ValidateExt};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Environment variable selecting the environment overlay.
pub const ENVIRONMENT_VAR: &str = "FIELDSYNC_ENVIRONMENT";

/// Prefix for environment variable overrides, e.g. `FIELDSYNC_SYNC__MAX_DEPTH`.
pub const ENV_PREFIX: &str = "FIELDSYNC";

/// Settings loader with runtime reload support.
#[derive(Clone)]
pub struct SettingsLoader {
    settings: Arc<RwLock<Settings>>,
    config_dir: PathBuf,
    environment: String,
}

impl SettingsLoader {
    /// Creates a new settings loader.
    ///
    /// Settings are loaded from multiple sources in order:
    /// 1. `{config_dir}/default.toml` - Default values
    /// 2. `{config_dir}/{environment}.toml` - Environment-specific overrides
    /// 3. `{config_dir}/local.toml` - Local overrides
    /// 4. Environment variables with `FIELDSYNC_` prefix
    pub fn new(config_dir: impl Into<PathBuf>) -> Result<Self, FieldSyncError> {
        load_dotenv();
        let environment = std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        Self::with_environment(config_dir, environment)
    }

    /// Creates a loader for an explicit environment name.
    pub fn with_environment(
        config_dir: impl Into<PathBuf>,
        environment: impl Into<String>,
    ) -> Result<Self, FieldSyncError> {
        let config_dir = config_dir.into();
        let environment = environment.into();
        let settings = Self::load_settings(&config_dir, &environment)?;

        Ok(Self {
            settings: Arc::new(RwLock::new(settings)),
            config_dir,
            environment,
        })
    }

    /// Loads settings from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, FieldSyncError> {
        Self::new("./config")
    }

    /// Returns the current settings.
    pub fn get(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Returns the environment overlay in use.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Reloads the settings from disk. The current settings are kept if the
    /// new ones fail to load or validate.
    pub fn reload(&self) -> Result<(), FieldSyncError> {
        let new_settings = Self::load_settings(&self.config_dir, &self.environment)?;
        *self.settings.write() = new_settings;
        info!("Settings reloaded successfully");
        Ok(())
    }

    fn load_settings(config_dir: &Path, environment: &str) -> Result<Settings, FieldSyncError> {
        Self::load_layers(config_dir, environment, None)
    }

    /// Loads the file layers, then overrides from `env_vars` or, when
    /// `None`, from the process environment.
    fn load_layers(
        config_dir: &Path,
        environment: &str,
        env_vars: Option<Map<String, String>>,
    ) -> Result<Settings, FieldSyncError> {
        info!("Loading settings for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment, "local"] {
            let path = config_dir.join(format!("{}.toml", name));
            if path.exists() {
                debug!("Loading settings from: {}", path.display());
                builder = builder.add_source(File::from(path.as_path()).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env_vars),
        );

        let settings: Settings = builder
            .build()
            .and_then(|built| built.try_deserialize())
            .map_err(config_error_to_error)?;

        settings.validate_settings()?;

        Ok(settings)
    }

    /// Gets a specific settings value by dotted key path.
    pub fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let settings = self.settings.read();
        let json = serde_json::to_value(&*settings).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file found or error loading it: {}", e);
    }
}

fn config_error_to_error(err: ConfigError) -> FieldSyncError {
    FieldSyncError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    #[test]
    fn test_defaults_without_files() {
        let dir = TempDir::new().unwrap();
        let loader = SettingsLoader::with_environment(dir.path(), "test").unwrap();
        let settings = loader.get();
        assert_eq!(settings, Settings::default());
        assert_eq!(loader.environment(), "test");
    }

    #[test]
    fn test_layered_files() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "default.toml",
            "[sync]\nmax_depth = 8\n\n[paging]\ndefault_page_size = 20\nmax_page_size = 200\n",
        );
        write(&dir, "staging.toml", "[sync]\nseparator = \"\"\n");
        write(&dir, "local.toml", "[paging]\nmax_page_size = 50\n");

        let loader = SettingsLoader::with_environment(dir.path(), "staging").unwrap();
        let settings = loader.get();

        assert_eq!(settings.sync.max_depth, 8);
        assert_eq!(settings.sync.separator, "");
        assert!(settings.sync.allow_flatten);
        assert_eq!(settings.paging.default_page_size, Some(20));
        assert_eq!(settings.paging.max_page_size, Some(50));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[sync]\nmax_depth = 0\n");

        let err = SettingsLoader::with_environment(dir.path(), "test").err().unwrap();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_malformed_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[sync\nmax_depth = ");

        let err = SettingsLoader::with_environment(dir.path(), "test").err().unwrap();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[paging]\ndefault_page_size = 10\n");
        let loader = SettingsLoader::with_environment(dir.path(), "test").unwrap();
        assert_eq!(loader.get().paging.default_page_size, Some(10));

        write(&dir, "default.toml", "[paging]\ndefault_page_size = 30\n");
        loader.reload().unwrap();
        assert_eq!(loader.get().paging.default_page_size, Some(30));
    }

    #[test]
    fn test_failed_reload_keeps_previous_settings() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[sync]\nmax_depth = 5\n");
        let loader = SettingsLoader::with_environment(dir.path(), "test").unwrap();

        write(&dir, "default.toml", "[sync]\nmax_depth = 0\n");
        assert!(loader.reload().is_err());
        assert_eq!(loader.get().sync.max_depth, 5);
    }

    fn env(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_env_overrides_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[sync]\nmax_depth = 8\n");

        let settings = SettingsLoader::load_layers(
            dir.path(),
            "test",
            env(&[
                ("FIELDSYNC_SYNC__MAX_DEPTH", "7"),
                ("FIELDSYNC_PAGING__MAX_PAGE_SIZE", "250"),
                ("FIELDSYNC_TELEMETRY__JSON", "true"),
                ("OTHER_SYNC__MAX_DEPTH", "3"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.sync.max_depth, 7);
        assert_eq!(settings.paging.max_page_size, Some(250));
        assert!(settings.telemetry.json);
    }

    #[test]
    fn test_env_override_is_validated() {
        let dir = TempDir::new().unwrap();
        let err = SettingsLoader::load_layers(dir.path(), "test", env(&[("FIELDSYNC_SYNC__MAX_DEPTH", "0")]))
            .err()
            .unwrap();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_get_value_by_path() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[sync]\nseparator = \".\"\n");
        let loader = SettingsLoader::with_environment(dir.path(), "test").unwrap();

        assert_eq!(loader.get_value::<String>("sync.separator"), Some(".".to_string()));
        assert_eq!(loader.get_value::<usize>("sync.max_depth"), Some(32));
        assert_eq!(loader.get_value::<String>("sync.missing"), None);
    }
}
