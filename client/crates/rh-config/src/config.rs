use crate::{
    BackendConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, LoggingConfig, ReferralConfig, SessionConfig, ValidationConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

const APP_DIR_NAME: &str = "rewards-hub";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub referral: ReferralConfig,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config from the resolved config directory.
    ///
    /// Loading order:
    /// 1. Resolve the config directory (see [`Config::config_dir`])
    /// 2. Auto-create it if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply RH_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;
        Self::load_from(&config_dir)
    }

    /// Load config from an explicit directory.
    pub fn load_from(config_dir: &Path) -> ConfigErrorResult<Self> {
        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.to_path_buf(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: RH_CONFIG_DIR env var > platform config dir > ./.rewards/
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        if let Some(dir) = dirs::config_dir() {
            return Ok(dir.join(APP_DIR_NAME));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.backend.validate()?;
        self.session.validate()?;
        self.validation.validate()?;

        if self.referral.base_url.trim().is_empty() {
            return Err(ConfigError::config("referral.base_url cannot be empty"));
        }

        Ok(())
    }

    /// Absolute path of the persisted session file.
    pub fn session_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.session.file)
    }

    /// Log configuration summary (NEVER logs the API key).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  backend: {} (timeout {}s, anon key {})",
            self.backend.url,
            self.backend.request_timeout_secs,
            if self.backend.anon_key.is_empty() {
                "missing"
            } else {
                "set"
            }
        );
        info!("  session: {}", self.session.file);
        info!("  referral: {}", self.referral.base_url);
        info!(
            "  validation: min_password_length={}",
            self.validation.min_password_length
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Backend
        Self::apply_env_string("RH_BACKEND_URL", &mut self.backend.url);
        Self::apply_env_string("RH_BACKEND_ANON_KEY", &mut self.backend.anon_key);
        Self::apply_env_parse(
            "RH_REQUEST_TIMEOUT_SECS",
            &mut self.backend.request_timeout_secs,
        );

        // Session
        Self::apply_env_string("RH_SESSION_FILE", &mut self.session.file);

        // Referral
        Self::apply_env_string("RH_REFERRAL_BASE_URL", &mut self.referral.base_url);

        // Validation
        Self::apply_env_parse(
            "RH_MIN_PASSWORD_LENGTH",
            &mut self.validation.min_password_length,
        );

        // Logging
        Self::apply_env_parse("RH_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("RH_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("RH_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
