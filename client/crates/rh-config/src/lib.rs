mod backend_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod referral_config;
mod session_config;
mod validation_config;

#[cfg(test)]
mod tests;

pub use backend_config::BackendConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use referral_config::ReferralConfig;
pub use session_config::SessionConfig;
pub use validation_config::ValidationConfig;

pub const CONFIG_DIR_ENV: &str = "RH_CONFIG_DIR";
pub const DEFAULT_CONFIG_DIR: &str = ".rewards";
pub const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:54321";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;
const DEFAULT_SESSION_FILENAME: &str = "session.json";
const DEFAULT_REFERRAL_BASE_URL: &str = "https://app.flowvahub.com/signup/";
const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
