
use std::env;

use tempfile::TempDir;

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Temp config dir with RH_CONFIG_DIR pointing at it and every other
/// RH_* override cleared for the duration of the test.
pub(crate) struct TestConfigDir {
    pub(crate) temp: TempDir,
    _guards: Vec<EnvGuard>,
}

pub(crate) fn setup_config_dir() -> TestConfigDir {
    let temp = TempDir::new().unwrap();
    let mut guards = vec![EnvGuard::set(
        crate::CONFIG_DIR_ENV,
        temp.path().to_str().unwrap(),
    )];
    for key in [
        "RH_BACKEND_URL",
        "RH_BACKEND_ANON_KEY",
        "RH_REQUEST_TIMEOUT_SECS",
        "RH_SESSION_FILE",
        "RH_REFERRAL_BASE_URL",
        "RH_MIN_PASSWORD_LENGTH",
        "RH_LOG_LEVEL",
        "RH_LOG_COLORED",
        "RH_LOG_FILE",
    ] {
        guards.push(EnvGuard::remove(key));
    }
    TestConfigDir {
        temp,
        _guards: guards,
    }
}
