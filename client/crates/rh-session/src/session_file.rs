use crate::{LoadResult, SessionError, SessionResult};

use std::fs;
use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};

use error_location::ErrorLocation;
use log::{debug, info, warn};
use rh_core::Session;

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// The persisted session, one JSON document on disk.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the session file.
    ///
    /// Returns:
    /// - `Ok(LoadResult { session: Some(...), corruption_error: None })` - loaded
    /// - `Ok(LoadResult { session: None, corruption_error: None })` - no file
    /// - `Ok(LoadResult { session: None, corruption_error: Some(...) })` - unparseable
    pub fn load(&self) -> SessionResult<LoadResult> {
        if !self.path.exists() {
            info!("No session file at {:?}", self.path);
            return Ok(LoadResult {
                session: None,
                corruption_error: None,
            });
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| SessionError::file_read(self.path.clone(), e))?;

        match serde_json::from_str::<Session>(&contents) {
            Ok(session) => {
                info!("Loaded session for {}", session.user.id);
                Ok(LoadResult {
                    session: Some(session),
                    corruption_error: None,
                })
            }
            Err(e) => {
                warn!("Session file corrupted at {:?}: {e}", self.path);
                Ok(LoadResult {
                    session: None,
                    corruption_error: Some(e.to_string()),
                })
            }
        }
    }

    /// Saves the session using atomic write pattern.
    ///
    /// 1. Writes to temp file
    /// 2. Syncs to disk (fsync)
    /// 3. Atomic rename to final location
    pub fn save(&self, session: &Session) -> SessionResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| SessionError::dir_creation(dir.to_path_buf(), e))?;
        }

        let temp_path = self.sibling(&format!("tmp.{}", std::process::id()));
        let json = serde_json::to_string_pretty(session)?;

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| SessionError::file_write(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .map_err(|e| SessionError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| SessionError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            SessionError::atomic_rename(temp_path, self.path.clone(), e)
        })?;

        debug!("Saved session for {}", session.user.id);
        Ok(())
    }

    /// Deletes the session file. A missing file is not an error.
    pub fn remove(&self) -> SessionResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed session file {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::file_write(self.path.clone(), e)),
        }
    }

    /// Renames the file to `<name>.corrupted.<timestamp>` for later inspection.
    pub fn backup_corrupted(&self) -> SessionResult<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let backup_path = self.sibling(&format!("corrupted.{timestamp}"));

        fs::rename(&self.path, &backup_path).map_err(|e| SessionError::BackupFailed {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        warn!("Backed up corrupted session to {backup_path:?}");
        Ok(Some(backup_path))
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }
}
