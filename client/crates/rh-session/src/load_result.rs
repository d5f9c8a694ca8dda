use rh_core::Session;

/// Result of reading the session file. Distinguishes "not found" from a
/// file that exists but cannot be parsed.
#[derive(Debug)]
pub struct LoadResult {
    pub session: Option<Session>,
    /// Present if the file exists but is corrupted
    pub corruption_error: Option<String>,
}
