//! rh-session
//!
//! Owns the signed-in identity: sign-in, sign-up, sign-out, restore at
//! startup, and the observable `{user, loading}` pair everything else
//! gates on. The session is persisted to a JSON file between runs.

pub(crate) mod error;
pub(crate) mod load_result;
pub(crate) mod session_file;
pub(crate) mod session_state;
pub(crate) mod session_store;

#[cfg(test)]
mod tests;

pub use error::{Result as SessionResult, SessionError};
pub use load_result::LoadResult;
pub use session_file::SessionFile;
pub use session_state::SessionState;
pub use session_store::{DEFAULT_FIRST_NAME, SessionStore, SignUpOutcome};
