//! rh-remote
//!
//! Remote data client for the rewards backend: the [`Backend`] trait the
//! rest of the workspace programs against, and [`RestBackend`], its
//! reqwest implementation over the auth, REST and RPC endpoints.

pub(crate) mod backend;
pub(crate) mod error;
pub(crate) mod rest_backend;
pub(crate) mod token_response;


pub use backend::Backend;
pub use error::{RemoteError, Result as RemoteResult};
pub use rest_backend::RestBackend;
