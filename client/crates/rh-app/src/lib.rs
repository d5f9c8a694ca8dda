//! rh-app
//!
//! Application layer shared by every front end: the [`AppContext`] that
//! wires session, cache and backend together, the route guard, and the
//! dashboard controller with its pending-mutation state.

pub mod auth;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod guard;
pub mod navigator;
pub mod notifier;
pub mod remote_data;

#[cfg(test)]
mod tests;

pub use context::{AppContext, AppSettings};
pub use dashboard::{DashboardController, DashboardView, RewardView};
pub use error::{AppError, Result as AppResult};
pub use guard::{GuardState, Route, RouteAccess, RouteDecision, decide};
pub use navigator::Navigator;
pub use notifier::{Notifier, Toast, ToastLevel};
pub use remote_data::RemoteDataClient;
