//! Account business logic.

mod user_service;

pub use user_service::{UserManager, UserService};
