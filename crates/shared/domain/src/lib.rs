//! Domain layer - Account entities, forms and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! It defines the stable rejection contract (field, code, message) that the
//! presentation layer binds error messages to.

pub mod constants;
pub mod error;
pub mod password;
pub mod rejection;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use rejection::{FieldError, FieldErrors, Rejection};
pub use user::{LoginUser, RegisterUser, User, UserResponse};
