//! User service - Handles authentication and user record management.
//!
//! Invalid input is reported as `AppError::Rejected` carrying ordered field
//! errors. Binding errors passed in by the caller short-circuit every form
//! operation before the store is touched.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{FieldErrors, LoginUser, Password, RegisterUser, Rejection, User};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Check credentials and return the matching user.
    async fn login(&self, credentials: LoginUser, binding: FieldErrors) -> AppResult<User>;

    /// Create an account from a registration form.
    async fn register(&self, submission: RegisterUser, binding: FieldErrors) -> AppResult<User>;

    /// List every user, password hashes included.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Get user by ID, `None` when absent.
    async fn get_user_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// True when no user has this ID.
    async fn is_not_valid_id(&self, id: Uuid) -> AppResult<bool>;

    /// Persist the entity as given if its ID exists, `None` otherwise.
    ///
    /// The password field is stored without re-hashing.
    async fn update_user(&self, user: User) -> AppResult<Option<User>>;
}

/// Concrete implementation of UserService using a repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

/// Fail fast when request binding already rejected the form.
fn ensure_bound(binding: FieldErrors) -> AppResult<()> {
    if binding.has_errors() {
        debug!("Form rejected by binding with {} error(s)", binding.len());
        return Err(AppError::Rejected(binding));
    }
    Ok(())
}

#[async_trait]
impl UserService for UserManager {
    async fn login(&self, credentials: LoginUser, binding: FieldErrors) -> AppResult<User> {
        ensure_bound(binding)?;

        let Some(user) = self.repo.find_by_email(&credentials.log_email).await? else {
            debug!("Login for unknown e-mail");
            return Err(Rejection::EmailNotPresent.into());
        };

        if !user.password().verify(&credentials.log_password) {
            debug!(user_id = %user.id, "Login with incorrect password");
            return Err(Rejection::InvalidLoginPassword.into());
        }

        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    async fn register(&self, submission: RegisterUser, binding: FieldErrors) -> AppResult<User> {
        ensure_bound(binding)?;

        if !submission.passwords_match() {
            return Err(Rejection::PasswordMismatch.into());
        }

        if self.repo.find_by_email(&submission.email).await?.is_some() {
            return Err(Rejection::EmailPresent.into());
        }

        let password = Password::new(&submission.password)?;
        let user = submission.into_user(password);

        // A concurrent registration can pass the lookup above; the store's
        // unique index reports it as a conflict.
        let user = match self.repo.save(user).await {
            Err(AppError::Conflict(_)) => return Err(Rejection::EmailPresent.into()),
            other => other?,
        };

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        self.repo.find_all().await
    }

    async fn get_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    async fn is_not_valid_id(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.get_user_by_id(id).await?.is_none())
    }

    async fn update_user(&self, user: User) -> AppResult<Option<User>> {
        if self.is_not_valid_id(user.id).await? {
            return Ok(None);
        }

        if !Password::is_hash(&user.password_hash) {
            warn!(user_id = %user.id, "Updating user with a password value that is not a hash");
        }

        let user = self.repo.save(user).await?;
        debug!(user_id = %user.id, "User updated");
        Ok(Some(user))
    }
}
