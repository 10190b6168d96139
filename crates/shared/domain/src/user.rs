//! User domain entity and related forms.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::password::Password;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Stored password hash. Never serialized outward.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh identifier
    pub fn new(first_name: String, last_name: String, email: String, password: Password) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            password_hash: password.into_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Stored hash as a password value object
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.as_str())
    }
}

/// Login credentials. Exists only for the duration of a login attempt.
#[derive(Clone)]
pub struct LoginUser {
    pub log_email: String,
    pub log_password: String,
}

impl LoginUser {
    pub fn new(log_email: impl Into<String>, log_password: impl Into<String>) -> Self {
        Self {
            log_email: log_email.into(),
            log_password: log_password.into(),
        }
    }
}

impl std::fmt::Debug for LoginUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginUser")
            .field("log_email", &self.log_email)
            .field("log_password", &"[REDACTED]")
            .finish()
    }
}

/// Registration submission carrying the plaintext password and its
/// confirmation.
#[derive(Clone)]
pub struct RegisterUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterUser {
    /// Exact comparison of password and confirmation
    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }

    /// Build the entity to persist, replacing the plaintext with its hash.
    pub fn into_user(self, password: Password) -> User {
        User::new(self.first_name, self.last_name, self.email, password)
    }
}

impl std::fmt::Debug for RegisterUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUser")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// User email address
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(password: &str, confirm: &str) -> RegisterUser {
        RegisterUser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_passwords_match_is_exact() {
        assert!(submission("p1", "p1").passwords_match());
        assert!(!submission("p1", "p2").passwords_match());
        assert!(!submission("secret", "Secret").passwords_match());
        assert!(!submission("secret", "secret ").passwords_match());
    }

    #[test]
    fn test_into_user_stores_hash() {
        let form = submission("secret", "secret");
        let password = Password::new(&form.password).unwrap();
        let user = form.into_user(password);

        assert_ne!(user.password_hash, "secret");
        assert!(user.password().verify("secret"));
        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(user.first_name, "Ada");
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let debug = format!("{:?}", LoginUser::new("a@x.com", "secret"));
        assert!(!debug.contains("secret"));

        let debug = format!("{:?}", submission("hunter22", "hunter22"));
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn test_user_serialization_skips_hash() {
        let user = submission("secret", "secret").into_user(Password::from_hash("$argon2id$x"));
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password_hash").is_none());
        let response = UserResponse::from(&user);
        assert_eq!(response.email, "ada@example.com");
    }

    #[test]
    fn test_user_response_uses_camel_case() {
        let user = submission("secret", "secret").into_user(Password::from_hash("$argon2id$x"));
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert!(json.get("passwordHash").is_none());
    }
}
