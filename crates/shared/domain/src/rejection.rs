//! Field-level rejections.
//!
//! Request binding and the account service both report invalid input as an
//! ordered list of `(field, code, message)` records. Binding fills the list
//! first; the service appends its own rejection only when binding passed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CODE_EMAIL_NOT_PRESENT, CODE_EMAIL_PRESENT, CODE_INVALID_LOGIN_PASSWORD,
    CODE_PASSWORD_MISMATCH, FIELD_CONFIRM_PASSWORD, FIELD_EMAIL, FIELD_LOGIN_EMAIL,
    FIELD_LOGIN_PASSWORD,
};

/// A single rejected form value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Form field the rejection applies to
    #[cfg_attr(feature = "openapi", schema(example = "logEmail"))]
    pub field: String,
    /// Stable machine-readable code
    #[cfg_attr(feature = "openapi", schema(example = "EMAIL-NOT-PRESENT"))]
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Ordered list of field rejections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rejection.
    pub fn reject(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.0.push(FieldError::new(field, code, message));
    }

    /// Append an already built rejection.
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Check whether any rejection carries the given code.
    pub fn contains_code(&self, code: &str) -> bool {
        self.0.iter().any(|e| e.code == code)
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl From<Vec<FieldError>> for FieldErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl From<FieldError> for FieldErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl FromIterator<FieldError> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "Validation failed");
        }
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error.message)?;
        }
        Ok(())
    }
}

/// Rejections raised by the account service itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Login e-mail matches no account
    EmailNotPresent,
    /// Login password does not match the stored hash
    InvalidLoginPassword,
    /// Registration password and confirmation differ
    PasswordMismatch,
    /// Registration e-mail already belongs to an account
    EmailPresent,
}

impl Rejection {
    pub fn field(&self) -> &'static str {
        match self {
            Rejection::EmailNotPresent => FIELD_LOGIN_EMAIL,
            Rejection::InvalidLoginPassword => FIELD_LOGIN_PASSWORD,
            Rejection::PasswordMismatch => FIELD_CONFIRM_PASSWORD,
            Rejection::EmailPresent => FIELD_EMAIL,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Rejection::EmailNotPresent => CODE_EMAIL_NOT_PRESENT,
            Rejection::InvalidLoginPassword => CODE_INVALID_LOGIN_PASSWORD,
            Rejection::PasswordMismatch => CODE_PASSWORD_MISMATCH,
            Rejection::EmailPresent => CODE_EMAIL_PRESENT,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rejection::EmailNotPresent => {
                "User not found. Check the e-mail and try again or register a new user"
            }
            Rejection::InvalidLoginPassword => "Incorrect password. Please try again",
            Rejection::PasswordMismatch => "Passwords must match",
            Rejection::EmailPresent => "There is already an account with this e-mail",
        }
    }
}

impl From<Rejection> for FieldError {
    fn from(rejection: Rejection) -> Self {
        FieldError::new(rejection.field(), rejection.code(), rejection.message())
    }
}

impl From<Rejection> for FieldErrors {
    fn from(rejection: Rejection) -> Self {
        FieldErrors::from(FieldError::from(rejection))
    }
}
