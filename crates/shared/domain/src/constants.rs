//! Domain-level constants.
//!
//! Field names use the wire (camelCase) spelling so rejections line up with
//! the form inputs they annotate.

// =============================================================================
// Form fields
// =============================================================================

/// Login form e-mail input
pub const FIELD_LOGIN_EMAIL: &str = "logEmail";

/// Login form password input
pub const FIELD_LOGIN_PASSWORD: &str = "logPassword";

/// Registration form e-mail input
pub const FIELD_EMAIL: &str = "email";

/// Registration form password confirmation input
pub const FIELD_CONFIRM_PASSWORD: &str = "confirmPassword";

// =============================================================================
// Rejection codes
// =============================================================================

pub const CODE_EMAIL_NOT_PRESENT: &str = "EMAIL-NOT-PRESENT";
pub const CODE_INVALID_LOGIN_PASSWORD: &str = "INVALID-LOGIN-PW";
pub const CODE_PASSWORD_MISMATCH: &str = "PW-MISMATCH";
pub const CODE_EMAIL_PRESENT: &str = "EMAIL-PRESENT";
