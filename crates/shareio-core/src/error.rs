//! Error types for the admin core.
//!
//! Every collaborator failure has its own enum so call sites can match on
//! the domain they talk to:
//!
//! - [`AuthError`] - credential checks against the auth backend
//! - [`StoreError`] - reads, writes and subscriptions on the realtime store
//! - [`StorageError`] - durable local key-value slots
//! - [`SessionError`] - locally detected session problems
//! - [`LoginError`] - login form validation
//!
//! [`AdminError`] wraps all of them for the session controller.

use thiserror::Error;

/// Authentication failures reported by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email/password pair rejected without saying which half was wrong.
    #[error("Invalid email or password.")]
    InvalidCredential,
    /// No account exists for the email.
    #[error("No account found for this email.")]
    UserNotFound,
    /// Account exists but the password does not match.
    #[error("Wrong password.")]
    WrongPassword,
    #[error("This account has been disabled.")]
    UserDisabled,
    /// Backend throttled the account after repeated failures.
    #[error("Too many attempts. Please try again later.")]
    TooManyAttempts,
    #[error("The email address is badly formatted.")]
    InvalidEmail,
    /// Transport failed before the backend answered.
    #[error("Network error: {0}")]
    Network(String),
    #[error("{0}")]
    Generic(String),
}

impl AuthError {
    /// Map an auth backend error code to a variant.
    ///
    /// Codes may carry a trailing detail (`"TOO_MANY_ATTEMPTS_TRY_LATER : ..."`);
    /// only the leading code is matched.
    pub fn from_code(code: &str) -> Self {
        let head = code.split(':').next().unwrap_or(code).trim();
        match head {
            "INVALID_LOGIN_CREDENTIALS" | "INVALID_CREDENTIAL" => Self::InvalidCredential,
            "EMAIL_NOT_FOUND" => Self::UserNotFound,
            "INVALID_PASSWORD" => Self::WrongPassword,
            "USER_DISABLED" => Self::UserDisabled,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => Self::TooManyAttempts,
            "INVALID_EMAIL" => Self::InvalidEmail,
            "" => Self::Generic("An error occurred during login.".to_string()),
            other => Self::Generic(other.to_string()),
        }
    }
}

/// Realtime data store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("read failed: {0}")]
    Read(String),
    #[error("write failed: {0}")]
    Write(String),
    #[error("subscription failed: {0}")]
    Subscribe(String),
}

/// Durable local storage failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("local storage not available")]
    Unavailable,
    #[error("failed to serialize value: {0}")]
    Serialize(String),
    #[error("failed to save to local storage")]
    Write,
    #[error("failed to remove from local storage")]
    Remove,
}

/// Problems with a persisted session record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session expired {age_ms} ms after creation")]
    Expired { age_ms: i64 },
    #[error("stored session is unreadable: {0}")]
    Corrupt(String),
}

/// Login form validation errors, one slot per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("login form is incomplete")]
pub struct LoginError {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl LoginError {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Umbrella error for the session controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Login(#[from] LoginError),
}
