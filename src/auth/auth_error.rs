//! Various errors that can result during user authentication.

use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub(crate) enum AuthError {
  #[error("Invalid username or password!")]
  UserNotFoundError,
  #[error("Invalid username or password!")]
  InvalidCredentials,
  #[error("User is already logged in on another device!")]
  AlreadyLoggedIn,
  #[error("Username is already taken!")]
  UserExists,
  #[error("Invalid session token!")]
  InvalidSessionToken,
  #[error("Authentication service unavailable!")]
  BackendError,
  /// Failures of scripted backends, one carrying its own message and one without any.
  #[cfg(test)]
  #[error("{0}")]
  Rejected(String),
  #[cfg(test)]
  #[error("")]
  Unspecified,
}
