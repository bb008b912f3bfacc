//! The editable fields of the login form.

use std::fmt::{Debug, Formatter};

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Current values of the login form inputs.
///
/// The password is wiped from memory once the record is dropped. The [`Debug`] output masks it,
/// so a snapshot of the form can be logged safely.
#[derive(Clone, Default, Eq, PartialEq, Zeroize, ZeroizeOnDrop)]
pub(crate) struct FormData {
  pub(crate) username: String,
  pub(crate) password: String,
  #[zeroize(skip)]
  pub(crate) remember_me: bool,
  #[zeroize(skip)]
  pub(crate) auto_login: bool,
}

impl FormData {
  #[cfg(test)]
  pub(crate) fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
    FormData {
      username: username.into(),
      password: password.into(),
      remember_me: false,
      auto_login: false,
    }
  }
}

impl Debug for FormData {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let password = if self.password.is_empty() { "" } else { "********" };
    f.debug_struct("FormData")
      .field("username", &self.username)
      .field("password", &password)
      .field("remember_me", &self.remember_me)
      .field("auto_login", &self.auto_login)
      .finish()
  }
}
