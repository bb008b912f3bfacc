//! Backends the login form can be wired to.

use strum_macros::{Display, EnumString};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub(crate) enum AuthBackend {
  /// Waits for a fixed time and reports no authenticated user.
  #[default]
  Simulated,
  /// Checks credentials against the SQLite user store.
  Sqlite,
}
