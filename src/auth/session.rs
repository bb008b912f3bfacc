use chrono::{DateTime, Utc};

/// An established login.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Session {
  pub(crate) username: String,
  pub(crate) session_token: String,
  pub(crate) last_login: DateTime<Utc>,
}

impl Session {
  pub(crate) fn new(username: impl Into<String>, session_token: impl Into<String>) -> Self {
    Session {
      username: username.into(),
      session_token: session_token.into(),
      last_login: Utc::now(),
    }
  }
}
