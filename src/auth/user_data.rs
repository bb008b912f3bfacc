use sqlx::FromRow;

/// A row of the `users` table.
#[derive(Clone, Debug, FromRow)]
pub(crate) struct UserData {
  pub(crate) id: i64,
  pub(crate) username: String,
  pub(crate) password: String,
  pub(crate) session_token: Option<String>,
  pub(crate) last_login: Option<String>,
}

impl UserData {
  pub(crate) fn is_logged_in(&self) -> bool {
    self.session_token.is_some()
  }
}
