use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;

use crate::auth::auth_error::AuthError;
use crate::auth::authenticator::Authenticator;
use crate::auth::session::Session;
use crate::auth::sqlite_authenticator::SqliteAuthenticator;
use crate::form::form_data::FormData;
use crate::navigation::navigator::Navigator;

/// Creates an authenticator over a fresh in-memory database.
pub(crate) async fn setup_test_db() -> SqliteAuthenticator {
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("In-memory database should open!");
  let authenticator = SqliteAuthenticator::new(pool);
  authenticator.migrate().await.expect("Migrations should apply!");
  authenticator
}

/// Navigator that remembers every path it was sent to.
#[derive(Clone, Default)]
pub(crate) struct RecordingNavigator {
  visited: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
  pub(crate) fn visited(&self) -> Vec<String> {
    self.visited.lock().unwrap().clone()
  }
}

impl Navigator for RecordingNavigator {
  fn navigate_to(&self, path: &str) {
    self.visited.lock().unwrap().push(path.to_string());
  }
}

/// Authenticator returning a preset result and recording who tried to log in.
#[derive(Clone)]
pub(crate) struct ScriptedAuthenticator {
  result: Arc<Mutex<Result<Option<Session>, AuthError>>>,
  usernames: Arc<Mutex<Vec<String>>>,
}

impl ScriptedAuthenticator {
  pub(crate) fn succeeding(session: Option<Session>) -> Self {
    ScriptedAuthenticator::new(Ok(session))
  }

  pub(crate) fn failing(error: AuthError) -> Self {
    ScriptedAuthenticator::new(Err(error))
  }

  fn new(result: Result<Option<Session>, AuthError>) -> Self {
    ScriptedAuthenticator {
      result: Arc::new(Mutex::new(result)),
      usernames: Arc::new(Mutex::new(Vec::new())),
    }
  }

  pub(crate) fn set_result(&self, result: Result<Option<Session>, AuthError>) {
    *self.result.lock().unwrap() = result;
  }

  pub(crate) fn calls(&self) -> usize {
    self.usernames.lock().unwrap().len()
  }

  pub(crate) fn usernames(&self) -> Vec<String> {
    self.usernames.lock().unwrap().clone()
  }
}

#[async_trait]
impl Authenticator for ScriptedAuthenticator {
  async fn authenticate(&self, form: &FormData) -> Result<Option<Session>, AuthError> {
    self.usernames.lock().unwrap().push(form.username.clone());
    tokio::task::yield_now().await;
    self.result.lock().unwrap().clone()
  }
}
