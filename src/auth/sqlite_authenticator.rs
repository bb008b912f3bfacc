//! An authentication backend backed by an SQLite database.
//!
//! Every user may hold at most one session at a time. A second login is refused until the first
//! session is closed with [`SqliteAuthenticator::logout`].

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::migrate::MigrateError;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::auth_error::AuthError;
use crate::auth::authenticator::Authenticator;
use crate::auth::session::Session;
use crate::auth::user_data::UserData;
use crate::form::form_data::FormData;

#[derive(Clone)]
pub(crate) struct SqliteAuthenticator {
  pool: SqlitePool,
}

fn backend_error(error: sqlx::Error) -> AuthError {
  warn!("Database error occurred! {error}");
  AuthError::BackendError
}

impl SqliteAuthenticator {
  /// Constructs a new [`SqliteAuthenticator`] instance.
  pub(crate) fn new(pool: SqlitePool) -> Self {
    SqliteAuthenticator { pool }
  }

  /// Creates the `users` table if it does not exist yet.
  pub(crate) async fn migrate(&self) -> Result<(), MigrateError> {
    sqlx::migrate!().run(&self.pool).await
  }

  /// Creates a new user with an argon2 hash of the password.
  ///
  /// # Errors
  ///
  /// - [`AuthError::UserExists`]: If the username is taken.
  /// - [`AuthError::BackendError`]: If hashing or the database fails.
  ///
  #[tracing::instrument(skip(self, password))]
  pub(crate) async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
    if self.user_by_username(username).await?.is_some() {
      info!("Registration refused, username taken.");
      return Err(AuthError::UserExists);
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| {
        warn!("Failed to hash password! {e}");
        AuthError::BackendError
      })?
      .to_string();

    sqlx::query("INSERT INTO users (username, password) VALUES ($1, $2)")
      .bind(username)
      .bind(hash)
      .execute(&self.pool)
      .await
      .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
          info!("Registration refused, username taken.");
          AuthError::UserExists
        }
        e => backend_error(e),
      })?;
    info!("User registered.");
    Ok(())
  }

  /// Closes the session identified by `session_token`.
  ///
  /// # Errors
  ///
  /// - [`AuthError::InvalidSessionToken`]: If no user holds the token.
  /// - [`AuthError::BackendError`]: If a database error occurs.
  ///
  #[tracing::instrument(skip_all)]
  pub(crate) async fn logout(&self, session_token: &str) -> Result<(), AuthError> {
    let result = sqlx::query("UPDATE users SET session_token = NULL WHERE session_token = $1")
      .bind(session_token)
      .execute(&self.pool)
      .await
      .map_err(backend_error)?;
    if result.rows_affected() == 0 {
      return Err(AuthError::InvalidSessionToken);
    }
    info!("User logged out.");
    Ok(())
  }

  pub(crate) async fn is_logged_in(&self, session_token: &str) -> Result<bool, AuthError> {
    Ok(self.user_by_token(session_token).await?.is_some())
  }

  pub(crate) async fn user_by_token(
    &self,
    session_token: &str,
  ) -> Result<Option<UserData>, AuthError> {
    sqlx::query_as::<_, UserData>(
      "SELECT id, username, password, session_token, last_login FROM users WHERE session_token = $1",
    )
    .bind(session_token)
    .fetch_optional(&self.pool)
    .await
    .map_err(backend_error)
  }

  async fn user_by_username(&self, username: &str) -> Result<Option<UserData>, AuthError> {
    sqlx::query_as::<_, UserData>(
      "SELECT id, username, password, session_token, last_login FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(&self.pool)
    .await
    .map_err(backend_error)
  }
}

#[async_trait]
impl Authenticator for SqliteAuthenticator {
  /// Attempts to log a user in.
  ///
  /// Queries the database for an entry with matching username and compares the passwords. If
  /// they match and the user holds no session yet, a new session token is stored together with
  /// the login time.
  ///
  /// # Errors
  ///
  /// - [`AuthError::UserNotFoundError`]: If the username is not in database.
  /// - [`AuthError::InvalidCredentials`]: If the password is incorrect.
  /// - [`AuthError::AlreadyLoggedIn`]: If the user already holds a session.
  /// - [`AuthError::BackendError`]: If a database error occurs or the stored hash is corrupted.
  ///
  #[tracing::instrument(skip_all, fields(username = %form.username))]
  async fn authenticate(&self, form: &FormData) -> Result<Option<Session>, AuthError> {
    let user = match self.user_by_username(&form.username).await? {
      Some(user) => user,
      None => return Err(AuthError::UserNotFoundError),
    };

    let parsed_hash = PasswordHash::new(&user.password).map_err(|e| {
      warn!("Stored password hash is corrupted! {e}");
      AuthError::BackendError
    })?;
    if Argon2::default()
      .verify_password(form.password.as_bytes(), &parsed_hash)
      .is_err()
    {
      return Err(AuthError::InvalidCredentials);
    }

    if user.is_logged_in() {
      return Err(AuthError::AlreadyLoggedIn);
    }
    debug!("Previous login: {:?}", user.last_login);

    let session = Session::new(user.username, Uuid::new_v4().to_string());
    // Only claims the session if no concurrent login took it since the lookup.
    let result = sqlx::query(
      "UPDATE users SET session_token = $1, last_login = $2 WHERE id = $3 AND session_token IS NULL",
    )
    .bind(&session.session_token)
    .bind(session.last_login.to_rfc3339())
    .bind(user.id)
    .execute(&self.pool)
    .await
    .map_err(backend_error)?;
    if result.rows_affected() == 0 {
      return Err(AuthError::AlreadyLoggedIn);
    }
    info!("User logged in.");
    Ok(Some(session))
  }
}
