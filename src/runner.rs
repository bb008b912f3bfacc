//! Headless execution of the login form.

use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use config::Config;
use sqlx::sqlite::SqlitePoolOptions;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::auth::auth_backend::AuthBackend;
use crate::auth::auth_error::AuthError;
use crate::auth::authenticator::Authenticator;
use crate::auth::simulated_authenticator::{DEFAULT_LATENCY, SimulatedAuthenticator};
use crate::auth::sqlite_authenticator::SqliteAuthenticator;
use crate::form::controller_settings::{ControllerSettings, ControllerSettingsBuilder};
use crate::form::form_data::FormData;
use crate::form::login_form_controller::LoginFormController;
use crate::form::submission_status::SubmissionState;
use crate::global_context::CONFIG;
use crate::navigation::logging_navigator::LoggingNavigator;

const DEFAULT_DATABASE_URL: &str = "sqlite:login_form.db?mode=rwc";

/// Fills the login form from the configuration and submits it once.
///
/// # Auth setup
/// The backend is picked by the `auth_backend` key, the simulated one when unset. The SQLite
/// backend is migrated before use. A session named by `logout_token` is closed, and if
/// `register_user` is set, the configured user is registered first.
///
/// # Submission
/// The submission runs until it settles or until SIGINT, which abandons it. Either way the final
/// state of the form is reported.
///
pub(crate) async fn run() -> anyhow::Result<()> {
  let form = load_form(&CONFIG);
  let authenticator = create_authenticator(&CONFIG, &form).await?;
  let settings = load_settings(&CONFIG)?;
  debug!("Controller settings: {:?}", settings);

  let controller =
    LoginFormController::with_settings(authenticator, Box::new(LoggingNavigator), settings);
  controller.form_data().set(form);
  report_changes(&controller);

  let submission = controller.submit();
  info!("Form is {}.", controller.state());
  tokio::select! {
    _ = submission => {}
    signal = tokio::signal::ctrl_c() => match signal {
      Ok(()) => info!("Ctrl-c received, abandoning submission!"),
      Err(e) => error!("Ctrl-c signal error! {e}"),
    }
  }

  match controller.state() {
    SubmissionState::Failed => warn!("Login failed: {}", controller.error_message()),
    state => info!("Form is {}.", state),
  }
  Ok(())
}

/// Logs every change of the loading flag and the error message until the controller is dropped.
fn report_changes(controller: &LoginFormController) -> JoinHandle<()> {
  let mut loading = controller.watch_is_loading();
  let mut error = controller.watch_error_message();
  tokio::spawn(async move {
    loop {
      tokio::select! {
        changed = loading.changed() => {
          if changed.is_err() {
            break;
          }
          debug!("Loading: {}", *loading.borrow_and_update());
        }
        changed = error.changed() => {
          if changed.is_err() {
            break;
          }
          let message = error.borrow_and_update().clone();
          if !message.is_empty() {
            debug!("Error message: {message}");
          }
        }
      }
    }
  })
}

/// Builds the backend selected by `auth_backend`.
async fn create_authenticator(
  config: &Config,
  form: &FormData,
) -> anyhow::Result<Box<dyn Authenticator>> {
  let backend = match config.get_string("auth_backend") {
    Ok(name) => AuthBackend::from_str(&name)
      .with_context(|| format!("Unknown auth backend '{name}'!"))?,
    Err(_) => AuthBackend::default(),
  };
  info!("Using {} auth backend.", backend);

  match backend {
    AuthBackend::Simulated => {
      let latency = match config.get_int("simulated_latency_ms") {
        Ok(ms) => {
          Duration::from_millis(u64::try_from(ms).context("Latency must not be negative!")?)
        }
        Err(_) => DEFAULT_LATENCY,
      };
      Ok(Box::new(SimulatedAuthenticator::new(latency)))
    }
    AuthBackend::Sqlite => {
      let db_url = config
        .get_string("database_url")
        .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
      info!("DATABASE_URL: {db_url}");
      let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .with_context(|| format!("Unable to open database '{db_url}'!"))?;
      let authenticator = SqliteAuthenticator::new(pool);
      authenticator
        .migrate()
        .await
        .context("Failed to migrate the user store!")?;

      if let Ok(token) = config.get_string("logout_token") {
        if authenticator.is_logged_in(&token).await? {
          authenticator.logout(&token).await?;
          info!("Closed the session of the configured logout token.");
        } else {
          warn!("Configured logout token holds no session.");
        }
      }

      if config.get_bool("register_user").unwrap_or(false) {
        match authenticator.register(&form.username, &form.password).await {
          Ok(()) | Err(AuthError::UserExists) => {}
          Err(e) => return Err(e).context("Failed to register the user!"),
        }
      }
      Ok(Box::new(authenticator))
    }
  }
}

fn load_settings(config: &Config) -> anyhow::Result<ControllerSettings> {
  let mut builder = ControllerSettingsBuilder::default();
  if let Ok(message) = config.get_string("failure_message") {
    builder = builder.failure_message(message);
  }
  if let Ok(route) = config.get_string("post_login_route") {
    builder = builder.post_login_route(route);
  }
  if let Ok(guard) = config.get_bool("guard_reentrant_submits") {
    builder = builder.guard_reentrant_submits(guard);
  }
  Ok(builder.build()?)
}

fn load_form(config: &Config) -> FormData {
  FormData {
    username: config.get_string("username").unwrap_or_default(),
    password: config.get_string("password").unwrap_or_default(),
    remember_me: config.get_bool("remember_me").unwrap_or(false),
    auto_login: config.get_bool("auto_login").unwrap_or(false),
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use config::Config;
  use tokio::time::timeout;

  use crate::auth::simulated_authenticator::SimulatedAuthenticator;
  use crate::form::controller_settings::{ControllerSettings, DEFAULT_FAILURE_MESSAGE};
  use crate::form::form_data::FormData;
  use crate::form::login_form_controller::LoginFormController;
  use crate::navigation::logging_navigator::LoggingNavigator;
  use crate::runner::{create_authenticator, load_form, load_settings, report_changes};

  fn config_with(entries: &[(&str, &str)]) -> Config {
    let mut builder = Config::builder();
    for (key, value) in entries {
      builder = builder.set_override(*key, *value).unwrap();
    }
    builder.build().unwrap()
  }

  #[test]
  fn empty_config_test() {
    let config = config_with(&[]);
    assert_eq!(ControllerSettings::default(), load_settings(&config).unwrap());
    assert_eq!(FormData::default(), load_form(&config));
  }

  #[test]
  fn settings_test() {
    let config = config_with(&[
      ("failure_message", "try again"),
      ("post_login_route", "/dashboard"),
      ("guard_reentrant_submits", "true"),
    ]);
    let settings = load_settings(&config).unwrap();
    assert_eq!("try again", settings.failure_message);
    assert_eq!(Some("/dashboard".to_string()), settings.post_login_route);
    assert!(settings.guard_reentrant_submits);
    assert_ne!(DEFAULT_FAILURE_MESSAGE, settings.failure_message);
  }

  #[test]
  fn form_test() {
    let config = config_with(&[
      ("username", "alice"),
      ("password", "secret"),
      ("remember_me", "true"),
    ]);
    let form = load_form(&config);
    assert_eq!("alice", form.username);
    assert_eq!("secret", form.password);
    assert!(form.remember_me);
    assert!(!form.auto_login);
  }

  #[tokio::test(start_paused = true)]
  async fn report_changes_ends_with_controller_test() {
    let controller = LoginFormController::new(
      Box::new(SimulatedAuthenticator::default()),
      Box::new(LoggingNavigator),
    );
    let reporter = report_changes(&controller);
    controller.submit().await;
    assert!(!reporter.is_finished());

    drop(controller);
    timeout(Duration::from_secs(5), reporter)
      .await
      .expect("Reporter should stop once the controller is gone!")
      .expect("Reporter task panicked!");
  }

  #[tokio::test]
  async fn unknown_backend_test() {
    let config = config_with(&[("auth_backend", "ldap")]);
    assert!(create_authenticator(&config, &FormData::default()).await.is_err());
  }

  #[tokio::test]
  async fn negative_latency_test() {
    let config = config_with(&[("simulated_latency_ms", "-5")]);
    assert!(create_authenticator(&config, &FormData::default()).await.is_err());
  }

  #[tokio::test]
  async fn sqlite_backend_registers_user_test() {
    let config = config_with(&[
      ("auth_backend", "sqlite"),
      ("database_url", "sqlite::memory:"),
      ("register_user", "true"),
    ]);
    let form = FormData::new("alice", "secret");
    let authenticator = create_authenticator(&config, &form).await.unwrap();
    let session = authenticator
      .authenticate(&form)
      .await
      .expect("Registered user should log in!")
      .expect("Session should be created!");
    assert_eq!("alice", session.username);
  }

  #[tokio::test]
  async fn sqlite_backend_unknown_logout_token_test() {
    let config = config_with(&[
      ("auth_backend", "sqlite"),
      ("database_url", "sqlite::memory:"),
      ("logout_token", "INVALID"),
    ]);
    assert!(create_authenticator(&config, &FormData::default()).await.is_ok());
  }
}
