//! State and submit logic of the login form.

use std::future::Future;

use tokio::sync::watch;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::auth::authenticator::Authenticator;
use crate::form::controller_settings::ControllerSettings;
use crate::form::form_data::FormData;
use crate::form::observable::Observable;
use crate::form::submission_status::{SubmissionState, SubmissionStatus};
use crate::navigation::navigator::Navigator;

/// Holds the form fields and reports the progress of login attempts.
///
/// Clones share all state, so a clone may be moved into a task while the view keeps reading the
/// original. The controller is the only writer of the loading flag and the error message, the
/// form fields are free to be edited through [`form_data`].
///
/// [`form_data`]: LoginFormController::form_data
#[derive(Clone)]
pub(crate) struct LoginFormController {
  form_data: Observable<FormData>,
  is_loading: Observable<bool>,
  error_message: Observable<String>,
  authenticator: Box<dyn Authenticator>,
  navigator: Box<dyn Navigator>,
  settings: ControllerSettings,
}

/// Clears the loading flag once the submission is over, including when it is dropped midway.
struct LoadingGuard {
  is_loading: Observable<bool>,
}

impl Drop for LoadingGuard {
  fn drop(&mut self) {
    self.is_loading.set(false);
  }
}

impl LoginFormController {
  pub(crate) fn new(
    authenticator: Box<dyn Authenticator>,
    navigator: Box<dyn Navigator>,
  ) -> Self {
    LoginFormController::with_settings(authenticator, navigator, ControllerSettings::default())
  }

  pub(crate) fn with_settings(
    authenticator: Box<dyn Authenticator>,
    navigator: Box<dyn Navigator>,
    settings: ControllerSettings,
  ) -> Self {
    LoginFormController {
      form_data: Observable::default(),
      is_loading: Observable::new(false),
      error_message: Observable::new(String::new()),
      authenticator,
      navigator,
      settings,
    }
  }

  pub(crate) fn form_data(&self) -> &Observable<FormData> {
    &self.form_data
  }

  pub(crate) fn is_loading(&self) -> bool {
    self.is_loading.get()
  }

  pub(crate) fn error_message(&self) -> String {
    self.error_message.get()
  }

  pub(crate) fn watch_is_loading(&self) -> watch::Receiver<bool> {
    self.is_loading.subscribe()
  }

  pub(crate) fn watch_error_message(&self) -> watch::Receiver<String> {
    self.error_message.subscribe()
  }

  pub(crate) fn status(&self) -> SubmissionStatus {
    SubmissionStatus {
      is_loading: self.is_loading(),
      error_message: self.error_message(),
    }
  }

  pub(crate) fn state(&self) -> SubmissionState {
    self.status().state()
  }

  /// Submits the current form contents.
  ///
  /// The loading flag is raised and the previous error cleared as soon as this is called, before
  /// the returned future is first polled. The form is snapshotted at the same moment, later
  /// edits do not affect this attempt.
  ///
  /// The snapshot is handed to the [`Authenticator`]. A failure is turned into the error message
  /// (the error's own text, or the configured failure message when it has none) and is never
  /// returned to the caller. If a user was authenticated and a post-login route is configured, the
  /// [`Navigator`] is sent there. The loading flag is cleared on every exit path, including when
  /// the future is dropped before completion.
  ///
  /// Unless [`guard_reentrant_submits`] is set, calls made while another submission is running
  /// are not prevented and both attempts write to the same state.
  ///
  /// [`guard_reentrant_submits`]: ControllerSettings::guard_reentrant_submits
  pub(crate) fn submit(&self) -> impl Future<Output = ()> + Send + 'static {
    let form = self.form_data.get();
    let span = info_span!("submit", username = %form.username);

    let guard = if self.settings.guard_reentrant_submits && self.is_loading() {
      span.in_scope(|| warn!("Submission already in progress, ignoring."));
      None
    } else {
      self.is_loading.set(true);
      self.error_message.set(String::new());
      Some(LoadingGuard {
        is_loading: self.is_loading.clone(),
      })
    };

    let controller = self.clone();
    async move {
      let Some(_guard) = guard else {
        return;
      };
      debug!("Login attempt: {:?}", form);

      match controller.authenticator.authenticate(&form).await {
        Ok(Some(session)) => {
          info!("User '{}' logged in successfully.", session.username);
          match &controller.settings.post_login_route {
            Some(route) => controller.navigator.navigate_to(route),
            None => debug!("No post-login route configured, staying on the form."),
          }
        }
        Ok(None) => debug!("Submission finished without authentication."),
        Err(e) => {
          let mut message = e.to_string();
          if message.is_empty() {
            message = controller.settings.failure_message.clone();
          }
          warn!("Login failed! {message}");
          controller.error_message.set(message);
        }
      }
    }
    .instrument(span)
  }
}
