use derive_builder::Builder;

/// Message shown when a failed attempt carries no message of its own.
pub(crate) const DEFAULT_FAILURE_MESSAGE: &str = "login failed, please retry";

/// Tunables of a [`LoginFormController`].
///
/// [`LoginFormController`]: crate::form::login_form_controller::LoginFormController
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
#[builder(pattern = "owned", default)]
pub(crate) struct ControllerSettings {
  #[builder(setter(into))]
  pub(crate) failure_message: String,
  /// Where to go after a successful login. Navigation is disabled while unset.
  #[builder(setter(into, strip_option))]
  pub(crate) post_login_route: Option<String>,
  /// Ignore `submit` calls made while a submission is still running.
  pub(crate) guard_reentrant_submits: bool,
}

impl Default for ControllerSettings {
  fn default() -> Self {
    ControllerSettings {
      failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
      post_login_route: None,
      guard_reentrant_submits: false,
    }
  }
}
