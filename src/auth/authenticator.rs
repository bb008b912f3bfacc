use async_trait::async_trait;
use dyn_clone::DynClone;

use crate::auth::auth_error::AuthError;
use crate::auth::session::Session;
use crate::form::form_data::FormData;

/// A backend the login form hands its credentials to.
///
/// Returns `Ok(None)` when no real authentication took place, `Ok(Some(_))` when a user was
/// authenticated.
#[async_trait]
pub(crate) trait Authenticator: DynClone + Send + Sync {
  async fn authenticate(&self, form: &FormData) -> Result<Option<Session>, AuthError>;
}

dyn_clone::clone_trait_object!(Authenticator);
