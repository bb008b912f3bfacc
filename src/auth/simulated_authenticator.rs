//! Placeholder backend which only waits, as if a request was in flight.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::auth::auth_error::AuthError;
use crate::auth::authenticator::Authenticator;
use crate::auth::session::Session;
use crate::form::form_data::FormData;

pub(crate) const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

#[derive(Clone, Debug)]
pub(crate) struct SimulatedAuthenticator {
  latency: Duration,
}

impl Default for SimulatedAuthenticator {
  fn default() -> Self {
    SimulatedAuthenticator::new(DEFAULT_LATENCY)
  }
}

impl SimulatedAuthenticator {
  pub(crate) fn new(latency: Duration) -> Self {
    SimulatedAuthenticator { latency }
  }
}

#[async_trait]
impl Authenticator for SimulatedAuthenticator {
  /// Sleeps for the configured latency. Never fails and never authenticates anyone.
  async fn authenticate(&self, _form: &FormData) -> Result<Option<Session>, AuthError> {
    debug!("Simulating authentication, waiting {:?}.", self.latency);
    tokio::time::sleep(self.latency).await;
    Ok(None)
  }
}
