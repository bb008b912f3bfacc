use tracing::info;

use crate::navigation::navigator::Navigator;

/// Navigator for headless runs. Only reports where the user would be sent.
#[derive(Clone, Debug, Default)]
pub(crate) struct LoggingNavigator;

impl Navigator for LoggingNavigator {
  fn navigate_to(&self, path: &str) {
    info!("Navigating to '{}'.", path);
  }
}
