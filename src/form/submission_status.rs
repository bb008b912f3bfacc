//! Progress and outcome of the latest login attempt.

use strum_macros::{Display, EnumIter};

/// Loading flag and user facing error message of the form.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct SubmissionStatus {
  pub(crate) is_loading: bool,
  pub(crate) error_message: String,
}

impl SubmissionStatus {
  pub(crate) fn state(&self) -> SubmissionState {
    if self.is_loading {
      SubmissionState::Submitting
    } else if self.error_message.is_empty() {
      SubmissionState::Idle
    } else {
      SubmissionState::Failed
    }
  }
}

/// States a form passes through during a submission.
///
/// [`Idle`] is both the initial and the terminal state. [`Failed`] is idle with an error message
/// shown to the user.
///
/// [`Idle`]: SubmissionState::Idle
/// [`Failed`]: SubmissionState::Failed
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum SubmissionState {
  Idle,
  Submitting,
  Failed,
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use crate::form::submission_status::{SubmissionState, SubmissionStatus};

  #[test]
  fn initial_state_test() {
    let status = SubmissionStatus::default();
    assert!(!status.is_loading);
    assert!(status.error_message.is_empty());
    assert_eq!(SubmissionState::Idle, status.state());
  }

  #[test]
  fn loading_wins_over_error_test() {
    let status = SubmissionStatus {
      is_loading: true,
      error_message: "stale".to_string(),
    };
    assert_eq!(SubmissionState::Submitting, status.state());
  }

  #[test]
  fn failed_state_test() {
    let status = SubmissionStatus {
      is_loading: false,
      error_message: "bad credentials".to_string(),
    };
    assert_eq!(SubmissionState::Failed, status.state());
  }

  #[test]
  fn display_test() {
    let rendered: Vec<String> = SubmissionState::iter().map(|s| s.to_string()).collect();
    assert_eq!(vec!["idle", "submitting", "failed"], rendered);
  }
}
