//! Login form state and its submission.
pub(crate) mod controller_settings;
pub(crate) mod form_data;
pub(crate) mod login_form_controller;
pub(crate) mod observable;
pub(crate) mod submission_status;
