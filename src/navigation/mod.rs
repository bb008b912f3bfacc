//! Transitions to other views after the form finishes.
pub(crate) mod logging_navigator;
pub(crate) mod navigator;
