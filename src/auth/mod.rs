//! Authentication backends the login form submits to.
pub(crate) mod auth_backend;
pub(crate) mod auth_error;
pub(crate) mod authenticator;
pub(crate) mod session;
pub(crate) mod simulated_authenticator;
pub(crate) mod sqlite_authenticator;
pub(crate) mod user_data;
