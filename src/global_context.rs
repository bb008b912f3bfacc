//! Contains global statics

use config::Config;
use once_cell::sync::Lazy;

/// The configuration loaded from config file
pub(crate) static CONFIG: Lazy<Config> = Lazy::new(|| {
  Config::builder()
    .add_source(config::File::with_name("config.toml").required(false))
    // Add in settings from the environment (with a prefix of LOGIN_FORM)
    // E.g. `LOGIN_FORM_USERNAME=alice ./target/app` would set the `username` key
    .add_source(config::Environment::with_prefix("LOGIN_FORM"))
    .build()
    .expect("Configuration sources should be readable!")
});
