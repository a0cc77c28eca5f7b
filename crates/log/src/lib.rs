//! # deligo-log
//!
//! Logging bootstrap for DeliGo tools, built on `tracing-subscriber`.
//!
//! ```no_run
//! use deligo_log::Config;
//!
//! // DELIGO_LOG=debug DELIGO_LOG_FORMAT=json deligo ...
//! deligo_log::init(Config::from_env()).expect("logger");
//! tracing::info!("ready");
//! ```
//!
//! Presets: [`Config::development`], [`Config::production`], [`Config::cli`].

mod builder;
mod config;
mod error;

pub use builder::LoggerBuilder;
pub use config::{Config, DisplayConfig, Format};
pub use error::{LogError, LogResult};

/// Installs the global subscriber described by `config`.
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn init(config: Config) -> LogResult<()> {
    LoggerBuilder::from_config(config).build()
}
