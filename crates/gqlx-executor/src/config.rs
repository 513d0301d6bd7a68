//! Bridge configuration.
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `GQLX_*` environment variables (`GQLX_VERBOSITY=3`,
//! `GQLX_LOG_PROFILE=production`).

use std::path::Path;

use gqlx_core::errors::{ExError, ExErrorKind};
use gqlx_core::logging_facility::{self, Profile};
use serde::Deserialize;

/// Verbosity at which every dispatched request is logged with its query and
/// mutations.
pub const DIAGNOSTIC_VERBOSITY: u8 = 3;

const ENV_PREFIX: &str = "GQLX";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Diagnostic verbosity threshold (0 = quiet)
    pub verbosity: u8,
    pub log_profile: Profile,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            log_profile: Profile::Development,
        }
    }
}

impl BridgeConfig {
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn diagnostics_enabled(&self) -> bool {
        self.verbosity >= DIAGNOSTIC_VERBOSITY
    }

    /// Install the global subscriber for `log_profile`.
    ///
    /// Only the first call in a process has an effect, whichever config it
    /// comes from.
    pub fn init_logging(&self) {
        logging_facility::init(self.log_profile);
    }

    /// Defaults, overlaid by `path` (if given) and then the environment.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the file is unreadable or a value has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, ExError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(config_error)?;
        settings.try_deserialize().map_err(config_error)
    }

    /// Parse an embedded TOML document; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` on malformed TOML or mistyped values.
    pub fn from_toml_str(toml: &str) -> Result<Self, ExError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(config_error)
    }
}

fn config_error(err: config::ConfigError) -> ExError {
    ExError::new(ExErrorKind::InvalidConfig)
        .with_op("load_config")
        .with_message(err.to_string())
}
