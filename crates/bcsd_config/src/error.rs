// crates/bcsd_config/src/error.rs

//! Configuration error types.

use bcsd_foundation::BcsdError;
use thiserror::Error;

/// Configuration result alias.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error enum.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A path template references a placeholder with no value.
    #[error("path template \"{template}\" is missing a value for key \"{key}\"")]
    MissingKey {
        /// The template being resolved.
        template: String,
        /// The placeholder with no value.
        key: String,
    },

    /// A path template has unbalanced or empty braces.
    #[error("malformed path template \"{template}\": {reason}")]
    MalformedTemplate {
        /// The offending template.
        template: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration: {message}")]
    InvalidValue {
        /// Description of the invalid value.
        message: String,
    },

    /// An unknown scenario name was supplied.
    #[error("unknown scenario: {name} (expected historical, rcp45 or rcp85)")]
    UnknownScenario {
        /// The name that did not parse.
        name: String,
    },
}

impl From<ConfigError> for BcsdError {
    fn from(err: ConfigError) -> Self {
        BcsdError::config(err.to_string())
    }
}
