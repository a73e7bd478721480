use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVariable(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("Failed to load env file {path}: {reason}")]
    EnvFile { path: String, reason: String },
}
