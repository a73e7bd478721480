use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;

use super::{ClockodoError, ConfigError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    InvalidParams,
    Denied,
    NotFound,
    Upstream,
    Timeout,
    Config,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            hint: None,
            details: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidParams, "INVALID_PARAMS", message)
    }

    pub fn denied(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Denied, "DENIED", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound, "NOT_FOUND", message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Upstream, "UPSTREAM", message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Timeout, "TIMEOUT", message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Config, "CONFIG", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Internal, "INTERNAL", message)
    }

    /// HTTP status of the failed API call, when the error came from one.
    pub fn status(&self) -> Option<u16> {
        self.details
            .as_ref()
            .and_then(|d| d.get("status"))
            .and_then(|v| v.as_u64())
            .map(|v| v as u16)
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ToolError {}

impl From<std::io::Error> for ToolError {
    fn from(err: std::io::Error) -> Self {
        ToolError::internal(err.to_string())
    }
}

impl From<ClockodoError> for ToolError {
    fn from(err: ClockodoError) -> Self {
        let message = err.to_string();
        match err {
            ClockodoError::Api { status, body } => {
                let base = match status {
                    401 | 403 => ToolError::denied(message).with_hint(
                        "Check CLOCKODO_API_USER and CLOCKODO_API_KEY and the account's permissions.",
                    ),
                    404 => ToolError::not_found(message)
                        .with_hint("The referenced id does not exist or is not visible to this user."),
                    _ => ToolError::upstream(message),
                };
                ToolError {
                    code: format!("API_{}", status),
                    ..base
                }
                .with_details(serde_json::json!({ "status": status, "body": body }))
            }
            ClockodoError::Timeout => ToolError::timeout(message),
            ClockodoError::Transport(_) => ToolError::upstream(message),
            ClockodoError::Decode { .. } | ClockodoError::Request(_) => ToolError::internal(message),
        }
    }
}

impl From<ConfigError> for ToolError {
    fn from(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::MissingVariable(_) => {
                "Set CLOCKODO_API_USER and CLOCKODO_API_KEY in the environment or in a .env file (see CLOCKODO_ENV_FILE)."
            }
            ConfigError::Invalid { .. } => "Fix or unset the variable to use the default.",
            ConfigError::EnvFile { .. } => "Check that CLOCKODO_ENV_FILE points to a readable .env file.",
        };
        ToolError::config(err.to_string()).with_hint(hint)
    }
}
