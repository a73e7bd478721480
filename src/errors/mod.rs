mod clockodo_error;
mod config_error;
mod mcp_error;
mod tool_error;

pub use clockodo_error::{ClockodoError, ClockodoResult};
pub use config_error::ConfigError;
pub use mcp_error::{ErrorCode, McpError};
pub use tool_error::{ToolError, ToolErrorKind};
