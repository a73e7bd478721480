pub mod clockodo_client;
pub mod config;
pub mod logger;
pub mod tool_executor;
pub mod validation;
