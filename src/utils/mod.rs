pub mod format;
pub mod suggest;
pub mod timestamps;
pub mod tool_errors;
