use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::constants::limits;
use crate::errors::{ToolError, ToolErrorKind};
use crate::services::logger::Logger;
use crate::utils::suggest::suggest;

/// A handler serves one or more tool names and returns the rendered text.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn handle(&self, tool: &str, args: Value) -> Result<String, ToolError>;
}

#[derive(Clone)]
pub struct ToolExecutor {
    logger: Logger,
    handlers: Arc<HashMap<String, Arc<dyn ToolHandler>>>,
}

impl ToolExecutor {
    pub fn new(logger: Logger, handlers: HashMap<String, Arc<dyn ToolHandler>>) -> Self {
        Self {
            logger: logger.child("executor"),
            handlers: Arc::new(handlers),
        }
    }

    pub fn has_handler(&self, tool: &str) -> bool {
        self.handlers.contains_key(tool)
    }

    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn execute(&self, tool: &str, args: Value) -> Result<String, ToolError> {
        let Some(handler) = self.handlers.get(tool) else {
            let suggestions = suggest(tool, &self.tool_names(), limits::MAX_SUGGESTIONS);
            let hint = if suggestions.is_empty() {
                "Call tools/list to see the available tools".to_string()
            } else {
                format!("Did you mean: {}?", suggestions.join(", "))
            };
            return Err(ToolError::invalid_params(format!("Unknown tool: {}", tool))
                .with_hint(hint)
                .with_details(serde_json::json!({ "did_you_mean": suggestions })));
        };

        let trace_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();
        self.logger.debug(
            "call",
            Some(&serde_json::json!({ "tool": tool, "trace_id": trace_id })),
        );

        match handler.handle(tool, args).await {
            Ok(text) => {
                self.logger.info(
                    "ok",
                    Some(&serde_json::json!({
                        "tool": tool,
                        "trace_id": trace_id,
                        "duration_ms": started.elapsed().as_millis() as u64,
                    })),
                );
                Ok(text)
            }
            Err(err) => {
                let meta = serde_json::json!({
                    "tool": tool,
                    "trace_id": trace_id,
                    "duration_ms": started.elapsed().as_millis() as u64,
                    "kind": err.kind,
                    "code": err.code,
                    "message": err.message,
                });
                if err.kind == ToolErrorKind::Internal {
                    self.logger.error("failed", Some(&meta));
                } else {
                    self.logger.warn("failed", Some(&meta));
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl ToolHandler for Echo {
        async fn handle(&self, tool: &str, args: Value) -> Result<String, ToolError> {
            match args.get("fail").and_then(|v| v.as_bool()) {
                Some(true) => Err(ToolError::upstream("boom")),
                _ => Ok(format!("{} ok", tool)),
            }
        }
    }

    fn executor() -> ToolExecutor {
        let echo: Arc<dyn ToolHandler> = Arc::new(Echo);
        let mut handlers = HashMap::new();
        handlers.insert("clockodo_get_clock".to_string(), echo.clone());
        handlers.insert("clockodo_list_users".to_string(), echo);
        ToolExecutor::new(Logger::new("test"), handlers)
    }

    #[tokio::test]
    async fn dispatches_by_name() {
        let text = executor()
            .execute("clockodo_get_clock", serde_json::json!({}))
            .await
            .expect("ok");
        assert_eq!(text, "clockodo_get_clock ok");
    }

    #[tokio::test]
    async fn handler_errors_pass_through() {
        let err = executor()
            .execute("clockodo_list_users", serde_json::json!({"fail": true}))
            .await
            .unwrap_err();
        assert_eq!(err.message, "boom");
    }

    #[tokio::test]
    async fn unknown_tool_suggests() {
        let err = executor()
            .execute("clockodo_get_clok", serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Unknown tool: clockodo_get_clok");
        assert!(err
            .hint
            .as_deref()
            .unwrap_or_default()
            .contains("clockodo_get_clock"));
    }
}
