use crate::errors::ToolError;
use crate::managers::clock::{ClockManager, CLOCK_TOOLS};
use crate::managers::directory::{DirectoryManager, DIRECTORY_TOOLS};
use crate::managers::entries::{EntryManager, ENTRY_TOOLS};
use crate::mcp::catalog::{tool_catalog, uncompiled_tools};
use crate::services::clockodo_client::ClockodoClient;
use crate::services::config::ClockodoConfig;
use crate::services::logger::Logger;
use crate::services::tool_executor::{ToolExecutor, ToolHandler};
use crate::services::validation::Validation;
use std::collections::HashMap;
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub client: Arc<ClockodoClient>,
    pub tool_executor: Arc<ToolExecutor>,
}

impl App {
    fn validate_tool_wiring(
        handlers: &HashMap<String, Arc<dyn ToolHandler>>,
    ) -> Result<(), ToolError> {
        let mut missing: Vec<String> = tool_catalog()
            .iter()
            .filter(|tool| !handlers.contains_key(&tool.name))
            .map(|tool| tool.name.clone())
            .collect();
        let broken = uncompiled_tools();
        if missing.is_empty() && broken.is_empty() {
            return Ok(());
        }
        missing.sort();
        Err(ToolError::internal("Tool wiring is incomplete")
            .with_hint(
                "Every tool in tool_catalog.json needs a handler and a schema that compiles.",
            )
            .with_details(serde_json::json!({
                "missing_tools": missing,
                "invalid_schemas": broken,
            })))
    }

    pub fn initialize(config: ClockodoConfig) -> Result<Self, ToolError> {
        Self::initialize_with_logger(Logger::new("clockodo"), config)
    }

    pub fn initialize_with_logger(logger: Logger, config: ClockodoConfig) -> Result<Self, ToolError> {
        let validation = Validation::new();
        let client = Arc::new(ClockodoClient::new(logger.clone(), config)?);

        let entry_manager: Arc<dyn ToolHandler> = Arc::new(EntryManager::new(
            logger.clone(),
            validation.clone(),
            client.clone(),
        ));
        let clock_manager: Arc<dyn ToolHandler> = Arc::new(ClockManager::new(
            logger.clone(),
            validation.clone(),
            client.clone(),
        ));
        let directory_manager: Arc<dyn ToolHandler> = Arc::new(DirectoryManager::new(
            logger.clone(),
            validation,
            client.clone(),
        ));

        let mut handlers: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        for (tools, handler) in [
            (ENTRY_TOOLS, &entry_manager),
            (CLOCK_TOOLS, &clock_manager),
            (DIRECTORY_TOOLS, &directory_manager),
        ] {
            for tool in tools {
                handlers.insert(tool.to_string(), handler.clone());
            }
        }

        Self::validate_tool_wiring(&handlers)?;

        logger.info(
            "initialized",
            Some(&serde_json::json!({
                "base_url": client.config().base_url.as_str(),
                "tools": handlers.len(),
            })),
        );

        let tool_executor = Arc::new(ToolExecutor::new(logger.clone(), handlers));
        Ok(Self {
            logger,
            client,
            tool_executor,
        })
    }
}
