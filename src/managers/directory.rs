//! Read-only lookups of customers, projects, services and users.
//!
//! The API returns inactive records as well; only active ones are shown.

use crate::errors::ToolError;
use crate::services::clockodo_client::ClockodoClient;
use crate::services::logger::Logger;
use crate::services::validation::Validation;
use crate::utils::tool_errors::unknown_tool_error;
use serde_json::Value;
use std::sync::Arc;

pub const LIST_CUSTOMERS: &str = "clockodo_list_customers";
pub const LIST_PROJECTS: &str = "clockodo_list_projects";
pub const LIST_SERVICES: &str = "clockodo_list_services";
pub const LIST_USERS: &str = "clockodo_list_users";

pub const DIRECTORY_TOOLS: &[&str] = &[LIST_CUSTOMERS, LIST_PROJECTS, LIST_SERVICES, LIST_USERS];

#[derive(Clone)]
pub struct DirectoryManager {
    logger: Logger,
    validation: Validation,
    client: Arc<ClockodoClient>,
}

struct Listing {
    id: u64,
    name: String,
    suffix: Option<String>,
}

impl DirectoryManager {
    pub fn new(logger: Logger, validation: Validation, client: Arc<ClockodoClient>) -> Self {
        Self {
            logger: logger.child("directory"),
            validation,
            client,
        }
    }

    pub async fn handle_tool(&self, tool: &str, args: Value) -> Result<String, ToolError> {
        self.validation.ensure_object(&args)?;
        let (title, empty, rows) = match tool {
            LIST_CUSTOMERS => {
                let rows: Vec<Listing> = self
                    .client
                    .list_customers()
                    .await?
                    .into_iter()
                    .filter(|c| c.active)
                    .map(|c| Listing {
                        id: c.id,
                        name: c.name,
                        suffix: None,
                    })
                    .collect();
                ("Customers", "No active customers found.", rows)
            }
            LIST_PROJECTS => {
                let customer_id = self.validation.ensure_optional_id(&args, "customer_id")?;
                let rows: Vec<Listing> = self
                    .client
                    .list_projects(customer_id)
                    .await?
                    .into_iter()
                    .filter(|p| p.active)
                    .map(|p| Listing {
                        id: p.id,
                        name: p.name,
                        suffix: Some(format!("(Customer: {})", p.customers_id)),
                    })
                    .collect();
                ("Projects", "No active projects found.", rows)
            }
            LIST_SERVICES => {
                let rows: Vec<Listing> = self
                    .client
                    .list_services()
                    .await?
                    .into_iter()
                    .filter(|s| s.active)
                    .map(|s| Listing {
                        id: s.id,
                        name: s.name,
                        suffix: None,
                    })
                    .collect();
                ("Services", "No active services found.", rows)
            }
            LIST_USERS => {
                let rows: Vec<Listing> = self
                    .client
                    .list_users()
                    .await?
                    .into_iter()
                    .filter(|u| u.active)
                    .map(|u| Listing {
                        id: u.id,
                        name: u.name,
                        suffix: None,
                    })
                    .collect();
                ("Users", "No active users found.", rows)
            }
            _ => return Err(unknown_tool_error("directory", tool, DIRECTORY_TOOLS)),
        };
        Ok(render_listing(title, empty, &rows))
    }
}

#[async_trait::async_trait]
impl crate::services::tool_executor::ToolHandler for DirectoryManager {
    async fn handle(&self, tool: &str, args: Value) -> Result<String, ToolError> {
        self.logger.debug("handle_tool", Some(&Value::String(tool.to_string())));
        self.handle_tool(tool, args).await
    }
}

fn render_listing(title: &str, empty: &str, rows: &[Listing]) -> String {
    if rows.is_empty() {
        return empty.to_string();
    }
    let mut out = format!("{} ({}):", title, rows.len());
    for row in rows {
        out.push_str(&format!("\n  {}: {}", row.id, row.name));
        if let Some(suffix) = row.suffix.as_deref() {
            out.push(' ');
            out.push_str(suffix);
        }
    }
    out
}
