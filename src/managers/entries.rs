use crate::errors::ToolError;
use crate::models::{Billable, CreateEntryParams, EditEntryParams, ListEntriesParams, TimeEntry};
use crate::services::clockodo_client::ClockodoClient;
use crate::services::logger::Logger;
use crate::services::validation::Validation;
use crate::utils::format::{
    format_duration, format_interval, name_or_id, name_or_optional_id, text_or_dash,
};
use crate::utils::timestamps::{combine_local, today_local, DayRange};
use crate::utils::tool_errors::unknown_tool_error;
use serde_json::Value;
use std::sync::Arc;

pub const LIST_ENTRIES: &str = "clockodo_list_entries";
pub const CREATE_ENTRY: &str = "clockodo_create_entry";
pub const EDIT_ENTRY: &str = "clockodo_edit_entry";
pub const DELETE_ENTRY: &str = "clockodo_delete_entry";

pub const ENTRY_TOOLS: &[&str] = &[LIST_ENTRIES, CREATE_ENTRY, EDIT_ENTRY, DELETE_ENTRY];

#[derive(Clone)]
pub struct EntryManager {
    logger: Logger,
    validation: Validation,
    client: Arc<ClockodoClient>,
}

impl EntryManager {
    pub fn new(logger: Logger, validation: Validation, client: Arc<ClockodoClient>) -> Self {
        Self {
            logger: logger.child("entries"),
            validation,
            client,
        }
    }

    pub async fn handle_tool(&self, tool: &str, args: Value) -> Result<String, ToolError> {
        self.validation.ensure_object(&args)?;
        match tool {
            LIST_ENTRIES => self.list(&args).await,
            CREATE_ENTRY => self.create(&args).await,
            EDIT_ENTRY => self.edit(&args).await,
            DELETE_ENTRY => self.delete(&args).await,
            _ => Err(unknown_tool_error("entries", tool, ENTRY_TOOLS)),
        }
    }

    async fn list(&self, args: &Value) -> Result<String, ToolError> {
        let v = &self.validation;
        let range = DayRange::resolve(
            v.ensure_optional_date(args, "date_from")?,
            v.ensure_optional_date(args, "date_to")?,
            today_local(),
        )?;
        let (time_since, time_until) = range.bounds_local()?;
        let params = ListEntriesParams {
            time_since,
            time_until,
            users_id: v.ensure_optional_id(args, "users_id")?,
            customers_id: v.ensure_optional_id(args, "customers_id")?,
            projects_id: v.ensure_optional_id(args, "projects_id")?,
            services_id: v.ensure_optional_id(args, "services_id")?,
        };
        let page = self.client.list_entries(&params).await?;
        Ok(render_entry_list(&range, &page.entries))
    }

    async fn create(&self, args: &Value) -> Result<String, ToolError> {
        let params = self.create_params(args)?;
        let entry = self.client.create_entry(&params).await?;
        self.logger.debug(
            "entry created",
            Some(&serde_json::json!({ "id": entry.id })),
        );
        Ok(render_created(&entry))
    }

    fn create_params(&self, args: &Value) -> Result<CreateEntryParams, ToolError> {
        let v = &self.validation;
        let date = v.ensure_date(args, "date")?;
        let time_from = v.ensure_time(args, "time_from")?;
        let time_until = v.ensure_time(args, "time_until")?;
        Ok(CreateEntryParams {
            customers_id: v.ensure_id(args, "customers_id")?,
            services_id: v.ensure_id(args, "services_id")?,
            billable: Billable::from_flag(v.ensure_optional_bool(args, "billable")?),
            time_since: combine_local(date, time_from)?,
            time_until: combine_local(date, time_until)?,
            projects_id: v.ensure_optional_id(args, "projects_id")?,
            text: v.ensure_optional_text(args, "text")?,
            users_id: v.ensure_optional_id(args, "users_id")?,
        })
    }

    async fn edit(&self, args: &Value) -> Result<String, ToolError> {
        let id = self.validation.ensure_id(args, "entry_id")?;
        let params = self.edit_params(args)?;
        let entry = self.client.edit_entry(id, &params).await?;
        Ok(render_edited(id, &entry))
    }

    fn edit_params(&self, args: &Value) -> Result<EditEntryParams, ToolError> {
        let v = &self.validation;
        let date = v.ensure_optional_date(args, "date")?;
        let time_from = v.ensure_optional_time(args, "time_from")?;
        let time_until = v.ensure_optional_time(args, "time_until")?;

        let (time_since, time_until) = match (date, time_from, time_until) {
            (None, None, None) => (None, None),
            (Some(_), None, None) => {
                return Err(ToolError::invalid_params(
                    "date requires time_from and/or time_until",
                ))
            }
            (None, _, _) => {
                return Err(ToolError::invalid_params(
                    "time_from and time_until require date",
                ))
            }
            (Some(date), from, until) => (
                from.map(|t| combine_local(date, t)).transpose()?,
                until.map(|t| combine_local(date, t)).transpose()?,
            ),
        };

        let params = EditEntryParams {
            customers_id: v.ensure_optional_id(args, "customers_id")?,
            services_id: v.ensure_optional_id(args, "services_id")?,
            projects_id: v.ensure_optional_id(args, "projects_id")?,
            billable: v
                .ensure_optional_bool(args, "billable")?
                .map(|flag| Billable::from_flag(Some(flag))),
            time_since,
            time_until,
            text: v.ensure_optional_text(args, "text")?,
        };
        if params.is_empty() {
            return Err(ToolError::invalid_params("Nothing to update")
                .with_hint("Pass at least one field besides entry_id."));
        }
        Ok(params)
    }

    async fn delete(&self, args: &Value) -> Result<String, ToolError> {
        let id = self.validation.ensure_id(args, "entry_id")?;
        if self.client.delete_entry(id).await? {
            Ok(format!("Time entry {} deleted.", id))
        } else {
            Err(ToolError::upstream(format!(
                "Clockodo did not confirm deletion of time entry {}",
                id
            ))
            .with_details(serde_json::json!({ "entry_id": id, "success": false })))
        }
    }
}

#[async_trait::async_trait]
impl crate::services::tool_executor::ToolHandler for EntryManager {
    async fn handle(&self, tool: &str, args: Value) -> Result<String, ToolError> {
        self.logger.debug("handle_tool", Some(&Value::String(tool.to_string())));
        self.handle_tool(tool, args).await
    }
}

fn interval(entry: &TimeEntry) -> String {
    format_interval(&entry.time_since, entry.time_until.as_deref())
}

fn render_entry_list(range: &DayRange, entries: &[TimeEntry]) -> String {
    if entries.is_empty() {
        return format!(
            "No time entries found for {} to {}.",
            range.label_from(),
            range.label_to()
        );
    }
    let blocks: Vec<String> = entries
        .iter()
        .map(|entry| {
            format!(
                "ID {} | {} | {}\nCustomer: {} | Project: {} | Service: {} | User: {}\nText: {} | Billable: {}",
                entry.id,
                interval(entry),
                format_duration(entry.duration),
                name_or_id(entry.customers_name.as_deref(), entry.customers_id),
                name_or_optional_id(entry.projects_name.as_deref(), entry.projects_id),
                name_or_id(entry.services_name.as_deref(), entry.services_id),
                name_or_id(entry.users_name.as_deref(), entry.users_id),
                text_or_dash(entry.text.as_deref()),
                entry.billable,
            )
        })
        .collect();
    format!(
        "Time entries ({} to {}):\n\n{}",
        range.label_from(),
        range.label_to(),
        blocks.join("\n\n")
    )
}

fn render_created(entry: &TimeEntry) -> String {
    format!(
        "Time entry created (ID: {}):\nTime: {}\nCustomer: {}\nService: {}\nText: {}",
        entry.id,
        interval(entry),
        name_or_id(entry.customers_name.as_deref(), entry.customers_id),
        name_or_id(entry.services_name.as_deref(), entry.services_id),
        text_or_dash(entry.text.as_deref()),
    )
}

fn render_edited(id: u64, entry: &TimeEntry) -> String {
    format!(
        "Time entry {} updated:\nTime: {}\nCustomer: {}\nService: {}\nText: {}",
        id,
        interval(entry),
        name_or_id(entry.customers_name.as_deref(), entry.customers_id),
        name_or_id(entry.services_name.as_deref(), entry.services_id),
        text_or_dash(entry.text.as_deref()),
    )
}
