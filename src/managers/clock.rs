use crate::errors::ToolError;
use crate::models::{Billable, ClockStop, StartClockParams, TimeEntry};
use crate::services::clockodo_client::ClockodoClient;
use crate::services::logger::Logger;
use crate::services::validation::Validation;
use crate::utils::format::{
    format_duration, format_interval, format_timestamp, name_or_id, text_or_dash,
};
use crate::utils::tool_errors::unknown_tool_error;
use serde_json::Value;
use std::sync::Arc;

pub const GET_CLOCK: &str = "clockodo_get_clock";
pub const START_CLOCK: &str = "clockodo_start_clock";
pub const STOP_CLOCK: &str = "clockodo_stop_clock";

pub const CLOCK_TOOLS: &[&str] = &[GET_CLOCK, START_CLOCK, STOP_CLOCK];

/// Stopwatch tools. Whether a second stopwatch may start while one runs is
/// left to the API.
#[derive(Clone)]
pub struct ClockManager {
    logger: Logger,
    validation: Validation,
    client: Arc<ClockodoClient>,
}

impl ClockManager {
    pub fn new(logger: Logger, validation: Validation, client: Arc<ClockodoClient>) -> Self {
        Self {
            logger: logger.child("clock"),
            validation,
            client,
        }
    }

    pub async fn handle_tool(&self, tool: &str, args: Value) -> Result<String, ToolError> {
        self.validation.ensure_object(&args)?;
        match tool {
            GET_CLOCK => {
                let running = self.client.get_running_clock().await?;
                Ok(render_running(running.as_ref()))
            }
            START_CLOCK => {
                let params = self.start_params(&args)?;
                let entry = self.client.start_clock(&params).await?;
                Ok(render_started(&entry))
            }
            STOP_CLOCK => {
                let id = self.validation.ensure_id(&args, "entry_id")?;
                let stop = self.client.stop_clock(id).await?;
                Ok(render_stopped(&stop))
            }
            _ => Err(unknown_tool_error("clock", tool, CLOCK_TOOLS)),
        }
    }

    fn start_params(&self, args: &Value) -> Result<StartClockParams, ToolError> {
        let v = &self.validation;
        Ok(StartClockParams {
            customers_id: v.ensure_id(args, "customers_id")?,
            services_id: v.ensure_id(args, "services_id")?,
            projects_id: v.ensure_optional_id(args, "projects_id")?,
            billable: Billable::from_flag(v.ensure_optional_bool(args, "billable")?),
            text: v.ensure_optional_text(args, "text")?,
        })
    }
}

#[async_trait::async_trait]
impl crate::services::tool_executor::ToolHandler for ClockManager {
    async fn handle(&self, tool: &str, args: Value) -> Result<String, ToolError> {
        self.logger.debug("handle_tool", Some(&Value::String(tool.to_string())));
        self.handle_tool(tool, args).await
    }
}

fn clock_details(entry: &TimeEntry) -> String {
    format!(
        "Started: {}\nCustomer: {}\nService: {}\nText: {}",
        format_timestamp(Some(&entry.time_since)),
        name_or_id(entry.customers_name.as_deref(), entry.customers_id),
        name_or_id(entry.services_name.as_deref(), entry.services_id),
        text_or_dash(entry.text.as_deref()),
    )
}

fn render_running(running: Option<&TimeEntry>) -> String {
    match running {
        None => "No stopwatch is running.".to_string(),
        Some(entry) => format!("Running stopwatch (ID: {}):\n{}", entry.id, clock_details(entry)),
    }
}

fn render_started(entry: &TimeEntry) -> String {
    format!("Stopwatch started (ID: {}):\n{}", entry.id, clock_details(entry))
}

fn render_stopped(stop: &ClockStop) -> String {
    let entry = &stop.stopped;
    let mut out = format!(
        "Stopwatch stopped (ID: {}):\nTime: {}\nDuration: {}\nCustomer: {}\nText: {}",
        entry.id,
        format_interval(&entry.time_since, entry.time_until.as_deref()),
        format_duration(entry.duration),
        name_or_id(entry.customers_name.as_deref(), entry.customers_id),
        text_or_dash(entry.text.as_deref()),
    );
    if let Some(other) = stop.running.as_ref() {
        out.push_str(&format!(
            "\nStill running: ID {} (since {})",
            other.id,
            format_timestamp(Some(&other.time_since))
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: u64, until: Option<&str>) -> TimeEntry {
        serde_json::from_value(json!({
            "id": id,
            "customers_id": 1,
            "services_id": 2,
            "users_id": 3,
            "time_since": "2024-03-15T08:00:00Z",
            "time_until": until,
            "duration": until.map(|_| 3600),
            "services_name": "Development",
            "text": "Pairing"
        }))
        .expect("entry")
    }

    #[test]
    fn idle_clock_message() {
        assert_eq!(render_running(None), "No stopwatch is running.");
    }

    #[test]
    fn running_clock_shows_details() {
        let text = render_running(Some(&entry(9, None)));
        assert!(text.starts_with("Running stopwatch (ID: 9):\nStarted: "));
        assert!(text.contains("Customer: 1\nService: Development\nText: Pairing"));
    }

    #[test]
    fn stop_reports_still_running_entry() {
        let stop = ClockStop {
            stopped: entry(9, Some("2024-03-15T09:00:00Z")),
            running: Some(entry(10, None)),
        };
        let text = render_stopped(&stop);
        assert!(text.starts_with("Stopwatch stopped (ID: 9):"));
        assert!(text.contains("Duration: 1h 00min"));
        assert!(text.contains("\nStill running: ID 10 (since "));

        let alone = ClockStop {
            running: None,
            ..stop
        };
        assert!(!render_stopped(&alone).contains("Still running"));
    }
}
