#![allow(dead_code)]

use clockodo_mcp::app::App;
use clockodo_mcp::mcp::server::McpServer;
use clockodo_mcp::services::config::ClockodoConfig;
use clockodo_mcp::services::logger::{LogLevel, Logger};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use wiremock::MockServer;

pub static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub const API_USER: &str = "me@example.com";
pub const API_KEY: &str = "secret-key";

pub fn config_for(server: &MockServer) -> ClockodoConfig {
    let base = url::Url::parse(&server.uri()).expect("mock uri");
    ClockodoConfig::new(API_USER, API_KEY).with_base_url(base)
}

pub fn app_for(server: &MockServer) -> App {
    let logger = Logger::new("test").with_level(LogLevel::Error);
    App::initialize_with_logger(logger, config_for(server)).expect("app")
}

pub fn mcp_for(server: &MockServer) -> McpServer {
    McpServer::new(app_for(server))
}

pub fn entry_json(id: u64, since: &str, until: Option<&str>, duration: Option<i64>) -> Value {
    json!({
        "id": id,
        "customers_id": 10,
        "projects_id": null,
        "services_id": 20,
        "users_id": 30,
        "billable": 1,
        "text": "Planning",
        "time_since": since,
        "time_until": until,
        "duration": duration,
        "clocked": until.is_none(),
        "customers_name": "ACME",
        "services_name": "Consulting",
        "users_name": "Jo"
    })
}

pub fn call_text(result: &Value) -> &str {
    result["content"][0]["text"].as_str().unwrap_or_default()
}
