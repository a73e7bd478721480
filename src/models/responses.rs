use serde::Deserialize;
use serde_json::Value;

use super::{Customer, Project, Service, TimeEntry, User};

#[derive(Debug, Clone, Deserialize)]
pub struct EntriesPage {
    /// Passed through untouched; only one page is ever requested.
    #[serde(default)]
    pub paging: Value,
    #[serde(default)]
    pub entries: Vec<TimeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntryResponse {
    pub entry: TimeEntry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomersResponse {
    #[serde(default)]
    pub customers: Vec<Customer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectsResponse {
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServicesResponse {
    #[serde(default)]
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClockResponse {
    #[serde(default)]
    pub running: Option<TimeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClockStartResponse {
    pub running: TimeEntry,
}

/// Result of stopping a stopwatch: the stopped entry and whatever still runs.
#[derive(Debug, Clone, Deserialize)]
pub struct ClockStop {
    pub stopped: TimeEntry,
    #[serde(default)]
    pub running: Option<TimeEntry>,
}
