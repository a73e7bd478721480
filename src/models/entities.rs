use serde::{Deserialize, Serialize};
use std::fmt;

/// Billing state of a time entry; `AlreadyBilled` is only ever read from the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Billable {
    NotBillable,
    #[default]
    Billable,
    AlreadyBilled,
}

impl Billable {
    /// Maps the tool-level flag: absent or `true` is billable.
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(false) => Billable::NotBillable,
            _ => Billable::Billable,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Billable::NotBillable => "no",
            Billable::Billable => "yes",
            Billable::AlreadyBilled => "billed",
        }
    }
}

impl From<Billable> for u8 {
    fn from(value: Billable) -> Self {
        match value {
            Billable::NotBillable => 0,
            Billable::Billable => 1,
            Billable::AlreadyBilled => 2,
        }
    }
}

impl TryFrom<u8> for Billable {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Billable::NotBillable),
            1 => Ok(Billable::Billable),
            2 => Ok(Billable::AlreadyBilled),
            other => Err(format!("unknown billable value {}", other)),
        }
    }
}

impl fmt::Display for Billable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: u64,
    pub customers_id: u64,
    #[serde(default)]
    pub projects_id: Option<u64>,
    pub services_id: u64,
    pub users_id: u64,
    #[serde(default)]
    pub billable: Billable,
    #[serde(default)]
    pub text: Option<String>,
    pub time_since: String,
    /// `None` while the stopwatch is running.
    #[serde(default)]
    pub time_until: Option<String>,
    /// Seconds.
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub clocked: bool,
    #[serde(default)]
    pub customers_name: Option<String>,
    #[serde(default)]
    pub projects_name: Option<String>,
    #[serde(default)]
    pub services_name: Option<String>,
    #[serde(default)]
    pub users_name: Option<String>,
}

impl TimeEntry {
    pub fn is_running(&self) -> bool {
        self.time_until.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub customers_id: u64,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub active: bool,
}
