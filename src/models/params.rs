use serde::Serialize;
use serde_json::{Map, Value};

use super::Billable;
use crate::errors::{ClockodoError, ClockodoResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListEntriesParams {
    pub time_since: String,
    pub time_until: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customers_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateEntryParams {
    pub customers_id: u64,
    pub services_id: u64,
    pub billable: Billable,
    pub time_since: String,
    pub time_until: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_id: Option<u64>,
}

/// Partial update: every `None` field is left untouched on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditEntryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customers_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable: Option<Billable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_until: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl EditEntryParams {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartClockParams {
    pub customers_id: u64,
    pub services_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects_id: Option<u64>,
    pub billable: Billable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListProjectsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customers_id: Option<u64>,
}

/// Flattens a parameter struct into its wire fields, dropping absent and null values.
pub fn wire_fields<P: Serialize>(params: &P) -> ClockodoResult<Map<String, Value>> {
    let value = serde_json::to_value(params)
        .map_err(|err| ClockodoError::Request(format!("unserializable parameters: {}", err)))?;
    match value {
        Value::Object(map) => Ok(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        Value::Null => Ok(Map::new()),
        other => Err(ClockodoError::Request(format!(
            "parameters must serialize to an object, got {}",
            other
        ))),
    }
}

/// Query-string form of [`wire_fields`]: strings verbatim, everything else in JSON notation.
pub fn wire_query_pairs(fields: &Map<String, Value>) -> Vec<(String, String)> {
    fields
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| {
            let rendered = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), rendered)
        })
        .collect()
}
