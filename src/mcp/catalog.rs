use crate::constants::limits;
use crate::errors::{ErrorCode, McpError};
use crate::utils::suggest::suggest;
use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

static TOOL_CATALOG: Lazy<Vec<ToolDef>> = Lazy::new(|| {
    let raw = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tool_catalog.json"));
    serde_json::from_str(raw).expect("tool_catalog.json must be valid JSON")
});

static TOOL_MAP: Lazy<HashMap<String, ToolDef>> = Lazy::new(|| {
    TOOL_CATALOG
        .iter()
        .cloned()
        .map(|tool| (tool.name.clone(), tool))
        .collect()
});

static TOOL_VALIDATORS: Lazy<HashMap<String, JSONSchema>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for tool in TOOL_CATALOG.iter() {
        if let Ok(schema) = JSONSchema::compile(&tool.input_schema) {
            map.insert(tool.name.clone(), schema);
        }
    }
    map
});

pub fn tool_catalog() -> &'static Vec<ToolDef> {
    &TOOL_CATALOG
}

pub fn tool_by_name(name: &str) -> Option<&'static ToolDef> {
    TOOL_MAP.get(name)
}

/// Names of catalog tools whose schema failed to compile.
pub fn uncompiled_tools() -> Vec<String> {
    TOOL_CATALOG
        .iter()
        .filter(|tool| !TOOL_VALIDATORS.contains_key(&tool.name))
        .map(|tool| tool.name.clone())
        .collect()
}

/// The `tools/list` payload.
pub fn list_tools() -> Value {
    serde_json::json!({ "tools": tool_catalog() })
}

/// Checks `args` against the tool's declared schema. Unknown tools pass here
/// and are rejected by the executor.
pub fn validate_tool_args(tool_name: &str, args: &Value) -> Result<(), McpError> {
    let Some(tool) = tool_by_name(tool_name) else {
        return Ok(());
    };
    let Some(schema) = TOOL_VALIDATORS.get(tool_name) else {
        return Ok(());
    };
    if let Err(errors) = schema.validate(args) {
        let message = format_schema_errors(tool_name, errors, &tool.input_schema);
        return Err(McpError::new(ErrorCode::InvalidParams, message));
    }
    Ok(())
}

fn format_schema_errors(
    tool_name: &str,
    errors: jsonschema::ErrorIterator,
    schema: &Value,
) -> String {
    let properties: Vec<String> = schema
        .get("properties")
        .and_then(|v| v.as_object())
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();
    let mut rendered = Vec::new();
    let mut did_you_means = Vec::new();

    for err in errors.take(limits::MAX_SCHEMA_ERRORS) {
        let instance_path = if err.instance_path.to_string().is_empty() {
            "(root)".to_string()
        } else {
            err.instance_path.to_string()
        };
        match &err.kind {
            ValidationErrorKind::AdditionalProperties { unexpected } => {
                for unknown in unexpected {
                    rendered.push(format!("{}: unknown field '{}'", instance_path, unknown));
                    let suggestions = suggest(unknown, &properties, 3);
                    if !suggestions.is_empty() {
                        did_you_means.push(format!(
                            "field '{}': {}",
                            unknown,
                            suggestions.join(", ")
                        ));
                    }
                }
            }
            ValidationErrorKind::Required { property } => {
                let prop = property
                    .as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| property.to_string());
                rendered.push(format!(
                    "{}: missing required field '{}'",
                    instance_path, prop
                ));
            }
            ValidationErrorKind::Type { kind } => {
                rendered.push(format!(
                    "{}: expected {}",
                    instance_path,
                    format_type_kind(kind)
                ));
            }
            ValidationErrorKind::Pattern { .. } => {
                let expected = match instance_path.rsplit('/').next() {
                    Some("date") | Some("date_from") | Some("date_to") => "YYYY-MM-DD",
                    Some("time_from") | Some("time_until") => "HH:MM",
                    _ => "the documented format",
                };
                rendered.push(format!("{}: expected {}", instance_path, expected));
            }
            ValidationErrorKind::Minimum { .. } => {
                rendered.push(format!("{}: must be a positive id", instance_path));
            }
            _ => {
                rendered.push(format!("{}: {}", instance_path, err));
            }
        }
    }

    let mut lines = vec![format!("Invalid arguments for {}", tool_name)];
    lines.extend(rendered.iter().map(|line| format!("- {}", line)));
    if !did_you_means.is_empty() {
        lines.push(format!("Did you mean: {}", did_you_means.join(" | ")));
    }
    lines.join("\n")
}

fn format_type_kind(kind: &TypeKind) -> String {
    match kind {
        TypeKind::Single(primitive) => primitive.to_string(),
        TypeKind::Multiple(types) => {
            let list: Vec<String> = (*types).into_iter().map(|t| t.to_string()).collect();
            if list.is_empty() {
                "unknown".to_string()
            } else {
                list.join(" | ")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalog_parses_and_compiles() {
        assert_eq!(tool_catalog().len(), 11);
        assert!(uncompiled_tools().is_empty());
        for tool in tool_catalog() {
            assert_eq!(
                tool.input_schema.get("additionalProperties"),
                Some(&Value::Bool(false)),
                "{} must reject unknown fields",
                tool.name
            );
        }
    }

    #[test]
    fn list_tools_serializes_input_schema_key() {
        let payload = list_tools();
        let first = &payload["tools"][0];
        assert!(first.get("inputSchema").is_some());
        assert!(first.get("input_schema").is_none());
    }

    #[test]
    fn valid_create_args_pass() {
        let args = json!({
            "customers_id": 1,
            "services_id": 2,
            "date": "2024-03-15",
            "time_from": "09:00",
            "time_until": "10:00",
            "billable": false
        });
        assert!(validate_tool_args("clockodo_create_entry", &args).is_ok());
    }

    #[test]
    fn missing_and_malformed_fields_are_reported() {
        let args = json!({"customers_id": "1", "date": "15.03.2024"});
        let err = validate_tool_args("clockodo_create_entry", &args).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParams);
        assert!(err.message.starts_with("Invalid arguments for clockodo_create_entry"));
        assert!(err.message.contains("missing required field 'services_id'"));
        assert!(err.message.contains("/customers_id: expected integer"));
        assert!(err.message.contains("/date: expected YYYY-MM-DD"));
    }

    #[test]
    fn unknown_field_gets_suggestion() {
        let args = json!({"entry_id": 1, "customer_id": 2});
        let err = validate_tool_args("clockodo_edit_entry", &args).unwrap_err();
        assert!(err.message.contains("unknown field 'customer_id'"));
        assert!(err.message.contains("Did you mean: field 'customer_id': customers_id"));
    }

    #[test]
    fn zero_id_is_rejected() {
        let err = validate_tool_args("clockodo_delete_entry", &json!({"entry_id": 0})).unwrap_err();
        assert!(err.message.contains("/entry_id: must be a positive id"));
    }

    #[test]
    fn unknown_tool_is_left_to_executor() {
        assert!(validate_tool_args("nope", &json!({"x": 1})).is_ok());
    }
}
