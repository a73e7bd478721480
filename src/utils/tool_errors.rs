use crate::constants::limits;
use crate::errors::ToolError;
use crate::utils::suggest::suggest;

/// Error for a tool name that no handler (or not this handler) serves.
pub fn unknown_tool_error(scope: &str, tool: &str, known_tools: &[&str]) -> ToolError {
    let known: Vec<String> = known_tools.iter().map(|s| s.to_string()).collect();
    let suggestions = suggest(tool, &known, limits::MAX_SUGGESTIONS);
    let did_you_mean = if suggestions.is_empty() {
        String::new()
    } else {
        format!("Did you mean: {}?", suggestions.join(", "))
    };
    let list_hint = if known.is_empty() {
        String::new()
    } else {
        format!("Use one of: {}.", known.join(", "))
    };
    let hint = [did_you_mean, list_hint]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let mut err = ToolError::invalid_params(format!("Unknown {} tool: {}", scope, tool));
    if !hint.is_empty() {
        err = err.with_hint(hint);
    }
    err.with_details(serde_json::json!({
        "known_tools": known,
        "did_you_mean": suggestions,
    }))
}

/// Text shown to the client for a failed call.
pub fn render_tool_error(err: &ToolError) -> String {
    let kind = serde_json::to_value(err.kind)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| "error".to_string());
    let mut out = format!("Error ({}, {}): {}", kind, err.code, err.message);
    if let Some(hint) = err.hint.as_deref() {
        out.push_str("\nHint: ");
        out.push_str(hint);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClockodoError;

    #[test]
    fn unknown_tool_lists_known_and_suggests() {
        let err = unknown_tool_error(
            "clock",
            "clockodo_stop_clok",
            &["clockodo_get_clock", "clockodo_start_clock", "clockodo_stop_clock"],
        );
        assert_eq!(err.message, "Unknown clock tool: clockodo_stop_clok");
        let hint = err.hint.as_deref().unwrap_or_default();
        assert!(hint.starts_with("Did you mean: clockodo_stop_clock"));
        assert!(hint.contains("Use one of: clockodo_get_clock"));
    }

    #[test]
    fn rendered_api_error_carries_status_and_body() {
        let err = ToolError::from(ClockodoError::Api {
            status: 404,
            body: "{\"error\":\"not found\"}".to_string(),
        });
        let text = render_tool_error(&err);
        assert!(text.starts_with("Error (not_found, API_404): Clockodo API error 404:"));
        assert!(text.contains("not found"));
        assert!(text.contains("\nHint: "));
    }
}
