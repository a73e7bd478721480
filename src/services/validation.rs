use crate::errors::ToolError;
use crate::utils::timestamps::{parse_date, parse_time};
use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;

/// Typed extraction of tool arguments. Absent and `null` are treated alike.
#[derive(Debug, Clone, Default)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    fn field<'a>(&self, args: &'a Value, name: &str) -> Option<&'a Value> {
        args.get(name).filter(|v| !v.is_null())
    }

    pub fn ensure_object(&self, args: &Value) -> Result<(), ToolError> {
        if args.is_object() {
            Ok(())
        } else {
            Err(ToolError::invalid_params("Arguments must be an object"))
        }
    }

    pub fn ensure_id(&self, args: &Value, name: &str) -> Result<u64, ToolError> {
        self.ensure_optional_id(args, name)?
            .ok_or_else(|| ToolError::invalid_params(format!("{} is required", name)))
    }

    pub fn ensure_optional_id(&self, args: &Value, name: &str) -> Result<Option<u64>, ToolError> {
        let Some(value) = self.field(args, name) else {
            return Ok(None);
        };
        let id = value
            .as_u64()
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 1.0)
                    .map(|f| f as u64)
            })
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                ToolError::invalid_params(format!("{} must be a positive integer id", name))
            })?;
        Ok(Some(id))
    }

    pub fn ensure_date(&self, args: &Value, name: &str) -> Result<NaiveDate, ToolError> {
        self.ensure_optional_date(args, name)?
            .ok_or_else(|| ToolError::invalid_params(format!("{} is required (YYYY-MM-DD)", name)))
    }

    pub fn ensure_optional_date(
        &self,
        args: &Value,
        name: &str,
    ) -> Result<Option<NaiveDate>, ToolError> {
        match self.ensure_optional_string(args, name)? {
            None => Ok(None),
            Some(raw) => parse_date(&raw, name).map(Some),
        }
    }

    pub fn ensure_time(&self, args: &Value, name: &str) -> Result<NaiveTime, ToolError> {
        self.ensure_optional_time(args, name)?
            .ok_or_else(|| ToolError::invalid_params(format!("{} is required (HH:MM)", name)))
    }

    pub fn ensure_optional_time(
        &self,
        args: &Value,
        name: &str,
    ) -> Result<Option<NaiveTime>, ToolError> {
        match self.ensure_optional_string(args, name)? {
            None => Ok(None),
            Some(raw) => parse_time(&raw, name).map(Some),
        }
    }

    pub fn ensure_optional_bool(&self, args: &Value, name: &str) -> Result<Option<bool>, ToolError> {
        match self.field(args, name) {
            None => Ok(None),
            Some(value) => value
                .as_bool()
                .map(Some)
                .ok_or_else(|| ToolError::invalid_params(format!("{} must be a boolean", name))),
        }
    }

    /// Non-empty, trimmed string.
    pub fn ensure_optional_string(
        &self,
        args: &Value,
        name: &str,
    ) -> Result<Option<String>, ToolError> {
        let Some(value) = self.field(args, name) else {
            return Ok(None);
        };
        let text = value
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ToolError::invalid_params(format!("{} must be a non-empty string", name)))?;
        Ok(Some(text.to_string()))
    }

    /// Free text; an empty string is kept so callers can clear a description.
    pub fn ensure_optional_text(&self, args: &Value, name: &str) -> Result<Option<String>, ToolError> {
        match self.field(args, name) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| ToolError::invalid_params(format!("{} must be a string", name))),
        }
    }
}
