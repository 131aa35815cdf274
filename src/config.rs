//! Tap configuration
//!
//! The configuration is read once at start-up (from a JSON file, inline JSON
//! or `TAP_OPENAI_*` environment variables), validated, and then shared by
//! reference for the whole run. Nothing in it changes afterwards.

use crate::auth::BearerToken;
use crate::error::{Error, Result, ResultExt};
use crate::types::{JsonObject, JsonValue};
use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Datetime format accepted for `start_date` and `end_date`
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Default API base URL
pub const DEFAULT_API_URL: &str = "https://api.openai.com";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "TAP_OPENAI_";

/// Every config field the tap understands, in declaration order
pub const CONFIG_FIELDS: &[&str] = &[
    "auth_token",
    "start_date",
    "end_date",
    "exclude_project_costs",
    "file_format",
    "group_by",
    "new_endpoint",
    "api_url",
    "user_agent",
];

const BOOL_FIELDS: &[&str] = &["exclude_project_costs", "new_endpoint"];

// ============================================================================
// TapConfig
// ============================================================================

/// Validated, immutable tap configuration
#[derive(Clone)]
pub struct TapConfig {
    /// API key sent as a bearer token
    pub auth_token: BearerToken,
    /// Start of the extraction window
    pub start_date: NaiveDateTime,
    /// End of the extraction window
    pub end_date: NaiveDateTime,
    /// Exclude project costs from the export
    pub exclude_project_costs: bool,
    /// Export file format selector, passed through to the API
    pub file_format: String,
    /// Columns to group by, passed through to the API
    pub group_by: String,
    /// Use the new export endpoint behavior
    pub new_endpoint: bool,
    /// Base URL of the API
    pub api_url: String,
    /// Optional User-Agent override
    pub user_agent: Option<String>,
}

impl std::fmt::Debug for TapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapConfig")
            .field("auth_token", &self.auth_token)
            .field("start_date", &self.start_date)
            .field("end_date", &self.end_date)
            .field("exclude_project_costs", &self.exclude_project_costs)
            .field("file_format", &self.file_format)
            .field("group_by", &self.group_by)
            .field("new_endpoint", &self.new_endpoint)
            .field("api_url", &self.api_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl TapConfig {
    /// Build a config from a JSON object, validating every field.
    ///
    /// Required: `auth_token`, `start_date`, `end_date`,
    /// `exclude_project_costs`, `file_format`, `group_by`.
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::config("Config must be a JSON object"))?;

        let auth_token = required_str(obj, "auth_token")?;
        if auth_token.is_empty() {
            return Err(Error::invalid_value("auth_token", "must not be empty"));
        }

        Ok(Self {
            auth_token: BearerToken::new(auth_token),
            start_date: parse_datetime("start_date", &required_str(obj, "start_date")?)?,
            end_date: parse_datetime("end_date", &required_str(obj, "end_date")?)?,
            exclude_project_costs: required_bool(obj, "exclude_project_costs")?,
            file_format: required_str(obj, "file_format")?,
            group_by: required_str(obj, "group_by")?,
            new_endpoint: optional_bool(obj, "new_endpoint")?.unwrap_or(true),
            api_url: optional_str(obj, "api_url")?.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            user_agent: optional_str(obj, "user_agent")?,
        })
    }

    /// Parse a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Load the config the way the CLI does.
    ///
    /// Inline JSON takes precedence over the file. Fields missing from both
    /// are filled from `TAP_OPENAI_<FIELD>` environment variables.
    pub fn load(path: Option<&Path>, inline: Option<&str>) -> Result<Self> {
        let mut value = if let Some(json_str) = inline {
            serde_json::from_str(json_str)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?
        } else if let Some(path) = path {
            if !path.exists() {
                return Err(Error::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?
        } else {
            JsonValue::Object(JsonObject::new())
        };

        if let JsonValue::Object(obj) = &mut value {
            merge_env(obj, |key| std::env::var(key).ok());
        }

        let config = Self::from_value(&value)?;
        debug!(?config, "Loaded tap configuration");
        Ok(config)
    }
}

/// Fill fields missing from `obj` with `TAP_OPENAI_<FIELD>` values from `lookup`.
///
/// Boolean fields accept `true`/`false` (any case); anything else is kept as a
/// string and rejected later by validation.
pub fn merge_env<F>(obj: &mut JsonObject, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for field in CONFIG_FIELDS {
        if obj.get(*field).is_some_and(|v| !v.is_null()) {
            continue;
        }
        let key = format!("{ENV_PREFIX}{}", field.to_uppercase());
        let Some(raw) = lookup(&key) else {
            continue;
        };

        let value = if BOOL_FIELDS.contains(field) {
            match raw.to_lowercase().as_str() {
                "true" => JsonValue::Bool(true),
                "false" => JsonValue::Bool(false),
                _ => JsonValue::String(raw),
            }
        } else {
            JsonValue::String(raw)
        };
        obj.insert((*field).to_string(), value);
    }
}

fn parse_datetime(field: &str, raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT).map_err(|e| {
        Error::invalid_value(
            field,
            format!("'{raw}' does not match {DATETIME_FORMAT}: {e}"),
        )
    })
}

fn required_str(obj: &JsonObject, field: &str) -> Result<String> {
    optional_str(obj, field)?.ok_or_else(|| Error::missing_field(field))
}

fn optional_str(obj: &JsonObject, field: &str) -> Result<Option<String>> {
    match obj.get(field) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::invalid_value(
            field,
            format!("expected a string, got {other}"),
        )),
    }
}

fn required_bool(obj: &JsonObject, field: &str) -> Result<bool> {
    optional_bool(obj, field)?.ok_or_else(|| Error::missing_field(field))
}

fn optional_bool(obj: &JsonObject, field: &str) -> Result<Option<bool>> {
    match obj.get(field) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(Error::invalid_value(
            field,
            format!("expected a boolean, got {other}"),
        )),
    }
}
