//! Fixed schemas for the billing usage stream and the tap config

use super::types::{JsonSchema, JsonType, SchemaProperty};
use serde_json::json;

/// Schema of a `billing_usage` record
pub fn billing_usage_schema() -> JsonSchema {
    let mut schema = JsonSchema::new();
    schema.add_property("currency", SchemaProperty::nullable(JsonType::String));
    schema.add_property("name", SchemaProperty::nullable(JsonType::String));
    schema.add_property("cost", SchemaProperty::nullable(JsonType::Number));
    schema.add_property("user_id", SchemaProperty::nullable(JsonType::String));
    schema.add_property("user_email", SchemaProperty::nullable(JsonType::String));
    schema.add_property("cost_in_major", SchemaProperty::nullable(JsonType::String));
    schema.add_property(
        "date",
        SchemaProperty::nullable(JsonType::String).with_format("date"),
    );
    schema.add_property("timestamp", SchemaProperty::nullable(JsonType::Integer));
    schema
}

/// Schema of the tap configuration, as printed by `tap-openai spec`
pub fn config_schema() -> JsonSchema {
    let mut schema = JsonSchema::new();
    schema.schema = Some("http://json-schema.org/draft-07/schema#".to_string());

    schema.add_property(
        "auth_token",
        SchemaProperty::new(JsonType::String)
            .with_title("API Key")
            .with_description("The token to authenticate against the API service")
            .secret(),
    );
    schema.add_property(
        "start_date",
        SchemaProperty::new(JsonType::String)
            .with_format("date-time")
            .with_title("Start Date")
            .with_description("Start of the usage window, as YYYY-MM-DDTHH:MM:SSZ"),
    );
    schema.add_property(
        "end_date",
        SchemaProperty::new(JsonType::String)
            .with_format("date-time")
            .with_title("End Date")
            .with_description("End of the usage window, as YYYY-MM-DDTHH:MM:SSZ"),
    );
    schema.add_property(
        "exclude_project_costs",
        SchemaProperty::new(JsonType::Boolean).with_description("Exclude project costs"),
    );
    schema.add_property(
        "file_format",
        SchemaProperty::new(JsonType::String).with_description("Export file format"),
    );
    schema.add_property(
        "group_by",
        SchemaProperty::new(JsonType::String).with_description("Columns to group by"),
    );
    schema.add_property(
        "new_endpoint",
        SchemaProperty::new(JsonType::Boolean)
            .with_description("Use the new export endpoint")
            .with_default(json!(true)),
    );
    schema.add_property(
        "api_url",
        SchemaProperty::new(JsonType::String)
            .with_format("uri")
            .with_description("Base URL of the API")
            .with_default(json!(crate::config::DEFAULT_API_URL)),
    );
    schema.add_property(
        "user_agent",
        SchemaProperty::new(JsonType::String).with_description("User-Agent header override"),
    );

    for field in [
        "auth_token",
        "start_date",
        "end_date",
        "exclude_project_costs",
        "file_format",
        "group_by",
    ] {
        schema.add_required(field);
    }

    schema
}
