//! Schema declarations
//!
//! The stream schema and the configuration schema are fixed; both are
//! declared here as JSON Schema documents.

mod declared;
mod types;

pub use declared::{billing_usage_schema, config_schema};
pub use types::{JsonSchema, JsonType, JsonTypeOrArray, SchemaProperty};
