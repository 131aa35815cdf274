//! Static description of the billing usage stream

use crate::schema::{billing_usage_schema, JsonSchema};
use crate::types::ReplicationMethod;
use serde_json::{json, Value};

/// Stream name used in every emitted message
pub const STREAM_NAME: &str = "billing_usage";

/// Export endpoint, relative to the API base URL
pub const USAGE_EXPORT_PATH: &str = "/v1/dashboard/billing/usage/export";

/// Everything downstream needs to know about the stream besides its records
#[derive(Debug, Clone)]
pub struct StreamDefinition {
    /// Stream name
    pub name: &'static str,
    /// Endpoint path
    pub path: &'static str,
    /// Fields that identify a record
    pub key_properties: Vec<&'static str>,
    /// Bookmark field, none for a full-table stream
    pub replication_key: Option<&'static str>,
    /// Replication method
    pub replication_method: ReplicationMethod,
    /// Record schema
    pub schema: JsonSchema,
}

impl StreamDefinition {
    /// The billing usage stream
    pub fn billing_usage() -> Self {
        Self {
            name: STREAM_NAME,
            path: USAGE_EXPORT_PATH,
            key_properties: vec!["user_id", "name", "date"],
            replication_key: None,
            replication_method: ReplicationMethod::FullTable,
            schema: billing_usage_schema(),
        }
    }

    /// Catalog entry for `discover`
    pub fn catalog_entry(&self) -> Value {
        let mut metadata = vec![json!({
            "breadcrumb": [],
            "metadata": {
                "inclusion": "available",
                "selected": true,
                "table-key-properties": self.key_properties,
                "forced-replication-method": self.replication_method,
                "valid-replication-keys": self.replication_key.into_iter().collect::<Vec<_>>(),
            }
        })];

        for property in self.schema.properties.keys() {
            let inclusion = if self.key_properties.iter().any(|k| *k == property.as_str()) {
                "automatic"
            } else {
                "available"
            };
            metadata.push(json!({
                "breadcrumb": ["properties", property],
                "metadata": { "inclusion": inclusion }
            }));
        }

        json!({
            "tap_stream_id": self.name,
            "stream": self.name,
            "schema": self.schema.to_json(),
            "key_properties": self.key_properties,
            "replication_method": self.replication_method,
            "replication_key": self.replication_key,
            "metadata": metadata,
        })
    }

    /// Full catalog document (one stream)
    pub fn catalog(&self) -> Value {
        json!({ "streams": [self.catalog_entry()] })
    }
}
