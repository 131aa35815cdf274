//! Record extraction from response bodies

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use jsonpath_rust::JsonPath;
use tracing::warn;

/// Where billing usage records live in an export response
pub const DEFAULT_RECORDS_PATH: &str = "$.data[*]";

/// Parse a response body, keeping numbers as their exact decimal text.
pub fn parse_body(body: &str) -> Result<JsonValue> {
    serde_json::from_str(body).map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))
}

/// Pulls record objects out of a parsed response
pub struct RecordExtractor {
    raw_path: String,
    path: JsonPath,
}

impl RecordExtractor {
    /// Create an extractor for the given records path
    pub fn new(records_path: &str) -> Result<Self> {
        let path = JsonPath::try_from(records_path).map_err(|e| Error::JsonPath {
            message: format!("Invalid JSONPath: {e}"),
        })?;
        Ok(Self {
            raw_path: records_path.to_string(),
            path,
        })
    }

    /// The records path as written
    pub fn path(&self) -> &str {
        &self.raw_path
    }

    /// Yield every record object at the records path, in document order.
    ///
    /// A missing path yields nothing. Matched values that are not objects are
    /// skipped.
    pub fn extract<'a>(&'a self, body: &'a JsonValue) -> impl Iterator<Item = JsonObject> + 'a {
        let matched = match self.path.find(body) {
            JsonValue::Array(values) => values,
            JsonValue::Null => Vec::new(),
            other => vec![other],
        };

        matched.into_iter().filter_map(move |value| match value {
            JsonValue::Object(map) => Some(map),
            other => {
                warn!(path = %self.raw_path, "Skipping non-object record: {other}");
                None
            }
        })
    }
}

impl std::fmt::Debug for RecordExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordExtractor")
            .field("path", &self.raw_path)
            .finish()
    }
}
