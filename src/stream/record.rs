//! Billing usage records and their post-processing

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const TIMESTAMP_FIELD: &str = "timestamp";

/// One billing usage record.
///
/// The record is kept as the JSON object the API returned (numbers keep
/// their exact text) and only `timestamp` is rewritten. Accessors read
/// typed values without validating the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(JsonObject);

/// Identity of a record: (`user_id`, `name`, `date`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrimaryKey {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>,
}

impl Record {
    /// Wrap an already post-processed object
    pub fn new(fields: JsonObject) -> Self {
        Self(fields)
    }

    /// Raw field access
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.0.get(field)
    }

    /// The underlying object
    pub fn as_object(&self) -> &JsonObject {
        &self.0
    }

    /// Take the underlying object
    pub fn into_inner(self) -> JsonObject {
        self.0
    }

    /// String field access
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(JsonValue::as_str)
    }

    /// `cost` as an exact decimal
    pub fn cost(&self) -> Option<Decimal> {
        self.get("cost").and_then(decimal_from_value)
    }

    /// `timestamp` as an integer
    pub fn timestamp(&self) -> Option<i64> {
        self.get(TIMESTAMP_FIELD).and_then(JsonValue::as_i64)
    }

    /// `date` as a calendar date
    pub fn date(&self) -> Option<NaiveDate> {
        self.str_field("date")
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }

    /// The record's identity
    pub fn primary_key(&self) -> PrimaryKey {
        PrimaryKey {
            user_id: self.str_field("user_id").map(String::from),
            name: self.str_field("name").map(String::from),
            date: self.str_field("date").map(String::from),
        }
    }
}

/// Post-process a raw record: coerce `timestamp` to an integer.
///
/// A missing or null `timestamp` is left alone.
pub fn post_process(mut raw: JsonObject) -> Result<Record> {
    if let Some(value) = raw.get_mut(TIMESTAMP_FIELD) {
        if let Some(ts) = coerce_timestamp(value)? {
            *value = JsonValue::from(ts);
        }
    }
    Ok(Record(raw))
}

/// Truncate a numeric or numeric-string timestamp to an integer.
///
/// Returns `Ok(None)` for null. Booleans count as `1` and `0`.
pub fn coerce_timestamp(value: &JsonValue) -> Result<Option<i64>> {
    let decimal = match value {
        JsonValue::Null => return Ok(None),
        JsonValue::Bool(b) => return Ok(Some(i64::from(*b))),
        JsonValue::Number(_) | JsonValue::String(_) => decimal_from_value(value)
            .ok_or_else(|| Error::transform(TIMESTAMP_FIELD, format!("{value} is not a number")))?,
        other => {
            return Err(Error::transform(
                TIMESTAMP_FIELD,
                format!("expected a number, numeric string or boolean, got {other}"),
            ))
        }
    };

    decimal
        .trunc()
        .to_i64()
        .map(Some)
        .ok_or_else(|| Error::transform(TIMESTAMP_FIELD, format!("{value} is out of range")))
}

/// Read a JSON number or numeric string as an exact decimal
fn decimal_from_value(value: &JsonValue) -> Option<Decimal> {
    let text = match value {
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s.trim().to_string(),
        _ => return None,
    };

    if text.contains(['e', 'E']) {
        Decimal::from_scientific(&text).ok()
    } else {
        Decimal::from_str(&text).ok()
    }
}
