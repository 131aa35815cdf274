//! Tap output messages
//!
//! Everything the tap prints on stdout is one JSON document per line:
//! a `SCHEMA` message, then `RECORD` messages, then a closing `STATE`.

use crate::error::Result;
use crate::stream::{Record, StreamDefinition};
use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use std::io::Write;

/// A message on the tap's output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Stream schema, sent before any record of the stream
    Schema {
        stream: String,
        schema: JsonValue,
        key_properties: Vec<String>,
    },
    /// One record
    Record {
        stream: String,
        record: Record,
        time_extracted: DateTime<Utc>,
    },
    /// Bookmarks for the next run
    State { value: JsonValue },
}

impl Message {
    /// Schema message for a stream
    pub fn schema(definition: &StreamDefinition) -> Self {
        Self::Schema {
            stream: definition.name.to_string(),
            schema: definition.schema.to_json(),
            key_properties: definition
                .key_properties
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Record message stamped with the current time
    pub fn record(stream: impl Into<String>, record: Record) -> Self {
        Self::Record {
            stream: stream.into(),
            record,
            time_extracted: Utc::now(),
        }
    }

    /// State message with no bookmarks
    pub fn empty_state() -> Self {
        Self::State { value: json!({}) }
    }

    /// Check if this is a record message
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }
}

/// Writes messages (or any JSON document) one per line
pub struct MessageWriter<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> MessageWriter<W> {
    /// Compact JSON lines
    pub fn new(out: W) -> Self {
        Self { out, pretty: false }
    }

    /// Pretty-printed JSON, for people reading the output
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Write a tap message
    pub fn write(&mut self, message: &Message) -> Result<()> {
        self.write_json(message)
    }

    /// Write an arbitrary JSON document
    pub fn write_value(&mut self, value: &JsonValue) -> Result<()> {
        self.write_json(value)
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, value)?;
        } else {
            serde_json::to_writer(&mut self.out, value)?;
        }
        self.out.write_all(b"\n")?;
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Take back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::parse_body;
    use crate::types::JsonObject;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn lines(buf: &[u8]) -> Vec<Value> {
        std::str::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_schema_message() {
        let message = Message::schema(&StreamDefinition::billing_usage());
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["type"], "SCHEMA");
        assert_eq!(value["stream"], "billing_usage");
        assert_eq!(value["key_properties"], json!(["user_id", "name", "date"]));
        assert_eq!(value["schema"]["properties"]["timestamp"]["type"], json!(["integer", "null"]));
    }

    #[test]
    fn test_record_message_keeps_exact_numbers() {
        let body = parse_body(r#"{"cost": 12.10, "name": "gpt-4"}"#).unwrap();
        let record = Record::new(body.as_object().cloned().unwrap_or_else(JsonObject::new));

        let mut writer = MessageWriter::new(Vec::new());
        let message = Message::record("billing_usage", record);
        assert!(message.is_record());
        writer.write(&message).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();

        assert!(text.starts_with("{\"type\":\"RECORD\""), "{text}");
        assert!(text.contains("\"cost\":12.10"), "{text}");
        assert!(text.contains("\"time_extracted\":"), "{text}");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_state_message() {
        let value = serde_json::to_value(Message::empty_state()).unwrap();
        assert_eq!(value, json!({"type": "STATE", "value": {}}));
        assert!(!Message::empty_state().is_record());
    }

    #[test]
    fn test_writer_one_line_per_message() {
        let mut writer = MessageWriter::new(Vec::new());
        writer.write(&Message::schema(&StreamDefinition::billing_usage())).unwrap();
        writer.write_value(&json!({"hello": "world"})).unwrap();
        writer.write(&Message::empty_state()).unwrap();
        writer.flush().unwrap();

        let messages = lines(&writer.into_inner());
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["type"], "SCHEMA");
        assert_eq!(messages[1]["hello"], "world");
        assert_eq!(messages[2]["type"], "STATE");
    }

    #[test]
    fn test_writer_pretty() {
        let mut writer = MessageWriter::new(Vec::new()).pretty(true);
        writer.write(&Message::empty_state()).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert!(text.contains("\n  \"type\": \"STATE\""), "{text}");
    }
}
