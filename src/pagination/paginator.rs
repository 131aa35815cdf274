//! Cursor paginator

use super::types::{Cursor, Paginator};
use crate::error::{Error, Result};
use serde_json::Value;

/// Where the export response carries the next page cursor
pub const DEFAULT_NEXT_PAGE_PATH: &str = "$.next_page";

/// Query parameter the cursor is sent back in
pub const DEFAULT_CURSOR_PARAM: &str = "page";

/// Reads the next page cursor from a fixed field of the response body.
///
/// The path is a dotted member path such as `$.next_page` or
/// `$.meta.cursor`. Common patterns:
/// - `{ "data": [...], "next_page": 2 }`
/// - `{ "data": [...], "next_page": "cursor_abc" }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPaginator {
    cursor_path: String,
    fields: Vec<String>,
    cursor_param: String,
}

impl CursorPaginator {
    /// Create a paginator reading `cursor_path` and sending `cursor_param`
    pub fn new(cursor_path: &str, cursor_param: impl Into<String>) -> Result<Self> {
        Ok(Self {
            cursor_path: cursor_path.to_string(),
            fields: parse_field_path(cursor_path)?,
            cursor_param: cursor_param.into(),
        })
    }

    /// The cursor path as written
    pub fn cursor_path(&self) -> &str {
        &self.cursor_path
    }

    fn lookup<'a>(&self, body: &'a Value) -> Option<&'a Value> {
        self.fields
            .iter()
            .try_fold(body, |current, field| current.get(field.as_str()))
    }
}

impl Default for CursorPaginator {
    fn default() -> Self {
        Self {
            cursor_path: DEFAULT_NEXT_PAGE_PATH.to_string(),
            fields: vec!["next_page".to_string()],
            cursor_param: DEFAULT_CURSOR_PARAM.to_string(),
        }
    }
}

impl Paginator for CursorPaginator {
    fn cursor_param(&self) -> &str {
        &self.cursor_param
    }

    fn next_cursor(&self, body: &Value) -> Option<Cursor> {
        self.lookup(body).and_then(Cursor::from_value)
    }
}

/// Split `$.a.b` (or `a.b`) into member names
fn parse_field_path(path: &str) -> Result<Vec<String>> {
    let rest = path.strip_prefix("$.").unwrap_or(path);

    rest.split('.')
        .map(|field| {
            let valid = !field.is_empty()
                && field
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if valid {
                Ok(field.to_string())
            } else {
                Err(Error::json_path(format!(
                    "Invalid cursor path '{path}': bad member '{field}'"
                )))
            }
        })
        .collect()
}
