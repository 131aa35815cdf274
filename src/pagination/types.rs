//! Pagination types and traits

use crate::error::{Error, Result};
use serde_json::Value;
use tracing::warn;

/// An opaque pagination token in its query-string form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a raw cursor value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Read a cursor out of a JSON value.
    ///
    /// Strings, numbers and booleans are cursors. Null and the empty string
    /// mean "no more pages". Objects and arrays cannot be sent as a query
    /// parameter and also end pagination.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            Value::Bool(b) => Some(Self(b.to_string())),
            other => {
                warn!("Ignoring non-scalar pagination cursor: {other}");
                None
            }
        }
    }

    /// The cursor as sent in the query string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Another page exists; request it with this cursor
    Continue(Cursor),
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }
}

impl From<Option<Cursor>> for NextPage {
    fn from(cursor: Option<Cursor>) -> Self {
        cursor.map_or(Self::Done, Self::Continue)
    }
}

/// Core trait for pagination strategies.
///
/// Implementations are stateless: they only look at one response.
pub trait Paginator: Send + Sync {
    /// Query parameter that carries the cursor
    fn cursor_param(&self) -> &str;

    /// Decide from a parsed response body whether another page exists
    fn next_cursor(&self, body: &Value) -> Option<Cursor>;
}

/// Tracks pagination progress during one extraction run
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Cursor for the next request, `None` before the first page
    pub cursor: Option<Cursor>,
    /// Pages processed so far
    pub pages: u32,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a processed page and the paginator's verdict for it.
    ///
    /// Fails if the response hands back the cursor that was just sent, which
    /// would otherwise fetch the same page forever.
    pub fn advance(&mut self, next: NextPage) -> Result<()> {
        self.pages += 1;
        match next {
            NextPage::Done => {
                self.done = true;
                Ok(())
            }
            NextPage::Continue(cursor) => {
                if self.cursor.as_ref() == Some(&cursor) {
                    self.done = true;
                    return Err(Error::pagination(format!(
                        "Response repeated cursor '{cursor}' after page {}",
                        self.pages
                    )));
                }
                self.cursor = Some(cursor);
                Ok(())
            }
        }
    }
}
