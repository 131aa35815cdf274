//! Pagination module
//!
//! The export endpoint pages with a cursor carried in the response body.
//! `CursorPaginator` reads that cursor; `PaginationState` threads it into
//! the next request and refuses to loop on a repeated cursor.

mod paginator;
mod types;

pub use paginator::{CursorPaginator, DEFAULT_CURSOR_PARAM, DEFAULT_NEXT_PAGE_PATH};
pub use types::{Cursor, NextPage, PaginationState, Paginator};

#[cfg(test)]
mod tests;
