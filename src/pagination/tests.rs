//! Tests for pagination module

use super::*;
use crate::decode::parse_body;
use crate::error::Error;
use serde_json::json;
use test_case::test_case;

// ============================================================================
// Cursor Tests
// ============================================================================

#[test]
fn test_cursor_from_scalars() {
    assert_eq!(Cursor::from_value(&json!(2)), Some(Cursor::new("2")));
    assert_eq!(Cursor::from_value(&json!("abc")), Some(Cursor::new("abc")));
    assert_eq!(Cursor::from_value(&json!(true)), Some(Cursor::new("true")));
    assert_eq!(Cursor::from_value(&json!(0)), Some(Cursor::new("0")));
}

#[test]
fn test_cursor_end_values() {
    assert_eq!(Cursor::from_value(&json!(null)), None);
    assert_eq!(Cursor::from_value(&json!("")), None);
    assert_eq!(Cursor::from_value(&json!({"page": 2})), None);
    assert_eq!(Cursor::from_value(&json!([2])), None);
}

#[test]
fn test_cursor_keeps_exact_number_text() {
    let body = parse_body(r#"{"next_page": 1690848000.000}"#).unwrap();
    let cursor = CursorPaginator::default().next_cursor(&body).unwrap();
    assert_eq!(cursor.as_str(), "1690848000.000");
    assert_eq!(cursor.to_string(), "1690848000.000");
}

// ============================================================================
// NextPage Tests
// ============================================================================

#[test]
fn test_next_page_from_option() {
    let next = NextPage::from(Some(Cursor::new("2")));
    assert!(next.is_continue());
    assert!(!next.is_done());
    assert_eq!(next, NextPage::Continue(Cursor::new("2")));

    let done = NextPage::from(None);
    assert!(done.is_done());
    assert!(!done.is_continue());
}

// ============================================================================
// CursorPaginator Tests
// ============================================================================

#[test]
fn test_paginator_defaults() {
    let paginator = CursorPaginator::default();
    assert_eq!(paginator.cursor_param(), "page");
    assert_eq!(paginator.cursor_path(), DEFAULT_NEXT_PAGE_PATH);
    assert_eq!(
        paginator,
        CursorPaginator::new(DEFAULT_NEXT_PAGE_PATH, DEFAULT_CURSOR_PARAM).unwrap()
    );
}

#[test]
fn test_paginator_reads_next_page() {
    let paginator = CursorPaginator::default();
    let body = json!({"data": [{"id": 1}], "next_page": 2});
    assert_eq!(paginator.next_cursor(&body), Some(Cursor::new("2")));
}

#[test]
fn test_paginator_absent_or_null() {
    let paginator = CursorPaginator::default();
    assert_eq!(paginator.next_cursor(&json!({"data": []})), None);
    assert_eq!(
        paginator.next_cursor(&json!({"data": [], "next_page": null})),
        None
    );
    assert_eq!(paginator.next_cursor(&json!([{"id": 1}])), None);
}

#[test]
fn test_paginator_custom_path() {
    let paginator = CursorPaginator::new("$.meta.cursor", "after").unwrap();
    let body = json!({"meta": {"cursor": "c_9"}});
    assert_eq!(paginator.cursor_param(), "after");
    assert_eq!(paginator.next_cursor(&body), Some(Cursor::new("c_9")));

    assert!(CursorPaginator::new("$.meta[", "after").is_err());
}

#[test]
fn test_paginator_bare_field_path() {
    let paginator = CursorPaginator::new("next_page", "page").unwrap();
    assert_eq!(
        paginator.next_cursor(&json!({"next_page": "p3"})),
        Some(Cursor::new("p3"))
    );
}

#[test_case("$.next_page]" ; "stray bracket")]
#[test_case("$.next_page[0]" ; "index")]
#[test_case("$..next_page" ; "empty member")]
#[test_case("$.next page" ; "whitespace")]
#[test_case("$['next_page']" ; "quoted member")]
#[test_case("$" ; "root only")]
#[test_case("" ; "empty")]
fn test_paginator_rejects_malformed_path(path: &str) {
    let err = CursorPaginator::new(path, "page").unwrap_err();
    assert!(matches!(err, Error::JsonPath { .. }), "got {err}");
}

// ============================================================================
// PaginationState Tests
// ============================================================================

#[test]
fn test_pagination_state_default() {
    let state = PaginationState::new();
    assert_eq!(state.pages, 0);
    assert!(state.cursor.is_none());
    assert!(!state.done);
}

#[test]
fn test_pagination_state_advance() {
    let mut state = PaginationState::new();

    state.advance(NextPage::Continue(Cursor::new("2"))).unwrap();
    assert_eq!(state.cursor, Some(Cursor::new("2")));
    assert_eq!(state.pages, 1);
    assert!(!state.done);

    state.advance(NextPage::Continue(Cursor::new("3"))).unwrap();
    assert_eq!(state.cursor, Some(Cursor::new("3")));

    state.advance(NextPage::Done).unwrap();
    assert!(state.done);
    assert_eq!(state.pages, 3);
}

#[test]
fn test_pagination_state_repeated_cursor() {
    let mut state = PaginationState::new();
    state.advance(NextPage::Continue(Cursor::new("2"))).unwrap();

    let err = state
        .advance(NextPage::Continue(Cursor::new("2")))
        .unwrap_err();
    assert!(matches!(err, Error::Pagination { .. }));
    assert!(state.done);
}
