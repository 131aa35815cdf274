//! Response decoding
//!
//! Parses response bodies with exact numbers and locates records inside
//! them with a JSONPath expression (`$.data[*]` for the export endpoint).
//! A path that matches nothing yields no records; only a malformed path is
//! an error.

mod extractor;

pub use extractor::{parse_body, RecordExtractor, DEFAULT_RECORDS_PATH};

#[cfg(test)]
mod tests;
