//! Billing usage stream
//!
//! The stream controller owns the request/response cycle for the single
//! `billing_usage` resource:
//!
//! ```text
//!   FETCHING_PAGE ──► EXTRACTING_RECORDS ──► CHECKING_CURSOR ──► DONE
//!        ▲                                          │
//!        └──────────── cursor present ──────────────┘
//! ```
//!
//! Records are pulled one at a time. The next page is requested only after
//! every record of the current page has been handed out.

mod definition;
mod params;
mod record;
mod usage;

pub use definition::{StreamDefinition, STREAM_NAME, USAGE_EXPORT_PATH};
pub use params::{build_parameters, RequestParams};
pub use record::{coerce_timestamp, post_process, PrimaryKey, Record};
pub use usage::{build_client, BillingUsageStream, RunPhase, StreamStats, UsageRun};
