// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tap-openai
//!
//! Extracts OpenAI billing usage records for a configured date window and
//! emits them as tap messages (JSON lines on stdout).
//!
//! ## Features
//!
//! - **One stream**: `billing_usage`, keyed by `(user_id, name, date)`
//! - **Cursor pagination**: follows `next_page` until the API stops sending one
//! - **Exact numbers**: `cost` and friends keep the text the API sent
//! - **Pull-based**: the next page is requested only when the consumer asks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use tap_openai::{BillingUsageStream, Result, TapConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = TapConfig::load(Some("config.json".as_ref()), None)?;
//!     let stream = BillingUsageStream::new(&config)?;
//!
//!     let mut records = std::pin::pin!(stream.run().into_stream());
//!     while let Some(record) = records.try_next().await? {
//!         println!("{:?} {:?}", record.primary_key(), record.cost());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          CLI / Runner                           │
//! │     spec → config schema   check → status   discover → catalog  │
//! │     read → SCHEMA, RECORD*, STATE                               │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴──────────────────────────────────┐
//! │                 BillingUsageStream / UsageRun                   │
//! │     params → request → decode → post-process → next cursor      │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │  Config  │   Auth    │     HTTP      │  Decode   │  Paginate   │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ File     │ Bearer    │ GET           │ JSON body │ next_page   │
//! │ Inline   │           │ Timeout       │ $.data[*] │ Loop check  │
//! │ Env      │           │               │           │             │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication
pub mod auth;

/// HTTP client
pub mod http;

/// Cursor pagination
pub mod pagination;

/// Response decoding and record selection
pub mod decode;

/// Record and config schemas
pub mod schema;

/// Tap configuration
pub mod config;

/// The billing usage stream
pub mod stream;

/// Output messages
pub mod message;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::TapConfig;
pub use stream::{BillingUsageStream, Record};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
