//! Usage stream controller
//!
//! `BillingUsageStream` holds what stays fixed for a run (config, client,
//! extractor, paginator). `UsageRun` is one pass over the endpoint and owns
//! the cursor, the current page buffer and the counters.

use super::definition::StreamDefinition;
use super::params::{build_parameters, RequestParams};
use super::record::{post_process, Record};
use crate::auth::AuthConfig;
use crate::config::TapConfig;
use crate::decode::{parse_body, RecordExtractor, DEFAULT_RECORDS_PATH};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::{Cursor, CursorPaginator, NextPage, PaginationState, Paginator};
use crate::types::JsonObject;
use futures::Stream;
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, info};

/// Build the HTTP client for a configuration
pub fn build_client(config: &TapConfig) -> Result<HttpClient> {
    let mut builder = HttpClientConfig::builder().base_url(&config.api_url);
    if let Some(agent) = &config.user_agent {
        builder = builder.user_agent(agent);
    }
    HttpClient::with_auth(
        builder.build(),
        AuthConfig::bearer(config.auth_token.clone()),
    )
}

// ============================================================================
// BillingUsageStream
// ============================================================================

/// Controller for the billing usage export
pub struct BillingUsageStream<'a> {
    config: &'a TapConfig,
    client: HttpClient,
    definition: StreamDefinition,
    extractor: RecordExtractor,
    paginator: CursorPaginator,
}

impl<'a> BillingUsageStream<'a> {
    /// Create a controller with a client built from the config
    pub fn new(config: &'a TapConfig) -> Result<Self> {
        Self::with_client(config, build_client(config)?)
    }

    /// Create a controller with an explicit client
    pub fn with_client(config: &'a TapConfig, client: HttpClient) -> Result<Self> {
        Ok(Self {
            config,
            client,
            definition: StreamDefinition::billing_usage(),
            extractor: RecordExtractor::new(DEFAULT_RECORDS_PATH)?,
            paginator: CursorPaginator::default(),
        })
    }

    /// Replace the paginator
    #[must_use]
    pub fn with_paginator(mut self, paginator: CursorPaginator) -> Self {
        self.paginator = paginator;
        self
    }

    /// Replace the record extractor
    #[must_use]
    pub fn with_extractor(mut self, extractor: RecordExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Stream metadata
    pub fn definition(&self) -> &StreamDefinition {
        &self.definition
    }

    /// Query parameters for a request carrying `cursor`
    pub fn build_parameters(&self, cursor: Option<&Cursor>) -> RequestParams {
        build_parameters(self.config, cursor, self.paginator.cursor_param())
    }

    /// Start a run. Nothing is requested until the first record is pulled.
    pub fn run(&self) -> UsageRun<'_> {
        UsageRun {
            stream: self,
            state: PaginationState::new(),
            phase: RunPhase::FetchingPage,
            buffer: VecDeque::new(),
            pending: NextPage::Done,
            stats: StreamStats::default(),
            started: None,
        }
    }

    async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<(Vec<JsonObject>, NextPage)> {
        let params = self.build_parameters(cursor);
        debug!(stream = self.definition.name, ?cursor, "Requesting page");

        let text = self
            .client
            .get_text_with_config(self.definition.path, params.into_request_config())
            .await?;
        let body = parse_body(&text)?;

        let records: Vec<JsonObject> = self.extractor.extract(&body).collect();
        let next = NextPage::from(self.paginator.next_cursor(&body));
        Ok((records, next))
    }
}

// ============================================================================
// UsageRun
// ============================================================================

/// Where a run is in its page cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// The next pull issues a request
    FetchingPage,
    /// Handing out records of the current page
    ExtractingRecords,
    /// Page exhausted; deciding whether to fetch another
    CheckingCursor,
    /// No more records
    Done,
}

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Pages requested
    pub pages_fetched: usize,
    /// Records handed to the caller
    pub records_emitted: usize,
}

/// One pull-driven pass over the export endpoint
pub struct UsageRun<'s> {
    stream: &'s BillingUsageStream<'s>,
    state: PaginationState,
    phase: RunPhase,
    buffer: VecDeque<JsonObject>,
    pending: NextPage,
    stats: StreamStats,
    started: Option<Instant>,
}

impl<'s> UsageRun<'s> {
    /// Current phase
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Counters so far
    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    /// Pull the next record.
    ///
    /// Returns `Ok(None)` once the last page is exhausted. Any error ends the
    /// run; later calls return `Ok(None)`.
    pub async fn next_record(&mut self) -> Result<Option<Record>> {
        let result = self.advance().await;
        if result.is_err() {
            self.phase = RunPhase::Done;
        }
        result
    }

    async fn advance(&mut self) -> Result<Option<Record>> {
        loop {
            match self.phase {
                RunPhase::FetchingPage => {
                    if self.started.is_none() {
                        info!(
                            stream = self.stream.definition.name,
                            "Beginning {} sync", self.stream.definition.replication_method
                        );
                        self.started = Some(Instant::now());
                    }

                    let (records, next) =
                        self.stream.fetch_page(self.state.cursor.as_ref()).await?;
                    self.stats.pages_fetched += 1;
                    debug!(
                        stream = self.stream.definition.name,
                        page = self.stats.pages_fetched,
                        records = records.len(),
                        "Fetched page"
                    );

                    self.buffer.extend(records);
                    self.pending = next;
                    self.phase = RunPhase::ExtractingRecords;
                }
                RunPhase::ExtractingRecords => {
                    if let Some(raw) = self.buffer.pop_front() {
                        let record = post_process(raw)?;
                        self.stats.records_emitted += 1;
                        return Ok(Some(record));
                    }
                    self.phase = RunPhase::CheckingCursor;
                }
                RunPhase::CheckingCursor => {
                    let next = std::mem::replace(&mut self.pending, NextPage::Done);
                    self.state.advance(next)?;
                    if self.state.done {
                        self.finish();
                    } else {
                        self.phase = RunPhase::FetchingPage;
                    }
                }
                RunPhase::Done => return Ok(None),
            }
        }
    }

    fn finish(&mut self) {
        self.phase = RunPhase::Done;
        let elapsed_ms = self
            .started
            .map(|s| s.elapsed().as_millis() as u64)
            .unwrap_or_default();
        info!(
            stream = self.stream.definition.name,
            pages = self.stats.pages_fetched,
            records = self.stats.records_emitted,
            elapsed_ms,
            "Completed sync"
        );
    }

    /// Adapt the run to a `futures::Stream`. The stream ends after an error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Record>> + 's {
        futures::stream::try_unfold(self, |mut run| async move {
            let next = run.next_record().await?;
            Ok::<_, Error>(next.map(|record| (record, run)))
        })
    }
}
