//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::TapConfig;
use crate::error::Result;
use crate::message::{Message, MessageWriter};
use crate::schema::config_schema;
use crate::stream::{BillingUsageStream, StreamDefinition};
use serde_json::json;
use std::io::{self, Write};
use std::time::Instant;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing messages to stdout
    pub async fn run(&self) -> Result<()> {
        let mut out = MessageWriter::new(io::stdout()).pretty(self.cli.pretty);
        self.run_with(&mut out).await
    }

    /// Run the CLI command, writing messages to `out`
    pub async fn run_with<W: Write>(&self, out: &mut MessageWriter<W>) -> Result<()> {
        match &self.cli.command {
            Commands::Spec => self.spec(out)?,
            Commands::Check => self.check(out).await?,
            Commands::Discover => self.discover(out)?,
            Commands::Read { max_records } => self.read(out, *max_records).await?,
        }
        out.flush()
    }

    /// Load configuration
    fn load_config(&self) -> Result<TapConfig> {
        TapConfig::load(self.cli.config.as_deref(), self.cli.config_json.as_deref())
    }

    /// Show spec
    fn spec<W: Write>(&self, out: &mut MessageWriter<W>) -> Result<()> {
        out.write_value(&config_schema().to_json())
    }

    /// Check connection
    async fn check<W: Write>(&self, out: &mut MessageWriter<W>) -> Result<()> {
        let config = self.load_config()?;
        let stream = BillingUsageStream::new(&config)?;
        info!(api_url = %config.api_url, "Checking connection");

        let status = match stream.run().next_record().await {
            Ok(_) => json!({
                "status": "SUCCEEDED",
                "message": "Connection successful"
            }),
            Err(e) => {
                warn!(error = %e, "Connection check failed");
                json!({
                    "status": "FAILED",
                    "message": format!("Connection failed: {e}")
                })
            }
        };

        out.write_value(&json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": status
        }))
    }

    /// Discover streams
    fn discover<W: Write>(&self, out: &mut MessageWriter<W>) -> Result<()> {
        self.load_config()?;
        out.write_value(&StreamDefinition::billing_usage().catalog())
    }

    /// Read records
    async fn read<W: Write>(
        &self,
        out: &mut MessageWriter<W>,
        max_records: Option<usize>,
    ) -> Result<()> {
        let config = self.load_config()?;
        let stream = BillingUsageStream::new(&config)?;
        let definition = stream.definition();
        let sync_start = Instant::now();

        out.write(&Message::schema(definition))?;

        let mut run = stream.run();
        let mut emitted = 0usize;
        loop {
            if max_records.is_some_and(|max| emitted >= max) {
                info!(max_records = emitted, "Reached record limit");
                break;
            }
            let Some(record) = run.next_record().await? else {
                break;
            };
            out.write(&Message::record(definition.name, record))?;
            emitted += 1;
        }

        out.write(&Message::empty_state())?;

        let stats = run.stats();
        info!(
            stream = definition.name,
            records = emitted,
            pages = stats.pages_fetched,
            duration_ms = sync_start.elapsed().as_millis() as u64,
            "Sync finished"
        );
        Ok(())
    }
}
