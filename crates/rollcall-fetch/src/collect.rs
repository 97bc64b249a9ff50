//! Rate-limited download driver.
//!
//! Walks a sequence of [`Target`]s one at a time: log the attempt, fetch,
//! sleep, and write the document if anything came back. There is no early
//! exit on repeated misses; the sequence always runs to the end.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rollcall_core::{CollectError, FileWriter, Logger, Target};
use tracing::info;

use crate::fetcher::ContentSource;

pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_secs(1);

const COMPONENT: &str = "rollcall.collect.download_xml";

/// Counters for a finished run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectStats {
    pub attempted: u64,
    pub saved: u64,
}

pub struct Collector<S> {
    source: S,
    logger: Arc<dyn Logger>,
    writer: Arc<dyn FileWriter>,
    rate_limit: Duration,
}

impl<S: ContentSource> Collector<S> {
    pub fn new(source: S, logger: Arc<dyn Logger>, writer: Arc<dyn FileWriter>) -> Self {
        Self {
            source,
            logger,
            writer,
            rate_limit: DEFAULT_RATE_LIMIT,
        }
    }

    /// Fixed pause after every request, successful or not.
    pub fn with_rate_limit(mut self, rate_limit: Duration) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    pub fn rate_limit(&self) -> Duration {
        self.rate_limit
    }

    /// Download every target into `output`.
    ///
    /// Files are named by [`Target::file_name`] and overwritten on re-runs.
    /// Template, log, and file-write errors abort the run.
    pub async fn download_xml<I>(
        &self,
        targets: I,
        output: &Path,
    ) -> Result<CollectStats, CollectError>
    where
        I: IntoIterator<Item = Result<Target, CollectError>>,
    {
        let mut stats = CollectStats::default();

        for target in targets {
            let target = target?;
            self.logger
                .info(COMPONENT, &format!("Attempting Collection for {}", target.url))?;
            stats.attempted += 1;

            let xml = self.source.fetch(&target.url).await?;
            tokio::time::sleep(self.rate_limit).await;

            if !xml.is_empty() {
                let path = output.join(&target.file_name);
                self.writer.write_file(&path, &xml)?;
                self.logger
                    .info(COMPONENT, &format!("Data Saved to {}", path.display()))?;
                stats.saved += 1;
            }
        }

        info!(
            attempted = stats.attempted,
            saved = stats.saved,
            output = %output.display(),
            "collection finished"
        );
        Ok(stats)
    }
}
