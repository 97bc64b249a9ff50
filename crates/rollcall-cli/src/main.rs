mod args;
mod plan;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rollcall_fetch::{Collector, Fetcher};
use rollcall_store::{FileLogger, OutputDir, TextFileWriter};

use crate::args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    tracing::info!("rollcall v{}", env!("CARGO_PKG_VERSION"));

    let sweep = cli.command.sweep().context("building URL sweep")?;
    let run = cli.command.run_args();
    if sweep.is_empty() {
        tracing::warn!(sweep = sweep.name(), "range is empty, nothing to collect");
    }

    if run.dry_run {
        let stdout = std::io::stdout();
        let count = plan::write_plan(&sweep, &mut stdout.lock())?;
        tracing::info!(count, "dry run finished");
        return Ok(());
    }

    let rate_limit = run.rate_limit()?;
    let output = run
        .output
        .as_deref()
        .context("--output is required unless --dry-run is given")?;
    let output = OutputDir::open(output).context("opening output directory")?;

    let logger = Arc::new(match &cli.log_file {
        Some(path) => FileLogger::new(path),
        None => FileLogger::in_current_dir().context("resolving default log file")?,
    });
    tracing::info!(
        sweep = sweep.name(),
        template = %sweep.template(),
        targets = sweep.len(),
        output = %output.path().display(),
        log = %logger.path().display(),
        "starting collection"
    );

    let fetcher = Fetcher::reqwest(logger.clone()).context("building HTTP clients")?;
    let collector = Collector::new(fetcher, logger.clone(), Arc::new(TextFileWriter))
        .with_rate_limit(rate_limit);
    let stats = collector
        .download_xml(sweep.targets(&*logger), output.path())
        .await
        .with_context(|| format!("collecting {} votes", sweep.name()))?;

    tracing::info!(
        attempted = stats.attempted,
        saved = stats.saved,
        "done"
    );
    Ok(())
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        tracing::Level::WARN
    } else {
        match verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
