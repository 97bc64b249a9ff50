//! `--dry-run`: list a sweep's targets as JSON lines.

use std::io::Write;

use anyhow::Context;
use rollcall_core::{Sweep, TracingLogger};

/// Write one JSON object per target to `out`. Returns the number written.
pub fn write_plan(sweep: &Sweep, out: &mut impl Write) -> anyhow::Result<u64> {
    let mut count = 0u64;
    for target in sweep.targets(&TracingLogger) {
        let target = target?;
        serde_json::to_writer(&mut *out, &target).context("encoding target")?;
        writeln!(out).context("writing plan")?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}
