//! `pumpline run`: pump a source log into a destination log until drained.

use std::path::Path;

use anyhow::{Context, Result};

use pumpline_core::Pump;
use pumpline_storage::{PollPolicy, TextLog};

use crate::config::{parser, validator};

pub fn execute(pipeline_path: &Path) -> Result<()> {
    let config = parser::parse_pipeline(pipeline_path)?;
    validator::validate_pipeline(&config)?;

    tracing::info!(
        pipeline = config.pipeline,
        source = %config.source.path.display(),
        destination = %config.destination.path.display(),
        batch_size = config.batch_size,
        commit_threshold = config.commit_threshold,
        "Starting pump"
    );

    let source_log = TextLog::new(&config.source.path)
        .poll_policy(PollPolicy::from(&config.source.poll));
    let dest_log = TextLog::new(&config.destination.path);

    let mut reader = source_log.open_reader().with_context(|| {
        format!("Failed to open source log {}", config.source.path.display())
    })?;
    let mut writer = dest_log.open_writer().with_context(|| {
        format!(
            "Failed to open destination log {}",
            config.destination.path.display()
        )
    })?;

    let pump = Pump::new(config.batch_size, config.commit_threshold);
    let outcome = pump.run(&mut reader, &mut writer);

    // Release both endpoints whatever the pump outcome; the pump error
    // outranks a close error.
    let reader_closed = reader.close();
    let writer_closed = writer.close();

    let summary = outcome.context("Pump aborted")?;
    reader_closed.context("Failed to close source log")?;
    writer_closed.context("Failed to close destination log")?;

    tracing::info!(
        pipeline = config.pipeline,
        records = summary.records,
        batches = summary.batches,
        commits = summary.commits,
        "Pump complete"
    );
    Ok(())
}
