//! `pumpline status`: report checkpoint progress for a pipeline's source log.

use std::path::Path;

use anyhow::{Context, Result};

use pumpline_storage::TextLog;

use crate::config::parser;

pub fn execute(pipeline_path: &Path) -> Result<()> {
    let config = parser::parse_pipeline(pipeline_path)?;

    let log = TextLog::new(&config.source.path);
    let sidecar_path = log.sidecar_path();

    let committed = match std::fs::read_to_string(&sidecar_path) {
        Ok(content) => {
            let trimmed = content.trim_end();
            if trimmed.is_empty() {
                0
            } else {
                trimmed.parse::<u64>().with_context(|| {
                    format!("Corrupt checkpoint sidecar {}", sidecar_path.display())
                })?
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => 0,
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to read {}", sidecar_path.display()))
        }
    };

    let data_len = std::fs::metadata(&config.source.path)
        .with_context(|| {
            format!("Failed to stat source log {}", config.source.path.display())
        })?
        .len();

    println!("pipeline:          {}", config.pipeline);
    println!("source:            {}", config.source.path.display());
    println!("committed offset:  {committed} bytes");
    println!("data file length:  {data_len} bytes");
    println!(
        "backlog:           {} bytes",
        data_len.saturating_sub(committed)
    );
    Ok(())
}
