//! Semantic validation for parsed pipeline configuration values.

use anyhow::Result;

use crate::config::types::PipelineConfig;

/// Validate a parsed pipeline configuration.
/// Returns `Ok(())` if valid, Err with all validation errors if not.
///
/// # Errors
///
/// Returns an error listing all validation failures found in the pipeline config.
pub fn validate_pipeline(config: &PipelineConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.pipeline.trim().is_empty() {
        errors.push("Pipeline name must not be empty".to_string());
    }

    if config.batch_size == 0 {
        errors.push("batch_size must be at least 1".to_string());
    }

    if config.source.path.as_os_str().is_empty() {
        errors.push("Source path must not be empty".to_string());
    }

    if config.destination.path.as_os_str().is_empty() {
        errors.push("Destination path must not be empty".to_string());
    }

    if config.source.path == config.destination.path {
        errors.push(format!(
            "Source and destination must differ: pumping '{}' into itself never drains",
            config.source.path.display()
        ));
    }

    if config.source.poll.attempts == 0 {
        errors.push("source.poll.attempts must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("Invalid pipeline configuration:\n  - {}", errors.join("\n  - "))
    }
}
