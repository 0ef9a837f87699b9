//! Serde types for the pipeline YAML schema.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use pumpline_storage::PollPolicy;

fn default_batch_size() -> usize {
    256
}

fn default_commit_threshold() -> u64 {
    1024
}

fn default_poll_attempts() -> u32 {
    10
}

fn default_poll_delay_ms() -> u64 {
    50
}

/// Top-level pipeline definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Operator-facing pipeline name used in logs.
    pub pipeline: String,
    pub source: SourceConfig,
    pub destination: DestinationConfig,
    /// Records read per pump cycle.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Checkpoint once this many records have been written since the last
    /// cadence wraparound.
    #[serde(default = "default_commit_threshold")]
    pub commit_threshold: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Newline-delimited data file; its `.pos` sidecar tracks progress.
    pub path: PathBuf,
    #[serde(default)]
    pub poll: PollConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DestinationConfig {
    /// Append target for pumped records.
    pub path: PathBuf,
}

/// Bound on the wait for an undelimited trailing record.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollConfig {
    #[serde(default = "default_poll_attempts")]
    pub attempts: u32,
    #[serde(default = "default_poll_delay_ms")]
    pub delay_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            attempts: default_poll_attempts(),
            delay_ms: default_poll_delay_ms(),
        }
    }
}

impl From<&PollConfig> for PollPolicy {
    fn from(config: &PollConfig) -> Self {
        Self {
            attempts: config.attempts,
            delay: Duration::from_millis(config.delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_optional_fields() {
        let yaml = r"
pipeline: ship-logs
source:
  path: /var/log/app.log
destination:
  path: /data/out.log
";
        let config: PipelineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.batch_size, 256);
        assert_eq!(config.commit_threshold, 1024);
        assert_eq!(config.source.poll.attempts, 10);
        assert_eq!(config.source.poll.delay_ms, 50);
    }

    #[test]
    fn poll_config_converts_to_policy() {
        let config = PollConfig {
            attempts: 3,
            delay_ms: 7,
        };
        let policy = PollPolicy::from(&config);
        assert_eq!(policy.attempts, 3);
        assert_eq!(policy.delay, Duration::from_millis(7));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let yaml = r"
pipeline: ship-logs
source:
  path: /var/log/app.log
destination:
  path: /data/out.log
unknown_knob: true
";
        assert!(serde_yaml::from_str::<PipelineConfig>(yaml).is_err());
    }
}
