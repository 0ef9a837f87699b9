//! Shared error model for sources, sinks, filters, and the pump engine.

use std::path::PathBuf;

/// Errors produced by pump operations.
///
/// Any error aborts the pump that encountered it; there is no built-in
/// retry (see the crate docs on delivery semantics).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PumpError {
    /// Underlying file-system or stream I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode failure inside a codec filter.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// A record in the data log is not valid UTF-8.
    #[error("invalid utf-8 in record at offset {offset}")]
    Utf8 {
        offset: u64,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A user-supplied transform rejected a record, failing its batch.
    #[error("transform error: {message}")]
    Transform { message: String },

    /// The checkpoint sidecar file holds something other than a decimal offset.
    #[error("corrupt checkpoint file {}: {reason}", .path.display())]
    CorruptCheckpoint { path: PathBuf, reason: String },

    /// A trailing record never received its delimiter within the poll budget.
    #[error("incomplete record at offset {offset} in {} after {attempts} poll attempts", .path.display())]
    IncompleteRecord {
        path: PathBuf,
        offset: u64,
        attempts: u32,
    },

    /// Invalid pump or pipeline configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PumpError {
    /// Transform failure for a user-supplied mapping function.
    #[must_use]
    pub fn transform(message: impl Into<String>) -> Self {
        Self::Transform {
            message: message.into(),
        }
    }

    /// Configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Convenience alias used throughout the pumpline crates.
pub type Result<T> = std::result::Result<T, PumpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_displays_context() {
        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = PumpError::Io(inner);
        assert!(err.to_string().contains("i/o"));
    }

    #[test]
    fn transform_factory_displays_message() {
        let err = PumpError::transform("negative id");
        assert_eq!(err.to_string(), "transform error: negative id");
    }

    #[test]
    fn corrupt_checkpoint_displays_path() {
        let err = PumpError::CorruptCheckpoint {
            path: PathBuf::from("/tmp/data.log.pos"),
            reason: "not a number".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("data.log.pos"), "got: {msg}");
        assert!(msg.contains("not a number"));
    }

    #[test]
    fn incomplete_record_displays_offset_and_attempts() {
        let err = PumpError::IncompleteRecord {
            path: PathBuf::from("/tmp/data.log"),
            offset: 42,
            attempts: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("10"));
    }
}
