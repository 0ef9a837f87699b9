//! Storage adapters for pumpline pipelines.
//!
//! Provides the in-memory [`MemSource`] / [`MemSink`] pair used as test
//! fixtures and simple glue, and the resumable file-backed [`TextLog`]
//! whose reader checkpoints its byte offset in a sidecar file and survives
//! process restarts without losing or skipping records.

#![warn(clippy::pedantic)]

pub mod log;
pub mod mem;

pub use log::{LogReader, LogWriter, PollPolicy, TextLog};
pub use mem::{MemSink, MemSource};
