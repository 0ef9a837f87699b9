//! Capability contracts and the pump engine for pumpline pipelines.
//!
//! Provides the [`Source`] / [`Sink`] / [`Filter`] traits every adapter
//! implements, the [`FilteredSource`] / [`FilteredSink`] composition
//! wrappers, and the batching, checkpoint-committing [`Pump`] loop.

#![warn(clippy::pedantic)]

pub mod adapter;
pub mod contract;
pub mod error;
pub mod pump;

// Re-export public API for convenience
pub use adapter::{FilteredSink, FilteredSource, SinkExt, SourceExt};
pub use contract::{Filter, Sink, Source};
pub use error::{PumpError, Result};
pub use pump::{Pump, PumpSummary};
