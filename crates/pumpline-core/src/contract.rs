//! Capability contracts implemented by every pumpline adapter.
//!
//! A [`Source`] yields bounded batches and durably advances a consumption
//! checkpoint on commit; a [`Sink`] accepts batches and durably flushes
//! them on commit; a [`Filter`] is a pure batch-to-batch transform used to
//! present a differently-typed source or sink.

use crate::error::Result;

/// Capability yielding bounded, ordered batches of records.
pub trait Source<T> {
    /// Read up to `count` records in arrival order.
    ///
    /// Returns `Ok(None)` once no further data is currently available (the
    /// end-of-stream marker). An empty batch `Ok(Some(vec![]))` is distinct:
    /// it means no records this call, but more may follow. Never returns a
    /// partial record.
    ///
    /// # Errors
    ///
    /// Returns [`PumpError::Io`](crate::PumpError::Io) on underlying read
    /// failure.
    fn read(&mut self, count: usize) -> Result<Option<Vec<T>>>;

    /// Durably persist the current consumption checkpoint.
    ///
    /// Safe to call repeatedly; the checkpoint must be durable before this
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns [`PumpError::Io`](crate::PumpError::Io) on persistence failure.
    fn commit(&mut self) -> Result<()>;
}

/// Capability accepting ordered batches of records.
pub trait Sink<T> {
    /// Append `records`, preserving order.
    ///
    /// Fails atomically per call: either the whole batch is accepted or
    /// none of it is.
    ///
    /// # Errors
    ///
    /// Returns [`PumpError::Io`](crate::PumpError::Io) on underlying write
    /// failure.
    fn write(&mut self, records: Vec<T>) -> Result<()>;

    /// Durably flush all previously accepted writes.
    ///
    /// # Errors
    ///
    /// Returns [`PumpError::Io`](crate::PumpError::Io) on flush failure.
    fn commit(&mut self) -> Result<()>;
}

/// Pure 1:1 batch transform from `T` records to `S` records.
///
/// Filters are stateless with respect to delivery: they have no commit
/// semantics and are never consulted on end-of-stream.
pub trait Filter<T, S> {
    /// Transform a batch, preserving order and length.
    ///
    /// # Errors
    ///
    /// Any single-item failure fails the whole batch; no partial transform
    /// is ever returned.
    fn apply(&mut self, records: Vec<T>) -> Result<Vec<S>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify the contracts stay object-safe (adapters are boxed in tests
    /// and downstream tooling).
    #[test]
    fn traits_are_object_safe() {
        fn _source(_: &dyn Source<String>) {}
        fn _sink(_: &dyn Sink<String>) {}
        fn _filter(_: &dyn Filter<String, u64>) {}
    }
}
