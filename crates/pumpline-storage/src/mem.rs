//! Array-backed source and sink.
//!
//! No persistence and no failure modes: `commit` is a no-op on both sides
//! and `read` is non-blocking, returning whatever remains of the backing
//! sequence.

use std::collections::VecDeque;

use pumpline_core::{Result, Sink, Source};

/// In-memory source draining an owned sequence of records.
#[derive(Debug)]
pub struct MemSource<T> {
    records: VecDeque<T>,
}

impl<T> MemSource<T> {
    pub fn new(records: impl IntoIterator<Item = T>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Records not yet read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl<T> Source<T> for MemSource<T> {
    fn read(&mut self, count: usize) -> Result<Option<Vec<T>>> {
        if self.records.is_empty() {
            return Ok(None);
        }
        let take = count.min(self.records.len());
        Ok(Some(self.records.drain(..take).collect()))
    }

    fn commit(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-memory sink appending into an owned vector.
#[derive(Debug, Default)]
pub struct MemSink<T> {
    records: Vec<T>,
}

impl<T> MemSink<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

impl<T> Sink<T> for MemSink<T> {
    fn write(&mut self, records: Vec<T>) -> Result<()> {
        self.records.extend(records);
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pumpline_core::Pump;

    #[test]
    fn read_drains_in_order() {
        let mut source = MemSource::new([1, 2, 3, 4]);
        assert_eq!(source.read(3).unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn oversized_read_returns_remainder_then_end_of_stream() {
        let mut source = MemSource::new(["a", "b"]);
        assert_eq!(source.read(10).unwrap(), Some(vec!["a", "b"]));
        assert_eq!(source.read(10).unwrap(), None);
        assert_eq!(source.read(1).unwrap(), None);
    }

    #[test]
    fn zero_count_read_is_empty_but_pending() {
        let mut source = MemSource::new([1]);
        assert_eq!(source.read(0).unwrap(), Some(vec![]));
        assert_eq!(source.read(1).unwrap(), Some(vec![1]));
    }

    #[test]
    fn sink_appends_preserving_order() {
        let mut sink = MemSink::new();
        sink.write(vec![1, 2]).unwrap();
        sink.write(vec![3]).unwrap();
        sink.commit().unwrap();
        assert_eq!(sink.into_records(), vec![1, 2, 3]);
    }

    #[test]
    fn pump_between_mem_endpoints() {
        let mut source = MemSource::new((0..25).collect::<Vec<_>>());
        let mut sink = MemSink::new();

        let summary = Pump::new(4, 10).run(&mut source, &mut sink).unwrap();

        assert_eq!(summary.records, 25);
        assert_eq!(sink.records(), (0..25).collect::<Vec<_>>());
    }
}
