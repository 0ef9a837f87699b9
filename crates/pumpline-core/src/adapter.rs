//! Stream adapters composing a [`Filter`] over a [`Source`] or [`Sink`].
//!
//! The pump engine never learns that a transform exists: a wrapped source
//! or sink presents the filtered record type through the same contract.
//! Adapters nest arbitrarily, so multi-stage pipelines are built purely by
//! repeated wrapping.

use std::marker::PhantomData;

use crate::contract::{Filter, Sink, Source};
use crate::error::Result;

/// A [`Source<S>`] built from an inner [`Source<T>`] and a [`Filter<T, S>`].
///
/// Owns both exclusively for its lifetime. End-of-stream propagates
/// unchanged; the filter is never invoked on "no data".
pub struct FilteredSource<I, F, T, S> {
    inner: I,
    filter: F,
    _records: PhantomData<fn(T) -> S>,
}

impl<I, F, T, S> FilteredSource<I, F, T, S>
where
    I: Source<T>,
    F: Filter<T, S>,
{
    pub fn new(inner: I, filter: F) -> Self {
        Self {
            inner,
            filter,
            _records: PhantomData,
        }
    }

    /// Recover the inner source and filter, e.g. to close the source.
    pub fn into_parts(self) -> (I, F) {
        (self.inner, self.filter)
    }
}

impl<I, F, T, S> Source<S> for FilteredSource<I, F, T, S>
where
    I: Source<T>,
    F: Filter<T, S>,
{
    fn read(&mut self, count: usize) -> Result<Option<Vec<S>>> {
        match self.inner.read(count)? {
            Some(batch) => Ok(Some(self.filter.apply(batch)?)),
            None => Ok(None),
        }
    }

    // Filters are stateless; only the inner source has a checkpoint.
    fn commit(&mut self) -> Result<()> {
        self.inner.commit()
    }
}

/// A [`Sink<T>`] built from a [`Filter<T, S>`] and an inner [`Sink<S>`].
///
/// `write` applies the filter first, then delegates; `commit` delegates
/// only to the inner sink.
pub struct FilteredSink<O, F, T, S> {
    inner: O,
    filter: F,
    _records: PhantomData<fn(T) -> S>,
}

impl<O, F, T, S> FilteredSink<O, F, T, S>
where
    O: Sink<S>,
    F: Filter<T, S>,
{
    pub fn new(inner: O, filter: F) -> Self {
        Self {
            inner,
            filter,
            _records: PhantomData,
        }
    }

    /// Recover the inner sink and filter, e.g. to close the sink.
    pub fn into_parts(self) -> (O, F) {
        (self.inner, self.filter)
    }
}

impl<O, F, T, S> Sink<T> for FilteredSink<O, F, T, S>
where
    O: Sink<S>,
    F: Filter<T, S>,
{
    fn write(&mut self, records: Vec<T>) -> Result<()> {
        let transformed = self.filter.apply(records)?;
        self.inner.write(transformed)
    }

    fn commit(&mut self) -> Result<()> {
        self.inner.commit()
    }
}

/// Composition sugar for sources.
pub trait SourceExt<T>: Source<T> + Sized {
    /// Pipe every batch read from this source through `filter`.
    fn with_filter<S, F>(self, filter: F) -> FilteredSource<Self, F, T, S>
    where
        F: Filter<T, S>,
    {
        FilteredSource::new(self, filter)
    }
}

impl<T, I: Source<T>> SourceExt<T> for I {}

/// Composition sugar for sinks.
pub trait SinkExt<S>: Sink<S> + Sized {
    /// Pipe every batch through `filter` before it reaches this sink.
    fn with_filter<T, F>(self, filter: F) -> FilteredSink<Self, F, T, S>
    where
        F: Filter<T, S>,
    {
        FilteredSink::new(self, filter)
    }
}

impl<S, O: Sink<S>> SinkExt<S> for O {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PumpError;

    struct StaticSource {
        batches: Vec<Vec<u32>>,
    }

    impl Source<u32> for StaticSource {
        fn read(&mut self, _count: usize) -> Result<Option<Vec<u32>>> {
            if self.batches.is_empty() {
                Ok(None)
            } else {
                Ok(Some(self.batches.remove(0)))
            }
        }

        fn commit(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct CollectSink {
        records: Vec<String>,
        commits: usize,
    }

    impl Sink<String> for CollectSink {
        fn write(&mut self, records: Vec<String>) -> Result<()> {
            self.records.extend(records);
            Ok(())
        }

        fn commit(&mut self) -> Result<()> {
            self.commits += 1;
            Ok(())
        }
    }

    /// Counts invocations so tests can prove the filter is skipped on
    /// end-of-stream.
    struct Stringify {
        calls: usize,
    }

    impl Filter<u32, String> for Stringify {
        fn apply(&mut self, records: Vec<u32>) -> Result<Vec<String>> {
            self.calls += 1;
            Ok(records.into_iter().map(|n| n.to_string()).collect())
        }
    }

    struct RejectAll;

    impl Filter<u32, String> for RejectAll {
        fn apply(&mut self, _records: Vec<u32>) -> Result<Vec<String>> {
            Err(PumpError::transform("rejected"))
        }
    }

    #[test]
    fn filtered_source_transforms_batches() {
        let source = StaticSource {
            batches: vec![vec![1, 2], vec![3]],
        };
        let mut filtered = source.with_filter(Stringify { calls: 0 });

        assert_eq!(
            filtered.read(10).unwrap(),
            Some(vec!["1".to_string(), "2".to_string()])
        );
        assert_eq!(filtered.read(10).unwrap(), Some(vec!["3".to_string()]));
        assert_eq!(filtered.read(10).unwrap(), None);
    }

    #[test]
    fn end_of_stream_skips_the_filter() {
        let source = StaticSource { batches: vec![] };
        let mut filtered = FilteredSource::new(source, Stringify { calls: 0 });

        assert_eq!(filtered.read(5).unwrap(), None);
        let (_, filter) = filtered.into_parts();
        assert_eq!(filter.calls, 0);
    }

    #[test]
    fn filtered_sink_transforms_before_delegating() {
        let sink = CollectSink::default();
        let mut filtered = sink.with_filter(Stringify { calls: 0 });

        filtered.write(vec![7, 8]).unwrap();
        filtered.commit().unwrap();

        let (inner, _) = filtered.into_parts();
        assert_eq!(inner.records, vec!["7".to_string(), "8".to_string()]);
        assert_eq!(inner.commits, 1);
    }

    #[test]
    fn filter_failure_fails_the_whole_write() {
        let sink = CollectSink::default();
        let mut filtered = FilteredSink::new(sink, RejectAll);

        let err = filtered.write(vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, PumpError::Transform { .. }));

        let (inner, _) = filtered.into_parts();
        assert!(inner.records.is_empty(), "no partial delivery");
    }

    #[test]
    fn adapters_nest() {
        struct Double;
        impl Filter<u32, u32> for Double {
            fn apply(&mut self, records: Vec<u32>) -> Result<Vec<u32>> {
                Ok(records.into_iter().map(|n| n * 2).collect())
            }
        }

        let source = StaticSource {
            batches: vec![vec![1, 2]],
        };
        let mut nested = source.with_filter(Double).with_filter(Stringify { calls: 0 });

        assert_eq!(
            nested.read(10).unwrap(),
            Some(vec!["2".to_string(), "4".to_string()])
        );
    }
}
