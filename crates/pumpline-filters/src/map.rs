//! Lift a per-record function into the batch [`Filter`] contract.

use pumpline_core::{Filter, PumpError, Result};

/// Batch filter applying a fallible per-record function.
///
/// The first record failure fails the whole batch; records are never
/// skipped or retried individually.
pub struct MapFilter<F> {
    func: F,
}

/// Build a [`MapFilter`] from `func`.
///
/// ```
/// use pumpline_core::Filter;
/// use pumpline_filters::map;
///
/// let mut upper = map(|s: String| Ok(s.to_uppercase()));
/// let batch = upper.apply(vec!["a".to_string()]).unwrap();
/// assert_eq!(batch, vec!["A".to_string()]);
/// ```
pub fn map<T, S, F>(func: F) -> MapFilter<F>
where
    F: FnMut(T) -> Result<S>,
{
    MapFilter { func }
}

impl<T, S, F> Filter<T, S> for MapFilter<F>
where
    F: FnMut(T) -> Result<S>,
{
    fn apply(&mut self, records: Vec<T>) -> Result<Vec<S>> {
        records.into_iter().map(&mut self.func).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_record_in_order() {
        let mut doubler = map(|n: u32| Ok(n * 2));
        assert_eq!(doubler.apply(vec![1, 2, 3]).unwrap(), vec![2, 4, 6]);
    }

    #[test]
    fn first_failure_fails_the_batch() {
        let mut checked = map(|n: i64| {
            if n < 0 {
                Err(PumpError::transform(format!("negative record: {n}")))
            } else {
                Ok(n as u64)
            }
        });

        let err = checked.apply(vec![1, -2, 3]).unwrap_err();
        assert!(matches!(err, PumpError::Transform { .. }));
        assert!(err.to_string().contains("-2"));
    }

    #[test]
    fn stateful_closures_are_allowed() {
        let mut counter = 0u64;
        let mut numbered = map(move |s: String| {
            counter += 1;
            Ok(format!("{counter}:{s}"))
        });

        let batch = numbered
            .apply(vec!["a".to_string(), "b".to_string()])
            .unwrap();
        assert_eq!(batch, vec!["1:a".to_string(), "2:b".to_string()]);
    }
}
