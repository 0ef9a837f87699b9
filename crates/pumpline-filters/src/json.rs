//! JSON codec filters.
//!
//! Each record becomes exactly one JSON line and back; a single
//! malformed record fails its whole batch with
//! [`PumpError::Codec`](pumpline_core::PumpError::Codec).

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use pumpline_core::{Filter, Result};

/// Encode typed records into compact JSON strings.
pub struct JsonEncode<T> {
    _record: PhantomData<fn(T)>,
}

impl<T> JsonEncode<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }
}

impl<T> Default for JsonEncode<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> Filter<T, String> for JsonEncode<T> {
    fn apply(&mut self, records: Vec<T>) -> Result<Vec<String>> {
        records
            .iter()
            .map(|record| serde_json::to_string(record).map_err(Into::into))
            .collect()
    }
}

/// Decode JSON strings back into typed records.
pub struct JsonDecode<T> {
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonDecode<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }
}

impl<T> Default for JsonDecode<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> Filter<String, T> for JsonDecode<T> {
    fn apply(&mut self, records: Vec<String>) -> Result<Vec<T>> {
        records
            .iter()
            .map(|line| serde_json::from_str(line).map_err(Into::into))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pumpline_core::PumpError;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Event {
        id: u64,
        name: String,
    }

    fn events() -> Vec<Event> {
        vec![
            Event {
                id: 1,
                name: "created".to_string(),
            },
            Event {
                id: 2,
                name: "deleted".to_string(),
            },
        ]
    }

    #[test]
    fn encode_decode_round_trip() {
        let original = events();

        let lines = JsonEncode::new().apply(original.clone()).unwrap();
        assert_eq!(lines.len(), original.len());
        assert!(lines[0].contains("\"id\":1"));

        let decoded: Vec<Event> = JsonDecode::new().apply(lines).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn encoded_lines_carry_no_delimiter() {
        // One record per line is what makes the codec safe for TextLog.
        let lines = JsonEncode::new().apply(events()).unwrap();
        assert!(lines.iter().all(|line| !line.contains('\n')));
    }

    #[test]
    fn one_bad_line_fails_the_whole_batch() {
        let lines = vec![
            r#"{"id":1,"name":"ok"}"#.to_string(),
            "not json".to_string(),
            r#"{"id":3,"name":"never reached"}"#.to_string(),
        ];

        let result: Result<Vec<Event>> = JsonDecode::new().apply(lines);
        assert!(matches!(result.unwrap_err(), PumpError::Codec(_)));
    }

    #[test]
    fn empty_batch_passes_through() {
        let lines = JsonEncode::<Event>::new().apply(Vec::new()).unwrap();
        assert!(lines.is_empty());
    }
}
