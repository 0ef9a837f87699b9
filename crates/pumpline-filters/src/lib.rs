//! Pure batch transforms for composing typed pumpline pipelines.
//!
//! [`JsonEncode`] / [`JsonDecode`] move typed records through
//! newline-delimited JSON text, and [`map`] lifts a per-record function
//! into the [`Filter`](pumpline_core::Filter) contract.

pub mod json;
pub mod map;

pub use json::{JsonDecode, JsonEncode};
pub use map::{map, MapFilter};
