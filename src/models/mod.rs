//! Core data models for parsed bibliography records.

mod record;

pub use record::{fields, Record, RecordBuilder, RecordCollection};
