//! odour-bridge - republishes OdourCollect odour observations as Darwin
//! Core records.
//!
//! Two uncoordinated processes share a CSV snapshot: the fetcher pulls
//! raw observations from the upstream API, decodes the categorical codes
//! through the static taxonomy tables, and atomically replaces the
//! snapshot; the server re-reads the snapshot on every request and
//! expands each row into a nested standardized record.

pub mod actions;
pub mod commands;
pub mod dwc;
pub mod errors;
pub mod fetcher;
pub mod observations;
pub mod snapshot;
pub mod taxonomy;
pub mod web;

pub use observations::{GpsCoords, ListFilters, ListRequest, RawObservation, SnapshotRow};
pub use snapshot::{CsvSnapshotStore, MemorySnapshotStore, SnapshotStore};
