//! Domain error types shared by the fetcher and the server.

use thiserror::Error;

/// A raw observation could not be decoded into a snapshot row.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A categorical code is absent from its lookup table. The taxonomy is
    /// closed; decoding fails rather than passing the raw code through.
    #[error("unknown {table} code {code}")]
    UnknownCode { table: &'static str, code: i64 },

    #[error(transparent)]
    Range(#[from] RangeError),

    /// The observation timestamp is not parseable. Caught at decode time
    /// so an unserveable row never reaches the snapshot.
    #[error("unparseable published_at timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

/// A value is outside its valid range (GPS coordinate or filter field).
#[derive(Debug, Error)]
pub enum RangeError {
    #[error("latitude {0} outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} outside [-180, 180]")]
    Longitude(f64),
    #[error("{field} {value} outside [{min}, {max}]")]
    Bound {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// A query filter range is inverted (min above max, or start after end).
#[derive(Debug, Error)]
#[error("{field}: minimum/start must not exceed maximum/end")]
pub struct RangeOrderError {
    pub field: &'static str,
}

/// Failures of a single fetch run. All variants are fatal to the run;
/// no partial snapshot is ever committed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unexpected HTTP status from upstream: {0}")]
    Upstream(reqwest::StatusCode),

    #[error("upstream returned no observations for the given criteria")]
    EmptyResult,

    #[error("upstream response envelope could not be decoded: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("observation {id} could not be decoded: {source}")]
    Decode {
        id: i64,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Store(#[from] SnapshotError),
}

/// Failures of the snapshot store.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The server was invoked before any snapshot was written.
    #[error("no snapshot found at {path}; run the fetcher first")]
    Missing { path: String },

    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot could not be parsed: {0}")]
    Csv(#[from] csv::Error),
}
