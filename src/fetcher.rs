//! Upstream pull: fetch raw observations from OdourCollect, decode them,
//! and persist a fresh snapshot.

use serde::Deserialize;
use std::time::Duration;
use tracing::info;

use crate::errors::FetchError;
use crate::observations::{self, ListRequest, RawObservation, SnapshotRow};
use crate::snapshot::SnapshotStore;

/// Default upstream endpoint. TLS is required.
pub const DEFAULT_ENDPOINT: &str = "https://odourcollect.eu/api/odor/list";

/// The upstream has no documented latency bound; cap requests explicitly.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Response envelope around the observation list.
#[derive(Debug, Deserialize)]
struct ListResponse {
    content: Vec<RawObservation>,
}

pub fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(UPSTREAM_TIMEOUT).build()
}

/// Fetch the full observation list and atomically replace the snapshot.
///
/// Any failure aborts the run before the store is touched: a non-success
/// upstream status, a malformed or empty envelope, or a single row that
/// fails to decode. Returns the number of rows written.
pub async fn fetch_and_persist(
    client: &reqwest::Client,
    endpoint: &str,
    request: &ListRequest,
    store: &dyn SnapshotStore,
) -> Result<usize, FetchError> {
    info!("Fetching observations from {}", endpoint);

    let response = client.post(endpoint).json(request).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Upstream(status));
    }

    let body = response.text().await?;
    let envelope: ListResponse = serde_json::from_str(&body)?;
    if envelope.content.is_empty() {
        return Err(FetchError::EmptyResult);
    }
    info!("Received {} raw observations", envelope.content.len());

    let rows = decode_all(&envelope.content)?;
    store.write(&rows)?;

    Ok(rows.len())
}

/// Decode every raw observation, failing the whole batch on the first
/// error so no partially-decoded snapshot is ever committed.
fn decode_all(raw: &[RawObservation]) -> Result<Vec<SnapshotRow>, FetchError> {
    raw.iter()
        .map(|observation| {
            observations::decode(observation).map_err(|source| FetchError::Decode {
                id: observation.id,
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: i64, type_code: u8) -> RawObservation {
        RawObservation {
            id,
            id_user: 7,
            id_odor_type: type_code,
            id_odor_annoy: 5,
            id_odor_intensity: 3,
            id_odor_duration: 1,
            published_at: "2022-04-24T13:43:43.893254Z".to_string(),
            latitude: 41.5,
            longitude: 2.2,
        }
    }

    #[test]
    fn test_decode_all_preserves_order_and_ids() {
        let rows = decode_all(&[raw(1, 11), raw(2, 59)]).unwrap();
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].odour_type, "Rotten eggs");
        assert_eq!(rows[1].id, 2);
        assert_eq!(rows[1].odour_type, "Traffic");
    }

    #[test]
    fn test_decode_all_fails_fast_on_unknown_code() {
        let err = decode_all(&[raw(1, 11), raw(2, 99)]).unwrap_err();
        assert!(matches!(err, FetchError::Decode { id: 2, .. }));
    }

    #[test]
    fn test_envelope_parsing() {
        let json = r#"{"content":[{"id":42,"id_user":7,"id_odor_type":11,"id_odor_annoy":5,"id_odor_intensity":3,"id_odor_duration":1,"published_at":"2022-04-24T13:43:43.893254Z","latitude":41.5,"longitude":2.2}]}"#;
        let envelope: ListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.content.len(), 1);
        assert_eq!(envelope.content[0].id, 42);
    }

    #[test]
    fn test_envelope_missing_content_key_is_error() {
        let result: Result<ListResponse, _> = serde_json::from_str(r#"{"error":"nope"}"#);
        assert!(result.is_err());
    }
}
