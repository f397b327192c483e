//! HTTP handlers for the read-only observations API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::error;

use crate::dwc::DwcObservation;
use crate::errors::SnapshotError;
use crate::web::AppState;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Handler for GET /api/v1.0/observations/
///
/// Returns every observation in the current snapshot as a JSON array of
/// Darwin Core records.
pub async fn list_observations(State(state): State<AppState>) -> Response {
    observations_response(&state, None)
}

/// Handler for GET /api/v1.0/observations/{id}
///
/// Returns a JSON array with zero or one record. An id absent from the
/// snapshot yields an empty array with a success status, never a 404.
pub async fn get_observation(
    State(state): State<AppState>,
    Path(observation_id): Path<i64>,
) -> Response {
    observations_response(&state, Some(observation_id))
}

/// Load the snapshot, optionally filter to one id, and expand each row.
///
/// The snapshot is re-read on every request so responses always reflect
/// the latest fetch. Request-scoped failures become JSON error responses;
/// the server keeps running.
fn observations_response(state: &AppState, filter_id: Option<i64>) -> Response {
    let rows = match state.store.read() {
        Ok(rows) => rows,
        Err(err @ SnapshotError::Missing { .. }) => {
            return json_error(StatusCode::SERVICE_UNAVAILABLE, &err.to_string());
        }
        Err(err) => {
            error!("Failed to read snapshot: {}", err);
            return json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Failed to read snapshot: {}", err),
            );
        }
    };

    let mut records = Vec::new();
    for row in rows
        .iter()
        .filter(|row| filter_id.is_none_or(|id| row.id == id))
    {
        match DwcObservation::from_row(row) {
            Ok(record) => records.push(record),
            Err(err) => {
                error!("Observation {} has an invalid timestamp: {}", row.id, err);
                return json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &format!("Observation {} has an invalid timestamp", row.id),
                );
            }
        }
    }

    Json(records).into_response()
}
