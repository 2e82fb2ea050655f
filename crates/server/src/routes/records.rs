use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use service::records::Record;
use tracing::{debug, info};

use crate::{errors::ApiError, state::ServerState};

/// Multipart field carrying the uploaded record file.
pub const JSON_FILE_FIELD: &str = "json";

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub name: Option<String>,
}

// Oversized bodies surface while streaming the parts; everything else is a
// malformed or absent upload.
fn field_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        debug!(error = %err, "unreadable multipart body");
        ApiError::MissingPayload
    }
}

/// Pull the bytes of the `json` file part out of a multipart upload.
async fn read_json_file(multipart: Result<Multipart, MultipartRejection>) -> Result<Bytes, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        debug!(error = %e, "request is not multipart");
        ApiError::MissingPayload
    })?;
    while let Some(field) = multipart.next_field().await.map_err(field_error)? {
        if field.name() == Some(JSON_FILE_FIELD) {
            return field.bytes().await.map_err(field_error);
        }
    }
    Err(ApiError::MissingPayload)
}

/// List every record as a JSON array.
pub async fn list_records(State(state): State<ServerState>) -> Json<Vec<Record>> {
    let list = state.records.list_all();
    info!(count = list.len(), "list records");
    Json(list)
}

/// Matching records for `name`; an empty array when nothing matches.
pub async fn get_record_by_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Json<Vec<Record>> {
    let found = state.records.find_by_name(&name);
    info!(%name, count = found.len(), "find record");
    Json(found)
}

pub async fn add_record(
    State(state): State<ServerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<&'static str, ApiError> {
    let payload = read_json_file(multipart).await?;
    state.records.add_json(&payload)?;
    info!(bytes = payload.len(), "record added");
    Ok("OK")
}

pub async fn update_record(
    State(state): State<ServerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<&'static str, ApiError> {
    let payload = read_json_file(multipart).await?;
    state.records.update_json(&payload)?;
    info!(bytes = payload.len(), "record updated");
    Ok("OK")
}

/// `DELETE /record?name=bob`
pub async fn remove_record(
    State(state): State<ServerState>,
    Query(query): Query<DeleteQuery>,
) -> Result<&'static str, ApiError> {
    let name = query.name.unwrap_or_default();
    state.records.delete(&name)?;
    info!(%name, "record deleted");
    Ok("OK")
}
