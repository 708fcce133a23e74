//! Route handlers for the JSON API.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

use super::error::{ApiError, ApiResult};
use crate::analytics::{descriptive, predictive, prescriptive, Dataset};
use crate::collection::{Collection, Record};
use crate::repository::{CollectionRepository, RepositoryError};
use crate::store::DocumentStore;

type Repo<S> = State<Arc<CollectionRepository<S>>>;

/// Parse a record id path segment. Any finite number is accepted; one that is
/// not a whole number cannot name a record.
fn parse_id(collection: Collection, raw: &str) -> ApiResult<i64> {
    let value: f64 = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ApiError::InvalidId(raw.to_string()))?;
    if value.fract() != 0.0 {
        return Err(ApiError::NotFound {
            collection,
            id: raw.to_string(),
        });
    }
    Ok(value as i64)
}

/// The body must be a JSON object; anything else is rejected.
fn parse_object(body: &[u8]) -> ApiResult<Record> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ApiError::InvalidPayload),
    }
}

fn not_found(collection: Collection, raw_id: &str) -> ApiError {
    ApiError::NotFound {
        collection,
        id: raw_id.to_string(),
    }
}

fn with_raw_id(err: RepositoryError, raw_id: &str) -> ApiError {
    match err {
        RepositoryError::NotFound { collection, .. } => not_found(collection, raw_id),
        other => other.into(),
    }
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true, "collections": Collection::supported() }))
}

/// `GET /api/data` - the whole document.
pub async fn snapshot<S: DocumentStore + 'static>(State(repo): Repo<S>) -> impl IntoResponse {
    match repo.snapshot() {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to read database");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to load database" })),
            )
                .into_response()
        }
    }
}

/// `GET /api/:collection`
pub async fn list_records<S: DocumentStore + 'static>(
    State(repo): Repo<S>,
    Path(collection): Path<String>,
) -> ApiResult<Json<Value>> {
    let collection: Collection = collection.parse()?;
    let data = repo.list(collection)?;
    Ok(Json(json!({
        "collection": collection,
        "count": data.len(),
        "data": data,
    })))
}

/// `POST /api/:collection`
pub async fn create_record<S: DocumentStore + 'static>(
    State(repo): Repo<S>,
    Path(collection): Path<String>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Record>)> {
    let collection: Collection = collection.parse()?;
    let payload = parse_object(&body)?;
    let record = repo.insert(collection, payload)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /api/:collection/:id`
pub async fn get_record<S: DocumentStore + 'static>(
    State(repo): Repo<S>,
    Path((collection, raw_id)): Path<(String, String)>,
) -> ApiResult<Json<Record>> {
    let collection: Collection = collection.parse()?;
    let id = parse_id(collection, &raw_id)?;
    repo.get(collection, id)?
        .map(Json)
        .ok_or_else(|| not_found(collection, &raw_id))
}

/// `PATCH /api/:collection/:id`
pub async fn patch_record<S: DocumentStore + 'static>(
    State(repo): Repo<S>,
    Path((collection, raw_id)): Path<(String, String)>,
    body: Bytes,
) -> ApiResult<Json<Record>> {
    let collection: Collection = collection.parse()?;
    let id = parse_id(collection, &raw_id)?;
    let updates = parse_object(&body)?;
    repo.patch(collection, id, updates)
        .map(Json)
        .map_err(|e| with_raw_id(e, &raw_id))
}

/// `DELETE /api/:collection/:id`
pub async fn delete_record<S: DocumentStore + 'static>(
    State(repo): Repo<S>,
    Path((collection, raw_id)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let collection: Collection = collection.parse()?;
    let id = parse_id(collection, &raw_id)?;
    repo.delete(collection, id)
        .map_err(|e| with_raw_id(e, &raw_id))?;
    Ok(Json(json!({ "success": true })))
}

fn dataset<S: DocumentStore>(repo: &CollectionRepository<S>) -> ApiResult<Dataset> {
    Ok(Dataset::from_snapshot(&repo.snapshot()?))
}

/// `GET /api/analytics/descriptive`
pub async fn descriptive_report<S: DocumentStore + 'static>(
    State(repo): Repo<S>,
) -> ApiResult<Json<descriptive::DescriptiveReport>> {
    Ok(Json(descriptive::report(&dataset(&repo)?)))
}

/// `GET /api/analytics/predictive`
pub async fn predictive_report<S: DocumentStore + 'static>(
    State(repo): Repo<S>,
) -> ApiResult<Json<predictive::PredictiveReport>> {
    let today = chrono::Local::now().date_naive();
    Ok(Json(predictive::report(&dataset(&repo)?, today)))
}

/// `GET /api/analytics/prescriptive`
pub async fn prescriptive_report<S: DocumentStore + 'static>(
    State(repo): Repo<S>,
) -> ApiResult<Json<prescriptive::PrescriptiveReport>> {
    Ok(Json(prescriptive::report(&dataset(&repo)?)))
}
