use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use service::phrases::domain::{Phrase, PhraseInput};

use crate::errors::JsonApiError;
use crate::metrics;
use crate::state::AppState;

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEntry {
    pub entry_id: Uuid,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RemovedPhrase {
    pub removed: String,
}

async fn insert_entry(
    state: &AppState,
    account_id: Uuid,
    payload: Result<Json<PhraseInput>, JsonRejection>,
) -> Result<Json<CreatedEntry>, JsonApiError> {
    let Json(input) = payload?;
    let res = state.phrases.insert(account_id, input).await;
    metrics::observe("insert_phrase", &res);
    Ok(Json(CreatedEntry { entry_id: res? }))
}

#[utoipa::path(post, path = "/accounts/{id}/phrases", tag = "phrases",
    params(("id" = Uuid, Path, description = "Account id")),
    request_body = crate::openapi::PhraseDoc,
    responses((status = 201, description = "Inserted", body = CreatedEntry), (status = 400, description = "Bad Request"),
        (status = 404, description = "Account missing"), (status = 409, description = "Key exists")))]
pub async fn insert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<PhraseInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedEntry>), JsonApiError> {
    let created = insert_entry(&state, id, payload).await?;
    Ok((StatusCode::CREATED, created))
}

/// Same contract as POST; an existing key is never overwritten.
#[utoipa::path(put, path = "/accounts/{id}/phrases", tag = "phrases",
    params(("id" = Uuid, Path, description = "Account id")),
    request_body = crate::openapi::PhraseDoc,
    responses((status = 200, description = "Inserted", body = CreatedEntry), (status = 400, description = "Bad Request"),
        (status = 404, description = "Account missing"), (status = 409, description = "Key exists")))]
pub async fn put(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<PhraseInput>, JsonRejection>,
) -> Result<Json<CreatedEntry>, JsonApiError> {
    insert_entry(&state, id, payload).await
}

#[utoipa::path(get, path = "/accounts/{id}/phrases", tag = "phrases",
    params(("id" = Uuid, Path, description = "Account id")),
    responses((status = 200, description = "Phrases in insertion order", body = [crate::openapi::PhraseDoc]), (status = 404, description = "Account missing")))]
pub async fn list(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Vec<Phrase>>, JsonApiError> {
    let res = state.phrases.list(id).await;
    metrics::observe("list_phrases", &res);
    Ok(Json(res?))
}

#[utoipa::path(delete, path = "/accounts/{id}/phrases/{key}", tag = "phrases",
    params(("id" = Uuid, Path, description = "Account id"), ("key" = String, Path, description = "Phrase key")),
    responses((status = 200, description = "Removed", body = RemovedPhrase), (status = 404, description = "Not Found")))]
pub async fn remove(
    State(state): State<AppState>,
    Path((id, key)): Path<(Uuid, String)>,
) -> Result<Json<RemovedPhrase>, JsonApiError> {
    let res = state.phrases.remove(id, &key).await;
    metrics::observe("remove_phrase", &res);
    res?;
    Ok(Json(RemovedPhrase { removed: key }))
}
