use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use service::accounts::domain::{AccountView, LoginInput, RegisterInput};
use service::RegistryError;

use crate::errors::JsonApiError;
use crate::metrics;
use crate::state::AppState;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreatedAccount {
    pub id: Uuid,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeletedAccounts {
    pub count: u64,
}

#[utoipa::path(post, path = "/accounts", tag = "accounts", request_body = crate::openapi::RegisterRequest,
    responses((status = 201, description = "Registered", body = CreatedAccount), (status = 400, description = "Bad Request"), (status = 409, description = "Handle taken")))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedAccount>), JsonApiError> {
    let Json(input) = payload?;
    let res = state.accounts.register(input).await;
    metrics::observe("register", &res);
    Ok((StatusCode::CREATED, Json(CreatedAccount { id: res? })))
}

/// Unknown handles answer 400 on this route; a bad secret answers 401.
#[utoipa::path(post, path = "/login", tag = "accounts", request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Authenticated", body = crate::openapi::AccountViewDoc), (status = 400, description = "Unknown handle"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<AccountView>, JsonApiError> {
    let Json(input) = payload?;
    let res = state.accounts.authenticate(input).await;
    metrics::observe("authenticate", &res);
    match res {
        Ok(view) => Ok(Json(view)),
        Err(RegistryError::NotFound(_)) => Err(JsonApiError::bad_request("unknown handle")),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(get, path = "/accounts", tag = "accounts",
    responses((status = 200, description = "All accounts", body = [crate::openapi::AccountViewDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<AccountView>>, JsonApiError> {
    let res = state.accounts.list().await;
    metrics::observe("list_accounts", &res);
    Ok(Json(res?))
}

#[utoipa::path(get, path = "/accounts/{id}", tag = "accounts",
    params(("id" = Uuid, Path, description = "Account id")),
    responses((status = 200, description = "Account", body = crate::openapi::AccountViewDoc), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<AccountView>, JsonApiError> {
    let res = state.accounts.get(id).await;
    metrics::observe("get_account", &res);
    Ok(Json(res?))
}

#[utoipa::path(delete, path = "/accounts", tag = "accounts",
    responses((status = 200, description = "Deleted", body = DeletedAccounts)))]
pub async fn delete_all(State(state): State<AppState>) -> Result<Json<DeletedAccounts>, JsonApiError> {
    let res = state.accounts.delete_all().await;
    metrics::observe("delete_all_accounts", &res);
    Ok(Json(DeletedAccounts { count: res? }))
}
