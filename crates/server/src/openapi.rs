use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest { pub handle: String, pub display_name: String, pub secret: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub handle: String, pub secret: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountViewDoc { pub id: Uuid, pub handle: String, pub display_name: String }

#[derive(ToSchema)]
pub struct PhraseDoc { pub key: String, pub value: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::accounts::register,
        crate::routes::accounts::login,
        crate::routes::accounts::list,
        crate::routes::accounts::get,
        crate::routes::accounts::delete_all,
        crate::routes::phrases::insert,
        crate::routes::phrases::put,
        crate::routes::phrases::list,
        crate::routes::phrases::remove,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            AccountViewDoc,
            PhraseDoc,
            crate::routes::accounts::CreatedAccount,
            crate::routes::accounts::DeletedAccounts,
            crate::routes::phrases::CreatedEntry,
            crate::routes::phrases::RemovedPhrase,
        )
    ),
    tags(
        (name = "health"),
        (name = "accounts"),
        (name = "phrases")
    )
)]
pub struct ApiDoc;
