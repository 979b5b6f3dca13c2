use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;

use crate::errors::ModelError;
use crate::phrase;

pub const HANDLE_MAX_LEN: usize = 64;
pub const DISPLAY_NAME_MAX_LEN: usize = 128;

// No serde derives: the row carries the credential hash.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub handle: String,
    pub display_name: String,
    pub credential_hash: String,
    pub credential_algorithm: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Phrase,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Phrase => Entity::has_many(phrase::Entity).into(),
        }
    }
}

impl Related<phrase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Phrase.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Trim and bound-check a handle; returns the stored form.
pub fn validate_handle(handle: &str) -> Result<String, ModelError> {
    let h = handle.trim();
    ModelError::reject_nul("handle", h)?;
    if h.is_empty() {
        return Err(ModelError::Validation("handle required".into()));
    }
    if h.chars().count() > HANDLE_MAX_LEN {
        return Err(ModelError::Validation(format!("handle longer than {HANDLE_MAX_LEN} characters")));
    }
    Ok(h.to_string())
}

pub fn validate_display_name(name: &str) -> Result<String, ModelError> {
    let n = name.trim();
    ModelError::reject_nul("display name", n)?;
    if n.is_empty() {
        return Err(ModelError::Validation("display name required".into()));
    }
    if n.chars().count() > DISPLAY_NAME_MAX_LEN {
        return Err(ModelError::Validation(format!("display name longer than {DISPLAY_NAME_MAX_LEN} characters")));
    }
    Ok(n.to_string())
}

/// Insert a new account in one statement.
///
/// Handle uniqueness is left to the `account.handle` unique index, so two
/// racing registrations cannot both commit.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    handle: &str,
    display_name: &str,
    credential_hash: String,
    credential_algorithm: &str,
) -> Result<Model, ModelError> {
    let handle = validate_handle(handle)?;
    let display_name = validate_display_name(display_name)?;
    if credential_hash.trim().is_empty() {
        return Err(ModelError::Validation("credential hash required".into()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        handle: Set(handle),
        display_name: Set(display_name),
        credential_hash: Set(credential_hash),
        credential_algorithm: Set(credential_algorithm.to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ModelError::from_write(e, "handle", "account"))
}

pub async fn find_by_handle<C: ConnectionTrait>(db: &C, handle: &str) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::Handle.eq(handle.trim()))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// All accounts, oldest first.
pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find()
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Delete every account; phrases go with them through the FK cascade.
pub async fn delete_all<C: ConnectionTrait>(db: &C) -> Result<u64, ModelError> {
    let res = Entity::delete_many().exec(db).await?;
    Ok(res.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_is_trimmed() {
        assert_eq!(validate_handle("  ana ").unwrap(), "ana");
    }

    #[test]
    fn blank_handle_is_rejected() {
        assert!(matches!(validate_handle("   "), Err(ModelError::Validation(_))));
    }

    #[test]
    fn overlong_handle_is_rejected() {
        let long = "a".repeat(HANDLE_MAX_LEN + 1);
        assert!(validate_handle(&long).is_err());
        assert!(validate_handle(&"a".repeat(HANDLE_MAX_LEN)).is_ok());
    }

    #[test]
    fn nul_is_rejected_as_validation() {
        assert!(matches!(validate_handle("ana\u{0}"), Err(ModelError::Validation(_))));
        assert!(matches!(validate_display_name("A\u{0}na"), Err(ModelError::Validation(_))));
    }

    #[test]
    fn display_name_required() {
        assert!(validate_display_name("").is_err());
        assert_eq!(validate_display_name("Ana Maria").unwrap(), "Ana Maria");
    }
}
