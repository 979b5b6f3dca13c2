use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::Utc;

use crate::account;
use crate::errors::ModelError;

pub const KEY_MAX_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "phrase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub key: String,
    #[sea_orm(column_type = "Text")]
    pub value: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Account,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Account => Entity::belongs_to(account::Entity)
                .from(Column::AccountId)
                .to(account::Column::Id)
                .into(),
        }
    }
}

impl Related<account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Keys are stored verbatim; only blank and overlong keys are refused.
pub fn validate_key(key: &str) -> Result<(), ModelError> {
    ModelError::reject_nul("phrase key", key)?;
    if key.trim().is_empty() {
        return Err(ModelError::Validation("phrase key required".into()));
    }
    if key.chars().count() > KEY_MAX_LEN {
        return Err(ModelError::Validation(format!("phrase key longer than {KEY_MAX_LEN} characters")));
    }
    Ok(())
}

/// Values may be empty; only NUL is refused.
pub fn validate_value(value: &str) -> Result<(), ModelError> {
    ModelError::reject_nul("phrase value", value)
}

/// Insert one phrase. Never overwrites.
///
/// `(account_id, key)` uniqueness and account existence are both enforced by
/// the database in this single statement.
pub async fn create<C: ConnectionTrait>(db: &C, account_id: Uuid, key: &str, value: &str) -> Result<Model, ModelError> {
    validate_key(key)?;
    validate_value(value)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        account_id: Set(account_id),
        key: Set(key.to_string()),
        value: Set(value.to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ModelError::from_write(e, "phrase key", "account"))
}

/// Phrases of one account in insertion order.
pub async fn list_for_account<C: ConnectionTrait>(db: &C, account_id: Uuid) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find()
        .filter(Column::AccountId.eq(account_id))
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Delete by `(account_id, key)`; returns the number of rows removed (0 or 1).
pub async fn delete_by_key<C: ConnectionTrait>(db: &C, account_id: Uuid, key: &str) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::AccountId.eq(account_id))
        .filter(Column::Key.eq(key))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
