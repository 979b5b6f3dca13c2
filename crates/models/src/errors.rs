use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0} already exists")]
    Conflict(String),
    #[error("{0} does not exist")]
    MissingParent(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Postgres text columns cannot hold NUL, so it is refused up front as bad input.
    pub fn reject_nul(field: &str, value: &str) -> Result<(), ModelError> {
        if value.contains('\0') {
            return Err(ModelError::Validation(format!("{field} must not contain NUL characters")));
        }
        Ok(())
    }

    /// Classify a driver error raised while writing `entity`.
    ///
    /// Constraint violations are the only way uniqueness and ownership are
    /// checked, so they must not collapse into `Db`.
    pub fn from_write(err: DbErr, entity: &str, parent: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ModelError::Conflict(entity.to_string()),
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => ModelError::MissingParent(parent.to_string()),
            _ => ModelError::Db(err.to_string()),
        }
    }
}

impl From<DbErr> for ModelError {
    fn from(err: DbErr) -> Self {
        ModelError::Db(err.to_string())
    }
}
