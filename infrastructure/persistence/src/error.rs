use business::domain::errors::RepositoryError;
use sqlx::error::ErrorKind;

/// Translates a driver error into the store-agnostic [`RepositoryError`].
///
/// Constraint violations become `Validation` carrying a code the API can
/// show as-is; anything else is logged and reported as a database error.
pub fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation => RepositoryError::Duplicated,
            ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => {
                RepositoryError::validation(validation_code(db_err.constraint()))
            }
            _ => {
                tracing::error!("Database rejected statement: {err}");
                RepositoryError::DatabaseError
            }
        },
        _ => {
            tracing::error!("Database error: {err}");
            RepositoryError::DatabaseError
        }
    }
}

/// Code for a violated constraint, named as in the migrations.
pub(crate) fn validation_code(constraint: Option<&str>) -> String {
    match constraint {
        Some("products_title_not_blank") => "product.title_required".to_string(),
        Some("products_user_id_fkey") => "product.owner_unknown".to_string(),
        Some(other) => format!("repository.constraint.{other}"),
        None => "repository.invalid_record".to_string(),
    }
}
