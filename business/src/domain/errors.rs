/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.not_found")]
    NotFound,
    #[error("repository.persistence")]
    Persistence,
    #[error("repository.duplicated")]
    Duplicated,
    /// The store rejected the record (constraint, missing reference...).
    /// Carries the code of the rule that failed.
    #[error("{0}")]
    Validation(String),
    #[error("repository.database_error")]
    DatabaseError,
}

impl RepositoryError {
    pub fn not_found() -> Self {
        RepositoryError::NotFound
    }
    pub fn persistence() -> Self {
        RepositoryError::Persistence
    }
    pub fn duplicated() -> Self {
        RepositoryError::Duplicated
    }
    pub fn validation(code: impl Into<String>) -> Self {
        RepositoryError::Validation(code.into())
    }
    pub fn database_error() -> Self {
        RepositoryError::DatabaseError
    }
}
