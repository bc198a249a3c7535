//! Repository Module
//!
//! Data access layer: one repository struct per table over a shared
//! SQLite pool. Handlers own the conversion to [`crate::AppError`].

pub mod merchant;
pub mod order;
pub mod pet;
pub mod product;
pub mod service;
pub mod user;

pub use merchant::MerchantRepository;
pub use order::OrderRepository;
pub use pet::PetRepository;
pub use product::ProductRepository;
pub use service::ServiceRepository;
pub use user::UserRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepoError {
    /// Whether the error comes from a violated UNIQUE constraint
    pub fn is_duplicate(&self) -> bool {
        matches!(self, RepoError::Duplicate(_))
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error()
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.to_string());
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
