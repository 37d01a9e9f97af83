use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// The three resources exposed by the API, used to name the subject of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Category,
    TrainingCenter,
    Athlete,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => write!(f, "Category"),
            Self::TrainingCenter => write!(f, "Training center"),
            Self::Athlete => write!(f, "Athlete"),
        }
    }
}

/// How a missing row was looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Id(Uuid),
    Name(String),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id: {}", id),
            Self::Name(name) => write!(f, "name: {}", name),
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{entity} not found with {lookup}")]
    NotFound { entity: Entity, lookup: Lookup },

    #[error("{entity} already registered with {field}: {value}")]
    Conflict {
        entity: Entity,
        field: &'static str,
        value: String,
    },

    #[error("{0} may not be null")]
    NullField(&'static str),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn not_found(entity: Entity, id: Uuid) -> Self {
        Self::NotFound {
            entity,
            lookup: Lookup::Id(id),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// Turns a unique violation raised by the store into a `Conflict` on `field`.
    pub(crate) fn on_unique_violation(
        self,
        entity: Entity,
        field: &'static str,
        value: &str,
    ) -> Self {
        if self.is_unique_violation() {
            Self::Conflict {
                entity,
                field,
                value: value.to_string(),
            }
        } else {
            self
        }
    }

    /// Turns a foreign key violation raised while deleting `id` into a
    /// `ConstraintViolation`: the row is still referenced by an athlete.
    pub(crate) fn on_foreign_key_violation(self, entity: Entity, id: Uuid) -> Self {
        if self.is_foreign_key_violation() {
            Self::ConstraintViolation(format!(
                "{} {} is still referenced by at least one athlete",
                entity, id
            ))
        } else {
            self
        }
    }
}
