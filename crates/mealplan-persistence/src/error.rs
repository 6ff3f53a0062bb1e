//! Errores de persistencia.
//! Mapea errores de Diesel / pool / configuración a variantes semánticas y,
//! en la frontera del transporte, a `TransportError` del core.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use mealplan_core::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("unique violation: {0}")]
    UniqueViolation(String),
    #[error("check violation: {0}")]
    CheckViolation(String),
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),
    #[error("not found")]
    NotFound,
    #[error("serialization conflict (retryable)")]
    SerializationConflict,
    #[error("transient IO / connection pool error: {0}")]
    TransientIo(String),
    #[error("configuración inválida: {0}")]
    Config(String),
    /// Valor de fila fuera del rango del modelo (p. ej. índice negativo).
    #[error("invalid value for {column}: {value}")]
    InvalidValue { column: &'static str, value: String },
    #[error("unknown database error: {0}")]
    Unknown(String),
}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation => Self::UniqueViolation(info.message().to_string()),
                DatabaseErrorKind::CheckViolation => Self::CheckViolation(info.message().to_string()),
                DatabaseErrorKind::ForeignKeyViolation => Self::ForeignKeyViolation(info.message().to_string()),
                DatabaseErrorKind::SerializationFailure => Self::SerializationConflict,
                DatabaseErrorKind::ClosedConnection => Self::TransientIo(info.message().to_string()),
                other => Self::Unknown(format!("db error kind {:?}: {}", other, info.message())),
            },
            DieselError::DeserializationError(e) => Self::Unknown(format!("deser: {e}")),
            DieselError::SerializationError(e) => Self::Unknown(format!("ser: {e}")),
            DieselError::AlreadyInTransaction => Self::Unknown("already in transaction".into()),
            DieselError::RollbackErrorOnCommit { rollback_error, commit_error } => {
                Self::Unknown(format!("rollback={rollback_error}; commit={commit_error}"))
            }
            DieselError::BrokenTransactionManager => Self::TransientIo("broken transaction manager".into()),
            DieselError::QueryBuilderError(e) => Self::Unknown(format!("query builder: {e}")),
            DieselError::NotInTransaction => Self::Unknown("not in transaction".into()),
            other => Self::Unknown(format!("unhandled diesel error: {other:?}")),
        }
    }
}

impl From<PersistenceError> for TransportError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::UniqueViolation(m) => Self::UniqueViolation(m),
            PersistenceError::CheckViolation(m) => Self::CheckViolation(m),
            PersistenceError::ForeignKeyViolation(m) => Self::ForeignKeyViolation(m),
            PersistenceError::SerializationConflict => Self::SerializationConflict,
            PersistenceError::TransientIo(m) => Self::Unavailable(m),
            other => Self::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_mapping_keeps_retryability() {
        assert!(TransportError::from(PersistenceError::TransientIo("pool".into())).is_retryable());
        assert!(TransportError::from(PersistenceError::SerializationConflict).is_retryable());
        assert_eq!(TransportError::from(PersistenceError::ForeignKeyViolation("fk".into())),
                   TransportError::ForeignKeyViolation("fk".into()));
        assert!(!TransportError::from(PersistenceError::Config("x".into())).is_retryable());
    }

    #[test]
    fn diesel_not_found_maps_to_not_found() {
        assert!(matches!(PersistenceError::from(DieselError::NotFound), PersistenceError::NotFound));
    }
}
