//! Errores del core.
//!
//! Tres niveles:
//! - `CoreError`: entrada inválida detectada antes de abrir cualquier
//!   transacción (construcción del grafo).
//! - `TransportError`: fallo neutral del transporte de persistencia (memoria o
//!   Postgres). Cada backend traduce sus errores nativos a estas variantes.
//! - `RecipeCreationError`: único error terminal de una llamada de creación,
//!   identificando la etapa que falló.

use thiserror::Error;

use crate::transport::RowKind;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CoreError {
    #[error("invalid input: {0}")] InvalidInput(String),
    #[error("duplicate step index {0}")] DuplicateStepIndex(u32),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TransportError {
    #[error("storage unavailable: {0}")] Unavailable(String),
    #[error("unique violation: {0}")] UniqueViolation(String),
    #[error("foreign key violation: {0}")] ForeignKeyViolation(String),
    #[error("check violation: {0}")] CheckViolation(String),
    #[error("serialization conflict (retryable)")] SerializationConflict,
    #[error("{0}")] Other(String),
}

impl TransportError {
    /// Indica si el error es transitorio. Es sólo informativo: el core nunca
    /// reintenta; el llamador puede reintentar con los mismos IDs.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::SerializationConflict)
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RecipeCreationError {
    #[error(transparent)]
    InvalidInput(#[from] CoreError),
    #[error("could not begin transaction: {0}")]
    BeginTransaction(#[source] TransportError),
    #[error("writing {kind} row: {source}")]
    Write {
        kind: RowKind,
        #[source]
        source: TransportError,
    },
    #[error("could not commit transaction: {0}")]
    Commit(#[source] TransportError),
}

impl RecipeCreationError {
    /// Tipo de fila cuya escritura falló, si el error vino de una escritura.
    pub fn failed_row(&self) -> Option<RowKind> {
        match self {
            Self::Write { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::InvalidInput(_) => false,
            Self::BeginTransaction(e) | Self::Commit(e) | Self::Write { source: e, .. } => e.is_retryable(),
        }
    }
}
