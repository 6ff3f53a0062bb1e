//! Abstracción de transporte de persistencia.
//!
//! Un mismo `Executor` cubre la ejecución en autocommit (el propio
//! `Transport`) y dentro de una unidad de trabajo (`UnitOfWork`), así las
//! funciones de escritura son genéricas sobre ambos. Soltar una unidad sin
//! `commit` equivale a `rollback`.
pub mod memory;
pub mod types;

pub use memory::{FailurePlan, InMemoryTransport, InMemoryUnit, JournalEntry, StoredRow};
pub use types::{RowKind, RowWrite};

use crate::errors::TransportError;

pub trait Executor {
    /// Ejecuta una escritura y devuelve las filas afectadas.
    fn execute(&mut self, write: &RowWrite<'_>) -> Result<u64, TransportError>;
}

pub trait UnitOfWork: Executor {
    fn commit(self) -> Result<(), TransportError>;
    fn rollback(self) -> Result<(), TransportError>;
}

pub trait Transport: Executor {
    type Unit<'a>: UnitOfWork
        where Self: 'a;

    /// Abre una unidad de trabajo que toma prestado el transporte hasta su cierre.
    fn begin(&mut self) -> Result<Self::Unit<'_>, TransportError>;
}
