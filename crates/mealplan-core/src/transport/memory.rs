//! Transporte en memoria: verifica unicidad y claves foráneas como lo haría
//! la base, mantiene un journal de operaciones y permite inyectar fallos en
//! `begin`, `commit` o en la n-ésima escritura de un tipo de fila.
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::debug;
use uuid::Uuid;

use super::{Executor, RowKind, RowWrite, Transport, UnitOfWork};
use crate::errors::TransportError;

type RowKey = (RowKind, Uuid);

#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow {
    pub kind: RowKind,
    pub id: Uuid,
    pub references: Vec<RowKey>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEntry {
    Begin,
    Write { kind: RowKind, id: Uuid },
    Commit,
    Rollback,
}

/// Fallos a inyectar. `fail_write = Some((kind, n))` falla el intento n
/// (base 0) de escribir una fila de ese tipo, contado sobre toda la vida del
/// transporte.
#[derive(Debug, Clone, Default)]
pub struct FailurePlan {
    pub fail_begin: bool,
    pub fail_commit: bool,
    pub fail_write: Option<(RowKind, usize)>,
}

impl FailurePlan {
    pub fn on_begin() -> Self { Self { fail_begin: true, ..Default::default() } }
    pub fn on_commit() -> Self { Self { fail_commit: true, ..Default::default() } }
    pub fn on_write(kind: RowKind, nth: usize) -> Self { Self { fail_write: Some((kind, nth)), ..Default::default() } }
}

#[derive(Debug, Default)]
pub struct InMemoryTransport {
    rows: IndexMap<RowKey, StoredRow>,
    journal: Vec<JournalEntry>,
    plan: FailurePlan,
    attempts: HashMap<RowKind, usize>,
    commits: usize,
    rollbacks: usize,
}

impl InMemoryTransport {
    pub fn new() -> Self { Self::default() }

    pub fn with_failures(plan: FailurePlan) -> Self { Self { plan, ..Default::default() } }

    pub fn set_failures(&mut self, plan: FailurePlan) { self.plan = plan; }

    pub fn rows_of(&self, kind: RowKind) -> Vec<&StoredRow> { self.rows.values().filter(|r| r.kind == kind).collect() }

    pub fn row(&self, kind: RowKind, id: Uuid) -> Option<&StoredRow> { self.rows.get(&(kind, id)) }

    pub fn row_count(&self) -> usize { self.rows.len() }

    pub fn journal(&self) -> &[JournalEntry] { &self.journal }

    pub fn commits(&self) -> usize { self.commits }

    pub fn rollbacks(&self) -> usize { self.rollbacks }

    /// Valida una escritura contra las filas confirmadas más las `staged`.
    fn admit(&mut self, write: &RowWrite<'_>, staged: &IndexMap<RowKey, StoredRow>) -> Result<StoredRow, TransportError> {
        let kind = write.kind();
        let attempt = self.attempts.entry(kind).or_insert(0);
        let nth = *attempt;
        *attempt += 1;
        if self.plan.fail_write == Some((kind, nth)) {
            return Err(TransportError::Other(format!("injected failure writing {kind} #{nth}")));
        }

        let key = (kind, write.id());
        if self.rows.contains_key(&key) || staged.contains_key(&key) {
            return Err(TransportError::UniqueViolation(format!("{kind} {} already exists", key.1)));
        }
        let references = write.references();
        for r in &references {
            if !self.rows.contains_key(r) && !staged.contains_key(r) {
                return Err(TransportError::ForeignKeyViolation(format!("{kind} {} references missing {} {}", key.1, r.0, r.1)));
            }
        }
        Ok(StoredRow { kind, id: key.1, references, created_at: write.created_at() })
    }
}

impl Executor for InMemoryTransport {
    fn execute(&mut self, write: &RowWrite<'_>) -> Result<u64, TransportError> {
        let row = self.admit(write, &IndexMap::new())?;
        self.journal.push(JournalEntry::Write { kind: row.kind, id: row.id });
        self.rows.insert((row.kind, row.id), row);
        Ok(1)
    }
}

impl Transport for InMemoryTransport {
    type Unit<'a> = InMemoryUnit<'a>;

    fn begin(&mut self) -> Result<InMemoryUnit<'_>, TransportError> {
        if self.plan.fail_begin {
            return Err(TransportError::Unavailable("injected begin failure".into()));
        }
        self.journal.push(JournalEntry::Begin);
        debug!("memory transport: begin");
        Ok(InMemoryUnit { transport: self, staged: IndexMap::new(), done: false })
    }
}

/// Unidad de trabajo en memoria. Las filas quedan en `staged` y sólo pasan
/// al transporte en `commit`.
pub struct InMemoryUnit<'a> {
    transport: &'a mut InMemoryTransport,
    staged: IndexMap<RowKey, StoredRow>,
    done: bool,
}

impl InMemoryUnit<'_> {
    pub fn staged_len(&self) -> usize { self.staged.len() }

    fn discard(&mut self) {
        self.staged.clear();
        self.done = true;
        self.transport.rollbacks += 1;
        self.transport.journal.push(JournalEntry::Rollback);
    }
}

impl Executor for InMemoryUnit<'_> {
    fn execute(&mut self, write: &RowWrite<'_>) -> Result<u64, TransportError> {
        let row = self.transport.admit(write, &self.staged)?;
        self.transport.journal.push(JournalEntry::Write { kind: row.kind, id: row.id });
        self.staged.insert((row.kind, row.id), row);
        Ok(1)
    }
}

impl UnitOfWork for InMemoryUnit<'_> {
    fn commit(mut self) -> Result<(), TransportError> {
        if self.transport.plan.fail_commit {
            // el commit fallido no deja nada visible
            self.discard();
            return Err(TransportError::Unavailable("injected commit failure".into()));
        }
        let staged = std::mem::take(&mut self.staged);
        debug!("memory transport: commit {} rows", staged.len());
        self.transport.rows.extend(staged);
        self.transport.commits += 1;
        self.transport.journal.push(JournalEntry::Commit);
        self.done = true;
        Ok(())
    }

    fn rollback(mut self) -> Result<(), TransportError> {
        debug!("memory transport: rollback {} staged rows", self.staged.len());
        self.discard();
        Ok(())
    }
}

impl Drop for InMemoryUnit<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.discard();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Meal;

    fn meal() -> Meal {
        Meal { id: Uuid::new_v4(),
               name: "cena".into(),
               description: String::new(),
               created_by_user: "u1".into(),
               created_at: None }
    }

    #[test]
    fn autocommit_write_is_visible_immediately() {
        let mut t = InMemoryTransport::new();
        let m = meal();
        assert_eq!(t.execute(&RowWrite::Meal(&m)).unwrap(), 1);
        assert!(t.row(RowKind::Meal, m.id).is_some());
        assert_eq!(t.commits(), 0);
    }

    #[test]
    fn dropped_unit_rolls_back() {
        let mut t = InMemoryTransport::new();
        let m = meal();
        {
            let mut unit = t.begin().unwrap();
            unit.execute(&RowWrite::Meal(&m)).unwrap();
            assert_eq!(unit.staged_len(), 1);
        }
        assert_eq!(t.row_count(), 0);
        assert_eq!(t.rollbacks(), 1);
        assert_eq!(t.journal().last(), Some(&JournalEntry::Rollback));
    }

    #[test]
    fn duplicate_id_is_unique_violation() {
        let mut t = InMemoryTransport::new();
        let m = meal();
        t.execute(&RowWrite::Meal(&m)).unwrap();
        let mut unit = t.begin().unwrap();
        let err = unit.execute(&RowWrite::Meal(&m)).unwrap_err();
        assert!(matches!(err, TransportError::UniqueViolation(_)));
    }

    #[test]
    fn commit_failure_leaves_nothing_behind() {
        let mut t = InMemoryTransport::with_failures(FailurePlan::on_commit());
        let m = meal();
        let mut unit = t.begin().unwrap();
        unit.execute(&RowWrite::Meal(&m)).unwrap();
        assert!(unit.commit().is_err());
        assert_eq!(t.row_count(), 0);
        assert_eq!(t.commits(), 0);
        assert_eq!(t.rollbacks(), 1);
    }

    #[test]
    fn nth_write_of_kind_fails() {
        let mut t = InMemoryTransport::with_failures(FailurePlan::on_write(RowKind::Meal, 1));
        assert!(t.execute(&RowWrite::Meal(&meal())).is_ok());
        assert!(t.execute(&RowWrite::Meal(&meal())).is_err());
        assert!(t.execute(&RowWrite::Meal(&meal())).is_ok());
    }
}
