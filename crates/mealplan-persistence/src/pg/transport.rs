//! `Transport` sobre Postgres.
//!
//! - Autocommit (`Executor` del propio `PgTransport`): toma una conexión del
//!   pool por escritura.
//! - `begin()`: toma una conexión y abre una transacción con el transaction
//!   manager de Diesel; la `PgUnitOfWork` retiene la conexión hasta
//!   `commit`/`rollback`. Si se suelta abierta, hace rollback en `Drop`.

use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use log::{debug, error, warn};

use mealplan_core::{Executor, RowWrite, Transport, TransportError, UnitOfWork};

use super::rows::{NewIngredientRow, NewInstrumentRow, NewMealRecipeRow, NewMealRow, NewProductRow, NewRecipeRow,
                  NewStepRow};
use super::ConnectionProvider;
use crate::error::PersistenceError;
use crate::schema::{meal_recipes, meals, recipe_step_ingredients, recipe_step_instruments, recipe_step_products,
                    recipe_steps, recipes};

type PgPooled = PooledConnection<ConnectionManager<PgConnection>>;
type Tm = AnsiTransactionManager;

/// Inserta una fila del grafo. Devuelve filas afectadas.
pub fn insert_row(conn: &mut PgConnection, write: &RowWrite<'_>) -> Result<u64, PersistenceError> {
    let affected = match write {
        RowWrite::Recipe(r) => diesel::insert_into(recipes::table).values(&NewRecipeRow::from_model(r))
                                                                  .execute(conn)?,
        RowWrite::Step(s) => diesel::insert_into(recipe_steps::table).values(&NewStepRow::from_model(s)?)
                                                                     .execute(conn)?,
        RowWrite::Product(p) => diesel::insert_into(recipe_step_products::table).values(&NewProductRow::from_model(p)?)
                                                                                .execute(conn)?,
        RowWrite::Ingredient(i) => diesel::insert_into(recipe_step_ingredients::table).values(&NewIngredientRow::from_model(i))
                                                                                      .execute(conn)?,
        RowWrite::Instrument(i) => diesel::insert_into(recipe_step_instruments::table).values(&NewInstrumentRow::from_model(i)?)
                                                                                      .execute(conn)?,
        RowWrite::Meal(m) => diesel::insert_into(meals::table).values(&NewMealRow::from_model(m))
                                                              .execute(conn)?,
        RowWrite::MealRecipe(l) => diesel::insert_into(meal_recipes::table).values(&NewMealRecipeRow::from_model(l))
                                                                           .execute(conn)?,
    };
    Ok(affected as u64)
}

pub struct PgTransport<P: ConnectionProvider> {
    pub provider: P,
}

impl<P: ConnectionProvider> PgTransport<P> {
    pub fn new(provider: P) -> Self { Self { provider } }

    fn checkout(&self) -> Result<PgPooled, TransportError> { self.provider.connection().map_err(TransportError::from) }
}

impl<P: ConnectionProvider> Executor for PgTransport<P> {
    fn execute(&mut self, write: &RowWrite<'_>) -> Result<u64, TransportError> {
        let mut conn = self.checkout()?;
        debug!("pg autocommit insert kind={} id={}", write.kind(), write.id());
        insert_row(&mut conn, write).map_err(TransportError::from)
    }
}

impl<P: ConnectionProvider> Transport for PgTransport<P> {
    type Unit<'a> = PgUnitOfWork
        where Self: 'a;

    fn begin(&mut self) -> Result<PgUnitOfWork, TransportError> {
        let mut conn = self.checkout()?;
        Tm::begin_transaction(&mut *conn).map_err(|e| TransportError::from(PersistenceError::from(e)))?;
        debug!("pg transaction: begin");
        Ok(PgUnitOfWork { conn, open: true })
    }
}

/// Transacción abierta sobre una conexión del pool.
pub struct PgUnitOfWork {
    conn: PgPooled,
    open: bool,
}

impl PgUnitOfWork {
    pub fn connection(&mut self) -> &mut PgConnection { &mut self.conn }
}

impl Executor for PgUnitOfWork {
    fn execute(&mut self, write: &RowWrite<'_>) -> Result<u64, TransportError> {
        debug!("pg insert kind={} id={}", write.kind(), write.id());
        insert_row(&mut self.conn, write).map_err(TransportError::from)
    }
}

impl UnitOfWork for PgUnitOfWork {
    fn commit(mut self) -> Result<(), TransportError> {
        let res = Tm::commit_transaction(&mut *self.conn);
        self.open = false;
        match res {
            Ok(()) => {
                debug!("pg transaction: commit");
                Ok(())
            }
            Err(e) => {
                // si el commit falló con la transacción aún abierta, cerrarla
                let _ = Tm::rollback_transaction(&mut *self.conn);
                Err(PersistenceError::from(e).into())
            }
        }
    }

    fn rollback(mut self) -> Result<(), TransportError> {
        self.open = false;
        debug!("pg transaction: rollback");
        Tm::rollback_transaction(&mut *self.conn).map_err(|e| PersistenceError::from(e).into())
    }
}

impl Drop for PgUnitOfWork {
    fn drop(&mut self) {
        if self.open {
            warn!("pg transaction dropped while open: rolling back");
            if let Err(e) = Tm::rollback_transaction(&mut *self.conn) {
                error!("pg rollback on drop failed: {e}");
            }
        }
    }
}
