//! Coordinador transaccional de creación de recetas.
//!
//! Construye el grafo (puro), sella todas las entidades con un único `now`,
//! abre una unidad de trabajo y escribe en orden: receta; por cada step (por
//! índice ascendente) el step, sus productos, sus ingredientes y sus
//! instrumentos; opcionalmente la comida y su enlace. Cualquier fallo hace
//! rollback y devuelve un único error terminal.
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

use crate::errors::RecipeCreationError;
use crate::graph::RecipeGraphBuilder;
use crate::model::{Meal, MealRecipe, Recipe, RecipeCreationInput, RecipeStep};
use crate::transport::{Executor, RowWrite, Transport, UnitOfWork};

#[derive(Debug)]
pub struct RecipeCreator<T>
    where T: Transport
{
    transport: T,
    builder: RecipeGraphBuilder,
    clock: fn() -> DateTime<Utc>,
}

impl<T> RecipeCreator<T> where T: Transport
{
    pub fn new(transport: T) -> Self {
        Self { transport,
               builder: RecipeGraphBuilder::default(),
               clock: Utc::now }
    }

    /// Reloj usado para el `created_at` común del grafo.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_builder(mut self, builder: RecipeGraphBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn transport(&self) -> &T { &self.transport }

    pub fn transport_mut(&mut self) -> &mut T { &mut self.transport }

    pub fn into_transport(self) -> T { self.transport }

    /// Crea la receta completa en una sola transacción y devuelve el grafo
    /// hidratado (IDs, referencias resueltas, `created_at` idéntico en todas
    /// las entidades).
    pub fn create_recipe(&mut self, input: RecipeCreationInput) -> Result<Recipe, RecipeCreationError> {
        let graph = self.builder.build(input)?;
        let mut recipe = graph.recipe;
        debug!("create_recipe:start recipe_id={} steps={}", recipe.id, recipe.steps.len());

        let now = (self.clock)();
        recipe.stamp_created(now);
        let companion = graph.also_create_meal.then(|| Meal::companion_for(&recipe));

        let mut unit = self.transport.begin().map_err(RecipeCreationError::BeginTransaction)?;
        if let Err(e) = write_graph(&mut unit, &recipe, companion.as_ref()) {
            warn!("create_recipe: rolling back recipe_id={} after {e}", recipe.id);
            if let Err(rb) = unit.rollback() {
                error!("create_recipe: rollback failed recipe_id={}: {rb}", recipe.id);
            }
            return Err(e);
        }
        unit.commit().map_err(RecipeCreationError::Commit)?;

        info!("create_recipe:done recipe_id={} steps={} meal={}",
              recipe.id,
              recipe.steps.len(),
              companion.as_ref().map(|(m, _)| m.id.to_string()).unwrap_or_else(|| "-".into()));
        Ok(recipe)
    }
}

fn write_graph<U: UnitOfWork>(unit: &mut U,
                              recipe: &Recipe,
                              companion: Option<&(Meal, MealRecipe)>)
                              -> Result<(), RecipeCreationError> {
    write(unit, RowWrite::Recipe(recipe))?;
    for step in &recipe.steps {
        write_step(unit, step)?;
    }
    if let Some((meal, link)) = companion {
        write(unit, RowWrite::Meal(meal))?;
        write(unit, RowWrite::MealRecipe(link))?;
    }
    Ok(())
}

fn write_step<E: Executor>(exec: &mut E, step: &RecipeStep) -> Result<(), RecipeCreationError> {
    write(exec, RowWrite::Step(step))?;
    for p in &step.products {
        write(exec, RowWrite::Product(p))?;
    }
    for i in &step.ingredients {
        write(exec, RowWrite::Ingredient(i))?;
    }
    for i in &step.instruments {
        write(exec, RowWrite::Instrument(i))?;
    }
    Ok(())
}

fn write<E: Executor>(exec: &mut E, row: RowWrite<'_>) -> Result<(), RecipeCreationError> {
    exec.execute(&row)
        .map(|_| ())
        .map_err(|source| RecipeCreationError::Write { kind: row.kind(), source })
}
