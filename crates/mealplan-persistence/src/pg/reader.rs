//! Lectura de un grafo de receta ya persistido.
//!
//! Los steps se devuelven por `step_index` ascendente; los hijos de cada step
//! por `(name, id)` para que el orden sea estable entre lecturas.

use std::collections::HashMap;

use diesel::pg::PgConnection;
use diesel::prelude::*;
use log::debug;
use uuid::Uuid;

use mealplan_core::model::{Meal, Recipe, RecipeStepIngredient, RecipeStepInstrument, RecipeStepProduct};

use super::rows::{IngredientRow, InstrumentRow, MealRow, ProductRow, RecipeRow, StepRow};
use super::{with_retry, ConnectionProvider};
use crate::error::PersistenceError;
use crate::schema::{meal_recipes, meals, recipe_step_ingredients, recipe_step_instruments, recipe_step_products,
                    recipe_steps, recipes};

/// Carga la receta `id` con todos sus steps e hijos, o `None` si no existe.
pub fn fetch_recipe(conn: &mut PgConnection, id: Uuid) -> Result<Option<Recipe>, PersistenceError> {
    let Some(head) = recipes::table.find(id)
                                   .select(RecipeRow::as_select())
                                   .first::<RecipeRow>(conn)
                                   .optional()?
    else {
        return Ok(None);
    };

    let step_rows: Vec<StepRow> = recipe_steps::table.filter(recipe_steps::belongs_to_recipe.eq(id))
                                                     .order(recipe_steps::step_index.asc())
                                                     .select(StepRow::as_select())
                                                     .load(conn)?;
    let step_ids: Vec<Uuid> = step_rows.iter().map(|s| s.id).collect();

    let mut products = group(recipe_step_products::table.filter(recipe_step_products::belongs_to_recipe_step.eq_any(&step_ids))
                                                        .order((recipe_step_products::name.asc(), recipe_step_products::id.asc()))
                                                        .select(ProductRow::as_select())
                                                        .load::<ProductRow>(conn)?
                                                        .into_iter()
                                                        .map(RecipeStepProduct::try_from)
                                                        .collect::<Result<Vec<_>, _>>()?,
                             |p| p.belongs_to_recipe_step);
    let mut ingredients =
        group(recipe_step_ingredients::table.filter(recipe_step_ingredients::belongs_to_recipe_step.eq_any(&step_ids))
                                            .order((recipe_step_ingredients::name.asc(), recipe_step_ingredients::id.asc()))
                                            .select(IngredientRow::as_select())
                                            .load::<IngredientRow>(conn)?
                                            .into_iter()
                                            .map(RecipeStepIngredient::try_from)
                                            .collect::<Result<Vec<_>, _>>()?,
              |i| i.belongs_to_recipe_step);
    let mut instruments =
        group(recipe_step_instruments::table.filter(recipe_step_instruments::belongs_to_recipe_step.eq_any(&step_ids))
                                            .order((recipe_step_instruments::name.asc(), recipe_step_instruments::id.asc()))
                                            .select(InstrumentRow::as_select())
                                            .load::<InstrumentRow>(conn)?
                                            .into_iter()
                                            .map(RecipeStepInstrument::try_from)
                                            .collect::<Result<Vec<_>, _>>()?,
              |i| i.belongs_to_recipe_step);

    let mut steps = Vec::with_capacity(step_rows.len());
    for row in step_rows {
        let sid = row.id;
        steps.push(row.into_model(products.remove(&sid).unwrap_or_default(),
                                  ingredients.remove(&sid).unwrap_or_default(),
                                  instruments.remove(&sid).unwrap_or_default())?);
    }
    debug!("fetch_recipe:done recipe_id={id} steps={}", steps.len());
    Ok(Some(head.into_model(steps)))
}

/// Comidas enlazadas a la receta vía `meal_recipes`.
pub fn fetch_meals_for_recipe(conn: &mut PgConnection, recipe_id: Uuid) -> Result<Vec<Meal>, PersistenceError> {
    let rows: Vec<MealRow> = meals::table.inner_join(meal_recipes::table)
                                         .filter(meal_recipes::recipe_id.eq(recipe_id))
                                         .order(meals::id.asc())
                                         .select(MealRow::as_select())
                                         .load(conn)?;
    Ok(rows.into_iter().map(Meal::from).collect())
}

fn group<T>(items: Vec<T>, key: impl Fn(&T) -> Uuid) -> HashMap<Uuid, Vec<T>> {
    let mut out: HashMap<Uuid, Vec<T>> = HashMap::new();
    for item in items {
        out.entry(key(&item)).or_default().push(item);
    }
    out
}

/// Lector sobre un `ConnectionProvider`; reintenta fallos transitorios de
/// conexión (la lectura es idempotente).
pub struct PgRecipeReader<P: ConnectionProvider> {
    pub provider: P,
}

impl<P: ConnectionProvider> PgRecipeReader<P> {
    pub fn new(provider: P) -> Self { Self { provider } }

    pub fn recipe(&self, id: Uuid) -> Result<Option<Recipe>, PersistenceError> {
        with_retry(|| {
            let mut conn = self.provider.connection()?;
            fetch_recipe(&mut conn, id)
        })
    }

    pub fn meals_for_recipe(&self, recipe_id: Uuid) -> Result<Vec<Meal>, PersistenceError> {
        with_retry(|| {
            let mut conn = self.provider.connection()?;
            fetch_meals_for_recipe(&mut conn, recipe_id)
        })
    }
}
