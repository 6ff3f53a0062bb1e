//! Filas Diesel y su mapeo explícito modelo ↔ fila, una función por entidad.
//!
//! Las filas de inserción prestan los campos del modelo (`&'a str`). Los
//! enteros sin signo del modelo se guardan como `INTEGER`; la conversión
//! falla con `InvalidValue` si el valor no cabe.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use mealplan_core::model::{Meal, MealRecipe, ProductType, Recipe, RecipeStep, RecipeStepIngredient, RecipeStepInstrument,
                           RecipeStepProduct};

use crate::error::PersistenceError;
use crate::schema::{meal_recipes, meals, recipe_step_ingredients, recipe_step_instruments, recipe_step_products,
                    recipe_steps, recipes};

fn to_db<T>(column: &'static str, v: T) -> Result<i32, PersistenceError>
    where T: Copy + ToString + TryInto<i32>
{
    v.try_into().map_err(|_| PersistenceError::InvalidValue { column, value: v.to_string() })
}

fn from_db<T>(column: &'static str, v: i32) -> Result<T, PersistenceError>
    where T: TryFrom<i32>
{
    T::try_from(v).map_err(|_| PersistenceError::InvalidValue { column, value: v.to_string() })
}

fn opt_to_db(column: &'static str, v: Option<u32>) -> Result<Option<i32>, PersistenceError> {
    v.map(|x| to_db(column, x)).transpose()
}

fn opt_from_db(column: &'static str, v: Option<i32>) -> Result<Option<u32>, PersistenceError> {
    v.map(|x| from_db(column, x)).transpose()
}

// ---------------------------------------------------------------- recipes

#[derive(Insertable, Debug)]
#[diesel(table_name = recipes)]
pub struct NewRecipeRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub slug: &'a str,
    pub source: &'a str,
    pub description: &'a str,
    pub inspired_by_recipe_id: Option<Uuid>,
    pub min_estimated_portions: f32,
    pub max_estimated_portions: Option<f32>,
    pub portion_name: &'a str,
    pub plural_portion_name: &'a str,
    pub seal_of_approval: bool,
    pub created_by_user: &'a str,
    /// `None` deja que la columna use su `DEFAULT now()`.
    pub created_at: Option<DateTime<Utc>>,
}

impl<'a> NewRecipeRow<'a> {
    pub fn from_model(r: &'a Recipe) -> Self {
        Self { id: r.id,
               name: &r.name,
               slug: &r.slug,
               source: &r.source,
               description: &r.description,
               inspired_by_recipe_id: r.inspired_by_recipe_id,
               min_estimated_portions: r.min_estimated_portions,
               max_estimated_portions: r.max_estimated_portions,
               portion_name: &r.portion_name,
               plural_portion_name: &r.plural_portion_name,
               seal_of_approval: r.seal_of_approval,
               created_by_user: &r.created_by_user,
               created_at: r.created_at }
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub source: String,
    pub description: String,
    pub inspired_by_recipe_id: Option<Uuid>,
    pub min_estimated_portions: f32,
    pub max_estimated_portions: Option<f32>,
    pub portion_name: String,
    pub plural_portion_name: String,
    pub seal_of_approval: bool,
    pub created_by_user: String,
    pub created_at: DateTime<Utc>,
}

impl RecipeRow {
    pub fn into_model(self, steps: Vec<RecipeStep>) -> Recipe {
        Recipe { id: self.id,
                 name: self.name,
                 slug: self.slug,
                 source: self.source,
                 description: self.description,
                 inspired_by_recipe_id: self.inspired_by_recipe_id,
                 min_estimated_portions: self.min_estimated_portions,
                 max_estimated_portions: self.max_estimated_portions,
                 portion_name: self.portion_name,
                 plural_portion_name: self.plural_portion_name,
                 seal_of_approval: self.seal_of_approval,
                 created_by_user: self.created_by_user,
                 created_at: Some(self.created_at),
                 steps }
    }
}

// ---------------------------------------------------------------- steps

#[derive(Insertable, Debug)]
#[diesel(table_name = recipe_steps)]
pub struct NewStepRow<'a> {
    pub id: Uuid,
    pub belongs_to_recipe: Uuid,
    pub step_index: i32,
    pub preparation_id: &'a str,
    pub min_estimated_time_secs: Option<i32>,
    pub max_estimated_time_secs: Option<i32>,
    pub min_temperature_c: Option<f32>,
    pub max_temperature_c: Option<f32>,
    pub notes: &'a str,
    pub explicit_instructions: &'a str,
    pub optional: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl<'a> NewStepRow<'a> {
    pub fn from_model(s: &'a RecipeStep) -> Result<Self, PersistenceError> {
        Ok(Self { id: s.id,
                  belongs_to_recipe: s.belongs_to_recipe,
                  step_index: to_db("recipe_steps.step_index", s.index)?,
                  preparation_id: &s.preparation_id,
                  min_estimated_time_secs: opt_to_db("recipe_steps.min_estimated_time_secs", s.min_estimated_time_secs)?,
                  max_estimated_time_secs: opt_to_db("recipe_steps.max_estimated_time_secs", s.max_estimated_time_secs)?,
                  min_temperature_c: s.min_temperature_c,
                  max_temperature_c: s.max_temperature_c,
                  notes: &s.notes,
                  explicit_instructions: &s.explicit_instructions,
                  optional: s.optional,
                  created_at: s.created_at })
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = recipe_steps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StepRow {
    pub id: Uuid,
    pub belongs_to_recipe: Uuid,
    pub step_index: i32,
    pub preparation_id: String,
    pub min_estimated_time_secs: Option<i32>,
    pub max_estimated_time_secs: Option<i32>,
    pub min_temperature_c: Option<f32>,
    pub max_temperature_c: Option<f32>,
    pub notes: String,
    pub explicit_instructions: String,
    pub optional: bool,
    pub created_at: DateTime<Utc>,
}

impl StepRow {
    pub fn into_model(self,
                      products: Vec<RecipeStepProduct>,
                      ingredients: Vec<RecipeStepIngredient>,
                      instruments: Vec<RecipeStepInstrument>)
                      -> Result<RecipeStep, PersistenceError> {
        Ok(RecipeStep { id: self.id,
                        belongs_to_recipe: self.belongs_to_recipe,
                        index: from_db("recipe_steps.step_index", self.step_index)?,
                        preparation_id: self.preparation_id,
                        min_estimated_time_secs: opt_from_db("recipe_steps.min_estimated_time_secs",
                                                             self.min_estimated_time_secs)?,
                        max_estimated_time_secs: opt_from_db("recipe_steps.max_estimated_time_secs",
                                                             self.max_estimated_time_secs)?,
                        min_temperature_c: self.min_temperature_c,
                        max_temperature_c: self.max_temperature_c,
                        notes: self.notes,
                        explicit_instructions: self.explicit_instructions,
                        optional: self.optional,
                        created_at: Some(self.created_at),
                        products,
                        ingredients,
                        instruments })
    }
}

// ---------------------------------------------------------------- products

#[derive(Insertable, Debug)]
#[diesel(table_name = recipe_step_products)]
pub struct NewProductRow<'a> {
    pub id: Uuid,
    pub belongs_to_recipe_step: Uuid,
    pub name: &'a str,
    pub product_type: &'a str,
    pub measurement_unit_id: Option<&'a str>,
    pub min_quantity: Option<f32>,
    pub max_quantity: Option<f32>,
    pub quantity_notes: &'a str,
    pub compostable: bool,
    pub max_storage_duration_secs: Option<i32>,
    pub min_storage_temperature_c: Option<f32>,
    pub max_storage_temperature_c: Option<f32>,
    pub created_at: Option<DateTime<Utc>>,
}

impl<'a> NewProductRow<'a> {
    pub fn from_model(p: &'a RecipeStepProduct) -> Result<Self, PersistenceError> {
        Ok(Self { id: p.id,
                  belongs_to_recipe_step: p.belongs_to_recipe_step,
                  name: &p.name,
                  product_type: p.product_type.as_str(),
                  measurement_unit_id: p.measurement_unit_id.as_deref(),
                  min_quantity: p.min_quantity,
                  max_quantity: p.max_quantity,
                  quantity_notes: &p.quantity_notes,
                  compostable: p.compostable,
                  max_storage_duration_secs: opt_to_db("recipe_step_products.max_storage_duration_secs",
                                                       p.max_storage_duration_secs)?,
                  min_storage_temperature_c: p.min_storage_temperature_c,
                  max_storage_temperature_c: p.max_storage_temperature_c,
                  created_at: p.created_at })
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = recipe_step_products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub belongs_to_recipe_step: Uuid,
    pub name: String,
    pub product_type: String,
    pub measurement_unit_id: Option<String>,
    pub min_quantity: Option<f32>,
    pub max_quantity: Option<f32>,
    pub quantity_notes: String,
    pub compostable: bool,
    pub max_storage_duration_secs: Option<i32>,
    pub min_storage_temperature_c: Option<f32>,
    pub max_storage_temperature_c: Option<f32>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for RecipeStepProduct {
    type Error = PersistenceError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let product_type = ProductType::parse(&row.product_type).ok_or_else(|| PersistenceError::InvalidValue {
                                                                    column: "recipe_step_products.product_type",
                                                                    value: row.product_type.clone(),
                                                                })?;
        Ok(Self { id: row.id,
                  belongs_to_recipe_step: row.belongs_to_recipe_step,
                  name: row.name,
                  product_type,
                  measurement_unit_id: row.measurement_unit_id,
                  min_quantity: row.min_quantity,
                  max_quantity: row.max_quantity,
                  quantity_notes: row.quantity_notes,
                  compostable: row.compostable,
                  max_storage_duration_secs: opt_from_db("recipe_step_products.max_storage_duration_secs",
                                                         row.max_storage_duration_secs)?,
                  min_storage_temperature_c: row.min_storage_temperature_c,
                  max_storage_temperature_c: row.max_storage_temperature_c,
                  created_at: Some(row.created_at) })
    }
}

// ---------------------------------------------------------------- ingredients

#[derive(Insertable, Debug)]
#[diesel(table_name = recipe_step_ingredients)]
pub struct NewIngredientRow<'a> {
    pub id: Uuid,
    pub belongs_to_recipe_step: Uuid,
    pub name: &'a str,
    pub ingredient_id: Option<&'a str>,
    pub measurement_unit_id: &'a str,
    pub min_quantity: f32,
    pub max_quantity: Option<f32>,
    pub quantity_notes: &'a str,
    pub ingredient_notes: &'a str,
    pub optional: bool,
    pub option_index: i32,
    pub requires_defrost: bool,
    pub product_of_recipe_step: bool,
    pub recipe_step_product_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
}

impl<'a> NewIngredientRow<'a> {
    pub fn from_model(i: &'a RecipeStepIngredient) -> Self {
        Self { id: i.id,
               belongs_to_recipe_step: i.belongs_to_recipe_step,
               name: &i.name,
               ingredient_id: i.ingredient_id.as_deref(),
               measurement_unit_id: &i.measurement_unit_id,
               min_quantity: i.min_quantity,
               max_quantity: i.max_quantity,
               quantity_notes: &i.quantity_notes,
               ingredient_notes: &i.ingredient_notes,
               optional: i.optional,
               option_index: i32::from(i.option_index),
               requires_defrost: i.requires_defrost,
               product_of_recipe_step: i.product_of_recipe_step,
               recipe_step_product_id: i.recipe_step_product_id,
               created_at: i.created_at }
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = recipe_step_ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IngredientRow {
    pub id: Uuid,
    pub belongs_to_recipe_step: Uuid,
    pub name: String,
    pub ingredient_id: Option<String>,
    pub measurement_unit_id: String,
    pub min_quantity: f32,
    pub max_quantity: Option<f32>,
    pub quantity_notes: String,
    pub ingredient_notes: String,
    pub optional: bool,
    pub option_index: i32,
    pub requires_defrost: bool,
    pub product_of_recipe_step: bool,
    pub recipe_step_product_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<IngredientRow> for RecipeStepIngredient {
    type Error = PersistenceError;

    fn try_from(row: IngredientRow) -> Result<Self, Self::Error> {
        Ok(Self { id: row.id,
                  belongs_to_recipe_step: row.belongs_to_recipe_step,
                  name: row.name,
                  ingredient_id: row.ingredient_id,
                  measurement_unit_id: row.measurement_unit_id,
                  min_quantity: row.min_quantity,
                  max_quantity: row.max_quantity,
                  quantity_notes: row.quantity_notes,
                  ingredient_notes: row.ingredient_notes,
                  optional: row.optional,
                  option_index: from_db("recipe_step_ingredients.option_index", row.option_index)?,
                  requires_defrost: row.requires_defrost,
                  product_of_recipe_step: row.product_of_recipe_step,
                  recipe_step_product_id: row.recipe_step_product_id,
                  product_pointer: None,
                  created_at: Some(row.created_at) })
    }
}

// ---------------------------------------------------------------- instruments

#[derive(Insertable, Debug)]
#[diesel(table_name = recipe_step_instruments)]
pub struct NewInstrumentRow<'a> {
    pub id: Uuid,
    pub belongs_to_recipe_step: Uuid,
    pub name: &'a str,
    pub instrument_id: Option<&'a str>,
    pub product_of_recipe_step: bool,
    pub recipe_step_product_id: Option<Uuid>,
    pub notes: &'a str,
    pub preference_rank: i32,
    pub optional: bool,
    pub min_quantity: i32,
    pub max_quantity: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
}

impl<'a> NewInstrumentRow<'a> {
    pub fn from_model(i: &'a RecipeStepInstrument) -> Result<Self, PersistenceError> {
        Ok(Self { id: i.id,
                  belongs_to_recipe_step: i.belongs_to_recipe_step,
                  name: &i.name,
                  instrument_id: i.instrument_id.as_deref(),
                  product_of_recipe_step: i.product_of_recipe_step,
                  recipe_step_product_id: i.recipe_step_product_id,
                  notes: &i.notes,
                  preference_rank: i32::from(i.preference_rank),
                  optional: i.optional,
                  min_quantity: to_db("recipe_step_instruments.min_quantity", i.min_quantity)?,
                  max_quantity: opt_to_db("recipe_step_instruments.max_quantity", i.max_quantity)?,
                  created_at: i.created_at })
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = recipe_step_instruments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InstrumentRow {
    pub id: Uuid,
    pub belongs_to_recipe_step: Uuid,
    pub name: String,
    pub instrument_id: Option<String>,
    pub product_of_recipe_step: bool,
    pub recipe_step_product_id: Option<Uuid>,
    pub notes: String,
    pub preference_rank: i32,
    pub optional: bool,
    pub min_quantity: i32,
    pub max_quantity: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<InstrumentRow> for RecipeStepInstrument {
    type Error = PersistenceError;

    fn try_from(row: InstrumentRow) -> Result<Self, Self::Error> {
        Ok(Self { id: row.id,
                  belongs_to_recipe_step: row.belongs_to_recipe_step,
                  name: row.name,
                  instrument_id: row.instrument_id,
                  product_of_recipe_step: row.product_of_recipe_step,
                  recipe_step_product_id: row.recipe_step_product_id,
                  product_pointer: None,
                  notes: row.notes,
                  preference_rank: from_db("recipe_step_instruments.preference_rank", row.preference_rank)?,
                  optional: row.optional,
                  min_quantity: from_db("recipe_step_instruments.min_quantity", row.min_quantity)?,
                  max_quantity: opt_from_db("recipe_step_instruments.max_quantity", row.max_quantity)?,
                  created_at: Some(row.created_at) })
    }
}

// ---------------------------------------------------------------- meals

#[derive(Insertable, Debug)]
#[diesel(table_name = meals)]
pub struct NewMealRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub created_by_user: &'a str,
    pub created_at: Option<DateTime<Utc>>,
}

impl<'a> NewMealRow<'a> {
    pub fn from_model(m: &'a Meal) -> Self {
        Self { id: m.id,
               name: &m.name,
               description: &m.description,
               created_by_user: &m.created_by_user,
               created_at: m.created_at }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = meal_recipes)]
pub struct NewMealRecipeRow {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub recipe_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewMealRecipeRow {
    pub fn from_model(l: &MealRecipe) -> Self {
        Self { id: l.id,
               meal_id: l.meal_id,
               recipe_id: l.recipe_id,
               created_at: l.created_at }
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = meals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MealRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_by_user: String,
    pub created_at: DateTime<Utc>,
}

impl From<MealRow> for Meal {
    fn from(row: MealRow) -> Self {
        Meal { id: row.id,
               name: row.name,
               description: row.description,
               created_by_user: row.created_by_user,
               created_at: Some(row.created_at) }
    }
}
