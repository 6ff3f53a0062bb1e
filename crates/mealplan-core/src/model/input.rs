//! Payload de creación de recetas.
//!
//! Refleja el modelo pero con todas las identidades opcionales: el llamador
//! puede fijar IDs (reintentos idempotentes) o dejarlos vacíos para que el
//! builder asigne UUID v4. Se (de)serializa en camelCase para que la CLI
//! lo lea desde un archivo JSON.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::step::{ProductPointer, ProductType};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeCreationInput {
    pub id: Option<Uuid>,
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
    pub also_create_meal: bool,
    pub steps: Vec<RecipeStepCreationInput>,
}

impl RecipeCreationInput {
    pub fn new(name: impl Into<String>, created_by_user: impl Into<String>) -> Self {
        Self { name: name.into(),
               created_by_user: created_by_user.into(),
               min_estimated_portions: 1.0,
               ..Default::default() }
    }

    pub fn with_step(mut self, step: RecipeStepCreationInput) -> Self {
        self.steps.push(step);
        self
    }

    pub fn find_step_by_index(&self, index: u32) -> Option<&RecipeStepCreationInput> {
        self.steps.iter().find(|s| s.index == index)
    }

    pub fn find_step_by_id(&self, id: Uuid) -> Option<&RecipeStepCreationInput> {
        self.steps.iter().find(|s| s.id == Some(id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepCreationInput {
    pub id: Option<Uuid>,
    pub index: u32,
    pub preparation_id: String,
    pub min_estimated_time_secs: Option<u32>,
    pub max_estimated_time_secs: Option<u32>,
    pub min_temperature_c: Option<f32>,
    pub max_temperature_c: Option<f32>,
    pub notes: String,
    pub explicit_instructions: String,
    pub optional: bool,
    pub products: Vec<RecipeStepProductCreationInput>,
    pub ingredients: Vec<RecipeStepIngredientCreationInput>,
    pub instruments: Vec<RecipeStepInstrumentCreationInput>,
}

impl RecipeStepCreationInput {
    pub fn new(index: u32, preparation_id: impl Into<String>) -> Self {
        Self { index,
               preparation_id: preparation_id.into(),
               ..Default::default() }
    }

    pub fn with_product(mut self, product: RecipeStepProductCreationInput) -> Self {
        self.products.push(product);
        self
    }

    pub fn with_ingredient(mut self, ingredient: RecipeStepIngredientCreationInput) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    pub fn with_instrument(mut self, instrument: RecipeStepInstrumentCreationInput) -> Self {
        self.instruments.push(instrument);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepProductCreationInput {
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub measurement_unit_id: Option<String>,
    pub min_quantity: Option<f32>,
    pub max_quantity: Option<f32>,
    pub quantity_notes: String,
    pub compostable: bool,
    pub max_storage_duration_secs: Option<u32>,
    pub min_storage_temperature_c: Option<f32>,
    pub max_storage_temperature_c: Option<f32>,
}

impl RecipeStepProductCreationInput {
    pub fn ingredient(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               product_type: ProductType::Ingredient,
               ..Default::default() }
    }

    pub fn instrument(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               product_type: ProductType::Instrument,
               ..Default::default() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepIngredientCreationInput {
    pub id: Option<Uuid>,
    pub name: String,
    pub ingredient_id: Option<String>,
    pub measurement_unit_id: String,
    pub min_quantity: f32,
    pub max_quantity: Option<f32>,
    pub quantity_notes: String,
    pub ingredient_notes: String,
    pub optional: bool,
    pub option_index: u16,
    pub requires_defrost: bool,
    pub product_of_recipe_step: bool,
    pub product_of_recipe_step_index: Option<u32>,
    pub product_of_recipe_step_product_index: Option<usize>,
    /// Si ya viene fijado, la resolución no lo toca.
    pub recipe_step_product_id: Option<Uuid>,
}

impl RecipeStepIngredientCreationInput {
    pub fn from_catalog(name: impl Into<String>, ingredient_id: impl Into<String>) -> Self {
        Self { name: name.into(),
               ingredient_id: Some(ingredient_id.into()),
               min_quantity: 1.0,
               ..Default::default() }
    }

    pub fn from_product(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               product_of_recipe_step: true,
               min_quantity: 1.0,
               ..Default::default() }
    }

    pub fn pointing_at(mut self, step_index: u32, product_position: usize) -> Self {
        self.product_of_recipe_step_index = Some(step_index);
        self.product_of_recipe_step_product_index = Some(product_position);
        self
    }

    pub(crate) fn pointer(&self) -> Option<ProductPointer> {
        pointer_from(self.product_of_recipe_step_index, self.product_of_recipe_step_product_index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepInstrumentCreationInput {
    pub id: Option<Uuid>,
    pub name: String,
    pub instrument_id: Option<String>,
    pub product_of_recipe_step: bool,
    pub product_of_recipe_step_index: Option<u32>,
    pub product_of_recipe_step_product_index: Option<usize>,
    pub recipe_step_product_id: Option<Uuid>,
    pub notes: String,
    pub preference_rank: u8,
    pub optional: bool,
    pub min_quantity: u32,
    pub max_quantity: Option<u32>,
}

impl RecipeStepInstrumentCreationInput {
    pub fn from_catalog(name: impl Into<String>, instrument_id: impl Into<String>) -> Self {
        Self { name: name.into(),
               instrument_id: Some(instrument_id.into()),
               min_quantity: 1,
               ..Default::default() }
    }

    pub fn from_product(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               product_of_recipe_step: true,
               min_quantity: 1,
               ..Default::default() }
    }

    pub fn pointing_at(mut self, step_index: u32, product_position: usize) -> Self {
        self.product_of_recipe_step_index = Some(step_index);
        self.product_of_recipe_step_product_index = Some(product_position);
        self
    }

    pub(crate) fn pointer(&self) -> Option<ProductPointer> {
        pointer_from(self.product_of_recipe_step_index, self.product_of_recipe_step_product_index)
    }
}

// Ambas mitades son necesarias; una sola se ignora.
fn pointer_from(step_index: Option<u32>, product_position: Option<usize>) -> Option<ProductPointer> {
    match (step_index, product_position) {
        (Some(step_index), Some(product_position)) => Some(ProductPointer { step_index, product_position }),
        _ => None,
    }
}
