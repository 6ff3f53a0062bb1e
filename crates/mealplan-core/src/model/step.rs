//! Steps de una receta y sus hijos (productos, ingredientes, instrumentos).
//!
//! Un step consume ingredientes e instrumentos y produce `RecipeStepProduct`s
//! con nombre. Un input marcado con `product_of_recipe_step` no apunta al
//! catálogo sino a un producto de un step anterior; `recipe_step_product_id`
//! queda ligado tras la resolución (o `None` si no hubo match).
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tipo de salida de un step: un estado de ingrediente o de instrumento.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    #[default]
    Ingredient,
    Instrument,
}

impl ProductType {
    /// Representación estable usada en la columna `product_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ingredient => "ingredient",
            Self::Instrument => "instrument",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ingredient" => Some(Self::Ingredient),
            "instrument" => Some(Self::Instrument),
            _ => None,
        }
    }
}

/// Referencia posicional explícita a un producto: `step_index` es el índice
/// del step productor y `product_position` la posición del producto dentro
/// de ese step. No se persiste; sólo guía la resolución.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPointer {
    pub step_index: u32,
    pub product_position: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepProduct {
    pub id: Uuid,
    pub belongs_to_recipe_step: Uuid,
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
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepIngredient {
    pub id: Uuid,
    pub belongs_to_recipe_step: Uuid,
    pub name: String,
    /// Ingrediente de catálogo; `None` cuando el material es producto de un step.
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
    pub recipe_step_product_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_pointer: Option<ProductPointer>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepInstrument {
    pub id: Uuid,
    pub belongs_to_recipe_step: Uuid,
    pub name: String,
    pub instrument_id: Option<String>,
    pub product_of_recipe_step: bool,
    pub recipe_step_product_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_pointer: Option<ProductPointer>,
    pub notes: String,
    pub preference_rank: u8,
    pub optional: bool,
    pub min_quantity: u32,
    pub max_quantity: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStep {
    pub id: Uuid,
    pub belongs_to_recipe: Uuid,
    pub index: u32,
    pub preparation_id: String,
    pub min_estimated_time_secs: Option<u32>,
    pub max_estimated_time_secs: Option<u32>,
    pub min_temperature_c: Option<f32>,
    pub max_temperature_c: Option<f32>,
    pub notes: String,
    pub explicit_instructions: String,
    pub optional: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub products: Vec<RecipeStepProduct>,
    pub ingredients: Vec<RecipeStepIngredient>,
    pub instruments: Vec<RecipeStepInstrument>,
}

impl RecipeStep {
    pub fn find_product_by_name(&self, name: &str) -> Option<&RecipeStepProduct> {
        self.products.iter().find(|p| p.name == name)
    }

    pub(crate) fn stamp_created(&mut self, at: DateTime<Utc>) {
        self.created_at = Some(at);
        for p in &mut self.products {
            p.created_at = Some(at);
        }
        for i in &mut self.ingredients {
            i.created_at = Some(at);
        }
        for i in &mut self.instruments {
            i.created_at = Some(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_type_roundtrips_through_column_text() {
        for t in [ProductType::Ingredient, ProductType::Instrument] {
            assert_eq!(ProductType::parse(t.as_str()), Some(t));
        }
        assert_eq!(ProductType::parse("vessel"), None);
        assert_eq!(ProductType::parse("Ingredient"), None);
    }
}
