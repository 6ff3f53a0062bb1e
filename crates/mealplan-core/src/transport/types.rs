use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::{Meal, MealRecipe, Recipe, RecipeStep, RecipeStepIngredient, RecipeStepInstrument, RecipeStepProduct};

/// Tipo de fila que el coordinador escribe. Su `Display` es el nombre de la
/// entidad en almacenamiento y sirve para identificar la etapa que falló.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowKind {
    Recipe,
    Step,
    Product,
    Ingredient,
    Instrument,
    Meal,
    MealRecipe,
}

impl RowKind {
    pub const ALL: [RowKind; 7] = [Self::Recipe,
                                   Self::Step,
                                   Self::Product,
                                   Self::Ingredient,
                                   Self::Instrument,
                                   Self::Meal,
                                   Self::MealRecipe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recipe => "recipe",
            Self::Step => "recipe_step",
            Self::Product => "recipe_step_product",
            Self::Ingredient => "recipe_step_ingredient",
            Self::Instrument => "recipe_step_instrument",
            Self::Meal => "meal",
            Self::MealRecipe => "meal_recipe",
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Una escritura de fila, prestando la entidad ya construida del grafo.
#[derive(Debug, Clone, Copy)]
pub enum RowWrite<'a> {
    Recipe(&'a Recipe),
    Step(&'a RecipeStep),
    Product(&'a RecipeStepProduct),
    Ingredient(&'a RecipeStepIngredient),
    Instrument(&'a RecipeStepInstrument),
    Meal(&'a Meal),
    MealRecipe(&'a MealRecipe),
}

impl<'a> RowWrite<'a> {
    pub fn kind(&self) -> RowKind {
        match self {
            Self::Recipe(_) => RowKind::Recipe,
            Self::Step(_) => RowKind::Step,
            Self::Product(_) => RowKind::Product,
            Self::Ingredient(_) => RowKind::Ingredient,
            Self::Instrument(_) => RowKind::Instrument,
            Self::Meal(_) => RowKind::Meal,
            Self::MealRecipe(_) => RowKind::MealRecipe,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::Recipe(r) => r.id,
            Self::Step(s) => s.id,
            Self::Product(p) => p.id,
            Self::Ingredient(i) => i.id,
            Self::Instrument(i) => i.id,
            Self::Meal(m) => m.id,
            Self::MealRecipe(l) => l.id,
        }
    }

    /// Filas que deben existir antes de esta (claves foráneas).
    pub fn references(&self) -> Vec<(RowKind, Uuid)> {
        match self {
            Self::Recipe(_) | Self::Meal(_) => Vec::new(),
            Self::Step(s) => vec![(RowKind::Recipe, s.belongs_to_recipe)],
            Self::Product(p) => vec![(RowKind::Step, p.belongs_to_recipe_step)],
            Self::Ingredient(i) => with_product(i.belongs_to_recipe_step, i.recipe_step_product_id),
            Self::Instrument(i) => with_product(i.belongs_to_recipe_step, i.recipe_step_product_id),
            Self::MealRecipe(l) => vec![(RowKind::Meal, l.meal_id), (RowKind::Recipe, l.recipe_id)],
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Recipe(r) => r.created_at,
            Self::Step(s) => s.created_at,
            Self::Product(p) => p.created_at,
            Self::Ingredient(i) => i.created_at,
            Self::Instrument(i) => i.created_at,
            Self::Meal(m) => m.created_at,
            Self::MealRecipe(l) => l.created_at,
        }
    }
}

fn with_product(step: Uuid, product: Option<Uuid>) -> Vec<(RowKind, Uuid)> {
    let mut refs = vec![(RowKind::Step, step)];
    if let Some(p) = product {
        refs.push((RowKind::Product, p));
    }
    refs
}
