//! Comida acompañante que se crea junto a una receta cuando el request pide
//! `also_create_meal`, más la fila de enlace comida ↔ receta.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::recipe::Recipe;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_by_user: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRecipe {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub recipe_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
}

impl Meal {
    /// Construye la comida homónima de `recipe` y su enlace. Ambos heredan el
    /// `created_at` de la receta, así toda la operación comparte timestamp.
    pub fn companion_for(recipe: &Recipe) -> (Meal, MealRecipe) {
        let meal = Meal { id: Uuid::new_v4(),
                          name: recipe.name.clone(),
                          description: recipe.description.clone(),
                          created_by_user: recipe.created_by_user.clone(),
                          created_at: recipe.created_at };
        let link = MealRecipe { id: Uuid::new_v4(),
                                meal_id: meal.id,
                                recipe_id: recipe.id,
                                created_at: recipe.created_at };
        (meal, link)
    }
}
