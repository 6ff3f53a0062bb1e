//! Agregado `Recipe`: la raíz del grafo que se crea en una sola transacción.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::step::RecipeStep;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
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
    /// `None` mientras el grafo no se ha persistido.
    pub created_at: Option<DateTime<Utc>>,
    /// Ordenados por `index` ascendente.
    pub steps: Vec<RecipeStep>,
}

impl Recipe {
    pub fn find_step_by_index(&self, index: u32) -> Option<&RecipeStep> {
        self.steps.iter().find(|s| s.index == index)
    }

    pub fn find_step_by_index_mut(&mut self, index: u32) -> Option<&mut RecipeStep> {
        self.steps.iter_mut().find(|s| s.index == index)
    }

    pub fn find_step_by_id(&self, id: Uuid) -> Option<&RecipeStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Sella todas las entidades del grafo con el mismo instante de creación.
    pub fn stamp_created(&mut self, at: DateTime<Utc>) {
        self.created_at = Some(at);
        for step in &mut self.steps {
            step.stamp_created(at);
        }
    }

    /// Todos los `created_at` del grafo (receta, steps e hijos), en orden de
    /// escritura.
    pub fn creation_timestamps(&self) -> Vec<Option<DateTime<Utc>>> {
        let mut out = vec![self.created_at];
        for step in &self.steps {
            out.push(step.created_at);
            out.extend(step.products.iter().map(|p| p.created_at));
            out.extend(step.ingredients.iter().map(|i| i.created_at));
            out.extend(step.instruments.iter().map(|i| i.created_at));
        }
        out
    }
}
