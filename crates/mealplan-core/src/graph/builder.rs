//! Construcción pura del grafo: payload de creación → `Recipe` con IDs,
//! back-references y referencias de producto resueltas. Sin I/O; todos los
//! `created_at` quedan en `None` hasta que el coordinador los sella.
use std::collections::BTreeSet;

use log::debug;
use uuid::Uuid;

use super::registry::StepOutputRegistry;
use super::resolver::{resolve_step, ResolutionReport};
use crate::errors::CoreError;
use crate::model::{Recipe, RecipeCreationInput, RecipeStep, RecipeStepCreationInput, RecipeStepIngredient,
                   RecipeStepInstrument, RecipeStepProduct};

/// Resultado del builder: el grafo listo para persistir.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeGraph {
    pub recipe: Recipe,
    pub also_create_meal: bool,
    pub report: ResolutionReport,
}

#[derive(Debug, Clone, Copy)]
pub struct RecipeGraphBuilder {
    id_source: fn() -> Uuid,
}

impl Default for RecipeGraphBuilder {
    fn default() -> Self { Self { id_source: Uuid::new_v4 } }
}

impl RecipeGraphBuilder {
    pub fn new() -> Self { Self::default() }

    /// Fuente de IDs para entidades sin identidad propia.
    pub fn with_id_source(id_source: fn() -> Uuid) -> Self { Self { id_source } }

    pub fn build(&self, input: RecipeCreationInput) -> Result<RecipeGraph, CoreError> {
        validate(&input)?;
        let next_id = self.id_source;
        let recipe_id = input.id.unwrap_or_else(next_id);

        let mut steps_in = input.steps;
        steps_in.sort_by_key(|s| s.index);
        let steps: Vec<RecipeStep> = steps_in.into_iter().map(|s| self.step(recipe_id, s)).collect();

        let mut recipe = Recipe { id: recipe_id,
                                  name: input.name,
                                  slug: input.slug,
                                  source: input.source,
                                  description: input.description,
                                  inspired_by_recipe_id: input.inspired_by_recipe_id,
                                  min_estimated_portions: input.min_estimated_portions,
                                  max_estimated_portions: input.max_estimated_portions,
                                  portion_name: input.portion_name,
                                  plural_portion_name: input.plural_portion_name,
                                  seal_of_approval: input.seal_of_approval,
                                  created_by_user: input.created_by_user,
                                  created_at: None,
                                  steps };

        let mut registry = StepOutputRegistry::new();
        let mut report = ResolutionReport::default();
        for position in 0..recipe.steps.len() {
            let index = recipe.steps[position].index;
            registry.register_all(&recipe.steps[position]);
            report.absorb(resolve_step(&mut recipe, index, &registry));
        }
        debug!("built recipe graph {} ({} steps, {} products registered, {} bindings, {} unresolved)",
               recipe.id,
               recipe.steps.len(),
               registry.len(),
               report.total_bound(),
               report.unresolved.len());

        Ok(RecipeGraph { recipe, also_create_meal: input.also_create_meal, report })
    }

    fn step(&self, recipe_id: Uuid, input: RecipeStepCreationInput) -> RecipeStep {
        let next_id = self.id_source;
        let step_id = input.id.unwrap_or_else(next_id);
        let products = input.products
                            .into_iter()
                            .map(|p| RecipeStepProduct { id: p.id.unwrap_or_else(next_id),
                                                         belongs_to_recipe_step: step_id,
                                                         name: p.name,
                                                         product_type: p.product_type,
                                                         measurement_unit_id: p.measurement_unit_id,
                                                         min_quantity: p.min_quantity,
                                                         max_quantity: p.max_quantity,
                                                         quantity_notes: p.quantity_notes,
                                                         compostable: p.compostable,
                                                         max_storage_duration_secs: p.max_storage_duration_secs,
                                                         min_storage_temperature_c: p.min_storage_temperature_c,
                                                         max_storage_temperature_c: p.max_storage_temperature_c,
                                                         created_at: None })
                            .collect();
        let ingredients = input.ingredients
                               .into_iter()
                               .map(|i| {
                                   let product_pointer = i.pointer();
                                   RecipeStepIngredient { id: i.id.unwrap_or_else(next_id),
                                                          belongs_to_recipe_step: step_id,
                                                          name: i.name,
                                                          ingredient_id: i.ingredient_id,
                                                          measurement_unit_id: i.measurement_unit_id,
                                                          min_quantity: i.min_quantity,
                                                          max_quantity: i.max_quantity,
                                                          quantity_notes: i.quantity_notes,
                                                          ingredient_notes: i.ingredient_notes,
                                                          optional: i.optional,
                                                          option_index: i.option_index,
                                                          requires_defrost: i.requires_defrost,
                                                          product_of_recipe_step: i.product_of_recipe_step,
                                                          recipe_step_product_id: i.recipe_step_product_id,
                                                          product_pointer,
                                                          created_at: None }
                               })
                               .collect();
        let instruments = input.instruments
                               .into_iter()
                               .map(|i| {
                                   let product_pointer = i.pointer();
                                   RecipeStepInstrument { id: i.id.unwrap_or_else(next_id),
                                                          belongs_to_recipe_step: step_id,
                                                          name: i.name,
                                                          instrument_id: i.instrument_id,
                                                          product_of_recipe_step: i.product_of_recipe_step,
                                                          recipe_step_product_id: i.recipe_step_product_id,
                                                          product_pointer,
                                                          notes: i.notes,
                                                          preference_rank: i.preference_rank,
                                                          optional: i.optional,
                                                          min_quantity: i.min_quantity,
                                                          max_quantity: i.max_quantity,
                                                          created_at: None }
                               })
                               .collect();

        RecipeStep { id: step_id,
                     belongs_to_recipe: recipe_id,
                     index: input.index,
                     preparation_id: input.preparation_id,
                     min_estimated_time_secs: input.min_estimated_time_secs,
                     max_estimated_time_secs: input.max_estimated_time_secs,
                     min_temperature_c: input.min_temperature_c,
                     max_temperature_c: input.max_temperature_c,
                     notes: input.notes,
                     explicit_instructions: input.explicit_instructions,
                     optional: input.optional,
                     created_at: None,
                     products,
                     ingredients,
                     instruments }
    }
}

fn validate(input: &RecipeCreationInput) -> Result<(), CoreError> {
    if input.name.trim().is_empty() {
        return Err(CoreError::InvalidInput("recipe name must not be blank".into()));
    }
    if input.created_by_user.trim().is_empty() {
        return Err(CoreError::InvalidInput("created_by_user must not be blank".into()));
    }
    let mut seen = BTreeSet::new();
    for step in &input.steps {
        if !seen.insert(step.index) {
            return Err(CoreError::DuplicateStepIndex(step.index));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RecipeStepIngredientCreationInput, RecipeStepProductCreationInput};

    fn nil_ids() -> Uuid { Uuid::nil() }

    #[test]
    fn rejects_blank_name_and_creator() {
        let b = RecipeGraphBuilder::new();
        assert!(matches!(b.build(RecipeCreationInput::new("  ", "u1")), Err(CoreError::InvalidInput(_))));
        assert!(matches!(b.build(RecipeCreationInput::new("pan", "")), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn rejects_duplicate_step_index() {
        let input = RecipeCreationInput::new("pan", "u1").with_step(RecipeStepCreationInput::new(2, "mix"))
                                                         .with_step(RecipeStepCreationInput::new(2, "bake"));
        assert_eq!(RecipeGraphBuilder::new().build(input).unwrap_err(), CoreError::DuplicateStepIndex(2));
    }

    #[test]
    fn sorts_steps_and_fills_back_references() {
        let input = RecipeCreationInput::new("pan", "u1")
            .with_step(RecipeStepCreationInput::new(5, "bake").with_ingredient(RecipeStepIngredientCreationInput::from_product("dough")))
            .with_step(RecipeStepCreationInput::new(1, "knead").with_product(RecipeStepProductCreationInput::ingredient("dough")));
        let graph = RecipeGraphBuilder::new().build(input).unwrap();
        let r = &graph.recipe;

        assert_eq!(r.steps.iter().map(|s| s.index).collect::<Vec<_>>(), vec![1, 5]);
        for s in &r.steps {
            assert_eq!(s.belongs_to_recipe, r.id);
        }
        let dough = &r.steps[0].products[0];
        assert_eq!(dough.belongs_to_recipe_step, r.steps[0].id);
        assert_eq!(r.steps[1].ingredients[0].recipe_step_product_id, Some(dough.id));
        assert!(r.creation_timestamps().iter().all(Option::is_none));
    }

    #[test]
    fn own_products_are_invisible_to_own_inputs() {
        let input = RecipeCreationInput::new("pan", "u1").with_step(RecipeStepCreationInput::new(0, "mix")
            .with_product(RecipeStepProductCreationInput::ingredient("batter"))
            .with_ingredient(RecipeStepIngredientCreationInput::from_product("batter")));
        let graph = RecipeGraphBuilder::new().build(input).unwrap();
        assert!(graph.recipe.steps[0].ingredients[0].recipe_step_product_id.is_none());
        assert_eq!(graph.report.unresolved, vec!["batter".to_string()]);
    }

    #[test]
    fn id_source_is_used_only_for_missing_ids() {
        let fixed = Uuid::new_v4();
        let mut input = RecipeCreationInput::new("pan", "u1").with_step(RecipeStepCreationInput::new(0, "mix"));
        input.id = Some(fixed);
        let graph = RecipeGraphBuilder::with_id_source(nil_ids).build(input).unwrap();
        assert_eq!(graph.recipe.id, fixed);
        assert_eq!(graph.recipe.steps[0].id, Uuid::nil());
    }
}
