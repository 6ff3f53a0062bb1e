//! Resolución de entradas `product_of_recipe_step`.
//!
//! Para cada ingrediente o instrumento que declara venir de un step anterior
//! y aún no tiene `recipe_step_product_id`, se liga:
//! 1. al producto apuntado por su referencia posicional, si existe y es de un
//!    step anterior;
//! 2. si no, al producto homónimo del step anterior más cercano.
//!
//! Sin match la entrada queda sin ligar; no es un error (se registra con
//! `warn!`). Ingredientes e instrumentos se resuelven en pasadas separadas.
use log::{debug, warn};
use uuid::Uuid;

use super::registry::StepOutputRegistry;
use crate::model::{ProductPointer, Recipe, RecipeStepIngredient, RecipeStepInstrument};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolutionReport {
    pub ingredients_bound: usize,
    pub instruments_bound: usize,
    /// Nombres de entradas que quedaron sin ligar, en orden de aparición.
    pub unresolved: Vec<String>,
}

impl ResolutionReport {
    pub fn total_bound(&self) -> usize { self.ingredients_bound + self.instruments_bound }

    pub fn absorb(&mut self, other: ResolutionReport) {
        self.ingredients_bound += other.ingredients_bound;
        self.instruments_bound += other.instruments_bound;
        self.unresolved.extend(other.unresolved);
    }
}

trait ProductInput {
    fn name(&self) -> &str;
    fn wants_product(&self) -> bool;
    fn bound(&self) -> Option<Uuid>;
    fn pointer(&self) -> Option<ProductPointer>;
    fn bind(&mut self, product_id: Uuid);
}

impl ProductInput for RecipeStepIngredient {
    fn name(&self) -> &str { &self.name }
    fn wants_product(&self) -> bool { self.product_of_recipe_step }
    fn bound(&self) -> Option<Uuid> { self.recipe_step_product_id }
    fn pointer(&self) -> Option<ProductPointer> { self.product_pointer }
    fn bind(&mut self, product_id: Uuid) { self.recipe_step_product_id = Some(product_id); }
}

impl ProductInput for RecipeStepInstrument {
    fn name(&self) -> &str { &self.name }
    fn wants_product(&self) -> bool { self.product_of_recipe_step }
    fn bound(&self) -> Option<Uuid> { self.recipe_step_product_id }
    fn pointer(&self) -> Option<ProductPointer> { self.product_pointer }
    fn bind(&mut self, product_id: Uuid) { self.recipe_step_product_id = Some(product_id); }
}

fn resolve_inputs<I: ProductInput>(inputs: &mut [I],
                                   step_index: u32,
                                   registry: &StepOutputRegistry,
                                   what: &str,
                                   unresolved: &mut Vec<String>)
                                   -> usize {
    let mut bound = 0;
    for input in inputs.iter_mut().filter(|i| i.wants_product() && i.bound().is_none()) {
        let by_position = input.pointer()
                               .and_then(|p| registry.lookup_at(p.step_index, p.product_position, step_index));
        match by_position.or_else(|| registry.lookup(input.name(), step_index)) {
            Some(product) => {
                debug!("step {step_index}: {what} '{}' <- product {} of step {}",
                       input.name(),
                       product.id,
                       product.step_index);
                input.bind(product.id);
                bound += 1;
            }
            None => {
                warn!("step {step_index}: {what} '{}' has no preceding product to bind", input.name());
                unresolved.push(input.name().to_string());
            }
        }
    }
    bound
}

pub fn resolve_ingredients(ingredients: &mut [RecipeStepIngredient],
                           step_index: u32,
                           registry: &StepOutputRegistry)
                           -> ResolutionReport {
    let mut report = ResolutionReport::default();
    report.ingredients_bound = resolve_inputs(ingredients, step_index, registry, "ingredient", &mut report.unresolved);
    report
}

pub fn resolve_instruments(instruments: &mut [RecipeStepInstrument],
                           step_index: u32,
                           registry: &StepOutputRegistry)
                           -> ResolutionReport {
    let mut report = ResolutionReport::default();
    report.instruments_bound = resolve_inputs(instruments, step_index, registry, "instrument", &mut report.unresolved);
    report
}

/// Resuelve las entradas del step con índice `step_index`. Un índice
/// inexistente devuelve un reporte vacío.
pub fn resolve_step(recipe: &mut Recipe, step_index: u32, registry: &StepOutputRegistry) -> ResolutionReport {
    let Some(step) = recipe.find_step_by_index_mut(step_index) else {
        return ResolutionReport::default();
    };
    let mut report = resolve_ingredients(&mut step.ingredients, step_index, registry);
    report.absorb(resolve_instruments(&mut step.instruments, step_index, registry));
    report
}
