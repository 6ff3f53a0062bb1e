//! Registro de productos por índice de step.
//!
//! Responde "¿qué producto con este nombre se produjo en el step más cercano
//! anterior a `before`?". No consume: un producto puede alimentar a muchos
//! steps posteriores.
use std::collections::BTreeMap;

use uuid::Uuid;

use crate::model::{ProductType, RecipeStep, RecipeStepProduct};

#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredProduct {
    pub id: Uuid,
    pub name: String,
    pub product_type: ProductType,
    pub step_index: u32,
}

#[derive(Debug, Default, Clone)]
pub struct StepOutputRegistry {
    by_step: BTreeMap<u32, Vec<RegisteredProduct>>,
}

impl StepOutputRegistry {
    pub fn new() -> Self { Self::default() }

    pub fn register(&mut self, step_index: u32, product: &RecipeStepProduct) {
        self.by_step.entry(step_index).or_default().push(RegisteredProduct { id: product.id,
                                                                              name: product.name.clone(),
                                                                              product_type: product.product_type,
                                                                              step_index });
    }

    pub fn register_all(&mut self, step: &RecipeStep) {
        for p in &step.products {
            self.register(step.index, p);
        }
    }

    /// Nombre exacto (sensible a mayúsculas). Dentro de un mismo step gana el
    /// primero registrado.
    pub fn lookup(&self, name: &str, before_step_index: u32) -> Option<&RegisteredProduct> {
        self.by_step
            .range(..before_step_index)
            .rev()
            .find_map(|(_, products)| products.iter().find(|p| p.name == name))
    }

    pub fn lookup_at(&self, step_index: u32, product_position: usize, before_step_index: u32) -> Option<&RegisteredProduct> {
        if step_index >= before_step_index {
            return None;
        }
        self.by_step.get(&step_index).and_then(|products| products.get(product_position))
    }

    pub fn len(&self) -> usize { self.by_step.values().map(Vec::len).sum() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str) -> RecipeStepProduct {
        RecipeStepProduct { id: Uuid::new_v4(),
                            belongs_to_recipe_step: Uuid::nil(),
                            name: name.into(),
                            product_type: ProductType::Ingredient,
                            measurement_unit_id: None,
                            min_quantity: None,
                            max_quantity: None,
                            quantity_notes: String::new(),
                            compostable: false,
                            max_storage_duration_secs: None,
                            min_storage_temperature_c: None,
                            max_storage_temperature_c: None,
                            created_at: None }
    }

    #[test]
    fn lookup_is_strictly_before_and_nearest() {
        let mut reg = StepOutputRegistry::new();
        let early = product("dough");
        let late = product("dough");
        reg.register(0, &early);
        reg.register(2, &late);

        assert_eq!(reg.lookup("dough", 0), None);
        assert_eq!(reg.lookup("dough", 2).map(|p| p.id), Some(early.id));
        assert_eq!(reg.lookup("dough", 3).map(|p| p.id), Some(late.id));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut reg = StepOutputRegistry::new();
        reg.register(0, &product("Dough"));
        assert!(reg.lookup("dough", 5).is_none());
    }

    #[test]
    fn first_registered_wins_within_a_step() {
        let mut reg = StepOutputRegistry::new();
        let a = product("stock");
        let b = product("stock");
        reg.register(1, &a);
        reg.register(1, &b);
        assert_eq!(reg.lookup("stock", 2).map(|p| p.id), Some(a.id));
    }

    #[test]
    fn lookup_at_requires_earlier_step_and_valid_position() {
        let mut reg = StepOutputRegistry::new();
        let a = product("a");
        reg.register(1, &a);
        assert_eq!(reg.lookup_at(1, 0, 2).map(|p| p.id), Some(a.id));
        assert!(reg.lookup_at(1, 0, 1).is_none());
        assert!(reg.lookup_at(1, 1, 2).is_none());
        assert!(reg.lookup_at(0, 0, 2).is_none());
    }
}
