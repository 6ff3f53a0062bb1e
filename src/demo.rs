//! Receta de ejemplo: sopa de frijol en dos steps, donde el segundo consume
//! el producto del primero.
use mealplan_core::model::{RecipeCreationInput, RecipeStepCreationInput, RecipeStepIngredientCreationInput,
                           RecipeStepInstrumentCreationInput, RecipeStepProductCreationInput};

pub fn sopa_de_frijol(created_by_user: &str) -> RecipeCreationInput {
    let mut input = RecipeCreationInput::new("sopa de frijol", created_by_user);
    input.description = "Sopa de frijol pinto con cebolla".into();
    input.portion_name = "plato".into();
    input.plural_portion_name = "platos".into();
    input.min_estimated_portions = 4.0;

    let mut beans = RecipeStepIngredientCreationInput::from_catalog("pinto beans", "pinto-beans");
    beans.measurement_unit_id = "cup".into();
    beans.min_quantity = 2.0;
    let mut water = RecipeStepIngredientCreationInput::from_catalog("water", "water");
    water.measurement_unit_id = "cup".into();
    water.min_quantity = 6.0;
    let mut soaked = RecipeStepIngredientCreationInput::from_product("soaked pinto beans");
    soaked.measurement_unit_id = "cup".into();
    soaked.min_quantity = 4.0;

    let mut soak = RecipeStepCreationInput::new(0, "soak").with_ingredient(beans)
                                                          .with_ingredient(water)
                                                          .with_instrument(RecipeStepInstrumentCreationInput::from_catalog("bowl", "bowl"))
                                                          .with_product(RecipeStepProductCreationInput::ingredient("soaked pinto beans"));
    soak.min_estimated_time_secs = Some(8 * 3600);

    let mut simmer = RecipeStepCreationInput::new(1, "simmer").with_ingredient(soaked)
                                                              .with_ingredient(RecipeStepIngredientCreationInput::from_catalog("onion", "onion"))
                                                              .with_instrument(RecipeStepInstrumentCreationInput::from_catalog("pot", "pot"))
                                                              .with_product(RecipeStepProductCreationInput::ingredient("sopa de frijol"));
    simmer.min_estimated_time_secs = Some(90 * 60);
    simmer.explicit_instructions = "Hervir a fuego lento hasta que los frijoles estén suaves".into();

    input.with_step(soak).with_step(simmer)
}
