use mealplan_core::model::{RecipeCreationInput, RecipeStepCreationInput, RecipeStepIngredientCreationInput,
                           RecipeStepInstrumentCreationInput, RecipeStepProductCreationInput};
use mealplan_core::RecipeGraphBuilder;

fn sopa_de_frijol() -> RecipeCreationInput {
    RecipeCreationInput::new("sopa de frijol", "u1")
        .with_step(RecipeStepCreationInput::new(0, "soak")
            .with_ingredient(RecipeStepIngredientCreationInput::from_catalog("pinto beans", "ing-pinto"))
            .with_ingredient(RecipeStepIngredientCreationInput::from_catalog("water", "ing-water"))
            .with_instrument(RecipeStepInstrumentCreationInput::from_catalog("bowl", "ins-bowl"))
            .with_product(RecipeStepProductCreationInput::ingredient("soaked pinto beans")))
        .with_step(RecipeStepCreationInput::new(1, "simmer")
            .with_ingredient(RecipeStepIngredientCreationInput::from_product("soaked pinto beans"))
            .with_ingredient(RecipeStepIngredientCreationInput::from_catalog("onion", "ing-onion"))
            .with_instrument(RecipeStepInstrumentCreationInput::from_catalog("pot", "ins-pot"))
            .with_product(RecipeStepProductCreationInput::ingredient("sopa de frijol")))
}

#[test]
fn sopa_de_frijol_binds_soaked_beans_to_first_step() {
    let graph = RecipeGraphBuilder::new().build(sopa_de_frijol()).expect("valid input");
    let recipe = &graph.recipe;
    let soaked = recipe.find_step_by_index(0).unwrap().find_product_by_name("soaked pinto beans").unwrap();
    let simmer = recipe.find_step_by_index(1).unwrap();

    assert_eq!(simmer.ingredients[0].recipe_step_product_id, Some(soaked.id));
    assert!(simmer.ingredients[1].recipe_step_product_id.is_none());
    assert_eq!(graph.report.ingredients_bound, 1);
    assert_eq!(graph.report.instruments_bound, 0);
    assert!(graph.report.unresolved.is_empty());
    assert_eq!(recipe.find_step_by_id(simmer.id).map(|s| s.index), Some(1));
}

#[test]
fn nearest_preceding_step_wins() {
    let input = RecipeCreationInput::new("lasagna", "u1")
        .with_step(RecipeStepCreationInput::new(0, "cook").with_product(RecipeStepProductCreationInput::ingredient("sauce")))
        .with_step(RecipeStepCreationInput::new(1, "reduce").with_product(RecipeStepProductCreationInput::ingredient("sauce")))
        .with_step(RecipeStepCreationInput::new(2, "rest"))
        .with_step(RecipeStepCreationInput::new(3, "assemble")
            .with_ingredient(RecipeStepIngredientCreationInput::from_product("sauce")));
    let graph = RecipeGraphBuilder::new().build(input).unwrap();
    let r = &graph.recipe;
    let reduced = &r.find_step_by_index(1).unwrap().products[0];
    let first = &r.find_step_by_index(0).unwrap().products[0];

    let bound = r.find_step_by_index(3).unwrap().ingredients[0].recipe_step_product_id;
    assert_eq!(bound, Some(reduced.id));
    assert_ne!(bound, Some(first.id));
}

#[test]
fn unmatched_product_reference_stays_unset_without_error() {
    let input = RecipeCreationInput::new("pan", "u1")
        .with_step(RecipeStepCreationInput::new(0, "mix").with_product(RecipeStepProductCreationInput::ingredient("dough")))
        .with_step(RecipeStepCreationInput::new(1, "glaze")
            .with_ingredient(RecipeStepIngredientCreationInput::from_product("gravy")));
    let graph = RecipeGraphBuilder::new().build(input).unwrap();

    assert!(graph.recipe.steps[1].ingredients[0].recipe_step_product_id.is_none());
    assert_eq!(graph.report.unresolved, vec!["gravy".to_string()]);
}

#[test]
fn single_step_without_product_inputs_binds_nothing() {
    let input = RecipeCreationInput::new("toast", "u1")
        .with_step(RecipeStepCreationInput::new(0, "toast")
            .with_ingredient(RecipeStepIngredientCreationInput::from_catalog("bread", "ing-bread"))
            .with_product(RecipeStepProductCreationInput::ingredient("toast")));
    let graph = RecipeGraphBuilder::new().build(input).unwrap();
    assert_eq!(graph.report.total_bound(), 0);
    assert!(graph.report.unresolved.is_empty());
}

#[test]
fn instrument_binds_to_prepared_baking_sheet() {
    let input = RecipeCreationInput::new("cookies", "u1")
        .with_step(RecipeStepCreationInput::new(0, "line")
            .with_instrument(RecipeStepInstrumentCreationInput::from_catalog("baking sheet", "ins-sheet"))
            .with_product(RecipeStepProductCreationInput::instrument("lined baking sheet")))
        .with_step(RecipeStepCreationInput::new(1, "bake")
            .with_instrument(RecipeStepInstrumentCreationInput::from_product("lined baking sheet")));
    let graph = RecipeGraphBuilder::new().build(input).unwrap();
    let sheet = &graph.recipe.steps[0].products[0];

    assert_eq!(graph.recipe.steps[1].instruments[0].recipe_step_product_id, Some(sheet.id));
    assert_eq!(graph.report.instruments_bound, 1);
    assert_eq!(graph.report.ingredients_bound, 0);
}

#[test]
fn ingredient_and_instrument_passes_are_independent() {
    // mismo nombre en ambos tipos de entrada: cada pasada liga por su cuenta
    let input = RecipeCreationInput::new("pizza", "u1")
        .with_step(RecipeStepCreationInput::new(0, "heat").with_product(RecipeStepProductCreationInput::instrument("hot stone")))
        .with_step(RecipeStepCreationInput::new(1, "bake")
            .with_ingredient(RecipeStepIngredientCreationInput::from_product("hot stone"))
            .with_instrument(RecipeStepInstrumentCreationInput::from_product("hot stone")));
    let graph = RecipeGraphBuilder::new().build(input).unwrap();
    let stone = graph.recipe.steps[0].products[0].id;
    let bake = &graph.recipe.steps[1];

    assert_eq!(bake.ingredients[0].recipe_step_product_id, Some(stone));
    assert_eq!(bake.instruments[0].recipe_step_product_id, Some(stone));
}

#[test]
fn positional_reference_overrides_name_match() {
    let input = RecipeCreationInput::new("tacos", "u1")
        .with_step(RecipeStepCreationInput::new(0, "chop")
            .with_product(RecipeStepProductCreationInput::ingredient("onion"))
            .with_product(RecipeStepProductCreationInput::ingredient("cilantro")))
        .with_step(RecipeStepCreationInput::new(1, "fry").with_product(RecipeStepProductCreationInput::ingredient("onion")))
        .with_step(RecipeStepCreationInput::new(2, "serve")
            .with_ingredient(RecipeStepIngredientCreationInput::from_product("onion").pointing_at(0, 0))
            .with_ingredient(RecipeStepIngredientCreationInput::from_product("onion"))
            .with_ingredient(RecipeStepIngredientCreationInput::from_product("onion").pointing_at(2, 0)));
    let graph = RecipeGraphBuilder::new().build(input).unwrap();
    let raw_onion = graph.recipe.steps[0].products[0].id;
    let fried_onion = graph.recipe.steps[1].products[0].id;
    let serve = &graph.recipe.steps[2];

    assert_eq!(serve.ingredients[0].recipe_step_product_id, Some(raw_onion));
    assert_eq!(serve.ingredients[1].recipe_step_product_id, Some(fried_onion));
    // un puntero a su propio step no es válido: cae a la búsqueda por nombre
    assert_eq!(serve.ingredients[2].recipe_step_product_id, Some(fried_onion));
}

#[test]
fn building_twice_is_deterministic_for_fixed_ids() {
    let mut input = sopa_de_frijol();
    for (n, step) in input.steps.iter_mut().enumerate() {
        step.id = Some(uuid::Uuid::from_u128(100 + n as u128));
        for (m, p) in step.products.iter_mut().enumerate() {
            p.id = Some(uuid::Uuid::from_u128(200 + (n * 10 + m) as u128));
        }
    }
    let a = RecipeGraphBuilder::with_id_source(uuid::Uuid::nil).build(input.clone()).unwrap();
    let b = RecipeGraphBuilder::with_id_source(uuid::Uuid::nil).build(input).unwrap();
    assert_eq!(a, b);
}
