//! Demo: crea la receta "sopa de frijol". Con el feature `pg_demo` y
//! DATABASE_URL escribe en Postgres; si no, en el transporte en memoria.
use log::info;
use mealplan_rust::recipes::RowKind;
use mealplan_rust::{demo, AppConfig, AppError, InMemoryTransport, Recipe, RecipeCreator};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("[mealplan-demo] {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cfg = AppConfig::from_env()?;
    let mut input = demo::sopa_de_frijol("demo-user");
    input.also_create_meal |= cfg.also_create_meal;

    #[cfg(feature = "pg_demo")]
    if let Some(db) = &cfg.database {
        use mealplan_rust::persistence::build_pool;
        use mealplan_rust::{PgTransport, PoolProvider};

        let pool = build_pool(&db.url, db.min_connections, db.max_connections)?;
        let mut creator = RecipeCreator::new(PgTransport::new(PoolProvider { pool }));
        let recipe = creator.create_recipe(input)?;
        summarize(&recipe);
        return Ok(());
    }

    let mut creator = RecipeCreator::new(InMemoryTransport::new());
    let recipe = creator.create_recipe(input)?;
    summarize(&recipe);
    let t = creator.transport();
    info!("in-memory rows: {} ({} steps, {} meals)",
          t.row_count(),
          t.rows_of(RowKind::Step).len(),
          t.rows_of(RowKind::Meal).len());
    Ok(())
}

fn summarize(recipe: &Recipe) {
    println!("receta {} '{}' creada ({} steps)", recipe.id, recipe.name, recipe.steps.len());
    for step in &recipe.steps {
        for ing in step.ingredients.iter().filter(|i| i.product_of_recipe_step) {
            match ing.recipe_step_product_id {
                Some(pid) => println!("  step {}: '{}' <- producto {pid}", step.index, ing.name),
                None => println!("  step {}: '{}' sin producto previo", step.index, ing.name),
            }
        }
    }
}
