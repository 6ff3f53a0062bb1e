//! Pool y migraciones (requiere DATABASE_URL válido en entorno).

use diesel::connection::SimpleConnection;
use diesel::RunQueryDsl;
use mealplan_persistence::{build_pool, DbConfig};

#[derive(diesel::QueryableByName)]
struct TableCount {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    n: i64,
}

#[test]
fn pool_builds_and_migrations_create_tables() {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL no definido: omitiendo test");
        return;
    }
    let cfg = DbConfig::from_env().expect("config");
    // min > max se ajusta en vez de fallar
    let pool = build_pool(&cfg.url, 3, 1).expect("pool");
    let mut conn = pool.get().expect("conn");
    conn.batch_execute("SELECT 1;").expect("select 1");

    let count: TableCount = diesel::sql_query("SELECT count(*) AS n FROM information_schema.tables \
                                               WHERE table_schema = current_schema() AND table_name IN ('recipes','recipe_steps','recipe_step_products',\
                                               'recipe_step_ingredients','recipe_step_instruments','meals','meal_recipes')")
        .get_result(&mut conn)
        .expect("count tables");
    assert_eq!(count.n, 7);
}
