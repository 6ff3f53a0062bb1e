#![allow(dead_code)]

use mealplan_persistence::config::DbConfig;
use mealplan_persistence::pg::{build_pool, PgPool, PgTransport, PoolProvider};
use once_cell::sync::Lazy;

pub static TEST_POOL: Lazy<Option<PgPool>> = Lazy::new(|| {
    if std::env::var("DATABASE_URL").is_err() {
        return None;
    }
    let cfg = match DbConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config de test inválida: {e}");
            return None;
        }
    };
    match build_pool(&cfg.url, 1, 2) {
        Ok(p) => Some(p),
        Err(e) => {
            eprintln!("No se pudo construir pool de test: {e}");
            None
        }
    }
});

pub fn with_pool<F, R>(f: F) -> Option<R>
    where F: FnOnce(&PgPool) -> R
{
    TEST_POOL.as_ref().map(f)
}

pub fn transport(pool: &PgPool) -> PgTransport<PoolProvider> { PgTransport::new(PoolProvider { pool: pool.clone() }) }
