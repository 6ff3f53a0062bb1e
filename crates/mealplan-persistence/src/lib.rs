//! mealplan-persistence
//!
//! Implementación Postgres (Diesel) del `Transport` de `mealplan-core` más
//! utilidades de conexión, migraciones y lectura del grafo persistido.
//!
//! Módulos:
//! - `pg`: pool, `PgTransport`, mapeo de filas y lector.
//! - `migrations`: runner embebido de migraciones Diesel.
//! - `config`: carga de configuración desde .env.
//! - `schema`: tablas Diesel.

pub mod config;
pub mod error;
pub mod migrations;
pub mod pg;
pub mod schema;

pub use config::{init_dotenv, DbConfig};
pub use error::PersistenceError;
pub use pg::{build_dev_pool_from_env, build_pool, transport_from_env, ConnectionProvider, PgPool, PgRecipeReader,
             PgTransport, PoolProvider};
