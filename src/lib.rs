//! MealPlan Rust Library
//!
//! Facade sobre los crates del workspace:
//! - `recipes`: modelo, resolución de referencias entre steps y coordinador
//!   transaccional (`mealplan-core`).
//! - `persistence`: transporte Postgres (`mealplan-persistence`).
//! - `config` / `errors`: configuración de aplicación y errores agregados.
//! - `demo`: payload de ejemplo usado por el binario demo.

pub mod config;
pub mod demo;
pub mod errors;

pub use mealplan_core as recipes;
pub use mealplan_persistence as persistence;

pub use config::AppConfig;
pub use errors::AppError;
pub use mealplan_core::{InMemoryTransport, Recipe, RecipeCreationError, RecipeCreationInput, RecipeCreator, Transport};
pub use mealplan_persistence::{PgTransport, PoolProvider};
