//! mealplan-core: creación de recetas como grafo de steps.
//!
//! Registro de productos por step, resolución de referencias entre steps,
//! construcción pura del grafo y coordinación transaccional de su escritura
//! sobre un `Transport` intercambiable (memoria o Postgres).
pub mod creation;
pub mod errors;
pub mod graph;
pub mod model;
pub mod transport;

pub use creation::RecipeCreator;
pub use errors::{CoreError, RecipeCreationError, TransportError};
pub use graph::{RecipeGraph, RecipeGraphBuilder, ResolutionReport, StepOutputRegistry};
pub use model::{Meal, MealRecipe, ProductType, Recipe, RecipeCreationInput, RecipeStep, RecipeStepCreationInput,
                RecipeStepIngredient, RecipeStepIngredientCreationInput, RecipeStepInstrument,
                RecipeStepInstrumentCreationInput, RecipeStepProduct, RecipeStepProductCreationInput};
pub use transport::{Executor, FailurePlan, InMemoryTransport, RowKind, RowWrite, Transport, UnitOfWork};
